use crate::core::mass::{center_of_mass, total_inertia};
use crate::simulation::FlipSimulator;

/// A synchronous probe that extracts a scalar value from a running flip.
///
/// Probes see the state between steps: slice positions are already reflected
/// for the next step, so quantities depending on them are recomputed here.
pub trait Probe {
    fn name(&self) -> &str;
    fn measure(&self, sim: &FlipSimulator) -> f64;
}

/// The probes reported on request and at the end of every run.
pub fn standard() -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(WaterMassProbe),
        Box::new(CenterOfMassProbe),
        Box::new(InertiaProbe),
        Box::new(KineticEnergyProbe),
    ]
}

pub struct WaterMassProbe;

impl Probe for WaterMassProbe {
    fn name(&self) -> &str {
        "Water Mass"
    }

    fn measure(&self, sim: &FlipSimulator) -> f64 {
        sim.water().water_mass()
    }
}

pub struct CenterOfMassProbe;

impl Probe for CenterOfMassProbe {
    fn name(&self) -> &str {
        "Center Of Mass"
    }

    fn measure(&self, sim: &FlipSimulator) -> f64 {
        center_of_mass(
            &sim.water().q,
            sim.bottle_fraction(),
            sim.config().bottle_height,
        )
    }
}

pub struct InertiaProbe;

impl Probe for InertiaProbe {
    fn name(&self) -> &str {
        "Total Inertia"
    }

    fn measure(&self, sim: &FlipSimulator) -> f64 {
        let com = CenterOfMassProbe.measure(sim);
        total_inertia(sim.config(), &sim.water().q, com, sim.water_mass())
    }
}

pub struct KineticEnergyProbe;

impl Probe for KineticEnergyProbe {
    fn name(&self) -> &str {
        "Kinetic Energy"
    }

    fn measure(&self, sim: &FlipSimulator) -> f64 {
        // 1. Rotational T_rot = 0.5 * L² / I, with ω = L / I for the current layout
        let inertia = InertiaProbe.measure(sim);
        let l = sim.angular_momentum();
        let rotational = 0.5 * l * l / inertia;

        // 2. Axial slice motion T = 0.5 * m * v^2
        let water = sim.water();
        let axial: f64 = water
            .v
            .iter()
            .map(|v| 0.5 * water.slice_mass * v * v)
            .sum();

        rotational + axial
    }
}

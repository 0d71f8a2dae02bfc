use crate::core::state::WaterColumn;
use crate::laws::registry::LawRegistry;

pub mod constraints;
pub mod propagator;

use propagator::Propagator;

/// Below this |ω| (rad/s) the bottle frame is treated as not rotating.
pub const OMEGA_EPSILON: f64 = 1e-6;

/// Bottle quantities every slice sees during one step.
///
/// ω, the center of mass and the tilt are frozen over the step; they change
/// slowly compared to `dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatingFrame {
    /// Angular velocity solved for this step (rad/s).
    pub omega: f64,
    /// Combined axial center of mass (m).
    pub center_of_mass: f64,
    /// Gravity projected on the bottle axis, g·cos(θ) (m/s²).
    pub axial_gravity: f64,
    /// Linear drag rate γ = α / slice mass (1/s).
    pub drag_rate: f64,
}

impl RotatingFrame {
    pub fn new(
        omega: f64,
        center_of_mass: f64,
        angle: f64,
        gravity: f64,
        drag: f64,
        slice_mass: f64,
    ) -> Self {
        let drag_rate = if drag == 0.0 { 0.0 } else { drag / slice_mass };
        Self {
            omega,
            center_of_mass,
            axial_gravity: gravity * angle.cos(),
            drag_rate,
        }
    }
}

/// Which solution of the slice equation of motion a step uses.
///
/// a = -ω²(z - c) - g·cos(θ) - γ·v
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// No drag: velocity-Verlet on the conservative laws.
    Undamped,
    /// Drag with |ω| < `OMEGA_EPSILON`: exponential decay under constant forcing.
    StillFrame,
    /// Drag in a rotating frame: damped, centripetally forced oscillator.
    Rotating,
}

impl Regime {
    pub fn select(frame: &RotatingFrame) -> Self {
        if frame.drag_rate == 0.0 {
            Regime::Undamped
        } else if frame.omega.abs() < OMEGA_EPSILON {
            Regime::StillFrame
        } else {
            Regime::Rotating
        }
    }
}

/// Advances every slice of the water column by one step.
pub trait SliceIntegrator {
    fn advance(&self, column: &mut WaterColumn, frame: &RotatingFrame, dt: f64);
}

/// Velocity-Verlet without drag, exact closed forms with drag.
///
/// With drag the slice equation is linear with constant coefficients over a
/// step, so it is solved exactly instead of being sub-stepped.
pub struct SemiAnalytic {
    laws: LawRegistry,
}

impl Default for SemiAnalytic {
    fn default() -> Self {
        Self::new()
    }
}

impl SemiAnalytic {
    pub fn new() -> Self {
        Self {
            laws: LawRegistry::rotating_frame(),
        }
    }

    fn velocity_verlet(&self, column: &mut WaterColumn, frame: &RotatingFrame, dt: f64) {
        // Compute accelerations a(t)
        let mut accel: Vec<f64> = column
            .q
            .iter()
            .map(|&z| self.laws.acceleration(z, frame))
            .collect();

        // 1. Half Kick v += 0.5 * a * dt
        for (v, a) in column.v.iter_mut().zip(accel.iter()) {
            *v += 0.5 * a * dt;
        }

        // 2. Drift q += v * dt
        for (q, v) in column.q.iter_mut().zip(column.v.iter()) {
            *q += v * dt;
        }

        // 3. Accelerations a(t+dt) at the new positions
        for (a, &z) in accel.iter_mut().zip(column.q.iter()) {
            *a = self.laws.acceleration(z, frame);
        }

        // 4. Half Kick v += 0.5 * new_a * dt
        for (v, a) in column.v.iter_mut().zip(accel.iter()) {
            *v += 0.5 * a * dt;
        }
    }
}

impl SliceIntegrator for SemiAnalytic {
    fn advance(&self, column: &mut WaterColumn, frame: &RotatingFrame, dt: f64) {
        match Regime::select(frame) {
            Regime::Undamped => self.velocity_verlet(column, frame, dt),
            Regime::StillFrame => still_frame(column, frame, dt),
            Regime::Rotating => rotating(column, frame, dt),
        }
    }
}

/// v' = -γv - F, solved exactly:
/// v₁ = v₀e^{-γdt} - F(1 - e^{-γdt})/γ
/// z₁ = z₀ + v₀(1 - e^{-γdt})/γ - F(dt - (1 - e^{-γdt})/γ)/γ
fn still_frame(column: &mut WaterColumn, frame: &RotatingFrame, dt: f64) {
    let gamma = frame.drag_rate;
    let forcing = frame.axial_gravity;

    let decay = (-gamma * dt).exp();
    let impulse = -(-gamma * dt).exp_m1() / gamma;
    let step = (dt - impulse) / gamma;

    for (q, v) in column.q.iter_mut().zip(column.v.iter_mut()) {
        let v0 = *v;
        *q += v0 * impulse - forcing * step;
        *v = v0 * decay - forcing * impulse;
    }
}

/// u'' + γu' + ω²u = -F with u = z - c, solved exactly through the impulse
/// response h and the step response D of the homogeneous operator.
fn rotating(column: &mut WaterColumn, frame: &RotatingFrame, dt: f64) {
    let gamma = frame.drag_rate;
    let omega_sq = frame.omega * frame.omega;
    let center = frame.center_of_mass;
    let forcing = frame.axial_gravity;

    let Propagator { impulse, step } = Propagator::new(gamma, omega_sq, dt);
    let position_gain = 1.0 - omega_sq * step;
    let velocity_gain = 1.0 - gamma * impulse - omega_sq * step;

    for (q, v) in column.q.iter_mut().zip(column.v.iter_mut()) {
        let u0 = *q - center;
        let v0 = *v;
        *q = center + u0 * position_gain + v0 * impulse - forcing * step;
        *v = v0 * velocity_gain - omega_sq * u0 * impulse - forcing * impulse;
    }
}

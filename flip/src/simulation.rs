use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, PhysicalConfig, SimulationParameters};
use crate::control::{CommandQueue, Progress, SimCommand};
use crate::core::mass::{bottle_fraction, center_of_mass, total_inertia};
use crate::core::solve::constraints::{AxialWalls, Constraint};
use crate::core::solve::{RotatingFrame, SemiAnalytic, SliceIntegrator};
use crate::core::state::{BottleState, WaterColumn};
use crate::investigation::probe::{self, Probe};

/// Macroscopic observables at the start of one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// k·dt (s)
    pub time: f64,
    /// Tilt angle (rad)
    pub angle: f64,
    /// Angular velocity solved from the conserved angular momentum (rad/s)
    pub omega: f64,
    /// Combined axial center of mass (m)
    pub center_of_mass: f64,
    /// Total rotational inertia the angular velocity was solved against (kg·m²)
    pub inertia: f64,
}

impl Snapshot {
    pub fn angular_momentum(&self) -> f64 {
        self.inertia * self.omega
    }
}

/// Append-only record of a run, one snapshot per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    snapshots: Vec<Snapshot>,
}

impl Trajectory {
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(steps),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn get(&self, step: usize) -> Option<&Snapshot> {
        self.snapshots.get(step)
    }

    /// I·ω recorded at `step`.
    pub fn angular_momentum(&self, step: usize) -> Option<f64> {
        self.snapshots.get(step).map(Snapshot::angular_momentum)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn as_slice(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

impl IntoIterator for Trajectory {
    type Item = Snapshot;
    type IntoIter = std::vec::IntoIter<Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

/// Fixed-step flip of a partially filled bottle.
///
/// Each step: center of mass and inertia from the current slices, ω = L / I,
/// record, integrate the slices in the frozen rotating frame, reflect them
/// off the base and the cap, then advance the tilt by ω·dt.
pub struct FlipSimulator {
    config: PhysicalConfig,
    params: SimulationParameters,
    water: WaterColumn,
    bottle: BottleState,
    water_mass: f64,
    bottle_fraction: f64,
    /// L = I₀·ω₀, fixed for the run.
    angular_momentum: f64,
    integrator: SemiAnalytic,
    walls: AxialWalls,
    trajectory: Trajectory,
    previous: Vec<f64>,
    step_index: usize,
    total_steps: usize,
}

impl FlipSimulator {
    pub fn new(
        config: &PhysicalConfig,
        params: &SimulationParameters,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        params.validate()?;

        let water_mass = params.water_mass(config);
        let fill_height = params.filling_fraction * config.bottle_height;
        let water = WaterColumn::at_rest(params.slices, fill_height, water_mass);
        let fraction = bottle_fraction(config.bottle_mass, water_mass);

        let com = center_of_mass(&water.q, fraction, config.bottle_height);
        let inertia = total_inertia(config, &water.q, com, water_mass);
        let angular_momentum = inertia * params.initial_omega;
        let total_steps = params.step_count();

        tracing::info!(
            target: "flip",
            slices = params.slices,
            water_mass,
            steps = total_steps,
            angular_momentum,
            "flip simulation initialized"
        );

        Ok(Self {
            config: *config,
            params: *params,
            previous: Vec::with_capacity(water.len()),
            water,
            bottle: BottleState {
                angle: params.initial_angle,
                omega: params.initial_omega,
                t: 0.0,
            },
            water_mass,
            bottle_fraction: fraction,
            angular_momentum,
            integrator: SemiAnalytic::new(),
            walls: AxialWalls::new(0.0, config.bottle_height, params.restitution),
            trajectory: Trajectory::with_capacity(total_steps),
            step_index: 0,
            total_steps,
        })
    }

    /// Runs every remaining step and hands back the trajectory.
    pub fn run(mut self) -> Trajectory {
        while self.step().is_some() {}
        self.finish()
    }

    /// Like `run`, draining `control` between steps. A `Stop` ends the run
    /// once the step in flight is recorded.
    pub fn run_with(mut self, control: &CommandQueue) -> Trajectory {
        'run: while !self.is_done() {
            for command in control.pending() {
                match command {
                    SimCommand::Stop => {
                        tracing::info!(target: "flip", step = self.step_index, "stop requested");
                        break 'run;
                    }
                    SimCommand::Report => self.report(),
                    SimCommand::Progress(reply) => {
                        let _ = reply.send(self.progress());
                    }
                }
            }
            self.step();
        }
        self.finish()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            steps_taken: self.step_index,
            total_steps: self.total_steps,
            latest: self.trajectory.last().copied(),
        }
    }

    /// Advances one step. Returns the snapshot recorded for it, `None` once
    /// the configured time span is covered.
    pub fn step(&mut self) -> Option<Snapshot> {
        if self.is_done() {
            return None;
        }

        let dt = self.params.dt;
        let time = self.step_index as f64 * dt;

        // Mass distribution from the reflected positions of the previous step
        let com = center_of_mass(&self.water.q, self.bottle_fraction, self.config.bottle_height);
        let inertia = total_inertia(&self.config, &self.water.q, com, self.water_mass);

        // ω is solved, never integrated
        let omega = self.angular_momentum / inertia;
        self.bottle.omega = omega;
        self.bottle.t = time;

        let snapshot = Snapshot {
            time,
            angle: self.bottle.angle,
            omega,
            center_of_mass: com,
            inertia,
        };

        self.previous.clear();
        self.previous.extend_from_slice(&self.water.q);

        // An empty bottle has no water to move.
        if self.water_mass > 0.0 {
            let frame = RotatingFrame::new(
                omega,
                com,
                self.bottle.angle,
                self.config.gravity,
                self.params.drag,
                self.water.slice_mass,
            );
            self.integrator.advance(&mut self.water, &frame, dt);
        }

        let bounces = self.walls.project(&mut self.water, &self.previous);

        self.bottle.angle += omega * dt;

        tracing::trace!(
            target: "flip",
            step = self.step_index,
            time,
            omega,
            com,
            bounces,
            "step"
        );

        self.trajectory.push(snapshot);
        self.step_index += 1;
        Some(snapshot)
    }

    pub fn is_done(&self) -> bool {
        self.step_index >= self.total_steps
    }

    pub fn steps_taken(&self) -> usize {
        self.step_index
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Conserved angular momentum of the run.
    pub fn angular_momentum(&self) -> f64 {
        self.angular_momentum
    }

    pub fn water(&self) -> &WaterColumn {
        &self.water
    }

    pub fn bottle(&self) -> &BottleState {
        &self.bottle
    }

    pub fn config(&self) -> &PhysicalConfig {
        &self.config
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn water_mass(&self) -> f64 {
        self.water_mass
    }

    pub fn bottle_fraction(&self) -> f64 {
        self.bottle_fraction
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    fn report(&self) {
        for probe in probe::standard() {
            tracing::debug!(
                target: "flip",
                step = self.step_index,
                probe = probe.name(),
                value = probe.measure(self),
                "probe"
            );
        }
    }

    fn finish(self) -> Trajectory {
        self.report();
        tracing::info!(
            target: "flip",
            steps = self.step_index,
            final_angle = self.bottle.angle,
            "flip simulation finished"
        );
        self.trajectory
    }
}

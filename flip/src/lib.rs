//! Flip dynamics of a partially filled bottle.
//!
//! The bottle is a rigid body spinning about a transverse axis through the
//! combined center of mass; the water is a 1D column of point-mass slices
//! sliding along the bottle axis. Angular momentum is conserved: ω is solved
//! from it every step as the water redistributes.

pub mod core {
    pub mod mass;
    pub mod math;
    pub mod solve;
    pub mod state;
}

pub mod laws {
    pub mod classical;
    pub mod registry;
}

pub mod investigation {
    pub mod probe;
}

pub mod config;
pub mod control;
pub mod simulation;

pub use config::{ConfigError, PhysicalConfig, Scenario, SimulationParameters};
pub use simulation::{FlipSimulator, Snapshot, Trajectory};

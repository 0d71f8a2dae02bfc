//! Configuration for a bottle flip run.
//!
//! - [`PhysicalConfig`]       – bottle geometry, masses and gravity
//! - [`SimulationParameters`] – fill level, discretization and initial conditions
//! - [`Scenario`]             – both of the above, as loaded from a RON file
//!
//! Every value is immutable once a run starts. `validate` is called by the
//! simulator before the first step; the first offending parameter is reported.
//!
//! ```ron
//! (
//!     physical: (
//!         bottle_mass: 0.2,
//!         bottle_radius: 0.04,
//!         bottle_height: 0.25,
//!         water_mass_max: 0.5,
//!         gravity: 9.81,
//!     ),
//!     simulation: (
//!         filling_fraction: 0.4,
//!         slices: 50,
//!         total_time: 1.2,
//!         dt: 0.001,
//!         initial_omega: 30.0,
//!         initial_angle: 1.3089969389957472,
//!         restitution: 0.2,
//!         drag: 0.02,
//!     ),
//! )
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical constants of the bottle. SI units throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConfig {
    /// Mass of the empty bottle (kg)
    pub bottle_mass: f64,
    /// Radius of the cylindrical shell (m)
    pub bottle_radius: f64,
    /// Axial length of the bottle (m)
    pub bottle_height: f64,
    /// Mass of water in a completely full bottle (kg)
    pub water_mass_max: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
}

impl Default for PhysicalConfig {
    fn default() -> Self {
        Self {
            bottle_mass: 0.2,
            bottle_radius: 0.04,
            bottle_height: 0.25,
            water_mass_max: 0.5,
            gravity: 9.81,
        }
    }
}

impl PhysicalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("bottle_mass", self.bottle_mass)?;
        positive("bottle_radius", self.bottle_radius)?;
        positive("bottle_height", self.bottle_height)?;
        positive("water_mass_max", self.water_mass_max)?;
        finite("gravity", self.gravity)?;
        Ok(())
    }
}

/// Per-run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Fraction of `water_mass_max` in the bottle, in [0, 1]
    pub filling_fraction: f64,
    /// Number of point-mass water slices
    pub slices: usize,
    /// Simulated time span (s)
    pub total_time: f64,
    /// Fixed step size (s)
    pub dt: f64,
    /// Angular velocity at release (rad/s)
    pub initial_omega: f64,
    /// Tilt angle at release (rad)
    pub initial_angle: f64,
    /// Fraction of slice speed kept after hitting the base or the cap, in [0, 1]
    pub restitution: f64,
    /// Linear drag coefficient α (kg/s); the per-slice rate is α / slice mass
    pub drag: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            filling_fraction: 0.4,
            slices: 50,
            total_time: 1.2,
            dt: 1e-3,
            initial_omega: 30.0,
            initial_angle: 75.0_f64.to_radians(),
            restitution: 0.2,
            drag: 0.02,
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("filling_fraction", self.filling_fraction)?;
        if self.slices == 0 {
            return Err(ConfigError::NoSlices);
        }
        non_negative("total_time", self.total_time)?;
        positive("dt", self.dt)?;
        finite("initial_omega", self.initial_omega)?;
        finite("initial_angle", self.initial_angle)?;
        unit_interval("restitution", self.restitution)?;
        non_negative("drag", self.drag)?;
        Ok(())
    }

    /// Number of recorded steps: `floor(total_time / dt) + 1`.
    pub fn step_count(&self) -> usize {
        (self.total_time / self.dt).floor() as usize + 1
    }

    /// Water mass for this fill level.
    pub fn water_mass(&self, physical: &PhysicalConfig) -> f64 {
        self.filling_fraction * physical.water_mass_max
    }
}

/// A complete run description, the unit a scenario file holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub physical: PhysicalConfig,
    pub simulation: SimulationParameters,
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physical.validate()?;
        self.simulation.validate()
    }
}

/// A configuration value that cannot start a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite { parameter: &'static str, value: f64 },
    NonPositive { parameter: &'static str, value: f64 },
    Negative { parameter: &'static str, value: f64 },
    OutsideUnitInterval { parameter: &'static str, value: f64 },
    NoSlices,
}

impl ConfigError {
    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            ConfigError::NonFinite { parameter, .. }
            | ConfigError::NonPositive { parameter, .. }
            | ConfigError::Negative { parameter, .. }
            | ConfigError::OutsideUnitInterval { parameter, .. } => parameter,
            ConfigError::NoSlices => "slices",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { parameter, value } => {
                write!(f, "{parameter} must be finite, got {value}")
            }
            ConfigError::NonPositive { parameter, value } => {
                write!(f, "{parameter} must be positive, got {value}")
            }
            ConfigError::Negative { parameter, value } => {
                write!(f, "{parameter} must not be negative, got {value}")
            }
            ConfigError::OutsideUnitInterval { parameter, value } => {
                write!(f, "{parameter} must lie in [0, 1], got {value}")
            }
            ConfigError::NoSlices => write!(f, "slices must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn finite(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { parameter, value })
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(parameter, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { parameter, value })
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(parameter, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { parameter, value })
    }
}

fn unit_interval(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(parameter, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutsideUnitInterval { parameter, value })
    }
}

use crate::core::math::ad::Dual;
use crate::core::solve::RotatingFrame;

use super::classical::{AxialGravity, Centripetal};

/// A Physical Law acting on a single water slice in the rotating bottle frame.
///
/// Laws are defined via their **specific potential energy** $V(z)$ (energy per
/// unit slice mass) along the bottle axis. The integrator obtains the
/// acceleration $a = -dV/dz$ by evaluating the potential on a dual number
/// seeded at the slice position.
///
/// Slices do not interact, so every potential depends on one coordinate only
/// plus the frame quantities of the current step.
pub trait Law {
    /// Specific potential energy of a slice at axial position `z`.
    fn potential(&self, z: Dual, frame: &RotatingFrame) -> Dual;
}

/// A registry that aggregates multiple laws.
/// $V_{total} = \sum V_i$
pub struct LawRegistry {
    laws: Vec<Box<dyn Law>>,
}

impl Default for LawRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LawRegistry {
    pub fn new() -> Self {
        Self { laws: Vec::new() }
    }

    /// The conservative part of the slice dynamics: centripetal restoring
    /// well about the center of mass plus the axial gravity projection.
    pub fn rotating_frame() -> Self {
        let mut registry = Self::new();
        registry.add(Centripetal);
        registry.add(AxialGravity);
        registry
    }

    pub fn add(&mut self, law: impl Law + 'static) {
        self.laws.push(Box::new(law));
    }

    pub fn len(&self) -> usize {
        self.laws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }

    pub fn potential(&self, z: Dual, frame: &RotatingFrame) -> Dual {
        let mut total = Dual::constant(0.0);
        for law in &self.laws {
            total = total + law.potential(z, frame);
        }
        total
    }

    /// Acceleration of a slice at `z`: $a = -dV/dz$.
    pub fn acceleration(&self, z: f64, frame: &RotatingFrame) -> f64 {
        -self.potential(Dual::variable(z), frame).der
    }
}

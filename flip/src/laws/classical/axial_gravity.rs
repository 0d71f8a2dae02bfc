use crate::core::math::ad::Dual;
use crate::core::solve::RotatingFrame;
use crate::laws::registry::Law;

/// Gravity projected on the bottle axis: V = g * cos(θ) * z
///
/// Uniform along the column; the tilt is frozen for the duration of a step.
pub struct AxialGravity;

impl Law for AxialGravity {
    fn potential(&self, z: Dual, frame: &RotatingFrame) -> Dual {
        z.scale(frame.axial_gravity)
    }
}

use crate::core::math::ad::Dual;
use crate::core::solve::RotatingFrame;
use crate::laws::registry::Law;

/// Rotating-frame restoring well about the combined center of mass:
/// V = 0.5 * ω² * (z - c)²
pub struct Centripetal;

impl Law for Centripetal {
    fn potential(&self, z: Dual, frame: &RotatingFrame) -> Dual {
        let offset = z - Dual::constant(frame.center_of_mass);
        offset.square().scale(0.5 * frame.omega * frame.omega)
    }
}

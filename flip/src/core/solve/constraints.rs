use crate::core::state::WaterColumn;

/// A geometric constraint on the water column.
pub trait Constraint {
    /// Projects the column back into its admissible region.
    /// Modifies positions (q) and velocities (v); `previous` holds the
    /// positions from before the step. Returns the number of slices touched.
    fn project(&self, column: &mut WaterColumn, previous: &[f64]) -> usize;
}

/// The base and the cap of the bottle, as seen along its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxialWalls {
    pub l_min: f64,
    pub l_max: f64,
    pub restitution: f64,
}

impl AxialWalls {
    pub fn new(l_min: f64, l_max: f64, restitution: f64) -> Self {
        Self {
            l_min,
            l_max,
            restitution,
        }
    }
}

impl Constraint for AxialWalls {
    fn project(&self, column: &mut WaterColumn, previous: &[f64]) -> usize {
        reflect(
            &mut column.q,
            previous,
            &mut column.v,
            self.restitution,
            self.l_min,
            self.l_max,
        )
    }
}

/// Mirrors every slice that left `[l_min, l_max]` back across the wall it
/// crossed and reverses its velocity, keeping `restitution` of the speed.
///
/// The base is checked first, then the cap on the mirrored position, so an
/// overshoot past the base that lands beyond the cap is folded back there
/// too. Positions end inside the walls as long as a slice travels less than
/// one wall spacing per step. Slices are handled independently.
/// `previous_positions` is not consulted: the bounce is taken at the wall,
/// not at the crossing time. Returns the number of bounces.
pub fn reflect(
    positions: &mut [f64],
    _previous_positions: &[f64],
    velocities: &mut [f64],
    restitution: f64,
    l_min: f64,
    l_max: f64,
) -> usize {
    let mut bounces = 0;
    for (q, v) in positions.iter_mut().zip(velocities.iter_mut()) {
        if *q < l_min {
            *q = l_min + (l_min - *q);
            *v *= -restitution;
            bounces += 1;
        }
        if *q > l_max {
            *q = l_max - (*q - l_max);
            *v *= -restitution;
            bounces += 1;
        }
    }
    bounces
}

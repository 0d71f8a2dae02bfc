use crate::config::PhysicalConfig;

/// Rotational inertia of the bottle shell about the combined center of mass.
///
/// Cylinder about a transverse axis through its own center,
/// `m (R²/2 + H²/12)`, shifted to `center_of_mass` with the parallel-axis
/// theorem.
pub fn bottle_inertia(config: &PhysicalConfig, center_of_mass: f64) -> f64 {
    let m = config.bottle_mass;
    let r = config.bottle_radius;
    let h = config.bottle_height;

    let own_axis = m * (r * r / 2.0 + h * h / 12.0);
    let offset = h / 2.0 - center_of_mass;
    own_axis + m * offset * offset
}

/// Rotational inertia of the water column about the combined center of mass.
///
/// Every slice is a point mass carrying `water_mass / slice_count`.
pub fn water_inertia(
    positions: &[f64],
    center_of_mass: f64,
    water_mass: f64,
    slice_count: usize,
) -> f64 {
    if slice_count == 0 {
        return 0.0;
    }
    let second_moment: f64 = positions
        .iter()
        .map(|&z| (z - center_of_mass) * (z - center_of_mass))
        .sum();
    water_mass / slice_count as f64 * second_moment
}

/// Bottle plus water inertia. Strictly positive for a valid configuration.
pub fn total_inertia(
    config: &PhysicalConfig,
    positions: &[f64],
    center_of_mass: f64,
    water_mass: f64,
) -> f64 {
    bottle_inertia(config, center_of_mass)
        + water_inertia(positions, center_of_mass, water_mass, positions.len())
}

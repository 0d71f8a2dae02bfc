/// Share of the total mass carried by the bottle itself.
///
/// Constant for a run: the water mass never changes.
pub fn bottle_fraction(bottle_mass: f64, water_mass: f64) -> f64 {
    bottle_mass / (bottle_mass + water_mass)
}

/// Combined axial center of mass.
///
/// The bottle contributes its geometric center `bottle_height / 2`, the water
/// the mean slice position, weighted by `bottle_fraction` and its complement.
/// An empty slice list contributes a mean of 0.
pub fn center_of_mass(positions: &[f64], bottle_fraction: f64, bottle_height: f64) -> f64 {
    let mean = if positions.is_empty() {
        0.0
    } else {
        positions.iter().sum::<f64>() / positions.len() as f64
    };
    bottle_fraction * bottle_height / 2.0 + (1.0 - bottle_fraction) * mean
}

//! Mass distribution of the bottle and its water column.
//!
//! Both quantities are pure functions of the current slice positions and are
//! recomputed every step.

pub mod center;
pub mod inertia;

pub use center::{bottle_fraction, center_of_mass};
pub use inertia::{bottle_inertia, total_inertia, water_inertia};

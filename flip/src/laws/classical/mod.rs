pub mod axial_gravity;
pub mod centripetal;

pub use axial_gravity::AxialGravity;
pub use centripetal::Centripetal;

//! Mathematical utilities

pub mod angles;
pub mod ray;

pub use angles::{signed_angle_around, wrap_degrees_180, wrap_pi};
pub use ray::Ray;

//! Simplified seasonal ephemeris.
//!
//! Pure functions only: Earth's orbital position for a day-of-year, the noon
//! sunray incidence angle for a latitude, the planet's tilt/spin frame used by
//! every scene object and hit-test, and the day-keyed ground colour ramp.
//! The geometry is visually motivated, not an exact ephemeris.

pub mod color_ramp;
pub mod orbit;
pub mod planet_frame;
pub mod sunray;

pub use color_ramp::{ColorRamp, Lerp, ground_color_ramp};
pub use orbit::{orbital_angle, orbital_position, orbital_radius};
pub use planet_frame::{lat_long_from_direction, planet_orientation, polar_axis, surface_direction};
pub use sunray::{is_polar_night, sunray_angle_degrees};

/// Length of the simulated year in days.
pub const DAYS_PER_YEAR: f32 = 365.0;

/// Day-of-year of the June solstice.
pub const SUMMER_SOLSTICE: f32 = 171.0;

/// Axial tilt in degrees.
pub const EARTH_TILT_DEGREES: f32 = 23.5;

/// Semi-axis of the orbit ellipse along X (scene units).
pub const ORBIT_SEMI_MAJOR: f32 = 150.0;

/// Semi-axis of the orbit ellipse along Z (scene units).
pub const ORBIT_SEMI_MINOR: f32 = 100.0;

/// Axial tilt in radians.
#[inline]
pub fn earth_tilt_radians() -> f32 {
    EARTH_TILT_DEGREES.to_radians()
}

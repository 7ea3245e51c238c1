//! Noon sunray incidence angle.

use std::f32::consts::TAU;

use super::{DAYS_PER_YEAR, SUMMER_SOLSTICE};

/// Sunray incidence angle at local solar noon, in degrees.
///
/// The angle is measured between incoming sunlight and the local horizontal
/// plane. It is 90 at the subsolar latitude. Values below 0 or above 180 mean
/// the sun stays below the horizon all day (polar night); the result is
/// deliberately left unclamped.
pub fn sunray_angle_degrees(day: f32, tilt_degrees: f32, latitude: f32) -> f32 {
    // Direction of the tilt axis seen from above, zero at the June solstice
    let tilt_axis_angle = (day - SUMMER_SOLSTICE) / DAYS_PER_YEAR * TAU;
    // How far the northern hemisphere currently leans toward the sun
    let effective_tilt = tilt_axis_angle.cos() * tilt_degrees;
    90.0 - latitude + effective_tilt
}

/// Whether an angle from [`sunray_angle_degrees`] denotes polar night.
#[inline]
pub fn is_polar_night(angle_degrees: f32) -> bool {
    !(0.0..=180.0).contains(&angle_degrees)
}

//! Angle helpers shared by the ephemeris, scene objects and hit-testing

use std::f32::consts::{PI, TAU};

use crate::core::types::Vec3;

/// Wrap an angle in radians into `(-PI, PI]`.
pub fn wrap_pi(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Wrap degrees into `[-180, 180]`, keeping +180 as-is.
pub fn wrap_degrees_180(degrees: f32) -> f32 {
    if (-180.0..=180.0).contains(&degrees) {
        return degrees;
    }
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && degrees > 0.0 { 180.0 } else { wrapped }
}

/// Signed angle from `from` to `to` measured around `axis` (right-handed).
///
/// Both vectors are projected onto the plane orthogonal to `axis` first.
/// Returns 0 for degenerate input.
pub fn signed_angle_around(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let axis = axis.normalize_or_zero();
    let a = from - axis * from.dot(axis);
    let b = to - axis * to.dot(axis);
    if a.length_squared() < 1e-12 || b.length_squared() < 1e-12 {
        return 0.0;
    }
    let sin = axis.dot(a.cross(b));
    let cos = a.dot(b);
    sin.atan2(cos)
}

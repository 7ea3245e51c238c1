//! Planet orientation: tilt and spin, forward and inverse.
//!
//! Forward mapping (domain values to a world direction): tilt about the
//! orbital-plane axis (+Z) first, then spin about the tilted polar axis.
//! The inverse undoes the spin first and the tilt second. Every scene object
//! that places something on the planet surface and every hit-test that turns
//! a pick point back into latitude/longitude goes through this module, so the
//! two directions stay exact inverses.
//!
//! Surface convention in the planet's local frame: latitude is measured from
//! the XZ plane toward +Y, longitude from the +X meridian, positive
//! counter-clockwise seen from +Y.

use glam::{Quat, Vec3};

use crate::math::signed_angle_around;

/// Rotation applying the axial tilt. The north pole leans toward -X, which
/// faces the sun at the June solstice.
#[inline]
pub fn tilt_rotation(tilt_radians: f32) -> Quat {
    Quat::from_rotation_z(tilt_radians)
}

/// World-space direction of the north pole for a tilt.
#[inline]
pub fn polar_axis(tilt_radians: f32) -> Vec3 {
    tilt_rotation(tilt_radians) * Vec3::Y
}

/// Full planet orientation: tilt, then spin about the tilted polar axis.
pub fn planet_orientation(tilt_radians: f32, rotation_radians: f32) -> Quat {
    let spin = Quat::from_axis_angle(polar_axis(tilt_radians), rotation_radians);
    spin * tilt_rotation(tilt_radians)
}

/// Unit direction for a latitude/longitude (degrees) in the untilted,
/// unspun planet frame.
pub fn local_surface_direction(latitude: f32, longitude: f32) -> Vec3 {
    let lat = latitude.to_radians();
    let long = longitude.to_radians();
    Vec3::new(lat.cos() * long.cos(), lat.sin(), -lat.cos() * long.sin())
}

/// World-space unit direction from the planet centre to a surface point.
pub fn surface_direction(
    latitude: f32,
    longitude: f32,
    tilt_radians: f32,
    rotation_radians: f32,
) -> Vec3 {
    planet_orientation(tilt_radians, rotation_radians) * local_surface_direction(latitude, longitude)
}

/// Latitude and longitude (degrees) of a world-space direction from the
/// planet centre. Exact inverse of [`surface_direction`].
///
/// A zero-length direction maps to `(0, 0)`.
pub fn lat_long_from_direction(direction: Vec3, tilt_radians: f32, rotation_radians: f32) -> (f32, f32) {
    if direction.length_squared() < 1e-12 {
        return (0.0, 0.0);
    }
    let unspun = Quat::from_axis_angle(polar_axis(tilt_radians), -rotation_radians) * direction;
    let untilted = tilt_rotation(tilt_radians).inverse() * unspun;

    let equatorial = Vec3::new(untilted.x, 0.0, untilted.z);
    let latitude = untilted.y.atan2(equatorial.length()).to_degrees();
    let longitude = signed_angle_around(Vec3::X, equatorial, Vec3::Y).to_degrees();
    (latitude, longitude)
}

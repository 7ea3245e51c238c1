//! Orbital position by day-of-year.

use std::f32::consts::TAU;

use glam::Vec3;

use super::{DAYS_PER_YEAR, ORBIT_SEMI_MAJOR, ORBIT_SEMI_MINOR, SUMMER_SOLSTICE};

/// Parametric angle of the orbit ellipse for a day. Zero at the June solstice.
fn ellipse_parameter(day: f32) -> f32 {
    let day = day.rem_euclid(DAYS_PER_YEAR);
    (SUMMER_SOLSTICE - day) / DAYS_PER_YEAR * TAU
}

/// Planet position on the orbit ellipse for a (fractional) day-of-year.
///
/// The sun sits at the origin and the orbit lies in the XZ plane. The planet
/// is on +X at the June solstice and moves counter-clockwise seen from +Y.
/// Periodic with period [`DAYS_PER_YEAR`].
pub fn orbital_position(day: f32) -> Vec3 {
    let t = ellipse_parameter(day);
    Vec3::new(ORBIT_SEMI_MAJOR * t.cos(), 0.0, ORBIT_SEMI_MINOR * t.sin())
}

/// Distance from the sun to the planet for a day.
pub fn orbital_radius(day: f32) -> f32 {
    orbital_position(day).length()
}

/// Geometric angle of the planet around +Y, measured from +X, in `(-PI, PI]`.
pub fn orbital_angle(day: f32) -> f32 {
    let p = orbital_position(day);
    (-p.z).atan2(p.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_ellipse(p: Vec3) -> f32 {
        (p.x / ORBIT_SEMI_MAJOR).powi(2) + (p.z / ORBIT_SEMI_MINOR).powi(2)
    }

    #[test]
    fn test_positions_lie_on_ellipse() {
        for i in 0..730 {
            let day = i as f32 * 0.5;
            let p = orbital_position(day);
            assert!((on_ellipse(p) - 1.0).abs() < 1e-4, "day {day} off ellipse");
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_periodic() {
        for day in [0.0_f32, 12.25, 171.0, 200.5, 364.9] {
            let a = orbital_position(day);
            let b = orbital_position(day + DAYS_PER_YEAR);
            assert!((a - b).length() < 1e-2, "day {day}: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_solstice_on_positive_x() {
        let p = orbital_position(SUMMER_SOLSTICE);
        assert!((p - Vec3::new(ORBIT_SEMI_MAJOR, 0.0, 0.0)).length() < 1e-3);
        assert!(orbital_angle(SUMMER_SOLSTICE).abs() < 1e-5);
    }

    #[test]
    fn test_moves_counter_clockwise() {
        let before = orbital_angle(SUMMER_SOLSTICE);
        let after = orbital_angle(SUMMER_SOLSTICE + 10.0);
        assert!(after > before);
    }

    #[test]
    fn test_radius_bounds() {
        for i in 0..365 {
            let r = orbital_radius(i as f32);
            assert!(r >= ORBIT_SEMI_MINOR - 1e-3 && r <= ORBIT_SEMI_MAJOR + 1e-3);
        }
    }
}

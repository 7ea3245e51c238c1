//! Arrow from the sun to the planet.

use glam::{Quat, Vec3};

use super::primitive::{Primitive, PrimitiveKind, SceneObject};
use super::style::{StyleVariant, SUN_RADIUS};

const LINE_COLOR: [f32; 3] = [1.0, 0.85, 0.3];

/// Directional arrow running from the sun's surface to the planet's
/// surface, whatever the orbital distance.
#[derive(Clone, Debug)]
pub struct SunLine {
    style: StyleVariant,
    shaft: Primitive,
    head: Primitive,
    start: Vec3,
    end: Vec3,
}

impl SunLine {
    pub fn new(style: StyleVariant) -> Self {
        let radius = style.line_radius();
        Self {
            style,
            shaft: Primitive::new("sunLine", PrimitiveKind::Cylinder { radius }, LINE_COLOR),
            head: Primitive::new(
                "sunLineHead",
                PrimitiveKind::Cone { radius: radius * 3.0, length: radius * 8.0 },
                LINE_COLOR,
            ),
            start: Vec3::ZERO,
            end: Vec3::ZERO,
        }
    }

    /// Aim at a planet centred at `planet_position`, with the sun at the
    /// origin. Arrow length is the centre distance minus both radii.
    pub fn set_endpoint_from_vector(&mut self, planet_position: Vec3) {
        let distance = planet_position.length();
        let direction = planet_position.normalize_or_zero();
        if direction == Vec3::ZERO {
            self.start = Vec3::ZERO;
            self.end = Vec3::ZERO;
            self.shaft.transform.scale = Vec3::new(1.0, 0.0, 1.0);
            return;
        }
        let length = (distance - SUN_RADIUS - self.style.planet_radius()).max(0.0);
        self.start = direction * SUN_RADIUS;
        self.end = self.start + direction * length;

        let rotation = Quat::from_rotation_arc(Vec3::Y, direction);
        let head_length = match self.head.kind {
            PrimitiveKind::Cone { length: cone, .. } => cone.min(length),
            _ => 0.0,
        };
        let shaft_length = length - head_length;
        self.shaft.transform.position = self.start + direction * (shaft_length * 0.5);
        self.shaft.transform.rotation = rotation;
        self.shaft.transform.scale = Vec3::new(1.0, shaft_length, 1.0);
        self.head.transform.position = self.end - direction * head_length;
        self.head.transform.rotation = rotation;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.shaft.visible = visible;
        self.head.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.shaft.visible
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }
}

impl SceneObject for SunLine {
    fn primitives(&self) -> Vec<&Primitive> {
        vec![&self.shaft, &self.head]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::orbital_position;

    #[test]
    fn test_touches_both_bodies() {
        let style = StyleVariant::Orbit;
        let mut line = SunLine::new(style);
        for day in [0.0, 80.0, 171.0, 260.0, 364.5] {
            let planet = orbital_position(day);
            line.set_endpoint_from_vector(planet);
            assert!((line.start().length() - SUN_RADIUS).abs() < 1e-3);
            assert!(((planet - line.end()).length() - style.planet_radius()).abs() < 1e-3);
            let expected = planet.length() - SUN_RADIUS - style.planet_radius();
            assert!((line.length() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_points_from_sun_to_planet() {
        let mut line = SunLine::new(StyleVariant::CloseUp);
        let planet = Vec3::new(0.0, 0.0, -100.0);
        line.set_endpoint_from_vector(planet);
        let dir = line.shaft.transform.rotation * Vec3::Y;
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_planet_at_sun_collapses() {
        let mut line = SunLine::new(StyleVariant::CloseUp);
        line.set_endpoint_from_vector(Vec3::ZERO);
        assert_eq!(line.length(), 0.0);
    }
}

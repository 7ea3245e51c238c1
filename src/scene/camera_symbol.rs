//! Orbital-view indicator of where the planetary camera looks.

use glam::{Quat, Vec3};

use super::primitive::{Primitive, PrimitiveKind, SceneObject};
use super::style::StyleVariant;

const SYMBOL_COLOR: [f32; 3] = [0.85, 0.85, 1.0];

/// Cone sitting beside the planet, pointing along the planetary view's
/// camera-to-planet direction.
#[derive(Clone, Debug)]
pub struct CameraSymbol {
    style: StyleVariant,
    cone: Primitive,
    planet_position: Vec3,
    direction: Vec3,
}

impl CameraSymbol {
    pub fn new(style: StyleVariant) -> Self {
        let r = style.planet_radius();
        let mut symbol = Self {
            style,
            cone: Primitive::new("cameraSymbol", PrimitiveKind::Cone { radius: r * 0.4, length: r * 0.8 }, SYMBOL_COLOR),
            planet_position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        };
        symbol.sync();
        symbol
    }

    pub fn set_planet_position(&mut self, position: Vec3) {
        self.planet_position = position;
        self.sync();
    }

    /// Point along `camera_to_planet`. A zero vector keeps the previous
    /// direction.
    pub fn set_direction(&mut self, camera_to_planet: Vec3) {
        let dir = camera_to_planet.normalize_or_zero();
        if dir != Vec3::ZERO {
            self.direction = dir;
            self.sync();
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn position(&self) -> Vec3 {
        self.cone.transform.position
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.cone.visible = visible;
    }

    fn sync(&mut self) {
        // On the camera side of the planet, two radii out
        let offset = self.style.planet_radius() * 2.0;
        self.cone.transform.position = self.planet_position - self.direction * offset;
        self.cone.transform.rotation = Quat::from_rotation_arc(Vec3::Y, self.direction);
    }
}

impl SceneObject for CameraSymbol {
    fn primitives(&self) -> Vec<&Primitive> {
        vec![&self.cone]
    }
}

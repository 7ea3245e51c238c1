//! Planet body and its rotation axis.

use glam::{Quat, Vec3};

use crate::astro::{orbital_position, planet_orientation, planet_frame::tilt_rotation};
use crate::math::Ray;

use super::primitive::{set_highlight, Primitive, PrimitiveKind, SceneObject};
use super::style::StyleVariant;

const PLANET_COLOR: [f32; 3] = [0.25, 0.45, 0.85];
const GRID_COLOR: [f32; 3] = [0.9, 0.9, 0.9];
const AXIS_COLOR: [f32; 3] = [0.95, 0.95, 0.95];

/// Parallels and meridians every 30 degrees on a unit sphere, in the
/// planet's local frame.
fn gridline_points() -> Vec<Vec3> {
    const SAMPLES: usize = 48;
    let mut points = Vec::new();
    for lat in (-60..=60).step_by(30) {
        let lat = (lat as f32).to_radians();
        for i in 0..=SAMPLES {
            let long = i as f32 / SAMPLES as f32 * std::f32::consts::TAU;
            points.push(Vec3::new(lat.cos() * long.cos(), lat.sin(), -lat.cos() * long.sin()));
        }
    }
    for long in (0..360).step_by(30) {
        let long = (long as f32).to_radians();
        for i in 0..=SAMPLES {
            let lat = -std::f32::consts::FRAC_PI_2 + i as f32 / SAMPLES as f32 * std::f32::consts::PI;
            points.push(Vec3::new(lat.cos() * long.cos(), lat.sin(), -lat.cos() * long.sin()));
        }
    }
    points
}

/// The planet sphere, placed on the orbit and oriented by tilt and spin.
#[derive(Clone, Debug)]
pub struct Planet {
    style: StyleVariant,
    body: Primitive,
    grid: Primitive,
    position: Vec3,
    tilt: f32,
    rotation: f32,
}

impl Planet {
    pub fn new(style: StyleVariant) -> Self {
        let body = Primitive::new("planet", PrimitiveKind::Sphere { radius: style.planet_radius() }, PLANET_COLOR);
        let mut grid = Primitive::new(
            "planetGrid",
            PrimitiveKind::Polyline { points: gridline_points(), closed: false },
            GRID_COLOR,
        );
        grid.visible = false;
        let mut planet = Self {
            style,
            body,
            grid,
            position: Vec3::ZERO,
            tilt: 0.0,
            rotation: 0.0,
        };
        planet.sync();
        planet
    }

    pub fn style(&self) -> StyleVariant {
        self.style
    }

    pub fn radius(&self) -> f32 {
        self.style.planet_radius()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Tilt followed by spin.
    pub fn orientation(&self) -> Quat {
        planet_orientation(self.tilt, self.rotation)
    }

    /// Move to the orbital position of `day`.
    pub fn set_day(&mut self, day: f32) {
        self.set_position(orbital_position(day));
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.sync();
    }

    pub fn set_tilt(&mut self, tilt_radians: f32) {
        self.tilt = tilt_radians;
        self.sync();
    }

    pub fn set_rotation(&mut self, rotation_radians: f32) {
        self.rotation = rotation_radians;
        self.sync();
    }

    pub fn set_gridlines(&mut self, visible: bool) {
        self.grid.visible = visible;
    }

    pub fn set_highlighted(&mut self, on: bool) {
        set_highlight(&mut self.body, on);
    }

    pub fn is_highlighted(&self) -> bool {
        self.body.is_highlighted()
    }

    pub fn set_style_variant(&mut self, style: StyleVariant) {
        self.style = style;
        self.body.kind = PrimitiveKind::Sphere { radius: style.planet_radius() };
        self.sync();
    }

    /// Nearest point where `ray` hits the planet.
    pub fn pick(&self, ray: &Ray) -> Option<Vec3> {
        ray.intersect_sphere(self.position, self.radius())
    }

    fn sync(&mut self) {
        let rotation = self.orientation();
        self.body.transform.position = self.position;
        self.body.transform.rotation = rotation;
        self.grid.transform.position = self.position;
        self.grid.transform.rotation = rotation;
        self.grid.transform.scale = Vec3::splat(self.radius() * 1.002);
    }
}

impl SceneObject for Planet {
    fn primitives(&self) -> Vec<&Primitive> {
        vec![&self.body, &self.grid]
    }
}

/// Rotation axis through the planet centre, following the tilt only.
#[derive(Clone, Debug)]
pub struct Axis {
    style: StyleVariant,
    shaft: Primitive,
}

impl Axis {
    pub fn new(style: StyleVariant) -> Self {
        let mut shaft = Primitive::new("axis", PrimitiveKind::Cylinder { radius: style.axis_radius() }, AXIS_COLOR);
        shaft.transform.scale = Vec3::new(1.0, style.axis_length(), 1.0);
        Self { style, shaft }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.shaft.transform.position = position;
    }

    pub fn set_tilt(&mut self, tilt_radians: f32) {
        self.shaft.transform.rotation = tilt_rotation(tilt_radians);
    }

    pub fn set_style_variant(&mut self, style: StyleVariant) {
        self.style = style;
        self.shaft.kind = PrimitiveKind::Cylinder { radius: style.axis_radius() };
        self.shaft.transform.scale = Vec3::new(1.0, style.axis_length(), 1.0);
    }

    /// World position of the north end.
    pub fn north_end(&self) -> Vec3 {
        self.shaft.world_matrix().transform_point3(Vec3::new(0.0, 0.5, 0.0))
    }
}

impl SceneObject for Axis {
    fn primitives(&self) -> Vec<&Primitive> {
        vec![&self.shaft]
    }
}

//! Latitude/longitude marker and latitude ring on the planet surface.

use glam::Vec3;

use crate::astro::{lat_long_from_direction, planet_frame::tilt_rotation, polar_axis, surface_direction};
use crate::math::Ray;

use super::primitive::{set_highlight, Primitive, PrimitiveKind, SceneObject};
use super::style::StyleVariant;

const MARKER_COLOR: [f32; 3] = [1.0, 0.3, 0.2];
const RING_COLOR: [f32; 3] = [1.0, 0.55, 0.2];

/// Degrees either side of the ring's latitude that still count as a hit.
pub const RING_PICK_TOLERANCE_DEGREES: f32 = 3.0;

/// Placement of the planet the marker and ring sit on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetFrame {
    pub position: Vec3,
    pub radius: f32,
    pub tilt: f32,
    pub rotation: f32,
}

impl PlanetFrame {
    pub fn new(position: Vec3, radius: f32, tilt: f32, rotation: f32) -> Self {
        Self { position, radius, tilt, rotation }
    }
}

/// Small sphere on the surface at the selected latitude and longitude.
#[derive(Clone, Debug)]
pub struct LatMarker {
    style: StyleVariant,
    sphere: Primitive,
    latitude: f32,
    longitude: f32,
    frame: PlanetFrame,
}

impl LatMarker {
    pub fn new(style: StyleVariant) -> Self {
        let mut marker = Self {
            style,
            sphere: Primitive::new("latMarker", PrimitiveKind::Sphere { radius: style.marker_radius() }, MARKER_COLOR),
            latitude: 0.0,
            longitude: 0.0,
            frame: PlanetFrame::new(Vec3::ZERO, style.planet_radius(), 0.0, 0.0),
        };
        marker.sync();
        marker
    }

    pub fn set_lat_long(&mut self, latitude: f32, longitude: f32) {
        self.latitude = latitude;
        self.longitude = longitude;
        self.sync();
    }

    pub fn set_frame(&mut self, frame: PlanetFrame) {
        self.frame = frame;
        self.sync();
    }

    pub fn set_highlighted(&mut self, on: bool) {
        set_highlight(&mut self.sphere, on);
    }

    pub fn is_highlighted(&self) -> bool {
        self.sphere.is_highlighted()
    }

    pub fn lat_long(&self) -> (f32, f32) {
        (self.latitude, self.longitude)
    }

    pub fn frame(&self) -> PlanetFrame {
        self.frame
    }

    /// World-space centre of the marker.
    pub fn position(&self) -> Vec3 {
        self.sphere.transform.position
    }

    /// Hit-test with a pick radius twice the drawn radius.
    pub fn pick(&self, ray: &Ray) -> Option<Vec3> {
        ray.intersect_sphere(self.position(), self.style.marker_radius() * 2.0)
    }

    fn sync(&mut self) {
        let dir = surface_direction(self.latitude, self.longitude, self.frame.tilt, self.frame.rotation);
        self.sphere.transform.position = self.frame.position + dir * self.frame.radius;
    }
}

impl SceneObject for LatMarker {
    fn primitives(&self) -> Vec<&Primitive> {
        vec![&self.sphere]
    }
}

/// Circle of constant latitude around the planet.
#[derive(Clone, Debug)]
pub struct LatRing {
    style: StyleVariant,
    ring: Primitive,
    latitude: f32,
    frame: PlanetFrame,
}

impl LatRing {
    pub fn new(style: StyleVariant) -> Self {
        let mut ring = Self {
            style,
            ring: Primitive::new(
                "latRing",
                PrimitiveKind::Torus { radius: style.planet_radius(), tube: style.ring_tube() },
                RING_COLOR,
            ),
            latitude: 0.0,
            frame: PlanetFrame::new(Vec3::ZERO, style.planet_radius(), 0.0, 0.0),
        };
        ring.sync();
        ring
    }

    pub fn set_latitude(&mut self, latitude: f32) {
        self.latitude = latitude;
        self.sync();
    }

    pub fn set_frame(&mut self, frame: PlanetFrame) {
        self.frame = frame;
        self.sync();
    }

    pub fn set_highlighted(&mut self, on: bool) {
        set_highlight(&mut self.ring, on);
    }

    pub fn is_highlighted(&self) -> bool {
        self.ring.is_highlighted()
    }

    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    pub fn frame(&self) -> PlanetFrame {
        self.frame
    }

    /// Radius of the drawn circle.
    pub fn circle_radius(&self) -> f32 {
        match self.ring.kind {
            PrimitiveKind::Torus { radius, .. } => radius,
            _ => 0.0,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.ring.transform.position
    }

    /// Point where `ray` meets the planet, if that point lies within
    /// [`RING_PICK_TOLERANCE_DEGREES`] of the ring's latitude.
    pub fn pick(&self, ray: &Ray) -> Option<Vec3> {
        let hit = ray.intersect_sphere(self.frame.position, self.frame.radius)?;
        // Spin never changes latitude
        let (latitude, _) = lat_long_from_direction(hit - self.frame.position, self.frame.tilt, 0.0);
        ((latitude - self.latitude).abs() <= RING_PICK_TOLERANCE_DEGREES).then_some(hit)
    }

    fn sync(&mut self) {
        let lat = self.latitude.to_radians();
        let radius = self.frame.radius;
        self.ring.kind = PrimitiveKind::Torus { radius: radius * lat.cos(), tube: self.style.ring_tube() };
        self.ring.transform.position = self.frame.position + polar_axis(self.frame.tilt) * radius * lat.sin();
        self.ring.transform.rotation = tilt_rotation(self.frame.tilt);
    }
}

impl SceneObject for LatRing {
    fn primitives(&self) -> Vec<&Primitive> {
        vec![&self.ring]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::earth_tilt_radians;

    fn frame() -> PlanetFrame {
        PlanetFrame::new(Vec3::new(150.0, 0.0, 0.0), 5.0, earth_tilt_radians(), 0.8)
    }

    #[test]
    fn test_marker_on_surface() {
        let mut marker = LatMarker::new(StyleVariant::CloseUp);
        marker.set_frame(frame());
        marker.set_lat_long(40.11, -88.2);
        let offset = marker.position() - frame().position;
        assert!((offset.length() - 5.0).abs() < 1e-4);
        let (lat, long) = lat_long_from_direction(offset, frame().tilt, frame().rotation);
        assert!((lat - 40.11).abs() < 1e-2);
        assert!((long + 88.2).abs() < 1e-2);
    }

    #[test]
    fn test_marker_pick() {
        let mut marker = LatMarker::new(StyleVariant::CloseUp);
        marker.set_frame(frame());
        marker.set_lat_long(10.0, 20.0);
        let target = marker.position();
        let origin = target + (target - frame().position).normalize() * 20.0;
        assert!(marker.pick(&Ray::new(origin, target - origin)).is_some());
        let away = Ray::new(origin, origin - target);
        assert!(marker.pick(&away).is_none());
    }

    #[test]
    fn test_ring_geometry() {
        let mut ring = LatRing::new(StyleVariant::CloseUp);
        ring.set_frame(frame());
        ring.set_latitude(60.0);
        assert!((ring.circle_radius() - 2.5).abs() < 1e-4);
        let along_axis = (ring.center() - frame().position).dot(polar_axis(frame().tilt));
        assert!((along_axis - 5.0 * 60.0_f32.to_radians().sin()).abs() < 1e-4);
    }

    #[test]
    fn test_ring_pick_tolerance() {
        let mut ring = LatRing::new(StyleVariant::CloseUp);
        ring.set_frame(frame());
        ring.set_latitude(30.0);
        let f = frame();
        for (lat, expect_hit) in [(31.0, true), (28.0, true), (40.0, false)] {
            let point = f.position + surface_direction(lat, 50.0, f.tilt, f.rotation) * f.radius;
            let origin = point + (point - f.position).normalize() * 30.0;
            let hit = ring.pick(&Ray::new(origin, point - origin));
            assert_eq!(hit.is_some(), expect_hit, "lat {lat}");
        }
    }
}

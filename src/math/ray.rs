//! Ray type and operations

use crate::core::types::{Vec3, Mat4};

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest non-negative hit against a sphere.
    /// Returns the hit point, or None when the ray misses or the sphere is behind.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<Vec3> {
        if radius <= 0.0 || self.direction == Vec3::ZERO {
            return None;
        }
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t_near = -b - sqrt_disc;
        let t_far = -b + sqrt_disc;
        let t = if t_near >= 0.0 { t_near } else { t_far };
        if t < 0.0 {
            return None;
        }
        Some(self.at(t))
    }

    /// Hit against the infinite plane through `point` with `normal`.
    pub fn intersect_plane(&self, point: Vec3, normal: Vec3) -> Option<Vec3> {
        let denom = normal.dot(self.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        Some(self.at(t))
    }

    /// Hit against a flat annulus (ring) lying in the plane through `center`
    /// with `normal`. Inner and outer radii bound the accepted band.
    pub fn intersect_ring(
        &self,
        center: Vec3,
        normal: Vec3,
        inner_radius: f32,
        outer_radius: f32,
    ) -> Option<Vec3> {
        let hit = self.intersect_plane(center, normal)?;
        let r = (hit - center).length();
        (r >= inner_radius && r <= outer_radius).then_some(hit)
    }

    /// Transform ray by matrix
    pub fn transform(&self, matrix: &Mat4) -> Ray {
        let new_origin = matrix.transform_point3(self.origin);
        let new_direction = matrix.transform_vector3(self.direction);
        Ray::new(new_origin, new_direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_direction_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_hit_front_face() {
        let ray = Ray::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::X);
        let hit = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((hit - Vec3::new(-2.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_sphere_miss() {
        let ray = Ray::new(Vec3::new(-10.0, 5.0, 0.0), Vec3::X);
        assert!(ray.intersect_sphere(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_sphere_behind() {
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::X);
        assert!(ray.intersect_sphere(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_sphere_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let hit = ray.intersect_sphere(Vec3::ZERO, 3.0).unwrap();
        assert!((hit.y - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_ray_never_hits() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
        assert!(ray.intersect_plane(Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_plane_hit() {
        let ray = Ray::new(Vec3::new(1.0, 10.0, 2.0), -Vec3::Y);
        let hit = ray.intersect_plane(Vec3::ZERO, Vec3::Y).unwrap();
        assert!((hit - Vec3::new(1.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_plane_parallel() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(ray.intersect_plane(Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_ring_band() {
        let down = -Vec3::Y;
        let inside = Ray::new(Vec3::new(0.5, 5.0, 0.0), down);
        let on_band = Ray::new(Vec3::new(1.5, 5.0, 0.0), down);
        let outside = Ray::new(Vec3::new(3.0, 5.0, 0.0), down);
        assert!(inside.intersect_ring(Vec3::ZERO, Vec3::Y, 1.0, 2.0).is_none());
        assert!(on_band.intersect_ring(Vec3::ZERO, Vec3::Y, 1.0, 2.0).is_some());
        assert!(outside.intersect_ring(Vec3::ZERO, Vec3::Y, 1.0, 2.0).is_none());
    }

    #[test]
    fn test_transform_translation() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let moved = ray.transform(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(moved.origin, Vec3::new(1.0, 2.0, 3.0));
        assert!((moved.direction - Vec3::Z).length() < 1e-6);
    }
}

//! Shared backdrop of both 3D views: stars, lights, orbit path and sun.

use glam::Vec3;

use crate::astro::{orbital_position, DAYS_PER_YEAR};
use crate::i18n::month_labels;
use crate::state::Locale;

use super::primitive::{Primitive, PrimitiveKind, SceneObject};
use super::style::SUN_RADIUS;

const STAR_COUNT: usize = 800;
const STARFIELD_RADIUS: f32 = 2000.0;
const ORBIT_SAMPLES: usize = 365;

/// Evenly spread points on a sphere (golden-angle spiral).
fn starfield_points(count: usize, radius: f32) -> Vec<Vec3> {
    let golden = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f32 + 0.5) / count as f32;
            let r = (1.0 - y * y).sqrt();
            let theta = golden * i as f32;
            Vec3::new(r * theta.cos(), y, r * theta.sin()) * radius
        })
        .collect()
}

/// Closed polyline through one year of orbital positions.
pub fn orbit_path_points(samples: usize) -> Vec<Vec3> {
    (0..samples)
        .map(|i| orbital_position(i as f32 / samples as f32 * DAYS_PER_YEAR))
        .collect()
}

/// Starfield, ambient and sun lights, orbit path and the sun.
#[derive(Clone, Debug)]
pub struct Environment {
    stars: Primitive,
    ambient: Primitive,
    sunlight: Primitive,
    orbit_path: Primitive,
    sun: Primitive,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            stars: Primitive::new(
                "stars",
                PrimitiveKind::Points { points: starfield_points(STAR_COUNT, STARFIELD_RADIUS), size: 1.5 },
                [1.0; 3],
            ),
            ambient: Primitive::new("ambientLight", PrimitiveKind::AmbientLight { intensity: 0.25 }, [1.0; 3]),
            sunlight: Primitive::new("sunLight", PrimitiveKind::PointLight { intensity: 1.2 }, [1.0, 0.98, 0.9]),
            orbit_path: Primitive::new(
                "orbitPath",
                PrimitiveKind::Polyline { points: orbit_path_points(ORBIT_SAMPLES), closed: true },
                [0.6, 0.6, 0.6],
            ),
            sun: Primitive::new("sun", PrimitiveKind::Sphere { radius: SUN_RADIUS }, [1.0, 0.9, 0.4])
                .with_emissive([1.0, 0.8, 0.3]),
        }
    }

    pub fn set_orbit_visible(&mut self, visible: bool) {
        self.orbit_path.visible = visible;
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneObject for Environment {
    fn primitives(&self) -> Vec<&Primitive> {
        vec![&self.stars, &self.ambient, &self.sunlight, &self.orbit_path, &self.sun]
    }
}

/// Twelve month names spaced evenly around the orbit, just outside it.
#[derive(Clone, Debug)]
pub struct MonthLabels {
    labels: Vec<Primitive>,
}

impl MonthLabels {
    /// Labels sit this far outside the orbit, as a fraction of the radius.
    const OUTSET: f32 = 1.15;

    pub fn new(locale: Locale) -> Self {
        let labels = month_labels(locale)
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let day = i as f32 / 12.0 * DAYS_PER_YEAR;
                let mut label = Primitive::new(
                    format!("month{i}"),
                    PrimitiveKind::Label { text: text.to_string() },
                    [0.85, 0.85, 0.85],
                );
                label.transform.position = orbital_position(day) * Self::OUTSET;
                label
            })
            .collect();
        Self { labels }
    }

    /// Replace label text for `locale`.
    pub fn set_language(&mut self, locale: Locale) {
        for (label, text) in self.labels.iter_mut().zip(month_labels(locale)) {
            label.kind = PrimitiveKind::Label { text: text.to_string() };
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.labels
            .iter()
            .filter_map(|l| match &l.kind {
                PrimitiveKind::Label { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl SceneObject for MonthLabels {
    fn primitives(&self) -> Vec<&Primitive> {
        self.labels.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starfield_on_sphere() {
        let points = starfield_points(100, 10.0);
        assert_eq!(points.len(), 100);
        for p in points {
            assert!((p.length() - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_orbit_path_closed_loop() {
        let points = orbit_path_points(365);
        assert_eq!(points.len(), 365);
        assert!((points[0] - orbital_position(0.0)).length() < 1e-4);
    }

    #[test]
    fn test_month_labels_translate() {
        let mut labels = MonthLabels::new(Locale::EnUs);
        assert_eq!(labels.texts().len(), 12);
        assert_eq!(labels.texts()[0], "Jan");
        labels.set_language(Locale::Es);
        assert_eq!(labels.texts()[0], "Ene");
        assert_eq!(labels.texts()[7], "Ago");
    }

    #[test]
    fn test_month_labels_spaced_around_orbit() {
        let labels = MonthLabels::new(Locale::EnUs);
        let prims = labels.primitives();
        for p in &prims {
            assert!(p.transform.position.length() > 100.0);
        }
        assert_ne!(prims[0].transform.position, prims[6].transform.position);
    }
}

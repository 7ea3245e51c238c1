//! Scale presets for scene objects.

use serde::{Deserialize, Serialize};

/// Radius of the sun sphere.
pub const SUN_RADIUS: f32 = 20.0;

/// Close-up objects are drawn at full detail around a large planet; the
/// orbit style shrinks them so the whole orbit fits in view. Only scale
/// differs between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleVariant {
    CloseUp,
    Orbit,
}

impl StyleVariant {
    pub fn planet_radius(self) -> f32 {
        match self {
            StyleVariant::CloseUp => 5.0,
            StyleVariant::Orbit => 8.0,
        }
    }

    /// Full length of the rotation axis, pole to pole.
    pub fn axis_length(self) -> f32 {
        self.planet_radius() * 2.6
    }

    pub fn axis_radius(self) -> f32 {
        match self {
            StyleVariant::CloseUp => 0.08,
            StyleVariant::Orbit => 0.4,
        }
    }

    pub fn marker_radius(self) -> f32 {
        match self {
            StyleVariant::CloseUp => 0.35,
            StyleVariant::Orbit => 1.2,
        }
    }

    pub fn ring_tube(self) -> f32 {
        match self {
            StyleVariant::CloseUp => 0.06,
            StyleVariant::Orbit => 0.3,
        }
    }

    pub fn line_radius(self) -> f32 {
        match self {
            StyleVariant::CloseUp => 0.15,
            StyleVariant::Orbit => 0.6,
        }
    }
}

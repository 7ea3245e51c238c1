//! Render primitives
//!
//! The CPU-side description of everything a 3D view draws: a named shape
//! with a local transform and colour. Scene objects own their primitives and
//! mutate them from domain values; the render surface reads them back into a
//! draw list.

use glam::{Mat4, Quat, Vec3};

/// Transform of a primitive in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Create a translation-only transform.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a 4x4 matrix.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Shape of a primitive, in its local frame. Cylinders, cones and tori are
/// built around local +Y.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveKind {
    Sphere { radius: f32 },
    /// Unit-length shaft; length comes from the transform's Y scale.
    Cylinder { radius: f32 },
    Cone { radius: f32, length: f32 },
    /// Ring in the local XZ plane.
    Torus { radius: f32, tube: f32 },
    Polyline { points: Vec<Vec3>, closed: bool },
    Points { points: Vec<Vec3>, size: f32 },
    Label { text: String },
    AmbientLight { intensity: f32 },
    PointLight { intensity: f32 },
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Sphere { .. } => "sphere",
            PrimitiveKind::Cylinder { .. } => "cylinder",
            PrimitiveKind::Cone { .. } => "cone",
            PrimitiveKind::Torus { .. } => "torus",
            PrimitiveKind::Polyline { .. } => "polyline",
            PrimitiveKind::Points { .. } => "points",
            PrimitiveKind::Label { .. } => "label",
            PrimitiveKind::AmbientLight { .. } => "ambientLight",
            PrimitiveKind::PointLight { .. } => "pointLight",
        }
    }
}

/// One drawable.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub name: String,
    pub kind: PrimitiveKind,
    pub transform: LocalTransform,
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub visible: bool,
}

impl Primitive {
    pub fn new(name: impl Into<String>, kind: PrimitiveKind, color: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: LocalTransform::default(),
            color,
            emissive: [0.0; 3],
            visible: true,
        }
    }

    pub fn with_emissive(mut self, emissive: [f32; 3]) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.transform.to_mat4()
    }

    pub fn is_highlighted(&self) -> bool {
        self.emissive != [0.0; 3]
    }
}

/// Something a view draws, made of primitives.
pub trait SceneObject {
    fn primitives(&self) -> Vec<&Primitive>;
}

/// Emissive colour used for hover feedback.
pub const HIGHLIGHT_EMISSIVE: [f32; 3] = [0.35, 0.35, 0.1];

/// Switch hover feedback on one primitive.
pub fn set_highlight(primitive: &mut Primitive, on: bool) {
    primitive.emissive = if on { HIGHLIGHT_EMISSIVE } else { [0.0; 3] };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_to_mat4() {
        let transform = LocalTransform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::new(1.0, 4.0, 1.0),
        };
        let p = transform.to_mat4().transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!((p - Vec3::new(1.0, 4.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_highlight_toggle() {
        let mut p = Primitive::new("planet", PrimitiveKind::Sphere { radius: 1.0 }, [1.0; 3]);
        assert!(!p.is_highlighted());
        set_highlight(&mut p, true);
        assert!(p.is_highlighted());
        set_highlight(&mut p, false);
        assert!(!p.is_highlighted());
    }
}

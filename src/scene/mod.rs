//! Scene model objects for the 3D views
//!
//! Each object owns its primitives and exposes setters taking domain values
//! (day, latitude, longitude, tilt, spin). Objects are built once per view
//! and dropped with it.

pub mod camera_symbol;
pub mod environment;
pub mod marker;
pub mod planet;
pub mod primitive;
pub mod style;
pub mod sun_line;

pub use camera_symbol::CameraSymbol;
pub use environment::{Environment, MonthLabels};
pub use marker::{LatMarker, LatRing, PlanetFrame};
pub use planet::{Axis, Planet};
pub use primitive::{LocalTransform, Primitive, PrimitiveKind, SceneObject};
pub use style::{StyleVariant, SUN_RADIUS};
pub use sun_line::SunLine;

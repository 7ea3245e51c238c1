//! Startup configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::state::{AnimationSpeeds, SimulationState, ViewLayoutState};

/// Camera and orbit-control settings for one 3D view
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Initial camera-to-target distance
    pub distance: f32,
    /// Fraction of the remaining motion applied per frame (0-1]
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl CameraSettings {
    /// Close-up camera around the planet
    pub fn planetary() -> Self {
        Self {
            fov_degrees: 40.0,
            distance: 25.0,
            damping: 0.1,
            min_distance: 8.0,
            max_distance: 100.0,
        }
    }

    /// Camera framing the whole orbit
    pub fn orbital() -> Self {
        Self {
            fov_degrees: 40.0,
            distance: 380.0,
            damping: 0.1,
            min_distance: 150.0,
            max_distance: 900.0,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(Error::Config(format!("{name}: fovDegrees must be in (0, 180)")));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(Error::Config(format!("{name}: damping must be in (0, 1]")));
        }
        if self.min_distance <= 0.0 || self.min_distance > self.max_distance {
            return Err(Error::Config(format!("{name}: need 0 < minDistance <= maxDistance")));
        }
        Ok(())
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::planetary()
    }
}

/// Pixel size of a render surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Everything needed to start a simulation instance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonsConfig {
    pub initial_state: SimulationState,
    pub layout: ViewLayoutState,
    pub speeds: AnimationSpeeds,
    pub planetary_camera: CameraSettings,
    pub orbital_camera: CameraSettings,
    /// Size of the main 3D panel
    pub main_view_size: SurfaceSize,
    /// Size of the secondary panels and flat diagrams
    pub secondary_view_size: SurfaceSize,
    /// Start the debug control server on this port
    pub debug_port: Option<u16>,
}

impl Default for SeasonsConfig {
    fn default() -> Self {
        Self {
            initial_state: SimulationState::default(),
            layout: ViewLayoutState::default(),
            speeds: AnimationSpeeds::default(),
            planetary_camera: CameraSettings::planetary(),
            orbital_camera: CameraSettings::orbital(),
            main_view_size: SurfaceSize::new(800, 600),
            secondary_view_size: SurfaceSize::new(400, 300),
            debug_port: None,
        }
    }
}

impl SeasonsConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: SeasonsConfig = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.planetary_camera.validate("planetaryCamera")?;
        self.orbital_camera.validate("orbitalCamera")?;
        for (name, speed) in [
            ("speeds.day", self.speeds.day),
            ("speeds.dailyRotationDay", self.speeds.daily_rotation_day),
            ("speeds.rotation", self.speeds.rotation),
        ] {
            if !speed.is_finite() || speed < 0.0 {
                return Err(Error::Config(format!("{name} must be a non-negative number")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ViewKind, ViewSlot};

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seasons.json");
        std::fs::write(
            &path,
            r#"{ "initialState": { "day": 80, "latitude": -33.9 }, "debugPort": 9750 }"#,
        )
        .unwrap();

        let config = SeasonsConfig::load(&path).unwrap();
        assert_eq!(config.initial_state.day, 80.0);
        assert_eq!(config.initial_state.latitude, -33.9);
        assert!(config.initial_state.earth_tilt);
        assert_eq!(config.debug_port, Some(9750));
        assert_eq!(config.layout, ViewLayoutState::default());
        assert_eq!(config.orbital_camera, CameraSettings::orbital());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seasons.json");
        let mut config = SeasonsConfig::default();
        config.layout.assign(ViewSlot::Main, ViewKind::Orbital);
        config.speeds.day = 0.05;
        config.save(&path).unwrap();

        let back = SeasonsConfig::load(&path).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{ "layout": { "main": "earth", "secondaryTop": "earth", "secondaryBottom": "nothing" } }"#,
        )
        .unwrap();
        assert!(matches!(SeasonsConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_camera_rejected() {
        let mut config = SeasonsConfig::default();
        config.planetary_camera.min_distance = 500.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SeasonsConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

//! Debug protocol - JSON command/response definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Commands sent by a debug client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum DebugCommand {
    /// Health check
    Ping,
    /// Full simulation state
    GetState,
    /// Request a partial state change, e.g. `{"day": 80}`
    ApplyPatch { patch: Value },
    /// Same as `ApplyPatch`, but logged as a user action
    Control { action: String, patch: Value },
    /// Start or stop an animation ("main" or "rotation")
    SetAnimation { animation: String, on: bool },
    /// Move the planetary camera onto the sun-planet line
    LookAtSubsolar,
    /// Move the planetary camera above the latitude marker
    LookAtMarker,
    /// Planetary camera state
    GetCamera,
    /// Put a view kind ("earth", "orbit", "raysGround", "raysSpace", "nothing") into a slot
    SetLayout { slot: String, view: String },
    GetLayout,
    /// Render a sunray diagram ("ground" or "space") as a base64 PNG
    RenderDiagram {
        perspective: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
}

/// Responses from debug server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum DebugResponse {
    #[serde(rename = "ok")]
    Ok { data: ResponseData },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Response data variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    None,
    Pong { message: String },
    State { state: Value },
    Camera {
        position: [f32; 3],
        forward: [f32; 3],
        fov_degrees: f32,
        distance_to_planet: f32,
    },
    Animation { main_running: bool, rotation_running: bool },
    Layout {
        main: String,
        secondary_top: String,
        secondary_bottom: String,
    },
    Diagram {
        perspective: String,
        width: u32,
        height: u32,
        caption: String,
        png_base64: String,
    },
    Updated { description: String },
}

impl DebugResponse {
    pub fn ok(data: ResponseData) -> Self {
        Self::Ok { data }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error { message: msg.into() }
    }

    pub fn pong() -> Self {
        Self::ok(ResponseData::Pong { message: "pong".into() })
    }

    pub fn none() -> Self {
        Self::ok(ResponseData::None)
    }

    pub fn updated(description: impl Into<String>) -> Self {
        Self::ok(ResponseData::Updated { description: description.into() })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

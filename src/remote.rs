//! Debug-server bridge.
//!
//! Commands arrive on the server thread, wait in a [`RemoteQueue`] and run
//! against the [`SeasonsApp`] from the app's own loop, which then posts the
//! reply back to the waiting connection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use seasons_debug::{encode_png_base64, DebugCommand, DebugHandler, DebugResponse, ResponseData};

use crate::app::SeasonsApp;
use crate::state::{ControlEvent, StatePatch, ViewKind, ViewSlot};
use crate::view::{ContainerHandle, Perspective, RaysView};

/// Diagram size used when the diagram is not mounted and no size is given.
const DEFAULT_DIAGRAM_SIZE: (u32, u32) = (400, 300);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Default)]
struct Pending {
    next_id: u64,
    requests: Vec<(u64, DebugCommand)>,
    replies: HashMap<u64, DebugResponse>,
}

/// Commands waiting for the app loop, and replies waiting for the server.
#[derive(Clone, Default)]
pub struct RemoteQueue {
    inner: Arc<Mutex<Pending>>,
}

impl RemoteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(&self, cmd: DebugCommand) -> u64 {
        let mut pending = self.lock();
        let id = pending.next_id;
        pending.next_id += 1;
        pending.requests.push((id, cmd));
        id
    }

    pub fn take_reply(&self, id: u64) -> Option<DebugResponse> {
        self.lock().replies.remove(&id)
    }

    /// Forget a request nobody waits for anymore.
    fn withdraw(&self, id: u64) {
        let mut pending = self.lock();
        pending.requests.retain(|(queued, _)| *queued != id);
        pending.replies.remove(&id);
    }

    /// Number of commands not yet run.
    pub fn pending(&self) -> usize {
        self.lock().requests.len()
    }

    /// Run every queued command against `app`. Returns how many ran.
    pub fn service(&self, app: &mut SeasonsApp, now_ms: f64) -> usize {
        // The lock is released while commands run
        let requests = std::mem::take(&mut self.lock().requests);
        let count = requests.len();
        for (id, cmd) in requests {
            let reply = execute(app, cmd, now_ms);
            self.lock().replies.insert(id, reply);
        }
        count
    }

    pub fn handler(&self, timeout: Duration) -> RemoteHandler {
        RemoteHandler { queue: self.clone(), timeout }
    }
}

/// [`DebugHandler`] that hands commands to the app loop and waits.
pub struct RemoteHandler {
    queue: RemoteQueue,
    timeout: Duration,
}

impl DebugHandler for RemoteHandler {
    fn handle_command(&mut self, cmd: DebugCommand) -> DebugResponse {
        if cmd == DebugCommand::Ping {
            return DebugResponse::pong();
        }
        let id = self.queue.submit(cmd);
        let polls = (self.timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1);
        for _ in 0..polls {
            std::thread::sleep(POLL_INTERVAL);
            if let Some(reply) = self.queue.take_reply(id) {
                return reply;
            }
        }
        self.queue.withdraw(id);
        DebugResponse::error("Command timed out")
    }
}

fn parse_wire<T: DeserializeOwned>(what: &str, text: &str) -> Result<T, String> {
    serde_json::from_value(Value::String(text.to_string())).map_err(|_| format!("Unknown {}: {}", what, text))
}

fn wire_name<T: Serialize>(value: T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s,
        _ => String::new(),
    }
}

fn parse_perspective(text: &str) -> Result<Perspective, String> {
    match text {
        "ground" => Ok(Perspective::Ground),
        "space" => Ok(Perspective::Space),
        other => Err(format!("Unknown perspective: {}", other)),
    }
}

fn layout_response(app: &SeasonsApp) -> DebugResponse {
    let layout = app.manager().layout();
    DebugResponse::ok(ResponseData::Layout {
        main: wire_name(layout.get(ViewSlot::Main)),
        secondary_top: wire_name(layout.get(ViewSlot::SecondaryTop)),
        secondary_bottom: wire_name(layout.get(ViewSlot::SecondaryBottom)),
    })
}

fn render_diagram(
    app: &SeasonsApp,
    perspective: Perspective,
    size: Option<(u32, u32)>,
) -> Result<ResponseData, String> {
    let standalone;
    let view = match (size, app.manager().rays(perspective)) {
        (None, Some(mounted)) if mounted.image().width() > 0 => mounted,
        _ => {
            let (width, height) = size.unwrap_or(DEFAULT_DIAGRAM_SIZE);
            if width == 0 || height == 0 {
                return Err("Diagram size must be positive".into());
            }
            standalone = RaysView::new(perspective, ContainerHandle::new(width, height), app.state());
            &standalone
        }
    };
    let image = view.image();
    let png_base64 = encode_png_base64(image.as_raw(), image.width(), image.height()).map_err(|e| e.to_string())?;
    Ok(ResponseData::Diagram {
        perspective: match perspective {
            Perspective::Ground => "ground".into(),
            Perspective::Space => "space".into(),
        },
        width: image.width(),
        height: image.height(),
        caption: view.caption(),
        png_base64,
    })
}

/// Run one debug command against the app.
pub fn execute(app: &mut SeasonsApp, cmd: DebugCommand, now_ms: f64) -> DebugResponse {
    match cmd {
        DebugCommand::Ping => DebugResponse::pong(),

        DebugCommand::GetState => match serde_json::to_value(app.state()) {
            Ok(state) => DebugResponse::ok(ResponseData::State { state }),
            Err(e) => DebugResponse::error(format!("Failed to serialize state: {}", e)),
        },

        DebugCommand::ApplyPatch { patch } => match serde_json::from_value::<StatePatch>(patch) {
            Ok(patch) => {
                app.apply_patch(patch);
                DebugResponse::updated("patch applied")
            }
            Err(e) => DebugResponse::error(format!("Invalid patch: {}", e)),
        },

        DebugCommand::Control { action, patch } => match serde_json::from_value::<StatePatch>(patch) {
            Ok(patch) => {
                app.control(ControlEvent::new(action.clone(), patch));
                DebugResponse::updated(action)
            }
            Err(e) => DebugResponse::error(format!("Invalid patch: {}", e)),
        },

        DebugCommand::SetAnimation { animation, on } => {
            match animation.as_str() {
                "main" => app.set_main_animation(on, now_ms),
                "rotation" => app.set_rotation_animation(on, now_ms),
                other => return DebugResponse::error(format!("Unknown animation: {}", other)),
            };
            DebugResponse::ok(ResponseData::Animation {
                main_running: app.is_main_animation_running(),
                rotation_running: app.is_rotation_animation_running(),
            })
        }

        DebugCommand::LookAtSubsolar => {
            if app.look_at_subsolar() {
                DebugResponse::updated("camera on subsolar point")
            } else {
                DebugResponse::error("No planetary view mounted")
            }
        }

        DebugCommand::LookAtMarker => {
            if app.look_at_marker() {
                DebugResponse::updated("camera on latitude marker")
            } else {
                DebugResponse::error("No planetary view mounted")
            }
        }

        DebugCommand::GetCamera => match app.manager().planetary() {
            Some(view) => {
                let camera = view.camera();
                DebugResponse::ok(ResponseData::Camera {
                    position: camera.position.to_array(),
                    forward: camera.forward().to_array(),
                    fov_degrees: camera.fov_y.to_degrees(),
                    distance_to_planet: view.camera_to_planet().length(),
                })
            }
            None => DebugResponse::error("No planetary view mounted"),
        },

        DebugCommand::SetLayout { slot, view } => {
            let parsed = parse_wire::<ViewSlot>("slot", &slot).and_then(|s| Ok((s, parse_wire::<ViewKind>("view", &view)?)));
            match parsed {
                Ok((slot, kind)) => {
                    app.set_view(slot, kind);
                    layout_response(app)
                }
                Err(message) => DebugResponse::error(message),
            }
        }

        DebugCommand::GetLayout => layout_response(app),

        DebugCommand::RenderDiagram { perspective, width, height } => {
            let size = match (width, height) {
                (None, None) => None,
                (w, h) => {
                    let (dw, dh) = DEFAULT_DIAGRAM_SIZE;
                    Some((w.unwrap_or(dw), h.unwrap_or(dh)))
                }
            };
            match parse_perspective(&perspective).and_then(|p| render_diagram(app, p, size)) {
                Ok(data) => DebugResponse::ok(data),
                Err(message) => DebugResponse::error(message),
            }
        }
    }
}

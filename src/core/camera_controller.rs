//! Orbit camera controls with damping

use std::f32::consts::PI;

use crate::config::CameraSettings;
use crate::core::camera::Camera;
use crate::core::input::{PointerButton, PointerState};
use crate::core::types::Vec3;

/// Keeps the polar angle off the poles so `look_at` stays well defined
const POLAR_EPSILON: f32 = 0.01;

/// Pending motion below this is dropped
const REST_EPSILON: f32 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
}

/// Camera drag lifecycle notifications
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlsEvent {
    DragStart,
    DragEnd,
}

/// Pointer-driven orbit around a target point.
///
/// Input accumulates pending motion; [`update`](Self::update) applies a
/// `damping` fraction of it each frame, so the camera eases to rest after
/// the pointer stops.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    /// Point the camera orbits and looks at
    pub target: Vec3,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    /// Fraction of pending motion applied per frame
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    /// Log-distance per wheel unit
    pub zoom_speed: f32,
    /// Distance-relative pan per pixel
    pub pan_speed: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
    pending_pan: Vec3,
    drag: Option<DragMode>,
}

impl OrbitControls {
    /// Create controls orbiting `target`
    pub fn new(target: Vec3, settings: &CameraSettings) -> Self {
        Self {
            target,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            damping: settings.damping,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.002,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 0.0,
            pending_pan: Vec3::ZERO,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether any motion is still pending
    pub fn is_moving(&self) -> bool {
        self.pending_azimuth != 0.0
            || self.pending_polar != 0.0
            || self.pending_zoom != 0.0
            || self.pending_pan != Vec3::ZERO
    }

    /// Feed this frame's pointer input.
    ///
    /// A camera drag only begins when `gesture_hovered` is false, so a
    /// press over a draggable object goes to the object instead.
    pub fn handle_input(
        &mut self,
        camera: &Camera,
        pointer: &PointerState,
        gesture_hovered: bool,
    ) -> Vec<ControlsEvent> {
        let mut events = Vec::new();

        if self.drag.is_none() && !gesture_hovered {
            let mode = if self.enable_rotate && pointer.just_pressed(PointerButton::Primary) {
                Some(DragMode::Rotate)
            } else if self.enable_pan
                && (pointer.just_pressed(PointerButton::Secondary) || pointer.just_pressed(PointerButton::Middle))
            {
                Some(DragMode::Pan)
            } else {
                None
            };
            if let Some(mode) = mode {
                self.drag = Some(mode);
                events.push(ControlsEvent::DragStart);
            }
        }

        let delta = pointer.delta();
        match self.drag {
            Some(DragMode::Rotate) => {
                self.pending_azimuth -= delta.x * self.rotate_speed;
                self.pending_polar -= delta.y * self.rotate_speed;
                if !pointer.is_pressed(PointerButton::Primary) {
                    self.drag = None;
                    events.push(ControlsEvent::DragEnd);
                }
            }
            Some(DragMode::Pan) => {
                let distance = (camera.position - self.target).length();
                let scale = distance * self.pan_speed;
                self.pending_pan += (camera.up() * delta.y - camera.right() * delta.x) * scale;
                if !pointer.is_pressed(PointerButton::Secondary) && !pointer.is_pressed(PointerButton::Middle) {
                    self.drag = None;
                    events.push(ControlsEvent::DragEnd);
                }
            }
            None => {}
        }

        if self.enable_zoom && pointer.wheel_delta() != 0.0 {
            self.pending_zoom += pointer.wheel_delta() * self.zoom_speed;
        }

        events
    }

    /// Apply one frame of damped motion. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.is_moving() {
            return false;
        }

        let offset = camera.position - self.target;
        let radius = offset.length();
        if radius < 1e-6 {
            self.stop();
            return false;
        }

        let d = self.damping;
        let azimuth = offset.x.atan2(offset.z) + self.pending_azimuth * d;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() + self.pending_polar * d)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        let radius = (radius * (self.pending_zoom * d).exp()).clamp(self.min_distance, self.max_distance);
        self.target += self.pending_pan * d;

        let sin_polar = polar.sin();
        let before = camera.position;
        camera.position = self.target
            + Vec3::new(sin_polar * azimuth.sin(), polar.cos(), sin_polar * azimuth.cos()) * radius;
        camera.look_at(self.target, Vec3::Y);

        let keep = 1.0 - d;
        self.pending_azimuth = settle(self.pending_azimuth * keep);
        self.pending_polar = settle(self.pending_polar * keep);
        self.pending_zoom = settle(self.pending_zoom * keep);
        self.pending_pan *= keep;
        if self.pending_pan.length() < REST_EPSILON {
            self.pending_pan = Vec3::ZERO;
        }

        (camera.position - before).length_squared() > 1e-12
    }

    /// Drop pending motion and any drag in progress
    pub fn stop(&mut self) {
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_zoom = 0.0;
        self.pending_pan = Vec3::ZERO;
        self.drag = None;
    }
}

fn settle(value: f32) -> f32 {
    if value.abs() < REST_EPSILON { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::PointerEvent;

    fn setup() -> (OrbitControls, Camera) {
        let settings = CameraSettings::planetary();
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, settings.distance), settings.fov_degrees, 1.0);
        camera.look_at(Vec3::ZERO, Vec3::Y);
        (OrbitControls::new(Vec3::ZERO, &settings), camera)
    }

    fn drag(pointer: &mut PointerState, button: PointerButton, dx: f32) {
        pointer.process_event(&PointerEvent::Moved { x: 100.0, y: 100.0 });
        pointer.process_event(&PointerEvent::Pressed { x: 100.0, y: 100.0, button });
        pointer.process_event(&PointerEvent::Moved { x: 100.0 + dx, y: 100.0 });
    }

    #[test]
    fn test_rotate_drag_preserves_distance() {
        let (mut controls, mut camera) = setup();
        let mut pointer = PointerState::new();
        drag(&mut pointer, PointerButton::Primary, 50.0);
        let events = controls.handle_input(&camera, &pointer, false);
        assert_eq!(events, vec![ControlsEvent::DragStart]);

        let start = camera.position;
        for _ in 0..200 {
            controls.update(&mut camera);
        }
        assert!((camera.position - start).length() > 1.0);
        assert!((camera.position.length() - 25.0).abs() < 1e-3);
        assert!(!controls.is_moving());
    }

    #[test]
    fn test_hovered_gesture_blocks_drag() {
        let (mut controls, camera) = setup();
        let mut pointer = PointerState::new();
        drag(&mut pointer, PointerButton::Primary, 50.0);
        assert!(controls.handle_input(&camera, &pointer, true).is_empty());
        assert!(!controls.is_dragging());
        assert!(!controls.is_moving());
    }

    #[test]
    fn test_drag_end_on_release() {
        let (mut controls, camera) = setup();
        let mut pointer = PointerState::new();
        drag(&mut pointer, PointerButton::Primary, 5.0);
        controls.handle_input(&camera, &pointer, false);
        pointer.end_frame();
        pointer.process_event(&PointerEvent::Released { x: 105.0, y: 100.0, button: PointerButton::Primary });
        assert_eq!(controls.handle_input(&camera, &pointer, false), vec![ControlsEvent::DragEnd]);
    }

    #[test]
    fn test_disabled_rotate() {
        let (mut controls, camera) = setup();
        controls.enable_rotate = false;
        let mut pointer = PointerState::new();
        drag(&mut pointer, PointerButton::Primary, 50.0);
        assert!(controls.handle_input(&camera, &pointer, false).is_empty());
    }

    #[test]
    fn test_zoom_clamped() {
        let (mut controls, mut camera) = setup();
        let mut pointer = PointerState::new();
        pointer.process_event(&PointerEvent::Wheel { delta: 500.0 });
        controls.handle_input(&camera, &pointer, false);
        for _ in 0..200 {
            controls.update(&mut camera);
        }
        assert!((camera.position.length() - controls.max_distance).abs() < 1e-2);
    }

    #[test]
    fn test_idle_update_leaves_camera() {
        let (mut controls, mut camera) = setup();
        camera.position = Vec3::new(1000.0, 0.0, 0.0);
        assert!(!controls.update(&mut camera));
        assert_eq!(camera.position, Vec3::new(1000.0, 0.0, 0.0));
    }
}

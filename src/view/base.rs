//! Scene, camera and event plumbing shared by the planetary and orbital views.

use glam::Vec3;
use serde_json::Value;

use crate::config::CameraSettings;
use crate::core::camera::Camera;
use crate::core::camera_controller::{ControlsEvent, OrbitControls};
use crate::core::input::PointerState;
use crate::math::Ray;
use crate::scene::{Axis, Environment, Planet, PlanetFrame, SceneObject, StyleVariant, SunLine};
use crate::state::{logged_value, SimulationState, StateField, StatePatch, ViewKind};

use super::interaction::InteractionEvent;
use super::surface::{ContainerHandle, RenderSurface};
use super::ViewEvent;

pub struct ViewCore {
    pub kind: ViewKind,
    pub state: SimulationState,
    pub container: ContainerHandle,
    pub surface: RenderSurface,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub pointer: PointerState,
    pub environment: Environment,
    pub planet: Planet,
    pub axis: Axis,
    pub sun_line: SunLine,
    events: Vec<ViewEvent>,
    /// Value of the dragged fields when the current gesture started.
    gesture_previous: Value,
    torn_down: bool,
}

impl ViewCore {
    pub fn new(
        container: ContainerHandle,
        initial: &SimulationState,
        kind: ViewKind,
        style: StyleVariant,
        settings: &CameraSettings,
    ) -> Self {
        let (width, height) = container.size();
        let aspect = if height > 0 { width as f32 / height as f32 } else { 1.0 };
        let mut core = Self {
            kind,
            state: initial.clone(),
            container,
            surface: RenderSurface::new(width, height),
            camera: Camera::new(Vec3::ZERO, settings.fov_degrees, aspect),
            controls: OrbitControls::new(Vec3::ZERO, settings),
            pointer: PointerState::new(),
            environment: Environment::new(),
            planet: Planet::new(style),
            axis: Axis::new(style),
            sun_line: SunLine::new(style),
            events: Vec::new(),
            gesture_previous: Value::Null,
            torn_down: false,
        };
        core.update_tilt();
        core.update_rotation();
        core.update_day();
        core.update_sun_earth_line();
        core.update_gridlines();
        log::info!("Created {:?} view ({}x{})", kind, width, height);
        core
    }

    /// Take a patch into the local snapshot. Returns the fields that changed.
    pub fn absorb(&mut self, patch: &StatePatch) -> Vec<StateField> {
        if self.torn_down {
            return Vec::new();
        }
        patch.apply_to(&mut self.state)
    }

    pub fn update_day(&mut self) {
        self.planet.set_day(self.state.day);
        self.axis.set_position(self.planet.position());
        self.sun_line.set_endpoint_from_vector(self.planet.position());
    }

    pub fn update_tilt(&mut self) {
        let tilt = self.state.tilt_radians();
        self.planet.set_tilt(tilt);
        self.axis.set_tilt(tilt);
    }

    pub fn update_rotation(&mut self) {
        self.planet.set_rotation(self.state.earth_rotation);
    }

    pub fn update_sun_earth_line(&mut self) {
        self.sun_line.set_visible(self.state.sun_earth_line);
    }

    pub fn update_gridlines(&mut self) {
        self.planet.set_gridlines(self.state.earth_gridlines);
    }

    /// Current placement of the planet for surface objects.
    pub fn planet_frame(&self) -> PlanetFrame {
        PlanetFrame::new(self.planet.position(), self.planet.radius(), self.planet.tilt(), self.planet.rotation())
    }

    pub fn camera_to_planet(&self) -> Vec3 {
        self.planet.position() - self.camera.position
    }

    /// World ray under the pointer. `None` when the view is torn down, not
    /// yet sized, or the pointer is outside the surface.
    pub fn pick_ray(&self) -> Option<Ray> {
        if self.torn_down {
            return None;
        }
        let (width, height) = self.surface.size();
        if width == 0 || height == 0 {
            return None;
        }
        let p = self.pointer.position()?;
        self.camera.ray_from_screen(p.x, p.y, width as f32, height as f32)
    }

    /// Follow the container size. Returns whether the surface changed.
    pub fn resize(&mut self) -> bool {
        if self.torn_down || self.container.is_empty() {
            return false;
        }
        let (width, height) = self.container.size();
        if !self.surface.resize(width, height) {
            return false;
        }
        self.camera.set_aspect(width as f32, height as f32);
        log::debug!("{:?} view resized to {}x{}", self.kind, width, height);
        true
    }

    /// Apply camera damping, announcing any movement.
    pub fn advance_controls(&mut self) {
        if self.controls.update(&mut self.camera) {
            self.emit(ViewEvent::CameraChanged);
        }
    }

    /// Feed this frame's pointer input to the camera controls. Drags do not
    /// begin while a gesture is engaged.
    pub fn handle_controls_input(&mut self, gesture_engaged: bool) {
        for event in self.controls.handle_input(&self.camera, &self.pointer, gesture_engaged) {
            self.emit(match event {
                ControlsEvent::DragStart => ViewEvent::CameraDragStart,
                ControlsEvent::DragEnd => ViewEvent::CameraDragEnd,
            });
        }
    }

    /// Turn gesture notifications into view events.
    pub fn forward_interaction(&mut self, events: Vec<InteractionEvent>) {
        for event in events {
            match event {
                InteractionEvent::Started { name, fields } => {
                    self.gesture_previous = logged_value(&self.state, fields);
                    self.emit(ViewEvent::GestureStart { name });
                }
                InteractionEvent::Step(patch) => self.emit(ViewEvent::StatePatch(patch)),
                InteractionEvent::Ended { name, fields, duration_seconds } => {
                    let previous_value = std::mem::take(&mut self.gesture_previous);
                    self.emit(ViewEvent::GestureEnd { name, fields, previous_value, duration_seconds });
                }
            }
        }
    }

    /// Close the pointer frame.
    pub fn end_frame(&mut self) {
        self.pointer.end_frame();
    }

    /// Record the shared scene plus `extra` into the surface.
    pub fn paint(&mut self, extra: &[&dyn SceneObject]) {
        if self.torn_down {
            return;
        }
        let mut objects: Vec<&dyn SceneObject> = vec![&self.environment, &self.planet, &self.axis, &self.sun_line];
        objects.extend_from_slice(extra);
        self.surface.paint(&self.camera, &objects);
    }

    pub fn emit(&mut self, event: ViewEvent) {
        if !self.torn_down {
            self.events.push(event);
        }
    }

    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.pointer.detach();
        self.controls.stop();
        self.events.clear();
        log::info!("Tore down {:?} view", self.kind);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{PointerButton, PointerEvent};

    fn core() -> ViewCore {
        ViewCore::new(
            ContainerHandle::new(400, 300),
            &SimulationState::default(),
            ViewKind::Planetary,
            StyleVariant::CloseUp,
            &CameraSettings::planetary(),
        )
    }

    #[test]
    fn test_initial_scene_follows_state() {
        let c = core();
        assert!((c.planet.position() - crate::astro::orbital_position(c.state.day)).length() < 1e-4);
        assert!(c.sun_line.is_visible());
        assert!(c.planet.tilt() > 0.0);
    }

    #[test]
    fn test_pick_ray_needs_pointer_and_size() {
        let mut c = core();
        c.camera.position = Vec3::new(0.0, 0.0, 10.0);
        c.camera.look_at(Vec3::ZERO, Vec3::Y);
        assert!(c.pick_ray().is_none());
        c.pointer.process_event(&PointerEvent::Moved { x: 200.0, y: 150.0 });
        assert!(c.pick_ray().is_some());
        c.teardown();
        assert!(c.pick_ray().is_none());
    }

    #[test]
    fn test_resize_tracks_container() {
        let container = ContainerHandle::new(400, 300);
        let mut c = ViewCore::new(
            container.clone(),
            &SimulationState::default(),
            ViewKind::Orbital,
            StyleVariant::Orbit,
            &CameraSettings::orbital(),
        );
        assert!(!c.resize());
        container.set_size(0, 300);
        assert!(!c.resize());
        container.set_size(800, 200);
        assert!(c.resize());
        assert!(!c.resize());
        assert!((c.camera.aspect - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_gesture_end_carries_previous_value() {
        let mut c = core();
        c.forward_interaction(vec![InteractionEvent::Started { name: "g", fields: &[StateField::Latitude] }]);
        c.state.latitude = 12.0;
        c.forward_interaction(vec![InteractionEvent::Ended {
            name: "g",
            fields: &[StateField::Latitude],
            duration_seconds: 1.5,
        }]);
        let events = c.drain_events();
        assert_eq!(events[0], ViewEvent::GestureStart { name: "g" });
        match &events[1] {
            ViewEvent::GestureEnd { previous_value, duration_seconds, .. } => {
                assert_eq!(*previous_value, serde_json::json!(40.11_f32));
                assert_eq!(*duration_seconds, 1.5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_camera_drag_events() {
        let mut c = core();
        c.camera.position = c.planet.position() + Vec3::new(0.0, 5.0, 20.0);
        c.controls.target = c.planet.position();
        c.pointer.process_event(&PointerEvent::Pressed { x: 10.0, y: 10.0, button: PointerButton::Primary });
        c.handle_controls_input(true);
        assert!(c.drain_events().is_empty());
        c.handle_controls_input(false);
        assert_eq!(c.drain_events(), vec![ViewEvent::CameraDragStart]);
        c.end_frame();
        c.pointer.process_event(&PointerEvent::Moved { x: 40.0, y: 10.0 });
        c.handle_controls_input(false);
        c.advance_controls();
        assert_eq!(c.drain_events(), vec![ViewEvent::CameraChanged]);
    }

    #[test]
    fn test_teardown_detaches_pointer() {
        let mut c = core();
        c.teardown();
        c.pointer.process_event(&PointerEvent::Moved { x: 1.0, y: 1.0 });
        assert!(c.pointer.position().is_none());
        c.emit(ViewEvent::CameraChanged);
        assert!(c.drain_events().is_empty());
    }
}

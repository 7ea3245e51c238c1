//! Top-level simulation instance: state container, views and frame tick.

use crate::config::SeasonsConfig;
use crate::core::input::PointerEvent;
use crate::scheduler::{FrameScheduler, FrameTask};
use crate::services::log_sink::{InteractionLog, LogFacadeSink};
use crate::state::{ControlEvent, SimulationContainer, SimulationState, StatePatch, ViewKind, ViewSlot};
use crate::manager::ViewManager;

pub struct SeasonsApp {
    container: SimulationContainer,
    manager: ViewManager,
    scheduler: FrameScheduler,
}

impl SeasonsApp {
    /// Build with interactions logged through the `log` facade.
    pub fn new(config: &SeasonsConfig) -> Self {
        Self::with_log(config, Box::new(LogFacadeSink))
    }

    pub fn with_log(config: &SeasonsConfig, log: Box<dyn InteractionLog>) -> Self {
        let container = SimulationContainer::new(config.initial_state.clone(), config.speeds, log);
        let manager = ViewManager::new(config, container.state());
        log::info!("Simulation created (day {:.1})", container.state().day);
        Self { container, manager, scheduler: FrameScheduler::new() }
    }

    pub fn state(&self) -> &SimulationState {
        self.container.state()
    }

    pub fn manager(&self) -> &ViewManager {
        &self.manager
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Register the render tick.
    pub fn start(&mut self) {
        self.manager.start(&mut self.scheduler);
    }

    pub fn is_running(&self) -> bool {
        self.manager.is_running(&self.scheduler)
    }

    /// Run one animation frame.
    ///
    /// Animation steps and gesture checks queue patches first; everything
    /// queued is applied and broadcast before the continuous views paint.
    pub fn tick(&mut self, now_ms: f64) {
        let mut render = false;
        for (_, task) in self.scheduler.due() {
            match task {
                FrameTask::Render => render = true,
                FrameTask::MainAnimation | FrameTask::RotationAnimation => {
                    self.container.step_animation(task, now_ms);
                }
            }
        }
        if render {
            self.manager.update(now_ms);
        }
        self.manager.route(&mut self.container);
        if render {
            self.manager.paint();
        }
    }

    /// Request a state change outside any control.
    pub fn apply_patch(&mut self, patch: StatePatch) {
        self.container.request(patch);
        self.manager.route(&mut self.container);
    }

    /// A logged control change (slider, checkbox, button).
    pub fn control(&mut self, event: ControlEvent) {
        self.container.control(event);
        self.manager.route(&mut self.container);
    }

    pub fn set_main_animation(&mut self, on: bool, now_ms: f64) -> bool {
        let changed = self.container.set_main_animation(on, &mut self.scheduler, now_ms);
        if changed {
            log::info!("Main animation {}", if on { "started" } else { "stopped" });
        }
        changed
    }

    pub fn set_rotation_animation(&mut self, on: bool, now_ms: f64) -> bool {
        let changed = self.container.set_rotation_animation(on, &mut self.scheduler, now_ms);
        if changed {
            log::info!("Rotation animation {}", if on { "started" } else { "stopped" });
        }
        changed
    }

    pub fn is_main_animation_running(&self) -> bool {
        self.container.is_main_animation_running()
    }

    pub fn is_rotation_animation_running(&self) -> bool {
        self.container.is_rotation_animation_running()
    }

    pub fn set_view(&mut self, slot: ViewSlot, kind: ViewKind) -> Vec<ViewSlot> {
        self.manager.set_view(slot, kind, self.container.state())
    }

    pub fn resize(&mut self, slot: ViewSlot, width: u32, height: u32) {
        self.manager.resize_slot(slot, width, height);
    }

    pub fn pointer_event(&mut self, slot: ViewSlot, event: &PointerEvent) {
        self.manager.pointer_event(slot, event);
    }

    /// Returns false when no planetary view is mounted.
    pub fn look_at_subsolar(&mut self) -> bool {
        let Some(view) = self.manager.planetary_mut() else {
            return false;
        };
        view.look_at_subsolar();
        self.manager.route(&mut self.container);
        true
    }

    /// Returns false when no planetary view is mounted.
    pub fn look_at_marker(&mut self) -> bool {
        let Some(view) = self.manager.planetary_mut() else {
            return false;
        };
        view.look_at_marker();
        self.manager.route(&mut self.container);
        true
    }

    /// Stop animations and the render tick, and tear down every view.
    pub fn teardown(&mut self) {
        self.container.stop_animations(&mut self.scheduler);
        self.manager.teardown(&mut self.scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::{orbital_position, surface_direction};
    use crate::core::input::PointerButton;
    use crate::services::log_sink::MemorySink;
    use crate::state::AnimationSpeeds;
    use crate::view::View;
    use serde_json::json;

    fn app_with_sink() -> (SeasonsApp, MemorySink) {
        let sink = MemorySink::new();
        let app = SeasonsApp::with_log(&SeasonsConfig::default(), Box::new(sink.clone()));
        (app, sink)
    }

    #[test]
    fn test_look_at_subsolar_scenario() {
        let (mut app, _) = app_with_sink();
        app.apply_patch(StatePatch { day: Some(171.0), ..StatePatch::lat_long(40.11, -88.2) });
        let before = app.manager().planetary().unwrap().camera_to_planet().length();
        assert!(app.look_at_subsolar());

        let view = app.manager().planetary().unwrap();
        let planet = view.planet_position();
        let camera = view.camera().position;
        assert!((view.camera_to_planet().length() - before).abs() < 1e-3);
        assert!(camera.cross(planet).length() / planet.length() < 1e-3);
        // The orbital indicator follows
        let symbol = app.manager().orbital().unwrap().camera_symbol().direction();
        assert!((symbol - planet.normalize()).length() < 1e-4);
    }

    #[test]
    fn test_animation_is_painted_same_tick() {
        let (mut app, _) = app_with_sink();
        app.start();
        let start_day = app.state().day;
        app.set_main_animation(true, 0.0);
        app.tick(0.0);
        app.tick(100.0);
        let day = app.state().day;
        assert!((day - (start_day + 100.0 * AnimationSpeeds::default().day)).abs() < 1e-3);

        let drawn = app.manager().planetary().unwrap().surface().find("planet").unwrap();
        let drawn_position = drawn.world.w_axis.truncate();
        assert!((drawn_position - orbital_position(day)).length() < 1e-3);
    }

    #[test]
    fn test_start_stop_without_tick() {
        let (mut app, _) = app_with_sink();
        let before = app.state().clone();
        app.set_main_animation(true, 0.0);
        app.set_main_animation(false, 0.0);
        app.tick(500.0);
        assert_eq!(app.state(), &before);
    }

    #[test]
    fn test_without_render_tick_nothing_paints() {
        let (mut app, _) = app_with_sink();
        app.tick(16.0);
        assert_eq!(app.manager().planetary().unwrap().surface().frames_painted(), 0);
        app.start();
        app.tick(32.0);
        assert_eq!(app.manager().planetary().unwrap().surface().frames_painted(), 1);
    }

    #[test]
    fn test_control_is_logged() {
        let (mut app, sink) = app_with_sink();
        app.control(ControlEvent::new("DayPlusClicked", StatePatch::day(172.0)));
        assert_eq!(app.state().day, 172.0);
        let records = sink.records();
        assert_eq!(records[0].action, "DayPlusClicked");
        assert_eq!(records[0].params.value, json!(172.0));
    }

    #[test]
    fn test_marker_drag_is_logged_on_release() {
        let (mut app, sink) = app_with_sink();
        app.start();
        assert!(app.look_at_marker());
        let (w, h) = (800.0, 600.0);

        let view = app.manager().planetary().unwrap();
        let (x, y) = view.camera().project(view.scene().marker.position(), w, h).unwrap();
        app.pointer_event(ViewSlot::Main, &PointerEvent::Moved { x, y });
        app.pointer_event(ViewSlot::Main, &PointerEvent::Pressed { x, y, button: PointerButton::Primary });
        app.tick(1000.0);

        let state = app.state().clone();
        let view = app.manager().planetary().unwrap();
        let target = view.planet_position()
            + surface_direction(state.latitude - 5.0, state.longitude, state.tilt_radians(), state.earth_rotation) * 5.0;
        let (x, y) = view.camera().project(target, w, h).unwrap();
        app.pointer_event(ViewSlot::Main, &PointerEvent::Moved { x, y });
        app.tick(1100.0);
        assert!((app.state().latitude - (state.latitude - 5.0)).abs() < 0.05);
        assert!(sink.is_empty());

        app.pointer_event(ViewSlot::Main, &PointerEvent::Released { x, y, button: PointerButton::Primary });
        app.tick(2000.0);
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "LatLongMarkerDragged");
        assert_eq!(records[0].params.previous_value["latitude"], json!(40.11_f32));
        assert_eq!(records[0].params.value["latitude"], json!(app.state().latitude));
        assert!((records[0].params.duration_seconds - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_day_keeps_camera_valid() {
        let (mut app, _) = app_with_sink();
        let before = app.state().day;
        app.apply_patch(serde_json::from_str(r#"{"day": 1e39}"#).unwrap());
        assert_eq!(app.state().day, before);
        assert!(app.manager().planetary().unwrap().camera().position.is_finite());

        app.apply_patch(StatePatch::day(100.0));
        assert_eq!(app.state().day, 100.0);
        let view = app.manager().planetary().unwrap();
        assert!(view.camera().position.is_finite());
        assert!((view.planet_position() - orbital_position(100.0)).length() < 1e-3);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let (mut app, _) = app_with_sink();
        app.start();
        app.set_rotation_animation(true, 0.0);
        app.teardown();
        assert!(app.scheduler().is_empty());
        assert!(!app.is_running());
        assert!(app.manager().view(ViewSlot::Main).is_none());
        assert!(!app.look_at_subsolar());
    }

    #[test]
    fn test_set_view_swaps() {
        let (mut app, _) = app_with_sink();
        app.set_view(ViewSlot::SecondaryBottom, ViewKind::SpaceRays);
        let rays = app.manager().view(ViewSlot::SecondaryBottom).unwrap().as_view();
        assert_eq!(rays.kind(), ViewKind::SpaceRays);
    }
}

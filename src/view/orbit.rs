//! Whole-orbit view: the planet circling the sun, month labels and the
//! indicator of where the planetary camera looks.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::astro::{DAYS_PER_YEAR, ORBIT_SEMI_MAJOR, ORBIT_SEMI_MINOR, SUMMER_SOLSTICE};
use crate::config::CameraSettings;
use crate::core::camera::Camera;
use crate::core::input::PointerEvent;
use crate::math::{wrap_pi, Ray};
use crate::scene::{CameraSymbol, LatMarker, LatRing, MonthLabels, Planet, StyleVariant};
use crate::state::{SimulationState, StateField, StatePatch, ViewKind};

use super::base::ViewCore;
use super::hooks::{dispatch_in_place, Hook, HookTable};
use super::interaction::{Gesture, Interaction};
use super::surface::{ContainerHandle, RenderSurface};
use super::{View, ViewEvent};

/// Highest day a drag can produce.
const DRAG_DAY_SPAN: f32 = 364.0;

/// Day for a point in the orbital plane.
///
/// The angle from the day-zero position to the point's ellipse parameter is
/// mapped linearly onto `[0, 364)`; negative differences wrap.
pub fn day_from_orbit_point(point: Vec3) -> f32 {
    let point_angle = (point.z / ORBIT_SEMI_MINOR).atan2(point.x / ORBIT_SEMI_MAJOR);
    let reference = SUMMER_SOLSTICE / DAYS_PER_YEAR * TAU;
    let mut day = wrap_pi(reference - point_angle) / TAU * DRAG_DAY_SPAN;
    if day < 0.0 {
        day += DRAG_DAY_SPAN;
    }
    // Tiny negative differences round up to the span itself
    if day >= DRAG_DAY_SPAN { 0.0 } else { day }
}

/// Day under a pointer ray, if the ray meets the orbital plane.
pub fn day_from_orbit_ray(ray: &Ray) -> Option<f32> {
    ray.intersect_plane(Vec3::ZERO, Vec3::Y).map(day_from_orbit_point)
}

fn orbit_drag_gesture() -> Gesture<Planet> {
    Gesture {
        name: "EarthOrbitDragged",
        fields: &[StateField::Day],
        test: |planet, ray| planet.pick(ray).is_some(),
        set_active: |planet, on| planet.set_highlighted(on),
        step: |_, ray| day_from_orbit_ray(ray).map(StatePatch::day),
    }
}

pub struct OrbitalView {
    core: ViewCore,
    marker: LatMarker,
    ring: LatRing,
    camera_symbol: CameraSymbol,
    month_labels: MonthLabels,
    interaction: Interaction<Planet>,
    hooks: HookTable<OrbitalView>,
}

impl OrbitalView {
    pub fn new(container: ContainerHandle, initial: &SimulationState, settings: &CameraSettings) -> Self {
        let mut core = ViewCore::new(container, initial, ViewKind::Orbital, StyleVariant::Orbit, settings);
        core.camera.position = Vec3::new(0.0, 0.75, 0.66).normalize() * settings.distance;
        core.camera.look_at(Vec3::ZERO, Vec3::Y);
        core.controls.target = Vec3::ZERO;

        let mut interaction = Interaction::new();
        interaction.register(orbit_drag_gesture());

        let hooks = HookTable::new()
            .on(StateField::Day, Self::update_day as Hook<Self>)
            .on(StateField::EarthTilt, Self::update_tilt)
            .on(StateField::EarthRotation, Self::update_rotation)
            .on(StateField::SunEarthLine, |v, _| v.core.update_sun_earth_line())
            .on(StateField::Latitude, Self::update_lat_long)
            .on(StateField::Longitude, Self::update_lat_long)
            .on(StateField::EarthGridlines, |v, _| v.core.update_gridlines())
            .on(StateField::Language, |v, state| v.month_labels.set_language(state.language));

        let mut view = Self {
            core,
            marker: LatMarker::new(StyleVariant::Orbit),
            ring: LatRing::new(StyleVariant::Orbit),
            camera_symbol: CameraSymbol::new(StyleVariant::Orbit),
            month_labels: MonthLabels::new(initial.language),
            interaction,
            hooks,
        };
        view.sync_planet_objects();
        view.update_lat_long(initial);
        view
    }

    /// Point the camera indicator along the planetary view's
    /// camera-to-planet vector.
    pub fn set_camera_direction(&mut self, camera_to_planet: Vec3) {
        self.camera_symbol.set_direction(camera_to_planet);
    }

    pub fn camera_symbol(&self) -> &CameraSymbol {
        &self.camera_symbol
    }

    pub fn month_labels(&self) -> &MonthLabels {
        &self.month_labels
    }

    pub fn camera(&self) -> &Camera {
        &self.core.camera
    }

    pub fn planet(&self) -> &Planet {
        &self.core.planet
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.core.surface
    }

    fn sync_planet_objects(&mut self) {
        let frame = self.core.planet_frame();
        self.marker.set_frame(frame);
        self.ring.set_frame(frame);
        self.camera_symbol.set_planet_position(frame.position);
    }

    fn update_day(&mut self, _: &SimulationState) {
        self.core.update_day();
        self.sync_planet_objects();
    }

    fn update_tilt(&mut self, _: &SimulationState) {
        self.core.update_tilt();
        self.sync_planet_objects();
    }

    fn update_rotation(&mut self, _: &SimulationState) {
        self.core.update_rotation();
        self.sync_planet_objects();
    }

    fn update_lat_long(&mut self, state: &SimulationState) {
        self.marker.set_lat_long(state.latitude, state.longitude);
        self.ring.set_latitude(state.latitude);
    }
}

impl View for OrbitalView {
    fn kind(&self) -> ViewKind {
        ViewKind::Orbital
    }

    fn apply_state_patch(&mut self, patch: &StatePatch) {
        let changed = self.core.absorb(patch);
        if changed.is_empty() {
            return;
        }
        let state = self.core.state.clone();
        dispatch_in_place(self, |v| &mut v.hooks, &changed, &state);
    }

    fn update(&mut self, now_ms: f64) {
        if self.core.is_torn_down() {
            return;
        }
        self.core.advance_controls();
        let ray = self.core.pick_ray();
        let events = self.interaction.check(&mut self.core.planet, ray.as_ref(), &self.core.pointer, now_ms);
        self.core.forward_interaction(events);
        self.core.handle_controls_input(self.interaction.is_engaged());
        self.core.end_frame();
    }

    fn paint(&mut self) {
        self.core.paint(&[&self.marker, &self.ring, &self.camera_symbol, &self.month_labels]);
    }

    fn resize(&mut self) {
        self.core.resize();
    }

    fn pointer_event(&mut self, event: &PointerEvent) {
        self.core.pointer.process_event(event);
    }

    fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.core.drain_events()
    }

    fn teardown(&mut self) {
        self.interaction.reset(&mut self.core.planet);
        self.core.teardown();
    }

    fn is_torn_down(&self) -> bool {
        self.core.is_torn_down()
    }
}

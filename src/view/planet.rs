//! Close-up view of the planet with the latitude/longitude marker.

use glam::{Quat, Vec3};

use crate::astro::{lat_long_from_direction, surface_direction};
use crate::config::CameraSettings;
use crate::core::camera::Camera;
use crate::core::input::PointerEvent;
use crate::math::{signed_angle_around, Ray};
use crate::scene::{LatMarker, LatRing, StyleVariant};
use crate::state::{SimulationState, StateField, StatePatch, ViewKind};

use super::base::ViewCore;
use super::hooks::{dispatch_in_place, Hook, HookTable};
use super::interaction::{Gesture, Interaction};
use super::surface::{ContainerHandle, RenderSurface};
use super::{View, ViewEvent};

/// Objects the planetary gestures act on.
pub struct PlanetaryScene {
    pub marker: LatMarker,
    pub ring: LatRing,
}

fn marker_gesture() -> Gesture<PlanetaryScene> {
    Gesture {
        name: "LatLongMarkerDragged",
        fields: &[StateField::Latitude, StateField::Longitude],
        test: |scene, ray| scene.marker.pick(ray).is_some(),
        set_active: |scene, on| scene.marker.set_highlighted(on),
        step: |scene, ray| {
            let frame = scene.marker.frame();
            let hit = ray.intersect_sphere(frame.position, frame.radius)?;
            let (latitude, longitude) = lat_long_from_direction(hit - frame.position, frame.tilt, frame.rotation);
            Some(StatePatch::lat_long(latitude, longitude))
        },
    }
}

fn ring_gesture() -> Gesture<PlanetaryScene> {
    Gesture {
        name: "LatitudeRingDragged",
        fields: &[StateField::Latitude],
        test: |scene, ray| scene.ring.pick(ray).is_some(),
        set_active: |scene, on| scene.ring.set_highlighted(on),
        step: |scene, ray: &Ray| {
            let frame = scene.ring.frame();
            let hit = ray.intersect_sphere(frame.position, frame.radius)?;
            let (latitude, _) = lat_long_from_direction(hit - frame.position, frame.tilt, frame.rotation);
            Some(StatePatch::latitude(latitude))
        },
    }
}

pub struct PlanetaryView {
    core: ViewCore,
    scene: PlanetaryScene,
    interaction: Interaction<PlanetaryScene>,
    hooks: HookTable<PlanetaryView>,
}

impl PlanetaryView {
    pub fn new(container: ContainerHandle, initial: &SimulationState, settings: &CameraSettings) -> Self {
        let mut core = ViewCore::new(container, initial, ViewKind::Planetary, StyleVariant::CloseUp, settings);
        core.controls.enable_pan = false;

        let planet = core.planet.position();
        let toward_sun = -planet.normalize_or_zero();
        core.camera.position = planet + (toward_sun + Vec3::Y * 0.3).normalize() * settings.distance;
        core.camera.look_at(planet, Vec3::Y);
        core.controls.target = planet;

        let mut interaction = Interaction::new();
        interaction.register(marker_gesture());
        interaction.register(ring_gesture());

        let hooks = HookTable::new()
            .on(StateField::Day, Self::update_day as Hook<Self>)
            .on(StateField::EarthTilt, Self::update_tilt)
            .on(StateField::EarthRotation, Self::update_rotation)
            .on(StateField::SunEarthLine, |v, _| v.core.update_sun_earth_line())
            .on(StateField::Latitude, Self::update_lat_long)
            .on(StateField::Longitude, Self::update_lat_long)
            .on(StateField::EarthGridlines, |v, _| v.core.update_gridlines());

        let mut view = Self {
            core,
            scene: PlanetaryScene {
                marker: LatMarker::new(StyleVariant::CloseUp),
                ring: LatRing::new(StyleVariant::CloseUp),
            },
            interaction,
            hooks,
        };
        view.sync_surface_objects();
        view.update_lat_long(initial);
        view
    }

    pub fn camera(&self) -> &Camera {
        &self.core.camera
    }

    pub fn camera_to_planet(&self) -> Vec3 {
        self.core.camera_to_planet()
    }

    pub fn planet_position(&self) -> Vec3 {
        self.core.planet.position()
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.core.surface
    }

    pub fn scene(&self) -> &PlanetaryScene {
        &self.scene
    }

    pub fn interaction(&self) -> &Interaction<PlanetaryScene> {
        &self.interaction
    }

    pub fn state(&self) -> &SimulationState {
        &self.core.state
    }

    /// Put the camera between sun and planet, looking at the subsolar point.
    /// The camera keeps its distance to the planet.
    pub fn look_at_subsolar(&mut self) {
        let planet = self.core.planet.position();
        let distance = self.core.camera_to_planet().length();
        self.core.camera.position = planet - planet.normalize_or_zero() * distance;
        self.face_planet();
        log::info!("Camera looking at subsolar point");
    }

    /// Swing the camera around the planet to face the marker.
    pub fn look_at_marker(&mut self) {
        let planet = self.core.planet.position();
        let distance = self.core.camera_to_planet().length();
        let (latitude, longitude) = self.scene.marker.lat_long();
        let dir = surface_direction(latitude, longitude, self.core.planet.tilt(), self.core.planet.rotation());
        self.core.camera.position = planet + dir * distance;
        self.face_planet();
        log::info!("Camera looking at marker ({:.2}, {:.2})", latitude, longitude);
    }

    fn face_planet(&mut self) {
        let planet = self.core.planet.position();
        self.core.camera.look_at(planet, Vec3::Y);
        self.core.controls.stop();
        self.core.controls.target = planet;
        self.core.emit(ViewEvent::CameraChanged);
    }

    fn sync_surface_objects(&mut self) {
        let frame = self.core.planet_frame();
        self.scene.marker.set_frame(frame);
        self.scene.ring.set_frame(frame);
    }

    /// Move with the planet. The camera offset is turned by the planet's
    /// change in orbital angle and scaled by the change in orbital radius,
    /// so the planet holds still on screen.
    fn update_day(&mut self, _: &SimulationState) {
        let before = self.core.planet.position();
        self.core.update_day();
        let after = self.core.planet.position();
        self.sync_surface_objects();

        let angle = signed_angle_around(before, after, Vec3::Y);
        let scale = if before.length() > f32::EPSILON { after.length() / before.length() } else { 1.0 };
        let offset = self.core.camera.position - before;
        self.core.camera.position = after + Quat::from_rotation_y(angle) * offset * scale;
        self.core.camera.look_at(after, Vec3::Y);
        self.core.controls.target = after;
        // Listeners read camera_to_planet, so this goes out last
        self.core.emit(ViewEvent::CameraChanged);
    }

    fn update_tilt(&mut self, _: &SimulationState) {
        self.core.update_tilt();
        self.sync_surface_objects();
    }

    fn update_rotation(&mut self, _: &SimulationState) {
        self.core.update_rotation();
        self.sync_surface_objects();
    }

    fn update_lat_long(&mut self, state: &SimulationState) {
        self.scene.marker.set_lat_long(state.latitude, state.longitude);
        self.scene.ring.set_latitude(state.latitude);
    }
}

impl View for PlanetaryView {
    fn kind(&self) -> ViewKind {
        ViewKind::Planetary
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
        let events = self.interaction.check(&mut self.scene, ray.as_ref(), &self.core.pointer, now_ms);
        self.core.forward_interaction(events);
        self.core.handle_controls_input(self.interaction.is_engaged());
        self.core.end_frame();
    }

    fn paint(&mut self) {
        self.core.paint(&[&self.scene.marker, &self.scene.ring]);
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
        self.interaction.reset(&mut self.scene);
        self.core.teardown();
    }

    fn is_torn_down(&self) -> bool {
        self.core.is_torn_down()
    }
}

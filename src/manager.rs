//! View manager: mounts views into layout slots and routes their events.

use std::collections::HashMap;

use crate::config::{CameraSettings, SeasonsConfig, SurfaceSize};
use crate::core::input::PointerEvent;
use crate::scheduler::{FrameScheduler, FrameTask, TaskHandle};
use crate::state::{
    logged_value, SimulationContainer, SimulationState, StateField, StatePatch, ViewKind, ViewLayoutState, ViewSlot,
};
use crate::view::{
    ContainerHandle, MountedView, OrbitalView, Perspective, PlanetaryView, RaysView, View, ViewEvent,
};

/// Upper bound on patch/broadcast rounds per routing pass.
const MAX_ROUTING_ROUNDS: usize = 8;

/// A finished drag gesture waiting to be logged.
struct GestureEnd {
    name: &'static str,
    fields: &'static [StateField],
    previous_value: serde_json::Value,
    duration_seconds: f64,
}

pub struct ViewManager {
    layout: ViewLayoutState,
    containers: HashMap<ViewSlot, ContainerHandle>,
    views: HashMap<ViewSlot, MountedView>,
    planetary_camera: CameraSettings,
    orbital_camera: CameraSettings,
    render_task: Option<TaskHandle>,
}

impl ViewManager {
    pub fn new(config: &SeasonsConfig, state: &SimulationState) -> Self {
        let size_of = |slot: ViewSlot| -> SurfaceSize {
            match slot {
                ViewSlot::Main => config.main_view_size,
                _ => config.secondary_view_size,
            }
        };
        let containers = ViewSlot::ALL
            .into_iter()
            .map(|slot| {
                let size = size_of(slot);
                (slot, ContainerHandle::new(size.width, size.height))
            })
            .collect();
        let mut manager = Self {
            layout: config.layout.clone(),
            containers,
            views: HashMap::new(),
            planetary_camera: config.planetary_camera,
            orbital_camera: config.orbital_camera,
            render_task: None,
        };
        for slot in ViewSlot::ALL {
            manager.mount(slot, state);
        }
        manager.sync_camera_indicator();
        manager
    }

    pub fn layout(&self) -> &ViewLayoutState {
        &self.layout
    }

    pub fn container(&self, slot: ViewSlot) -> Option<&ContainerHandle> {
        self.containers.get(&slot)
    }

    pub fn view(&self, slot: ViewSlot) -> Option<&MountedView> {
        self.views.get(&slot)
    }

    pub fn view_of(&self, kind: ViewKind) -> Option<&MountedView> {
        self.layout.slot_of(kind).and_then(|slot| self.views.get(&slot))
    }

    fn view_of_mut(&mut self, kind: ViewKind) -> Option<&mut MountedView> {
        let slot = self.layout.slot_of(kind)?;
        self.views.get_mut(&slot)
    }

    pub fn planetary(&self) -> Option<&PlanetaryView> {
        self.view_of(ViewKind::Planetary).and_then(MountedView::as_planetary)
    }

    pub fn planetary_mut(&mut self) -> Option<&mut PlanetaryView> {
        self.view_of_mut(ViewKind::Planetary).and_then(MountedView::as_planetary_mut)
    }

    pub fn orbital(&self) -> Option<&OrbitalView> {
        self.view_of(ViewKind::Orbital).and_then(MountedView::as_orbital)
    }

    pub fn rays(&self, perspective: Perspective) -> Option<&RaysView> {
        let kind = match perspective {
            Perspective::Ground => ViewKind::GroundRays,
            Perspective::Space => ViewKind::SpaceRays,
        };
        self.view_of(kind).and_then(MountedView::as_rays)
    }

    // -----------------------------------------------------------------------
    // Mounting and layout
    // -----------------------------------------------------------------------

    fn mount(&mut self, slot: ViewSlot, state: &SimulationState) {
        let Some(container) = self.containers.get(&slot).cloned() else {
            return;
        };
        let view = match self.layout.get(slot) {
            ViewKind::Planetary => {
                MountedView::Planetary(Box::new(PlanetaryView::new(container, state, &self.planetary_camera)))
            }
            ViewKind::Orbital => {
                MountedView::Orbital(Box::new(OrbitalView::new(container, state, &self.orbital_camera)))
            }
            ViewKind::GroundRays => MountedView::Rays(RaysView::new(Perspective::Ground, container, state)),
            ViewKind::SpaceRays => MountedView::Rays(RaysView::new(Perspective::Space, container, state)),
            ViewKind::None => return,
        };
        self.views.insert(slot, view);
    }

    fn unmount(&mut self, slot: ViewSlot) {
        if let Some(mut view) = self.views.remove(&slot) {
            view.as_view_mut().teardown();
        }
    }

    /// Put `kind` into `slot`, swapping with the slot that held it. Views in
    /// the affected slots are rebuilt from `state`.
    pub fn set_view(&mut self, slot: ViewSlot, kind: ViewKind, state: &SimulationState) -> Vec<ViewSlot> {
        let changed = self.layout.assign(slot, kind);
        if changed.is_empty() {
            return changed;
        }
        log::info!("Layout changed: {:?} -> {:?} (slots {:?})", kind, slot, changed);
        for slot in &changed {
            self.unmount(*slot);
        }
        for slot in &changed {
            self.mount(*slot, state);
        }
        self.resize_all();
        changed
    }

    /// Resize every mounted view to its container and resync the camera
    /// indicator.
    pub fn resize_all(&mut self) {
        for view in self.views.values_mut() {
            view.as_view_mut().resize();
        }
        self.sync_camera_indicator();
    }

    /// Resize one panel.
    pub fn resize_slot(&mut self, slot: ViewSlot, width: u32, height: u32) {
        if let Some(container) = self.containers.get(&slot) {
            container.set_size(width, height);
        }
        self.resize_all();
    }

    /// Push the planetary camera's viewing direction to the orbital
    /// indicator.
    pub fn sync_camera_indicator(&mut self) {
        let Some(direction) = self.planetary().map(PlanetaryView::camera_to_planet) else {
            return;
        };
        if let Some(orbital) = self.view_of_mut(ViewKind::Orbital).and_then(MountedView::as_orbital_mut) {
            orbital.set_camera_direction(direction);
        }
    }

    // -----------------------------------------------------------------------
    // Per-frame tick
    // -----------------------------------------------------------------------

    /// Register the render tick.
    pub fn start(&mut self, scheduler: &mut FrameScheduler) {
        if self.render_task.is_some_and(|h| scheduler.is_scheduled(h)) {
            return;
        }
        self.render_task = Some(scheduler.schedule(FrameTask::Render));
    }

    /// Cancel the render tick. Safe to call when not running.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(handle) = self.render_task.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn is_running(&self, scheduler: &FrameScheduler) -> bool {
        self.render_task.is_some_and(|h| scheduler.is_scheduled(h))
    }

    /// Camera damping and gesture checks of the continuous views.
    pub fn update(&mut self, now_ms: f64) {
        for slot in ViewSlot::ALL {
            if let Some(view) = self.views.get_mut(&slot) {
                let view = view.as_view_mut();
                if view.is_continuous() {
                    view.update(now_ms);
                }
            }
        }
    }

    /// Paint the continuous views.
    pub fn paint(&mut self) {
        for slot in ViewSlot::ALL {
            if let Some(view) = self.views.get_mut(&slot) {
                let view = view.as_view_mut();
                if view.is_continuous() {
                    view.paint();
                }
            }
        }
    }

    pub fn pointer_event(&mut self, slot: ViewSlot, event: &PointerEvent) {
        if let Some(view) = self.views.get_mut(&slot) {
            view.as_view_mut().pointer_event(event);
        }
    }

    /// Send an authoritative update to every view.
    pub fn broadcast(&mut self, patch: &StatePatch) {
        for slot in ViewSlot::ALL {
            if let Some(view) = self.views.get_mut(&slot) {
                view.as_view_mut().apply_state_patch(patch);
            }
        }
    }

    fn drain_view_events(&mut self) -> Vec<(ViewKind, ViewEvent)> {
        let mut events = Vec::new();
        for slot in ViewSlot::ALL {
            if let Some(view) = self.views.get_mut(&slot) {
                let view = view.as_view_mut();
                let kind = view.kind();
                events.extend(view.drain_events().into_iter().map(|e| (kind, e)));
            }
        }
        events
    }

    /// Move view requests into the container, apply everything queued and
    /// fan the results back out, until nothing is left. Returns the applied
    /// patches.
    pub fn route(&mut self, container: &mut SimulationContainer) -> Vec<StatePatch> {
        let mut applied = Vec::new();
        let mut finished = Vec::new();
        let mut camera_moved = false;

        for _ in 0..MAX_ROUTING_ROUNDS {
            let events = self.drain_view_events();
            if events.is_empty() && container.pending() == 0 {
                break;
            }
            for (kind, event) in events {
                match event {
                    ViewEvent::StatePatch(patch) => container.request(patch),
                    ViewEvent::CameraChanged => camera_moved |= kind == ViewKind::Planetary,
                    ViewEvent::CameraDragStart => log::debug!("{:?} camera drag started", kind),
                    ViewEvent::CameraDragEnd => log::debug!("{:?} camera drag ended", kind),
                    ViewEvent::GestureStart { name } => log::debug!("{:?} gesture {} started", kind, name),
                    ViewEvent::GestureEnd { name, fields, previous_value, duration_seconds } => {
                        finished.push(GestureEnd { name, fields, previous_value, duration_seconds });
                    }
                }
            }
            for patch in container.drain() {
                self.broadcast(&patch);
                applied.push(patch);
            }
        }

        for end in finished {
            let value = logged_value(container.state(), end.fields);
            container.log_interaction(end.name, value, end.previous_value, end.duration_seconds);
        }
        if camera_moved {
            self.sync_camera_indicator();
        }
        applied
    }

    /// Tear every view down and stop the render tick.
    pub fn teardown(&mut self, scheduler: &mut FrameScheduler) {
        self.stop(scheduler);
        for slot in ViewSlot::ALL {
            self.unmount(slot);
        }
        log::info!("View manager torn down");
    }
}

//! Views of the simulation.
//!
//! Every view keeps its own snapshot of the simulation state, updated only
//! through [`View::apply_state_patch`]. Views never talk to each other;
//! whatever they want changed leaves through [`View::drain_events`] and is
//! routed by the [`ViewManager`](crate::manager::ViewManager).

pub mod base;
pub mod hooks;
pub mod interaction;
pub mod orbit;
pub mod planet;
pub mod rays;
pub mod surface;

pub use base::ViewCore;
pub use hooks::{Hook, HookTable};
pub use interaction::{Gesture, Interaction, InteractionEvent};
pub use orbit::OrbitalView;
pub use planet::PlanetaryView;
pub use rays::{Perspective, RaysView};
pub use surface::{ContainerHandle, DrawItem, RenderSurface};

use serde_json::Value;

use crate::core::input::PointerEvent;
use crate::state::{StateField, StatePatch, ViewKind};

/// Notifications a view raises for the manager.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    /// A gesture asks for a state change.
    StatePatch(StatePatch),
    CameraChanged,
    CameraDragStart,
    CameraDragEnd,
    GestureStart { name: &'static str },
    GestureEnd {
        name: &'static str,
        fields: &'static [StateField],
        previous_value: Value,
        duration_seconds: f64,
    },
}

pub trait View {
    fn kind(&self) -> ViewKind;

    /// Take an authoritative state update. Unhandled fields are ignored.
    fn apply_state_patch(&mut self, patch: &StatePatch);

    /// Per-frame work before painting: camera damping and gesture checks.
    fn update(&mut self, now_ms: f64);

    fn paint(&mut self);

    fn render_frame(&mut self, now_ms: f64) {
        self.update(now_ms);
        self.paint();
    }

    /// Follow the container size. A no-op for empty or unchanged sizes.
    fn resize(&mut self);

    fn pointer_event(&mut self, event: &PointerEvent);

    fn drain_events(&mut self) -> Vec<ViewEvent>;

    /// Detach input and stop producing events.
    fn teardown(&mut self);

    fn is_torn_down(&self) -> bool;

    /// Whether the view belongs on the per-frame tick.
    fn is_continuous(&self) -> bool {
        self.kind().is_continuous()
    }
}

/// A view mounted in a layout slot.
pub enum MountedView {
    Planetary(Box<PlanetaryView>),
    Orbital(Box<OrbitalView>),
    Rays(RaysView),
}

impl MountedView {
    pub fn as_view(&self) -> &dyn View {
        match self {
            MountedView::Planetary(v) => v.as_ref(),
            MountedView::Orbital(v) => v.as_ref(),
            MountedView::Rays(v) => v,
        }
    }

    pub fn as_view_mut(&mut self) -> &mut dyn View {
        match self {
            MountedView::Planetary(v) => v.as_mut(),
            MountedView::Orbital(v) => v.as_mut(),
            MountedView::Rays(v) => v,
        }
    }

    pub fn as_planetary(&self) -> Option<&PlanetaryView> {
        match self {
            MountedView::Planetary(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    pub fn as_planetary_mut(&mut self) -> Option<&mut PlanetaryView> {
        match self {
            MountedView::Planetary(v) => Some(v.as_mut()),
            _ => None,
        }
    }

    pub fn as_orbital(&self) -> Option<&OrbitalView> {
        match self {
            MountedView::Orbital(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    pub fn as_orbital_mut(&mut self) -> Option<&mut OrbitalView> {
        match self {
            MountedView::Orbital(v) => Some(v.as_mut()),
            _ => None,
        }
    }

    pub fn as_rays(&self) -> Option<&RaysView> {
        match self {
            MountedView::Rays(v) => Some(v),
            _ => None,
        }
    }
}

//! Simulation state: the shared record, layout, animation toggles and the
//! container that owns them.

pub mod animation;
pub mod container;
pub mod layout;
pub mod simulation;

pub use animation::{AnimationToggle, ToggleState};
pub use container::{AnimationSpeeds, ControlEvent, SimulationContainer, logged_value};
pub use layout::{ViewKind, ViewLayoutState, ViewSlot};
pub use simulation::{Color, GroundColor, Locale, SimulationState, StateField, StatePatch};

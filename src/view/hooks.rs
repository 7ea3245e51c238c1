//! Per-field update hooks.
//!
//! Each view registers, once at construction, the handler to run when a
//! given state field changes. Fields without a handler are ignored.

use crate::state::{SimulationState, StateField};

/// Handler run with the view and its updated state snapshot.
pub type Hook<V> = fn(&mut V, &SimulationState);

pub struct HookTable<V> {
    hooks: Vec<(StateField, Hook<V>)>,
}

impl<V> Default for HookTable<V> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<V> HookTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` for `field`, replacing any earlier registration.
    pub fn on(mut self, field: StateField, hook: Hook<V>) -> Self {
        self.hooks.retain(|(f, _)| *f != field);
        self.hooks.push((field, hook));
        self
    }

    pub fn handles(&self, field: StateField) -> bool {
        self.hooks.iter().any(|(f, _)| *f == field)
    }

    /// Run the hooks of `changed` in registration order.
    pub fn dispatch(&self, view: &mut V, changed: &[StateField], state: &SimulationState) {
        for (field, hook) in &self.hooks {
            if changed.contains(field) {
                hook(view, state);
            }
        }
    }
}

/// Dispatch through a table stored inside the view itself.
///
/// The table is moved out for the duration of the call so hooks can take
/// the view mutably.
pub fn dispatch_in_place<V>(
    view: &mut V,
    table: fn(&mut V) -> &mut HookTable<V>,
    changed: &[StateField],
    state: &SimulationState,
) {
    let hooks = std::mem::take(table(view));
    hooks.dispatch(view, changed, state);
    *table(view) = hooks;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        hooks: HookTable<Recorder>,
    }

    fn on_day(p: &mut Recorder, _: &SimulationState) {
        p.calls.push("day");
    }

    fn on_latitude(p: &mut Recorder, _: &SimulationState) {
        p.calls.push("latitude");
    }

    #[test]
    fn test_only_registered_changed_fields_run() {
        let table = HookTable::new()
            .on(StateField::Day, on_day as Hook<Recorder>)
            .on(StateField::Latitude, on_latitude);
        let mut recorder = Recorder::default();
        table.dispatch(&mut recorder, &[StateField::Latitude, StateField::Language], &SimulationState::default());
        assert_eq!(recorder.calls, vec!["latitude"]);
        assert!(!table.handles(StateField::Language));
    }

    #[test]
    fn test_registration_order() {
        let table = HookTable::new()
            .on(StateField::Latitude, on_latitude as Hook<Recorder>)
            .on(StateField::Day, on_day);
        let mut recorder = Recorder::default();
        table.dispatch(&mut recorder, &[StateField::Day, StateField::Latitude], &SimulationState::default());
        assert_eq!(recorder.calls, vec!["latitude", "day"]);
    }

    #[test]
    fn test_in_place_table() {
        let mut recorder = Recorder::default();
        recorder.hooks = HookTable::new().on(StateField::Day, on_day);
        dispatch_in_place(&mut recorder, |p| &mut p.hooks, &[StateField::Day], &SimulationState::default());
        assert_eq!(recorder.calls, vec!["day"]);
        assert!(recorder.hooks.handles(StateField::Day));
    }
}

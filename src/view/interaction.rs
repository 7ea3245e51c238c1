//! Pointer gesture recognition.
//!
//! A view registers named gestures against a context type `C` that holds the
//! scene objects the gestures act on. Each frame the view hands the current
//! pointer ray and the context to [`Interaction::check`]; gestures never
//! capture view state themselves.
//!
//! At most one gesture is active (hovered) and at most one started
//! (dragging). The first registered gesture whose test passes wins
//! activation; once started, only that gesture steps until the primary
//! button is released.

use crate::core::input::{PointerButton, PointerState};
use crate::math::Ray;
use crate::state::{StateField, StatePatch};

/// A named pointer-driven behaviour bound to a target.
pub struct Gesture<C> {
    pub name: &'static str,
    /// State fields the gesture edits, for logging.
    pub fields: &'static [StateField],
    /// Is the pointer over the target?
    pub test: fn(&C, &Ray) -> bool,
    /// Hover feedback on or off.
    pub set_active: fn(&mut C, bool),
    /// One drag step; the patch to request, if any.
    pub step: fn(&mut C, &Ray) -> Option<StatePatch>,
}

/// Notifications produced by [`Interaction::check`].
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    Started { name: &'static str, fields: &'static [StateField] },
    Step(StatePatch),
    Ended { name: &'static str, fields: &'static [StateField], duration_seconds: f64 },
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    gesture: usize,
    started_ms: f64,
}

pub struct Interaction<C> {
    gestures: Vec<Gesture<C>>,
    active: Option<usize>,
    started: Option<Drag>,
}

impl<C> Default for Interaction<C> {
    fn default() -> Self {
        Self { gestures: Vec::new(), active: None, started: None }
    }
}

impl<C> Interaction<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, gesture: Gesture<C>) {
        self.gestures.push(gesture);
    }

    /// Name of the hovered gesture.
    pub fn active(&self) -> Option<&'static str> {
        self.active.map(|i| self.gestures[i].name)
    }

    /// Name of the dragging gesture.
    pub fn started(&self) -> Option<&'static str> {
        self.started.map(|d| self.gestures[d.gesture].name)
    }

    /// Whether a gesture is hovered or dragging; camera drags must not begin.
    pub fn is_engaged(&self) -> bool {
        self.active.is_some() || self.started.is_some()
    }

    /// Run one frame. `ray` is `None` when the pointer is off the surface or
    /// the surface is not mounted, which counts as hitting nothing.
    pub fn check(&mut self, ctx: &mut C, ray: Option<&Ray>, pointer: &PointerState, now_ms: f64) -> Vec<InteractionEvent> {
        let mut events = Vec::new();

        if let Some(drag) = self.started {
            let gesture = &self.gestures[drag.gesture];
            if !pointer.is_pressed(PointerButton::Primary) {
                self.started = None;
                log::info!("Gesture {} ended", gesture.name);
                events.push(InteractionEvent::Ended {
                    name: gesture.name,
                    fields: gesture.fields,
                    duration_seconds: ((now_ms - drag.started_ms) / 1000.0).max(0.0),
                });
            } else {
                if let Some(patch) = ray.and_then(|r| (gesture.step)(ctx, r)) {
                    events.push(InteractionEvent::Step(patch));
                }
                return events;
            }
        }

        let eligible = ray.and_then(|r| self.gestures.iter().position(|g| (g.test)(ctx, r)));
        if eligible != self.active {
            if let Some(old) = self.active {
                (self.gestures[old].set_active)(ctx, false);
            }
            if let Some(new) = eligible {
                (self.gestures[new].set_active)(ctx, true);
            }
            self.active = eligible;
        }

        if let Some(index) = self.active {
            if pointer.just_pressed(PointerButton::Primary) {
                let gesture = &self.gestures[index];
                self.started = Some(Drag { gesture: index, started_ms: now_ms });
                log::info!("Gesture {} started", gesture.name);
                events.push(InteractionEvent::Started { name: gesture.name, fields: gesture.fields });
            }
        }
        events
    }

    /// Clear hover and drag without emitting events.
    pub fn reset(&mut self, ctx: &mut C) {
        if let Some(old) = self.active.take() {
            (self.gestures[old].set_active)(ctx, false);
        }
        self.started = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::PointerEvent;
    use glam::Vec3;

    /// Two overlapping targets along +X.
    #[derive(Default)]
    struct Targets {
        a_hover: bool,
        b_hover: bool,
        steps: u32,
    }

    fn hits_a(_: &Targets, ray: &Ray) -> bool {
        ray.direction.x > 0.0
    }

    fn hits_b(_: &Targets, ray: &Ray) -> bool {
        ray.direction.x > 0.0 || ray.direction.y > 0.0
    }

    fn gesture_a() -> Gesture<Targets> {
        Gesture {
            name: "a",
            fields: &[StateField::Day],
            test: hits_a,
            set_active: |t, on| t.a_hover = on,
            step: |t, _| {
                t.steps += 1;
                Some(StatePatch::day(t.steps as f32))
            },
        }
    }

    fn gesture_b() -> Gesture<Targets> {
        Gesture {
            name: "b",
            fields: &[StateField::Latitude],
            test: hits_b,
            set_active: |t, on| t.b_hover = on,
            step: |_, _| Some(StatePatch::latitude(1.0)),
        }
    }

    fn setup() -> (Interaction<Targets>, Targets) {
        let mut interaction = Interaction::new();
        interaction.register(gesture_a());
        interaction.register(gesture_b());
        (interaction, Targets::default())
    }

    fn ray(dir: Vec3) -> Ray {
        Ray::new(Vec3::ZERO, dir)
    }

    #[test]
    fn test_first_registered_wins() {
        let (mut interaction, mut targets) = setup();
        let pointer = PointerState::new();
        interaction.check(&mut targets, Some(&ray(Vec3::X)), &pointer, 0.0);
        assert_eq!(interaction.active(), Some("a"));
        assert!(targets.a_hover && !targets.b_hover);

        interaction.check(&mut targets, Some(&ray(Vec3::Y)), &pointer, 0.0);
        assert_eq!(interaction.active(), Some("b"));
        assert!(!targets.a_hover && targets.b_hover);

        interaction.check(&mut targets, None, &pointer, 0.0);
        assert_eq!(interaction.active(), None);
        assert!(!targets.b_hover);
    }

    #[test]
    fn test_drag_lifecycle() {
        let (mut interaction, mut targets) = setup();
        let mut pointer = PointerState::new();
        pointer.process_event(&PointerEvent::Pressed { x: 0.0, y: 0.0, button: PointerButton::Primary });

        let events = interaction.check(&mut targets, Some(&ray(Vec3::X)), &pointer, 1000.0);
        assert_eq!(events, vec![InteractionEvent::Started { name: "a", fields: &[StateField::Day] }]);
        pointer.end_frame();

        // Only the started gesture steps, even over another target
        let events = interaction.check(&mut targets, Some(&ray(Vec3::Y)), &pointer, 1016.0);
        assert_eq!(events, vec![InteractionEvent::Step(StatePatch::day(1.0))]);
        assert_eq!(interaction.started(), Some("a"));

        pointer.process_event(&PointerEvent::Released { x: 0.0, y: 0.0, button: PointerButton::Primary });
        let events = interaction.check(&mut targets, Some(&ray(Vec3::X)), &pointer, 3500.0);
        assert_eq!(
            events,
            vec![InteractionEvent::Ended { name: "a", fields: &[StateField::Day], duration_seconds: 2.5 }]
        );
        assert_eq!(interaction.started(), None);
        assert_eq!(interaction.active(), Some("a"));
    }

    #[test]
    fn test_press_off_target_starts_nothing() {
        let (mut interaction, mut targets) = setup();
        let mut pointer = PointerState::new();
        pointer.process_event(&PointerEvent::Pressed { x: 0.0, y: 0.0, button: PointerButton::Primary });
        let events = interaction.check(&mut targets, Some(&ray(Vec3::NEG_Z)), &pointer, 0.0);
        assert!(events.is_empty());
        assert!(!interaction.is_engaged());
    }

    #[test]
    fn test_missing_ray_during_drag_skips_step() {
        let (mut interaction, mut targets) = setup();
        let mut pointer = PointerState::new();
        pointer.process_event(&PointerEvent::Pressed { x: 0.0, y: 0.0, button: PointerButton::Primary });
        interaction.check(&mut targets, Some(&ray(Vec3::X)), &pointer, 0.0);
        pointer.end_frame();
        assert!(interaction.check(&mut targets, None, &pointer, 16.0).is_empty());
        assert_eq!(targets.steps, 0);
    }
}

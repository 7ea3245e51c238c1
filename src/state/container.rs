//! The authoritative simulation record and its update path.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::scheduler::{FrameScheduler, FrameTask};
use crate::services::log_sink::{InteractionLog, InteractionParams};

use super::animation::AnimationToggle;
use super::simulation::{SimulationState, StateField, StatePatch};

/// Animation rates, in state units per millisecond.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationSpeeds {
    /// Days per ms while playing.
    pub day: f32,
    /// Days per ms while playing with daily rotation on.
    pub daily_rotation_day: f32,
    /// Radians per ms for continuous rotation.
    pub rotation: f32,
}

impl Default for AnimationSpeeds {
    fn default() -> Self {
        Self {
            day: 0.02,
            daily_rotation_day: 0.0004,
            rotation: 0.0025,
        }
    }
}

/// A user-initiated control change: slider release, checkbox toggle, button.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlEvent {
    pub action: String,
    pub patch: StatePatch,
    /// Seconds from interaction start to release; zero for clicks.
    pub duration_seconds: f64,
}

impl ControlEvent {
    pub fn new(action: impl Into<String>, patch: StatePatch) -> Self {
        Self { action: action.into(), patch, duration_seconds: 0.0 }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = seconds;
        self
    }
}

/// Single owner of [`SimulationState`].
///
/// Changes are requested as patches and queued; [`drain`](Self::drain)
/// applies them in order and reports the effective change of each. Handlers
/// reacting to a drained patch request further changes through the same
/// queue instead of re-entering the apply step.
pub struct SimulationContainer {
    state: SimulationState,
    queue: VecDeque<StatePatch>,
    speeds: AnimationSpeeds,
    main_animation: AnimationToggle,
    rotation_animation: AnimationToggle,
    log: Box<dyn InteractionLog>,
}

impl SimulationContainer {
    pub fn new(initial: SimulationState, speeds: AnimationSpeeds, log: Box<dyn InteractionLog>) -> Self {
        let mut state = initial;
        state.normalize();
        Self {
            state,
            queue: VecDeque::new(),
            speeds,
            main_animation: AnimationToggle::new(FrameTask::MainAnimation, speeds.day),
            rotation_animation: AnimationToggle::new(FrameTask::RotationAnimation, speeds.rotation),
            log,
        }
    }

    /// Read-only view of the current state.
    #[inline]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Queue a patch.
    pub fn request(&mut self, patch: StatePatch) {
        if !patch.is_empty() {
            self.queue.push_back(patch);
        }
    }

    /// Number of queued patches.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply queued patches in order. Returns one patch per queued patch that
    /// changed something, holding only the changed fields with their
    /// normalized values.
    pub fn drain(&mut self) -> Vec<StatePatch> {
        let mut applied = Vec::new();
        while let Some(patch) = self.queue.pop_front() {
            let next = self.preview(&patch);
            let effective = self.state.diff(&next);
            if effective.is_empty() {
                continue;
            }
            log::debug!("State patch applied: {:?}", effective.fields());
            self.state = next;
            applied.push(effective);
        }
        applied
    }

    /// State that would result from applying `patch` now.
    fn preview(&self, patch: &StatePatch) -> SimulationState {
        let mut next = self.state.clone();
        patch.apply_to(&mut next);
        next.normalize();
        next
    }

    /// Queue a control change and log it.
    pub fn control(&mut self, event: ControlEvent) {
        let next = self.preview(&event.patch);
        let fields = event.patch.fields();
        let value = logged_value(&next, &fields);
        let previous = logged_value(&self.state, &fields);
        self.log_interaction(&event.action, value, previous, event.duration_seconds);
        self.request(event.patch);
    }

    /// Send one record to the interaction log.
    pub fn log_interaction(&mut self, action: &str, value: Value, previous_value: Value, duration_seconds: f64) {
        self.log.log_action(
            action,
            InteractionParams { value, previous_value, duration_seconds },
        );
    }

    // -----------------------------------------------------------------------
    // Animation toggles
    // -----------------------------------------------------------------------

    pub fn is_main_animation_running(&self) -> bool {
        self.main_animation.is_running()
    }

    pub fn is_rotation_animation_running(&self) -> bool {
        self.rotation_animation.is_running()
    }

    /// Switch the main animation. Returns whether the toggle changed state.
    pub fn set_main_animation(&mut self, on: bool, scheduler: &mut FrameScheduler, now_ms: f64) -> bool {
        self.main_animation.set(on, scheduler, now_ms)
    }

    /// Switch continuous rotation. Returns whether the toggle changed state.
    pub fn set_rotation_animation(&mut self, on: bool, scheduler: &mut FrameScheduler, now_ms: f64) -> bool {
        self.rotation_animation.set(on, scheduler, now_ms)
    }

    /// Run one animation step for a due frame task, queueing the resulting
    /// patch. Returns whether a patch was queued.
    pub fn step_animation(&mut self, task: FrameTask, now_ms: f64) -> bool {
        match task {
            FrameTask::MainAnimation => {
                let speed = if self.state.daily_rotation {
                    self.speeds.daily_rotation_day
                } else {
                    self.speeds.day
                };
                self.main_animation.set_speed(speed);
                let delta_days = self.main_animation.step(now_ms);
                if delta_days == 0.0 {
                    return false;
                }
                let mut patch = StatePatch::day(self.state.day + delta_days);
                if self.state.daily_rotation {
                    // One full spin per simulated day
                    patch.earth_rotation = Some(self.state.earth_rotation + delta_days * TAU);
                }
                self.request(patch);
                true
            }
            FrameTask::RotationAnimation => {
                let delta = self.rotation_animation.step(now_ms);
                // The main animation owns earthRotation while it runs
                if self.main_animation.is_running() || delta == 0.0 {
                    return false;
                }
                self.request(StatePatch::earth_rotation(self.state.earth_rotation + delta));
                true
            }
            FrameTask::Render => false,
        }
    }

    /// Stop both animations.
    pub fn stop_animations(&mut self, scheduler: &mut FrameScheduler) {
        self.main_animation.stop(scheduler);
        self.rotation_animation.stop(scheduler);
    }
}

/// Log value for a set of fields: the bare value for one field, an object
/// keyed by wire name for several.
pub fn logged_value(state: &SimulationState, fields: &[StateField]) -> Value {
    match fields {
        [] => Value::Null,
        [single] => state.field_value(*single),
        many => {
            let mut map = Map::new();
            for field in many {
                map.insert(field.name().to_string(), state.field_value(*field));
            }
            Value::Object(map)
        }
    }
}

//! Play / continuous-rotation toggle state machine.

use crate::scheduler::{FrameScheduler, FrameTask, TaskHandle};

/// Toggle state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToggleState {
    Stopped,
    Running {
        task: TaskHandle,
        /// Timestamp (ms) the last step measured from.
        last_timestamp: f64,
    },
}

/// One animation toggle bound to a per-frame task.
///
/// `stopped -> running` registers a repeating [`FrameTask`]; each step
/// returns `elapsed_ms * speed` since the previous step (or since the start).
/// `running -> stopped` cancels the task and forgets the timestamp, so a
/// later start never applies a stale delta.
#[derive(Debug)]
pub struct AnimationToggle {
    task: FrameTask,
    /// Value units per millisecond.
    speed: f32,
    state: ToggleState,
}

impl AnimationToggle {
    pub fn new(task: FrameTask, speed: f32) -> Self {
        Self {
            task,
            speed,
            state: ToggleState::Stopped,
        }
    }

    #[inline]
    pub fn state(&self) -> ToggleState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, ToggleState::Running { .. })
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Start at `now_ms`. Returns false if already running.
    pub fn start(&mut self, scheduler: &mut FrameScheduler, now_ms: f64) -> bool {
        if self.is_running() {
            return false;
        }
        let task = scheduler.schedule(self.task);
        self.state = ToggleState::Running { task, last_timestamp: now_ms };
        log::info!("Animation {:?} started", self.task);
        true
    }

    /// Stop. Returns false if already stopped.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) -> bool {
        match self.state {
            ToggleState::Stopped => false,
            ToggleState::Running { task, .. } => {
                scheduler.cancel(task);
                self.state = ToggleState::Stopped;
                log::info!("Animation {:?} stopped", self.task);
                true
            }
        }
    }

    /// Start or stop to match `on`.
    pub fn set(&mut self, on: bool, scheduler: &mut FrameScheduler, now_ms: f64) -> bool {
        if on { self.start(scheduler, now_ms) } else { self.stop(scheduler) }
    }

    /// Advance for the frame at `now_ms`; returns the value delta.
    ///
    /// Zero when stopped. Timestamps older than the last step yield zero
    /// rather than a negative delta.
    pub fn step(&mut self, now_ms: f64) -> f32 {
        match &mut self.state {
            ToggleState::Stopped => 0.0,
            ToggleState::Running { last_timestamp, .. } => {
                let elapsed = (now_ms - *last_timestamp).max(0.0);
                *last_timestamp = now_ms.max(*last_timestamp);
                (elapsed * self.speed as f64) as f32
            }
        }
    }

    /// Handle of the scheduled task while running.
    pub fn task_handle(&self) -> Option<TaskHandle> {
        match self.state {
            ToggleState::Running { task, .. } => Some(task),
            ToggleState::Stopped => None,
        }
    }
}

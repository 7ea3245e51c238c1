//! Cancellable repeating per-frame tasks.
//!
//! The host drives one animation-frame callback; everything that must run on
//! every frame (the view render tick, the animation toggles) registers a task
//! here and keeps running until its [`TaskHandle`] is cancelled. Cancelling a
//! handle that is no longer scheduled is a no-op.

/// Token addressing one scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Kinds of per-frame work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameTask {
    /// Interaction check and repaint of continuously animated views.
    Render,
    /// Main "play" animation advancing the day.
    MainAnimation,
    /// Continuous Earth rotation.
    RotationAnimation,
}

/// Registry of repeating per-frame tasks, run in registration order.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    tasks: Vec<(TaskHandle, FrameTask)>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task that repeats on every frame until cancelled.
    pub fn schedule(&mut self, task: FrameTask) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push((handle, task));
        log::debug!("Scheduled {:?} as {:?}", task, handle);
        handle
    }

    /// Cancel a task. Returns whether it was still scheduled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(h, _)| *h != handle);
        let removed = self.tasks.len() != before;
        if removed {
            log::debug!("Cancelled {:?}", handle);
        }
        removed
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|(h, _)| *h == handle)
    }

    /// Snapshot of the tasks due this frame. Tasks scheduled while the
    /// snapshot is being processed first run on the next frame.
    pub fn due(&self) -> Vec<(TaskHandle, FrameTask)> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_repeat_until_cancelled() {
        let mut scheduler = FrameScheduler::new();
        let render = scheduler.schedule(FrameTask::Render);
        for _ in 0..3 {
            assert_eq!(scheduler.due(), vec![(render, FrameTask::Render)]);
        }
        assert!(scheduler.cancel(render));
        assert!(scheduler.due().is_empty());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = FrameScheduler::new();
        let handle = scheduler.schedule(FrameTask::MainAnimation);
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(!scheduler.is_scheduled(handle));
    }

    #[test]
    fn test_registration_order_and_unique_handles() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.schedule(FrameTask::MainAnimation);
        let b = scheduler.schedule(FrameTask::Render);
        let c = scheduler.schedule(FrameTask::MainAnimation);
        assert_ne!(a, c);
        let order: Vec<_> = scheduler.due().into_iter().map(|(h, _)| h).collect();
        assert_eq!(order, vec![a, b, c]);
        scheduler.cancel(b);
        assert_eq!(scheduler.len(), 2);
    }
}

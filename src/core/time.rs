//! Frame timestamps and rate tracking

use std::time::{Duration, Instant};

/// Where frame timestamps come from
#[derive(Clone, Copy, Debug)]
pub enum ClockSource {
    /// Wall-clock time since the clock was created
    Realtime(Instant),
    /// Fixed step per tick, for headless runs and tests
    Fixed { step_ms: f64 },
}

/// Produces the millisecond timestamp handed to every per-frame task
#[derive(Debug)]
pub struct FrameClock {
    source: ClockSource,
    now_ms: f64,
    delta_ms: f64,
    frame_count: u64,
    fps: f32,
    fps_window_start_ms: f64,
    fps_window_frames: u32,
}

impl FrameClock {
    /// Clock following wall time
    pub fn realtime() -> Self {
        Self::with_source(ClockSource::Realtime(Instant::now()))
    }

    /// Clock advancing `1000 / hz` ms per tick
    pub fn fixed(hz: f64) -> Self {
        let step_ms = if hz > 0.0 { 1000.0 / hz } else { 0.0 };
        Self::with_source(ClockSource::Fixed { step_ms })
    }

    fn with_source(source: ClockSource) -> Self {
        Self {
            source,
            now_ms: 0.0,
            delta_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_window_start_ms: 0.0,
            fps_window_frames: 0,
        }
    }

    /// Advance one frame and return its timestamp in ms
    pub fn tick(&mut self) -> f64 {
        let next = match self.source {
            ClockSource::Realtime(start) => start.elapsed().as_secs_f64() * 1000.0,
            ClockSource::Fixed { step_ms } => self.now_ms + step_ms,
        };
        self.delta_ms = (next - self.now_ms).max(0.0);
        self.now_ms = next.max(self.now_ms);
        self.frame_count += 1;
        self.fps_window_frames += 1;

        // Update FPS every second
        let window = self.now_ms - self.fps_window_start_ms;
        if window >= 1000.0 {
            self.fps = (self.fps_window_frames as f64 * 1000.0 / window) as f32;
            self.fps_window_frames = 0;
            self.fps_window_start_ms = self.now_ms;
        }
        self.now_ms
    }

    /// Timestamp of the last tick in ms
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Time between the last two ticks
    pub fn delta(&self) -> Duration {
        Duration::from_secs_f64(self.delta_ms / 1000.0)
    }

    /// Frames per second, updated once per second of clock time
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_steps() {
        let mut clock = FrameClock::fixed(50.0);
        assert_eq!(clock.tick(), 20.0);
        assert_eq!(clock.tick(), 40.0);
        assert_eq!(clock.delta(), Duration::from_millis(20));
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_fps_after_one_second() {
        let mut clock = FrameClock::fixed(60.0);
        for _ in 0..61 {
            clock.tick();
        }
        assert!((clock.fps() - 60.0).abs() < 0.5, "fps = {}", clock.fps());
    }

    #[test]
    fn test_realtime_is_monotonic() {
        let mut clock = FrameClock::realtime();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b >= a);
    }
}

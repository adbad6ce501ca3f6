//! Frame timing.
//!
//! [`FrameClock`] is the shell's monotonic time source: one [`tick`]
//! per scheduled frame returns the millisecond timestamp the simulation
//! consumes. A fixed-step mode replaces wall-clock time with an exact
//! cadence for deterministic tests and benches.
//!
//! [`tick`]: FrameClock::tick
//!
//! # Example
//!
//! ```ignore
//! use rainfall::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // In the redraw handler:
//! let now_ms = clock.tick();
//! effect.tick(now_ms, &mut canvas);
//! ```

use std::time::Instant;

/// How often the FPS estimate refreshes, in milliseconds.
const FPS_WINDOW_MS: f64 = 500.0;

/// Per-frame millisecond timestamps with optional fixed stepping.
#[derive(Debug)]
pub struct FrameClock {
    /// Wall-clock origin; timestamps are relative to it.
    start: Instant,
    /// Exact step per frame when set; wall-clock otherwise.
    fixed_step_ms: Option<f64>,
    /// Timestamp handed out by the most recent `tick`.
    current_ms: f64,
    /// Frames since creation.
    frame_count: u64,
    /// Smoothed frames per second (updated every `FPS_WINDOW_MS`).
    fps: f32,
    fps_window_start_ms: f64,
    fps_window_frames: u64,
}

impl FrameClock {
    /// Create a wall-clock driven frame clock starting at zero.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            fixed_step_ms: None,
            current_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_window_start_ms: 0.0,
            fps_window_frames: 0,
        }
    }

    /// Create a clock that advances exactly `step_ms` per tick,
    /// independent of real time.
    pub fn with_fixed_step(step_ms: f64) -> Self {
        Self {
            fixed_step_ms: Some(step_ms),
            ..Self::new()
        }
    }

    /// Advance to the next frame and return its timestamp in
    /// milliseconds.
    pub fn tick(&mut self) -> f64 {
        self.current_ms = match self.fixed_step_ms {
            Some(step) => self.current_ms + step,
            None => self.start.elapsed().as_secs_f64() * 1_000.0,
        };
        self.frame_count += 1;
        self.fps_window_frames += 1;

        let window = self.current_ms - self.fps_window_start_ms;
        if window >= FPS_WINDOW_MS {
            self.fps = (self.fps_window_frames as f64 / (window / 1_000.0)) as f32;
            self.fps_window_start_ms = self.current_ms;
            self.fps_window_frames = 0;
        }

        self.current_ms
    }

    /// Current position in milliseconds without advancing the frame.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        match self.fixed_step_ms {
            Some(_) => self.current_ms,
            None => self.start.elapsed().as_secs_f64() * 1_000.0,
        }
    }

    /// Frames ticked since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Smoothed frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_clock() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_wall_clock_advances() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let now = clock.tick();

        assert!(now > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_fixed_step_cadence() {
        let mut clock = FrameClock::with_fixed_step(16.0);

        assert_eq!(clock.tick(), 16.0);
        assert_eq!(clock.tick(), 32.0);
        assert_eq!(clock.tick(), 48.0);
        assert_eq!(clock.now_ms(), 48.0);
        assert_eq!(clock.frame(), 3);
    }

    #[test]
    fn test_fixed_step_fps() {
        let mut clock = FrameClock::with_fixed_step(16.0);
        for _ in 0..64 {
            clock.tick();
        }
        // 16 ms cadence is 62.5 fps.
        assert!((clock.fps() - 62.5).abs() < 1.0);
    }
}

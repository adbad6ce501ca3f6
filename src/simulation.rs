//! The animation loop driver.
//!
//! [`RainEffect`] owns the live drops, the configuration, and the
//! Stopped/Running state machine. One call to [`tick`] runs a full frame:
//! advance wind, clear the canvas, admit new drops, then integrate, draw,
//! and cull every live drop. The caller schedules ticks (one per display
//! refresh) and keeps scheduling as long as `tick` returns `true`.
//!
//! [`tick`]: RainEffect::tick
//!
//! # Example
//!
//! ```ignore
//! use rainfall::prelude::*;
//!
//! let mut effect = RainEffect::new(800.0, 600.0, RainConfig::default());
//! effect.start(clock.tick());
//!
//! // Once per display refresh:
//! let keep_going = effect.tick(clock.tick(), &mut canvas);
//! ```

use crate::config::RainConfig;
use crate::culling;
use crate::drop::Raindrop;
use crate::physics;
use crate::render::{self, Canvas};
use crate::spawn::{self, SpawnContext};
use crate::wind::WindDriver;
use glam::Vec2;

/// A running rain effect: live drops plus the loop state machine.
///
/// Exactly one instance should drive a given surface; the embedding
/// application owns it and forwards resize and visibility events.
pub struct RainEffect {
    config: RainConfig,
    drops: Vec<Raindrop>,
    surface: Vec2,
    last_frame_ms: f64,
    last_spawn_ms: f64,
    running: bool,
    spawner: SpawnContext,
    wind: WindDriver,
}

impl RainEffect {
    /// Create a stopped effect for a surface of the given dimensions.
    ///
    /// The configuration is clamped to safe ranges on entry; see
    /// [`RainConfig::sanitized`].
    pub fn new(width: f32, height: f32, config: RainConfig) -> Self {
        let config = config.sanitized();
        Self {
            drops: Vec::with_capacity(config.density),
            surface: Vec2::new(width.max(0.0), height.max(0.0)),
            last_frame_ms: 0.0,
            last_spawn_ms: 0.0,
            running: false,
            spawner: SpawnContext::new(),
            wind: WindDriver::new(config.wind),
            config,
        }
    }

    /// Create an effect whose spawning and wind are deterministic.
    pub fn with_seed(width: f32, height: f32, config: RainConfig, seed: u64) -> Self {
        let config = config.sanitized();
        Self {
            drops: Vec::with_capacity(config.density),
            surface: Vec2::new(width.max(0.0), height.max(0.0)),
            last_frame_ms: 0.0,
            last_spawn_ms: 0.0,
            running: false,
            spawner: SpawnContext::with_seed(seed),
            wind: WindDriver::with_seed(config.wind, seed.wrapping_add(1)),
            config,
        }
    }

    /// Enter the `Running` state.
    ///
    /// Records `now_ms` as both the last-frame and last-spawn timestamps
    /// so the first tick sees a small delta instead of the whole stopped
    /// interval.
    pub fn start(&mut self, now_ms: f64) {
        self.running = true;
        self.last_frame_ms = now_ms;
        self.last_spawn_ms = now_ms;
    }

    /// Enter the `Stopped` state. Idempotent.
    ///
    /// Takes effect at the tick boundary: a frame already scheduled still
    /// runs its body once and then reports `false`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the loop is in the `Running` state.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Visibility observer: observable surfaces run, hidden ones stop.
    pub fn set_visible(&mut self, visible: bool, now_ms: f64) {
        if visible {
            if !self.running {
                self.start(now_ms);
            }
        } else {
            self.stop();
        }
    }

    /// Update the target surface dimensions.
    ///
    /// Zero or negative dimensions are accepted and render as a no-op
    /// rather than crashing geometry.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface = Vec2::new(width.max(0.0), height.max(0.0));
    }

    /// Stop the loop and release the drop collection.
    pub fn destroy(&mut self) {
        self.stop();
        self.drops.clear();
        self.drops.shrink_to_fit();
    }

    /// Current surface dimensions.
    #[inline]
    pub fn surface_size(&self) -> Vec2 {
        self.surface
    }

    /// The live drops, in storage order.
    #[inline]
    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    /// Shared configuration.
    #[inline]
    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    /// Mutable access to the shared configuration.
    ///
    /// Changes apply from the next tick; note that `wind` is continuously
    /// rewritten by the wind driver.
    #[inline]
    pub fn config_mut(&mut self) -> &mut RainConfig {
        &mut self.config
    }

    /// Run one frame and report whether the loop is still running.
    ///
    /// Sequencing within the tick: wind smoothing, canvas clear, spawn
    /// admission, then per drop integrate + draw interleaved (both read
    /// the same position for this tick), then culling. The body runs even
    /// if `stop` was called since the frame was scheduled; cancellation
    /// lands on the return value, which tells the caller not to schedule
    /// another frame.
    pub fn tick(&mut self, now_ms: f64, canvas: &mut dyn Canvas) -> bool {
        let delta_ms = now_ms - self.last_frame_ms;
        self.last_frame_ms = now_ms;

        self.wind.advance(&mut self.config.wind, now_ms);

        canvas.clear();

        if now_ms - self.last_spawn_ms > self.config.spawn_interval_ms {
            let quota = spawn::admission_quota(self.config.density, self.drops.len());
            for _ in 0..quota {
                self.drops.push(self.spawner.spawn(&self.config, self.surface.x));
            }
            self.last_spawn_ms = now_ms;
        }

        // Back-to-front walk so removal never disturbs drops still to be
        // visited this tick.
        let mut i = self.drops.len();
        while i > 0 {
            i -= 1;
            physics::integrate(&mut self.drops[i], &self.config, delta_ms, now_ms);
            render::draw(&self.drops[i], &self.config, self.surface, canvas);
            if culling::expired(&self.drops[i], self.surface.x, self.surface.y) {
                self.drops.swap_remove(i);
            }
        }

        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visuals::Rgba;

    struct NullCanvas;

    impl Canvas for NullCanvas {
        fn clear(&mut self) {}
        fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Rgba) {}
    }

    #[test]
    fn test_starts_stopped() {
        let effect = RainEffect::new(800.0, 600.0, RainConfig::default());
        assert!(!effect.is_running());
        assert!(effect.drops().is_empty());
    }

    #[test]
    fn test_start_stop_flags() {
        let mut effect = RainEffect::new(800.0, 600.0, RainConfig::default());

        effect.start(0.0);
        assert!(effect.is_running());

        effect.stop();
        assert!(!effect.is_running());

        // Idempotent.
        effect.stop();
        assert!(!effect.is_running());
    }

    #[test]
    fn test_tick_reports_running_state() {
        let mut effect = RainEffect::with_seed(800.0, 600.0, RainConfig::default(), 3);
        let mut canvas = NullCanvas;

        effect.start(0.0);
        assert!(effect.tick(16.0, &mut canvas));

        effect.stop();
        // The in-flight frame still runs its body, then reports false.
        assert!(!effect.tick(32.0, &mut canvas));
    }

    #[test]
    fn test_set_visible_forwards_to_start_stop() {
        let mut effect = RainEffect::new(800.0, 600.0, RainConfig::default());

        effect.set_visible(true, 100.0);
        assert!(effect.is_running());

        effect.set_visible(false, 200.0);
        assert!(!effect.is_running());
    }

    #[test]
    fn test_first_eligible_tick_admits_capped_batch() {
        let mut effect = RainEffect::with_seed(800.0, 600.0, RainConfig::default(), 3);
        let mut canvas = NullCanvas;

        effect.start(0.0);
        effect.tick(16.0, &mut canvas);
        assert!(effect.drops().is_empty());

        effect.tick(51.0, &mut canvas);
        assert_eq!(effect.drops().len(), spawn::MAX_SPAWN_PER_TICK);
    }

    #[test]
    fn test_destroy_clears_drops() {
        let mut effect = RainEffect::with_seed(800.0, 600.0, RainConfig::default(), 3);
        let mut canvas = NullCanvas;

        effect.start(0.0);
        effect.tick(51.0, &mut canvas);
        assert!(!effect.drops().is_empty());

        effect.destroy();
        assert!(!effect.is_running());
        assert!(effect.drops().is_empty());
    }

    #[test]
    fn test_resize_clamps_negative_dimensions() {
        let mut effect = RainEffect::new(800.0, 600.0, RainConfig::default());
        effect.resize(-10.0, -10.0);
        assert_eq!(effect.surface_size(), Vec2::ZERO);
    }
}

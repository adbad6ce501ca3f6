//! Gusting wind.
//!
//! The wind value every drop drifts by is not stepped directly to new
//! values. A [`WindDriver`] picks a fresh random target every
//! [`RETARGET_INTERVAL_MS`] and, on every tick, moves the live value a
//! fixed fraction of the remaining distance toward it: an exponential
//! smoothing filter that approaches each target monotonically and never
//! overshoots, so gusts build and die down instead of jumping.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// How often a new wind target is chosen, in milliseconds.
pub const RETARGET_INTERVAL_MS: f64 = 5_000.0;

/// Fraction of the remaining distance covered per tick.
pub const SMOOTHING: f32 = 0.05;

/// Periodic wind retargeting plus per-tick smoothing.
pub struct WindDriver {
    target: f32,
    last_retarget_ms: Option<f64>,
    rng: SmallRng,
}

impl WindDriver {
    /// Create a driver whose first target is the configured initial wind,
    /// seeded from wall-clock entropy.
    pub fn new(initial: f32) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(initial, seed)
    }

    /// Create a driver with a fixed RNG seed.
    pub fn with_seed(initial: f32, seed: u64) -> Self {
        Self {
            target: initial,
            last_retarget_ms: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// The value the live wind is currently approaching.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Override the current target.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Advance the filter by one tick.
    ///
    /// Picks a new uniform target in `[-1, 1]` once the retarget interval
    /// has elapsed, then nudges `wind` toward the target. The interval is
    /// measured against `now_ms` wall-clock, so a long gap between ticks
    /// retargets at most once.
    pub fn advance(&mut self, wind: &mut f32, now_ms: f64) {
        match self.last_retarget_ms {
            None => self.last_retarget_ms = Some(now_ms),
            Some(last) if now_ms - last >= RETARGET_INTERVAL_MS => {
                self.target = self.rng.gen_range(-1.0..=1.0);
                self.last_retarget_ms = Some(now_ms);
            }
            Some(_) => {}
        }

        *wind += (self.target - *wind) * SMOOTHING;
    }
}

//! Drop creation and spawn admission.
//!
//! [`SpawnContext`] owns the RNG and turns a [`RainConfig`]'s
//! randomization ranges into fresh [`Raindrop`]s. [`admission_quota`] is
//! the rate-limit policy the tick applies once the spawn cooldown has
//! elapsed: top up toward the density target, at most
//! [`MAX_SPAWN_PER_TICK`] drops per check.

use crate::config::RainConfig;
use crate::drop::Raindrop;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Most drops admitted in a single spawn check. Caps the burst after a
/// stall (e.g. the surface was occluded for a while and culling drained
/// the collection).
pub const MAX_SPAWN_PER_TICK: usize = 5;

/// How far above the top edge a fresh drop may start, beyond the
/// length-sized base offset.
const SPAWN_HEADROOM: f32 = 100.0;

/// How many new drops to admit in one eligible spawn check.
///
/// Zero when the live count already meets the density target. This is
/// rate-limited admission, not a hard cap: nothing removes drops when the
/// count exceeds `density`, the population just stops growing.
#[inline]
pub fn admission_quota(density: usize, live: usize) -> usize {
    density.saturating_sub(live).min(MAX_SPAWN_PER_TICK)
}

/// Drop factory owning a seedable RNG.
///
/// The default constructor seeds from wall-clock entropy so every run
/// looks different; tests use [`SpawnContext::with_seed`] for
/// reproducible populations.
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context seeded from wall-clock entropy.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Create a context with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Produce a new drop from the configured randomization ranges.
    ///
    /// `x` is uniform across the surface width; `y` starts above the top
    /// edge so the drop enters the frame mid-fall. Pure construction, no
    /// error conditions.
    pub fn spawn(&mut self, config: &RainConfig, surface_width: f32) -> Raindrop {
        Raindrop {
            x: self.rng.gen::<f32>() * surface_width.max(0.0),
            y: -config.base_length - self.rng.gen::<f32>() * SPAWN_HEADROOM,
            speed: config.base_speed + self.rng.gen::<f32>() * config.speed_variation,
            length: config.base_length + self.rng.gen::<f32>() * config.length_variation,
            width: config.base_width + self.rng.gen::<f32>() * config.width_variation,
            opacity: 0.5 + self.rng.gen::<f32>() * 0.5,
            sway: self.rng.gen::<f32>() * 0.2 - 0.1,
            phase: self.rng.gen::<f32>() * TAU,
        }
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_field_ranges() {
        let config = RainConfig::default();
        let mut ctx = SpawnContext::with_seed(7);

        for _ in 0..500 {
            let drop = ctx.spawn(&config, 800.0);

            assert!(drop.y < 0.0);
            assert!(drop.y >= -config.base_length - 100.0);
            assert!((0.0..800.0).contains(&drop.x));
            assert!(drop.speed >= config.base_speed);
            assert!(drop.speed <= config.base_speed + config.speed_variation);
            assert!((0.5..=1.0).contains(&drop.opacity));
            assert!((-0.1..=0.1).contains(&drop.sway));
            assert!((0.0..TAU).contains(&drop.phase));
        }
    }

    #[test]
    fn test_spawn_zero_variation() {
        let config = RainConfig::new()
            .with_speed(4.0, 0.0)
            .with_length(10.0, 0.0)
            .with_width(2.0, 0.0);
        let mut ctx = SpawnContext::with_seed(1);

        let drop = ctx.spawn(&config, 800.0);
        assert_eq!(drop.speed, 4.0);
        assert_eq!(drop.length, 10.0);
        assert_eq!(drop.width, 2.0);
    }

    #[test]
    fn test_spawn_zero_width_surface() {
        let config = RainConfig::default();
        let mut ctx = SpawnContext::with_seed(1);

        let drop = ctx.spawn(&config, 0.0);
        assert_eq!(drop.x, 0.0);
    }

    #[test]
    fn test_seeded_spawn_is_reproducible() {
        let config = RainConfig::default();
        let a: Vec<_> = {
            let mut ctx = SpawnContext::with_seed(99);
            (0..10).map(|_| ctx.spawn(&config, 640.0)).collect()
        };
        let b: Vec<_> = {
            let mut ctx = SpawnContext::with_seed(99);
            (0..10).map(|_| ctx.spawn(&config, 640.0)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_admission_quota() {
        assert_eq!(admission_quota(100, 0), MAX_SPAWN_PER_TICK);
        assert_eq!(admission_quota(100, 97), 3);
        assert_eq!(admission_quota(100, 100), 0);
        assert_eq!(admission_quota(100, 140), 0);
        assert_eq!(admission_quota(3, 0), 3);
    }
}

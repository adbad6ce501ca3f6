//! Per-tick motion integration.
//!
//! Velocities are expressed in units per [`REFERENCE_FRAME_MS`] so motion
//! is independent of the achieved refresh rate: a 32 ms frame moves a drop
//! exactly twice as far as a 16 ms frame. A large delta spike (the tab
//! regained visibility, the machine stalled) therefore produces one large
//! visible step rather than a slowdown; no sub-stepping compensates for
//! it.

use crate::config::RainConfig;
use crate::drop::Raindrop;

/// Nominal frame duration velocities are expressed against, in
/// milliseconds.
pub const REFERENCE_FRAME_MS: f64 = 16.0;

/// Advance one drop by one tick.
///
/// `delta_ms` is the elapsed time since the previous tick and `now_ms`
/// the loop's running wall-clock. The sway sinusoid is driven by
/// `now_ms`, not the drop's own age, so all drops oscillate against the
/// same clock and differ only by their fixed phase offset.
///
/// Order matters: `y` integrates the pre-gravity speed, then gravity
/// accelerates the drop for the next tick.
pub fn integrate(drop: &mut Raindrop, config: &RainConfig, delta_ms: f64, now_ms: f64) {
    let step = (delta_ms / REFERENCE_FRAME_MS) as f32;

    drop.y += drop.speed * step;
    drop.x += config.wind + (drop.phase + (now_ms * 0.001) as f32).sin() * drop.sway;
    drop.speed += config.gravity * step;
}

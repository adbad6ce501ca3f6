//! # rainfall
//!
//! Ambient falling-rain streak effects driven by a per-frame simulation
//! loop.
//!
//! The crate is a decorative particle effect, not a physics engine: drops
//! spawn just above the surface, accelerate under gravity, drift with a
//! smoothly gusting wind, and are culled once they leave the frame. A
//! thin winit/wgpu shell makes it runnable out of the box, but the
//! simulation itself only needs millisecond timestamps and a [`Canvas`]
//! to draw on.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rainfall::prelude::*;
//!
//! fn main() -> Result<(), rainfall::error::EffectError> {
//!     rainfall::window::run(RainConfig::for_profile(Profile::Desktop))
//! }
//! ```
//!
//! ## Driving the simulation yourself
//!
//! The shell is optional. Anything that can supply timestamps and stroke
//! lines can host the effect:
//!
//! ```ignore
//! use rainfall::prelude::*;
//!
//! let mut effect = RainEffect::new(800.0, 600.0, RainConfig::default());
//! let mut clock = FrameClock::new();
//! effect.start(clock.tick());
//!
//! // Once per display refresh, until tick returns false:
//! let keep_going = effect.tick(clock.tick(), &mut my_canvas);
//! ```
//!
//! ## Core Concepts
//!
//! | Piece | Role |
//! |-------|------|
//! | [`Raindrop`] | One falling streak: position, velocity, fixed visual parameters |
//! | [`RainConfig`] | Shared options: density, ranges, color, wind, gravity, effect flags |
//! | [`RainEffect`] | The loop driver: spawn, integrate, draw, cull, once per tick |
//! | [`WindDriver`] | Retargets wind every few seconds and smooths toward it every tick |
//! | [`Canvas`] | Where strokes go: the wgpu shell, or anything you implement |
//!
//! Rendering supports two optional passes, both off by default:
//! perspective scaling (streaks shrink with vertical position,
//! approximating depth) and a trail effect (alpha fades in a vertical
//! gradient, approximating motion blur). [`Profile`] presets pick
//! sensible combinations for desktop and mobile-class hosts.

pub mod config;
pub mod culling;
pub mod drop;
pub mod error;
pub mod physics;
pub mod render;
pub mod shader;
pub mod simulation;
pub mod spawn;
pub mod time;
pub mod visuals;
pub mod wind;
pub mod window;

pub use config::{Profile, RainConfig};
pub use drop::Raindrop;
pub use glam::Vec2;
pub use render::Canvas;
pub use simulation::RainEffect;
pub use spawn::SpawnContext;
pub use time::FrameClock;
pub use visuals::Rgba;
pub use wind::WindDriver;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use rainfall::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Profile, RainConfig};
    pub use crate::drop::Raindrop;
    pub use crate::render::Canvas;
    pub use crate::simulation::RainEffect;
    pub use crate::spawn::SpawnContext;
    pub use crate::time::FrameClock;
    pub use crate::visuals::Rgba;
    pub use crate::wind::WindDriver;
    pub use crate::Vec2;
}

//! Effect configuration and device-profile presets.
//!
//! A [`RainConfig`] is the single shared options object the whole effect
//! reads: spawning samples its randomization ranges, integration reads
//! `wind` and `gravity`, and rendering reads the color and effect flags.
//! The `wind` field is the one value mutated during a run, smoothed every
//! tick by the [`WindDriver`](crate::wind::WindDriver).
//!
//! # Example
//!
//! ```ignore
//! use rainfall::prelude::*;
//!
//! let config = RainConfig::for_profile(Profile::Desktop)
//!     .with_color(Rgba::STORM)
//!     .with_gravity(0.5);
//! ```

use crate::visuals::Rgba;

/// Device capability profile, chosen by the embedding application.
///
/// Only consulted when building a preset configuration via
/// [`RainConfig::for_profile`]; the simulation itself is profile-agnostic
/// and consumes whatever numbers it is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    /// Full effect: higher density, perspective scaling, trail fading.
    Desktop,
    /// Reduced effect: fewer, slower drops with the scaling and fading
    /// passes disabled.
    Mobile,
}

/// Shared configuration for a rain effect.
///
/// All fields are public; mutate through
/// [`RainEffect::config_mut`](crate::simulation::RainEffect::config_mut)
/// while a run is live. Values are clamped to safe ranges when an effect
/// is constructed (see [`RainConfig::sanitized`]).
#[derive(Clone, Debug)]
pub struct RainConfig {
    /// Target steady-state count of live drops.
    pub density: usize,
    /// Base downward velocity, in units per 16 ms reference frame.
    pub base_speed: f32,
    /// Uniform random addition to `base_speed` at spawn.
    pub speed_variation: f32,
    /// Base streak length.
    pub base_length: f32,
    /// Uniform random addition to `base_length` at spawn.
    pub length_variation: f32,
    /// Base stroke width.
    pub base_width: f32,
    /// Uniform random addition to `base_width` at spawn.
    pub width_variation: f32,
    /// Stroke color. The alpha channel is replaced by the trail gradient
    /// when `trail_effect` is on.
    pub color: Rgba,
    /// Horizontal drift applied to every drop each tick. Retargeted and
    /// smoothed continuously by the wind driver.
    pub wind: f32,
    /// Per-tick velocity increase, in units per 16 ms reference frame.
    /// Zero gives constant speed; negative decelerates.
    pub gravity: f32,
    /// Shrink streaks with vertical position, approximating depth.
    pub perspective: bool,
    /// Cooldown between spawn checks, in milliseconds.
    pub spawn_interval_ms: f64,
    /// Fade streaks from near-transparent at the top toward opaque at the
    /// bottom, approximating motion blur.
    pub trail_effect: bool,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            density: 100,
            base_speed: 5.0,
            speed_variation: 3.0,
            base_length: 20.0,
            length_variation: 15.0,
            base_width: 1.0,
            width_variation: 0.5,
            color: Rgba::RAIN,
            wind: 0.0,
            gravity: 1.0,
            perspective: false,
            spawn_interval_ms: 50.0,
            trail_effect: false,
        }
    }
}

impl RainConfig {
    /// Create a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset configuration for a device profile.
    ///
    /// Mobile drops density and speed and skips the perspective and trail
    /// passes; desktop enables the full effect.
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Desktop => Self {
                density: 80,
                base_speed: 4.5,
                speed_variation: 2.0,
                perspective: true,
                trail_effect: true,
                ..Self::default()
            },
            Profile::Mobile => Self {
                density: 40,
                base_speed: 3.0,
                speed_variation: 1.0,
                perspective: false,
                trail_effect: false,
                ..Self::default()
            },
        }
    }

    /// Set the target drop count.
    pub fn with_density(mut self, density: usize) -> Self {
        self.density = density;
        self
    }

    /// Set the base speed and its random variation.
    pub fn with_speed(mut self, base: f32, variation: f32) -> Self {
        self.base_speed = base;
        self.speed_variation = variation;
        self
    }

    /// Set the base streak length and its random variation.
    pub fn with_length(mut self, base: f32, variation: f32) -> Self {
        self.base_length = base;
        self.length_variation = variation;
        self
    }

    /// Set the base stroke width and its random variation.
    pub fn with_width(mut self, base: f32, variation: f32) -> Self {
        self.base_width = base;
        self.width_variation = variation;
        self
    }

    /// Set the stroke color.
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the initial wind value.
    pub fn with_wind(mut self, wind: f32) -> Self {
        self.wind = wind;
        self
    }

    /// Set the gravity value.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Enable or disable perspective scaling.
    pub fn with_perspective(mut self, on: bool) -> Self {
        self.perspective = on;
        self
    }

    /// Set the spawn-check cooldown in milliseconds.
    pub fn with_spawn_interval_ms(mut self, interval_ms: f64) -> Self {
        self.spawn_interval_ms = interval_ms;
        self
    }

    /// Enable or disable the trail alpha gradient.
    pub fn with_trail_effect(mut self, on: bool) -> Self {
        self.trail_effect = on;
        self
    }

    /// Clamp every field to a safe range.
    ///
    /// A decorative effect degrades instead of rejecting: sizes, speeds,
    /// and variations clamp to zero or above and the spawn interval to at
    /// least one millisecond. Gravity is left alone, negative values are
    /// accepted as deceleration.
    pub fn sanitized(mut self) -> Self {
        self.base_speed = self.base_speed.max(0.0);
        self.speed_variation = self.speed_variation.max(0.0);
        self.base_length = self.base_length.max(0.0);
        self.length_variation = self.length_variation.max(0.0);
        self.base_width = self.base_width.max(0.0);
        self.width_variation = self.width_variation.max(0.0);
        self.spawn_interval_ms = self.spawn_interval_ms.max(1.0);
        self
    }
}

//! Color handling for streak rendering.
//!
//! Streaks are drawn in a single configurable color whose alpha channel is
//! a substitution slot: the trail effect replaces it with a vertical
//! gradient, and the drop's own opacity multiplies onto whatever alpha
//! survives. See [`render::draw`](crate::render::draw).

/// An RGBA color with all components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Soft blue-white rain, the default streak color.
    pub const RAIN: Rgba = Rgba::new(0.706, 0.784, 1.0, 0.7);

    /// Pale gray drizzle.
    pub const MIST: Rgba = Rgba::new(0.82, 0.85, 0.88, 0.45);

    /// Dark slate downpour for light backgrounds.
    pub const STORM: Rgba = Rgba::new(0.25, 0.31, 0.42, 0.8);

    /// Create a color from components in `[0, 1]`.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channels and a float alpha.
    pub fn from_u8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Return the same color with `alpha` substituted into the alpha
    /// channel, clamped to `[0, 1]`.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Components as an array, for vertex upload.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

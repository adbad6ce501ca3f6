//! Streak drawing over an abstract canvas.
//!
//! Rendering is split from the drawing backend through the [`Canvas`]
//! trait: the simulation calls [`draw`] once per live drop and the
//! backend decides how a stroked line becomes pixels. The GPU canvas in
//! [`window`](crate::window) batches strokes into instanced quads; tests
//! record them.

use crate::config::RainConfig;
use crate::drop::Raindrop;
use crate::visuals::Rgba;
use glam::Vec2;

/// Abstract drawing surface.
///
/// One `clear` per tick, then one `stroke_line` per visible drop.
pub trait Canvas {
    /// Discard the previous frame's contents.
    fn clear(&mut self);

    /// Stroke a straight segment of the given width and color, in surface
    /// coordinates.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// Scale factor at a vertical position under perspective, clamped to
/// `>= 0`. Zero means the drop is too far below the surface to draw.
#[inline]
pub fn perspective_scale(y: f32, surface_height: f32) -> f32 {
    (1.0 - y / (surface_height * 1.5)).max(0.0)
}

/// Draw one drop as a line segment from `(x, y)` to
/// `(x, y + effective_length)`.
///
/// Perspective mode shrinks length and width with vertical position;
/// the trail effect substitutes a vertical alpha gradient into the
/// configured color. The drop's own opacity multiplies the resolved
/// alpha. A zero-sized surface or a fully degenerate perspective scale
/// draws nothing.
pub fn draw(drop: &Raindrop, config: &RainConfig, surface: Vec2, canvas: &mut dyn Canvas) {
    if surface.x <= 0.0 || surface.y <= 0.0 {
        return;
    }

    let (length, width) = if config.perspective {
        let scale = perspective_scale(drop.y, surface.y);
        if scale <= 0.0 {
            return;
        }
        (drop.length * scale, drop.width * scale)
    } else {
        (drop.length, drop.width)
    };

    let base = if config.trail_effect {
        config
            .color
            .with_alpha(0.2 + (drop.y / surface.y) * 0.6)
    } else {
        config.color
    };
    let color = base.with_alpha(base.a * drop.opacity);

    canvas.stroke_line(
        Vec2::new(drop.x, drop.y),
        Vec2::new(drop.x, drop.y + length),
        width,
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestCanvas {
        strokes: Vec<(Vec2, Vec2, f32, Rgba)>,
    }

    impl Canvas for TestCanvas {
        fn clear(&mut self) {
            self.strokes.clear();
        }

        fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
            self.strokes.push((from, to, width, color));
        }
    }

    fn drop_at(y: f32) -> Raindrop {
        Raindrop {
            x: 100.0,
            y,
            speed: 5.0,
            length: 30.0,
            width: 2.0,
            opacity: 1.0,
            sway: 0.0,
            phase: 0.0,
        }
    }

    #[test]
    fn test_flat_draw_uses_base_size() {
        let config = RainConfig::default();
        let mut canvas = TestCanvas::default();

        draw(&drop_at(50.0), &config, Vec2::new(800.0, 600.0), &mut canvas);

        let (from, to, width, color) = canvas.strokes[0];
        assert_eq!(from, Vec2::new(100.0, 50.0));
        assert_eq!(to, Vec2::new(100.0, 80.0));
        assert_eq!(width, 2.0);
        assert_eq!(color.a, config.color.a);
    }

    #[test]
    fn test_perspective_scales_length_and_width() {
        let config = RainConfig::new().with_perspective(true);
        let mut canvas = TestCanvas::default();

        // scale = 1 - 300 / 900
        draw(&drop_at(300.0), &config, Vec2::new(800.0, 600.0), &mut canvas);

        let (from, to, width, _) = canvas.strokes[0];
        let scale = 1.0 - 300.0 / 900.0;
        assert!((to.y - from.y - 30.0 * scale).abs() < 1e-4);
        assert!((width - 2.0 * scale).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_perspective_skips_draw() {
        let config = RainConfig::new().with_perspective(true);
        let mut canvas = TestCanvas::default();

        // Below 1.5x the surface height the scale bottoms out at zero.
        draw(&drop_at(700.0), &config, Vec2::new(800.0, 400.0), &mut canvas);
        assert!(canvas.strokes.is_empty());
    }

    #[test]
    fn test_trail_substitutes_alpha_gradient() {
        let config = RainConfig::new().with_trail_effect(true);
        let mut canvas = TestCanvas::default();

        draw(&drop_at(300.0), &config, Vec2::new(800.0, 600.0), &mut canvas);

        // Halfway down: 0.2 + 0.5 * 0.6, at full drop opacity.
        let (.., color) = canvas.strokes[0];
        assert!((color.a - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_opacity_multiplies_alpha() {
        let config = RainConfig::default();
        let mut canvas = TestCanvas::default();
        let mut drop = drop_at(50.0);
        drop.opacity = 0.5;

        draw(&drop, &config, Vec2::new(800.0, 600.0), &mut canvas);

        let (.., color) = canvas.strokes[0];
        assert!((color.a - config.color.a * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_surface_draws_nothing() {
        let config = RainConfig::new().with_perspective(true).with_trail_effect(true);
        let mut canvas = TestCanvas::default();

        draw(&drop_at(50.0), &config, Vec2::ZERO, &mut canvas);
        assert!(canvas.strokes.is_empty());
    }
}

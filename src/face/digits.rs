use crate::face::config::DigitsConfig;
use crate::foundation::core::{Canvas, Point};
use crate::render::surface::{FontMetrics, Surface, TextStyle};

/// Exponent seeding the pop-in of the character at `index`: the `index`-th decimal digit of
/// `timestamp_ms`, counted from the least significant one.
///
/// Digits past the end of the number are `0`.
pub fn scale_coefficient(timestamp_ms: u64, index: usize) -> u32 {
    let Some(divisor) = u32::try_from(index).ok().and_then(|i| 10u64.checked_pow(i)) else {
        return 0;
    };
    ((timestamp_ms / divisor) % 10) as u32
}

/// `progress ^ coefficient`, with `0 ^ 0` taken as `1`.
pub fn digit_scale(progress: f64, coefficient: u32) -> f64 {
    if coefficient == 0 {
        return 1.0;
    }
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    progress.powi(coefficient as i32)
}

/// Baseline origin of character `index` out of `count`.
///
/// Characters are spread evenly across the width and centered vertically on the glyph box
/// described by `metrics`.
pub fn digit_origin(canvas: Canvas, index: usize, count: usize, metrics: FontMetrics) -> Point {
    let width = canvas.width_f64();
    let x = width * (index as f64 + 1.0) / (count as f64 + 1.0);
    let y = canvas.height_f64() / 2.0 - (metrics.descent + metrics.ascent) / 2.0;
    Point::new(x, y)
}

/// Draws the time string one character at a time, each with its own scale.
#[derive(Clone, Debug)]
pub struct DigitAnimator {
    style: TextStyle,
}

impl DigitAnimator {
    /// Build the animator and its text style once.
    pub fn new(digits: &DigitsConfig) -> Self {
        Self {
            style: TextStyle {
                color: digits.color,
                size_px: digits.size_px,
                blur_radius: digits.blur_radius,
            },
        }
    }

    /// Text style shared by every character.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Draw `text`, seeding each character's scale from `last_visible_ms`.
    ///
    /// Characters scale about the canvas center, not about their own position.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        canvas: Canvas,
        progress: f64,
        last_visible_ms: u64,
        text: &str,
    ) {
        let metrics = surface.font_metrics(&self.style);
        let count = text.chars().count();
        let center = canvas.center();
        let mut buf = [0u8; 4];

        for (index, ch) in text.chars().enumerate() {
            let scale = digit_scale(progress, scale_coefficient(last_visible_ms, index));
            let origin = digit_origin(canvas, index, count, metrics);

            surface.save();
            surface.scale_about(scale, center);
            surface.draw_text(ch.encode_utf8(&mut buf), origin, &self.style);
            surface.restore();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/face/digits.rs"]
mod tests;

use std::io::Read;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::animation::progress::ANIM_DURATION_MS;
use crate::foundation::color::Rgba8;
use crate::foundation::error::{FaceError, FaceResult};

/// Static styling and timing for a [`CyberFace`](crate::CyberFace).
///
/// Every field has a default, so an empty JSON object `{}` yields the stock face.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceConfig {
    /// Length of the entrance animation after each visibility event.
    pub entrance_duration_ms: u64,
    /// Curve applied to linear entrance progress.
    pub ease: Ease,
    /// Color the frame is cleared to.
    pub background: Rgba8,
    /// Frame interval while interactive.
    pub interactive_frame_ms: u64,
    /// Ground and ceiling planes.
    pub grid: GridConfig,
    /// Time digits.
    pub digits: DigitsConfig,
    /// Multiply overlay.
    pub vignette: VignetteConfig,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            entrance_duration_ms: ANIM_DURATION_MS,
            ease: Ease::InOutSine,
            background: Rgba8::BLACK,
            interactive_frame_ms: 16,
            grid: GridConfig::default(),
            digits: DigitsConfig::default(),
            vignette: VignetteConfig::default(),
        }
    }
}

/// Grid plane geometry and line style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Line color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Glow blur radius in pixels; `0` disables the glow.
    pub blur_radius: f32,
    /// Fraction of the canvas height the horizon travels over the entrance.
    pub plane_spacing: f64,
    /// Vertical line steps; `vertical_lines + 1` lines are drawn. Must be even.
    pub vertical_lines: u32,
    /// Number of scrolling horizontal lines.
    pub horizontal_lines: u32,
    /// Scroll cycles per entrance duration.
    pub scroll_speed: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            color: Rgba8::GREEN,
            stroke_width: 2.0,
            blur_radius: 1.0,
            plane_spacing: 0.24,
            vertical_lines: 6,
            horizontal_lines: 6,
            scroll_speed: 0.2,
        }
    }
}

impl GridConfig {
    /// Length of one full horizontal-line scroll cycle.
    ///
    /// Independent of the entrance animation: `entrance_duration_ms / scroll_speed`.
    pub fn scroll_period_ms(&self, entrance_duration_ms: u64) -> f64 {
        entrance_duration_ms as f64 / self.scroll_speed
    }
}

/// Digit text style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DigitsConfig {
    /// Fill color.
    pub color: Rgba8,
    /// Text size in pixels.
    pub size_px: f32,
    /// Glow blur radius in pixels.
    pub blur_radius: f32,
}

impl Default for DigitsConfig {
    fn default() -> Self {
        Self {
            color: Rgba8::GREEN,
            size_px: 65.0,
            blur_radius: 1.0,
        }
    }
}

/// Radial multiply overlay colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VignetteConfig {
    /// Color at the center.
    pub inner: Rgba8,
    /// Color at `progress * mid_stop`.
    pub mid: Rgba8,
    /// Color at `progress` and, mirrored, beyond.
    pub outer: Rgba8,
    /// Position of the mid stop relative to the outer stop.
    pub mid_stop: f32,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            inner: Rgba8::WHITE,
            mid: Rgba8::DARK_GRAY,
            outer: Rgba8::BLACK,
            mid_stop: 0.95,
        }
    }
}

impl FaceConfig {
    /// Parse a JSON config and validate it.
    pub fn from_reader(reader: impl Read) -> FaceResult<Self> {
        let config: Self = serde_json::from_reader(reader)
            .map_err(|e| FaceError::config(format!("parse face config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> FaceResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            FaceError::config(format!("open face config '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Check every value the per-frame math divides by or scales with.
    pub fn validate(&self) -> FaceResult<()> {
        if self.entrance_duration_ms == 0 {
            return Err(FaceError::config("entrance_duration_ms must be > 0"));
        }
        if self.interactive_frame_ms == 0 {
            return Err(FaceError::config("interactive_frame_ms must be > 0"));
        }

        let grid = &self.grid;
        if !grid.stroke_width.is_finite() || grid.stroke_width <= 0.0 {
            return Err(FaceError::config("grid.stroke_width must be finite and > 0"));
        }
        validate_blur(grid.blur_radius, "grid.blur_radius")?;
        if !grid.plane_spacing.is_finite() || !(0.0..=1.0).contains(&grid.plane_spacing) {
            return Err(FaceError::config("grid.plane_spacing must be in [0, 1]"));
        }
        if grid.vertical_lines == 0 || grid.vertical_lines % 2 != 0 {
            return Err(FaceError::config(
                "grid.vertical_lines must be even and > 0",
            ));
        }
        if grid.horizontal_lines == 0 {
            return Err(FaceError::config("grid.horizontal_lines must be > 0"));
        }
        if !grid.scroll_speed.is_finite() || grid.scroll_speed <= 0.0 {
            return Err(FaceError::config("grid.scroll_speed must be finite and > 0"));
        }

        if !self.digits.size_px.is_finite() || self.digits.size_px <= 0.0 {
            return Err(FaceError::config("digits.size_px must be finite and > 0"));
        }
        validate_blur(self.digits.blur_radius, "digits.blur_radius")?;

        if !self.vignette.mid_stop.is_finite() || !(0.0..=1.0).contains(&self.vignette.mid_stop)
        {
            return Err(FaceError::config("vignette.mid_stop must be in [0, 1]"));
        }

        Ok(())
    }
}

fn validate_blur(radius: f32, field: &str) -> FaceResult<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(FaceError::config(format!(
            "{field} must be finite and >= 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/face/config.rs"]
mod tests;

//! Drawing capability consumed by the face.
//!
//! The face never talks to a rasterizer directly. It issues clears, stroked line batches,
//! clips, transforms, filled circles and text through [`Surface`], so the same drawing code runs
//! against the CPU raster backend and against [`RecordingSurface`](crate::RecordingSurface).

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Circle, Line, Point, Rect};

/// Stroke style for a batch of line segments.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
    /// Gaussian glow radius in pixels; `0` draws hard edges.
    pub blur_radius: f32,
}

/// Fill style for text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Fill color.
    pub color: Rgba8,
    /// Font size in pixels.
    pub size_px: f32,
    /// Gaussian glow radius in pixels.
    pub blur_radius: f32,
}

/// Vertical font metrics relative to the baseline, y growing downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Distance to the top of the tallest glyph; negative.
    pub ascent: f64,
    /// Distance to the bottom of the lowest glyph; positive.
    pub descent: f64,
}

/// How a fill combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Source-over.
    #[default]
    Normal,
    /// `src * dst` per channel, then source-over.
    Multiply,
}

/// Behaviour of a gradient beyond its last stop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientExtend {
    /// Clamp to the edge colors.
    #[default]
    Pad,
    /// Restart from the first stop.
    Repeat,
    /// Bounce back and forth.
    Mirror,
}

/// One color stop of a gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position in `[0, 1]` along the radius.
    pub offset: f32,
    /// Color at `offset`.
    pub color: Rgba8,
}

/// Radial gradient centered on `center`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    /// Gradient center in user space.
    pub center: Point,
    /// Distance at which offset `1.0` is reached.
    pub radius: f64,
    /// Stops in non-decreasing offset order.
    pub stops: Vec<GradientStop>,
    /// Behaviour past the last stop.
    pub extend: GradientExtend,
}

impl RadialGradient {
    /// `true` when every stop sits at offset `0`, so the gradient collapses to its last color.
    pub fn is_degenerate(&self) -> bool {
        self.stops.last().is_none_or(|s| s.offset <= 0.0)
    }
}

/// Paint source of a fill.
#[derive(Clone, Debug, PartialEq)]
pub enum Shader {
    /// One color everywhere.
    Solid(Rgba8),
    /// Radial gradient.
    Radial(RadialGradient),
}

/// Fill style for shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct FillStyle {
    /// Paint source.
    pub shader: Shader,
    /// Compositing mode.
    pub blend: BlendMode,
}

/// 2D drawing target.
///
/// Transforms and clips follow canvas semantics: [`Surface::save`] pushes the current transform
/// and clip, [`Surface::restore`] pops them, [`Surface::concat`] post-multiplies the current
/// transform. Unbalanced `restore` calls are ignored.
pub trait Surface {
    /// Replace every pixel with `color`, ignoring transform and clip.
    fn clear(&mut self, color: Rgba8);

    /// Push transform and clip state.
    fn save(&mut self);

    /// Pop transform and clip state.
    fn restore(&mut self);

    /// Apply `transform` in the current user space.
    fn concat(&mut self, transform: Affine);

    /// Intersect the clip with `rect` in the current user space.
    fn clip_rect(&mut self, rect: Rect);

    /// Stroke every segment of `lines` with one style.
    fn stroke_lines(&mut self, lines: &[Line], style: &LineStyle);

    /// Fill `circle`.
    fn fill_circle(&mut self, circle: Circle, style: &FillStyle);

    /// Metrics for text drawn with `style`.
    fn font_metrics(&mut self, style: &TextStyle) -> FontMetrics;

    /// Draw `text` horizontally centered on `origin.x` with its baseline at `origin.y`.
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    /// Rotate by `degrees` clockwise about `center`.
    fn rotate_about(&mut self, degrees: f64, center: Point) {
        self.concat(Affine::rotate_about(degrees.to_radians(), center));
    }

    /// Scale uniformly by `scale` about `center`.
    fn scale_about(&mut self, scale: f64, center: Point) {
        self.concat(Affine::scale_about(scale, center));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

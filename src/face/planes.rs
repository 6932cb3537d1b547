//! Scrolling ground and ceiling planes.
//!
//! One plane is a horizon line, a fan of vertical lines converging on a vanishing point above
//! the canvas, and horizontal lines drifting downwards. The ceiling is the same plane rotated
//! 180 degrees about the canvas center.

use crate::face::config::GridConfig;
use crate::foundation::core::{Canvas, Line, Point, Rect};
use crate::render::surface::{LineStyle, Surface};

/// Horizon position for entrance `progress`: mid-canvas at `0`, `spacing / 2` lower at `1`.
pub fn horizon_top(height: f64, spacing: f64, progress: f64) -> f64 {
    height * (0.5 + spacing / 2.0 * progress)
}

/// Scroll phase in `[0, 1)` for a cycle of `period_ms`, driven by the frame clock alone.
pub fn scroll_phase(now_ms: u64, period_ms: f64) -> f64 {
    if !(period_ms.is_finite() && period_ms > 0.0) {
        return 0.0;
    }
    (now_ms as f64 % period_ms) / period_ms
}

/// Line geometry of one plane in canvas space.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneGeometry {
    /// Horizon y position.
    pub top: f64,
    /// Horizon line across the full width.
    pub horizon: Line,
    /// Region the vertical fan is clipped to: from the horizon down.
    pub clip: Rect,
    /// `vertical_lines + 1` perspective lines.
    pub verticals: Vec<Line>,
    /// `horizontal_lines` scrolling lines.
    pub horizontals: Vec<Line>,
}

/// Compute one plane for `progress` and scroll `phase`.
pub fn plane_geometry(
    canvas: Canvas,
    grid: &GridConfig,
    progress: f64,
    phase: f64,
) -> PlaneGeometry {
    let width = canvas.width_f64();
    let height = canvas.height_f64();
    let top = horizon_top(height, grid.plane_spacing, progress);

    let half_steps = i64::from(grid.vertical_lines / 2);
    let vanishing = Point::new(width / 2.0, -height / 2.0);
    let verticals = (-half_steps..=half_steps)
        .map(|step| {
            let t = step as f64 / half_steps as f64;
            Line::new(vanishing, (width / 2.0 + (width / 2.0) * t, height))
        })
        .collect();

    let plane_height = height - top;
    let count = grid.horizontal_lines;
    let horizontals = (0..count)
        .map(|i| {
            let offset = if plane_height > 0.0 {
                (plane_height * phase + (f64::from(i) / f64::from(count)) * plane_height)
                    % plane_height
            } else {
                0.0
            };
            let y = top + offset;
            Line::new((0.0, y), (width, y))
        })
        .collect();

    PlaneGeometry {
        top,
        horizon: Line::new((0.0, top), (width, top)),
        clip: Rect::new(0.0, top, width, height),
        verticals,
        horizontals,
    }
}

/// Draws the mirrored pair of grid planes.
#[derive(Clone, Debug)]
pub struct GridPlaneDrawer {
    grid: GridConfig,
    style: LineStyle,
    period_ms: f64,
}

impl GridPlaneDrawer {
    /// Build the drawer and its line style once.
    pub fn new(grid: &GridConfig, entrance_duration_ms: u64) -> Self {
        Self {
            style: LineStyle {
                color: grid.color,
                width: grid.stroke_width,
                blur_radius: grid.blur_radius,
            },
            period_ms: grid.scroll_period_ms(entrance_duration_ms),
            grid: grid.clone(),
        }
    }

    /// Line style shared by every segment.
    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Geometry for one plane at this frame.
    pub fn geometry(&self, canvas: Canvas, progress: f64, now_ms: u64) -> PlaneGeometry {
        plane_geometry(
            canvas,
            &self.grid,
            progress,
            scroll_phase(now_ms, self.period_ms),
        )
    }

    /// Draw the ground plane, then the same plane rotated 180 degrees as the ceiling.
    pub fn draw(&self, surface: &mut dyn Surface, canvas: Canvas, progress: f64, now_ms: u64) {
        let plane = self.geometry(canvas, progress, now_ms);

        self.draw_plane(surface, &plane);
        surface.save();
        surface.rotate_about(180.0, canvas.center());
        self.draw_plane(surface, &plane);
        surface.restore();
    }

    fn draw_plane(&self, surface: &mut dyn Surface, plane: &PlaneGeometry) {
        surface.stroke_lines(&[plane.horizon], &self.style);

        surface.save();
        surface.clip_rect(plane.clip);
        surface.stroke_lines(&plane.verticals, &self.style);
        surface.restore();

        surface.stroke_lines(&plane.horizontals, &self.style);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/face/planes.rs"]
mod tests;

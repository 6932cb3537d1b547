use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Circle, Line, Point, Rect};
use crate::render::surface::{FillStyle, FontMetrics, LineStyle, Surface, TextStyle};

/// A clip rectangle together with the transform that was current when it was set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRegion {
    /// Clip rectangle in user space.
    pub rect: Rect,
    /// User-to-device transform at clip time.
    pub transform: Affine,
}

impl ClipRegion {
    /// `true` if device-space `point` lies inside the clip.
    pub fn contains_device(&self, point: Point) -> bool {
        let local = self.transform.inverse() * point;
        self.rect.contains(local)
    }
}

/// One recorded [`Surface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Surface::clear`].
    Clear(Rgba8),
    /// [`Surface::save`].
    Save,
    /// [`Surface::restore`].
    Restore,
    /// [`Surface::concat`].
    Concat(Affine),
    /// [`Surface::clip_rect`].
    ClipRect(Rect),
    /// [`Surface::stroke_lines`] with the state it was drawn under.
    StrokeLines {
        /// Segments in user space.
        lines: Vec<Line>,
        /// Stroke style.
        style: LineStyle,
        /// Current transform.
        transform: Affine,
        /// Active clips, outermost first.
        clips: Vec<ClipRegion>,
    },
    /// [`Surface::fill_circle`] with the state it was drawn under.
    FillCircle {
        /// Circle in user space.
        circle: Circle,
        /// Fill style.
        style: FillStyle,
        /// Current transform.
        transform: Affine,
    },
    /// [`Surface::draw_text`] with the state it was drawn under.
    DrawText {
        /// Text drawn.
        text: String,
        /// Baseline origin in user space.
        origin: Point,
        /// Text style.
        style: TextStyle,
        /// Current transform.
        transform: Affine,
    },
}

impl DrawCommand {
    /// `true` for commands that put pixels on the surface.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::Clear(_) | Self::StrokeLines { .. } | Self::FillCircle { .. } | Self::DrawText { .. }
        )
    }
}

#[derive(Clone, Debug, Default)]
struct State {
    transform: Affine,
    clips: Vec<ClipRegion>,
}

/// [`Surface`] that records calls instead of rasterizing them.
///
/// Font metrics are reported as fixed fractions of the text size.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    state: State,
    stack: Vec<State>,
    ascent_em: f64,
    descent_em: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Recorder reporting an ascent of `-0.9` and a descent of `0.25` em.
    pub fn new() -> Self {
        Self::with_metrics(-0.9, 0.25)
    }

    /// Recorder reporting the given metrics, expressed in em units.
    pub fn with_metrics(ascent_em: f64, descent_em: f64) -> Self {
        Self {
            commands: Vec::new(),
            state: State::default(),
            stack: Vec::new(),
            ascent_em,
            descent_em,
        }
    }

    /// Every call recorded so far, in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Only the commands that put pixels on the surface.
    pub fn draws(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| c.is_draw())
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Current save depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Forget recorded commands and reset state.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.state = State::default();
        self.stack.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Rgba8) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn concat(&mut self, transform: Affine) {
        self.state.transform *= transform;
        self.commands.push(DrawCommand::Concat(transform));
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clips.push(ClipRegion {
            rect,
            transform: self.state.transform,
        });
        self.commands.push(DrawCommand::ClipRect(rect));
    }

    fn stroke_lines(&mut self, lines: &[Line], style: &LineStyle) {
        self.commands.push(DrawCommand::StrokeLines {
            lines: lines.to_vec(),
            style: style.clone(),
            transform: self.state.transform,
            clips: self.state.clips.clone(),
        });
    }

    fn fill_circle(&mut self, circle: Circle, style: &FillStyle) {
        self.commands.push(DrawCommand::FillCircle {
            circle,
            style: style.clone(),
            transform: self.state.transform,
        });
    }

    fn font_metrics(&mut self, style: &TextStyle) -> FontMetrics {
        let size = f64::from(style.size_px);
        FontMetrics {
            ascent: self.ascent_em * size,
            descent: self.descent_em * size,
        }
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_owned(),
            origin,
            style: style.clone(),
            transform: self.state.transform,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;

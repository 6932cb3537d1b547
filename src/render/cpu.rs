//! CPU raster backend built on `vello_cpu`.
//!
//! Draws are encoded into a `vello_cpu::RenderContext` and grouped into batches that share a
//! blur radius and blend mode. A batch is rasterized into a scratch pixmap, blurred when it
//! carries a glow, then composited into the premultiplied frame buffer. Batches therefore land
//! in submission order, which is what the multiply vignette relies on.

use vello_cpu::kurbo::Shape as _;

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Canvas, Circle, Line, Point, Rect};
use crate::foundation::error::{FaceError, FaceResult};
use crate::render::blur::{blur_rgba8_premul_in_place, gaussian_kernel_q16, radius_to_sigma};
use crate::render::composite::composite_rgba8_premul;
use crate::render::surface::{
    BlendMode, FillStyle, FontMetrics, GradientExtend, LineStyle, Shader, Surface, TextStyle,
};
use crate::render::text::{TextLayoutEngine, Typeface};

const PATH_TOLERANCE: f64 = 0.1;

/// One rendered frame in RGBA8, row-major, no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// `true` if color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BatchKey {
    blur_radius: f32,
    blend: BlendMode,
}

#[derive(Clone, Copy, Debug)]
struct ClipState {
    rect: Rect,
    transform: Affine,
}

#[derive(Clone, Debug, Default)]
struct DrawState {
    transform: Affine,
    clips: Vec<ClipState>,
}

/// [`Surface`] rasterizing into an owned RGBA8 frame.
pub struct CpuCanvas {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    scratch: vello_cpu::Pixmap,
    frame: Vec<u8>,
    tmp: Vec<u8>,
    state: DrawState,
    stack: Vec<DrawState>,
    batch: Option<BatchKey>,
    kernels: Vec<(u32, Vec<u32>)>,
    text: Option<TextLayoutEngine>,
    warned_no_text: bool,
    error: Option<FaceError>,
}

impl std::fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("canvas", &self.canvas)
            .field("has_typeface", &self.text.is_some())
            .finish_non_exhaustive()
    }
}

impl CpuCanvas {
    /// Allocate a transparent canvas without a typeface; text calls are skipped.
    pub fn new(canvas: Canvas) -> FaceResult<Self> {
        if canvas.is_empty() {
            return Err(FaceError::render("canvas width/height must be > 0"));
        }
        let (Ok(w), Ok(h)) = (u16::try_from(canvas.width), u16::try_from(canvas.height)) else {
            return Err(FaceError::render(format!(
                "canvas {}x{} exceeds the {}x{} raster limit",
                canvas.width,
                canvas.height,
                u16::MAX,
                u16::MAX
            )));
        };

        let len = (canvas.width as usize) * (canvas.height as usize) * 4;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            scratch: vello_cpu::Pixmap::new(w, h),
            frame: vec![0; len],
            tmp: vec![0; len],
            state: DrawState::default(),
            stack: Vec::new(),
            batch: None,
            kernels: Vec::new(),
            text: None,
            warned_no_text: false,
            error: None,
        })
    }

    /// Allocate a canvas that draws text with `typeface`.
    pub fn with_typeface(canvas: Canvas, typeface: &Typeface) -> FaceResult<Self> {
        let mut out = Self::new(canvas)?;
        out.text = Some(TextLayoutEngine::new(typeface)?);
        Ok(out)
    }

    /// Bounds of the canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Rasterize pending draws and return a copy of the frame.
    pub fn finish(&mut self) -> FaceResult<FrameRGBA> {
        self.flush_batch();
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.frame.clone(),
            premultiplied: true,
        })
    }

    fn begin(&mut self, key: BatchKey) {
        if self.batch.is_some_and(|b| b != key) {
            self.flush_batch();
        }
        self.batch = Some(key);
    }

    fn flush_batch(&mut self) {
        let Some(key) = self.batch.take() else {
            return;
        };

        self.ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.scratch);
        self.ctx.reset();

        if let Some(kernel) = self.kernel_for(key.blur_radius) {
            blur_rgba8_premul_in_place(
                self.scratch.data_as_u8_slice_mut(),
                &mut self.tmp,
                self.canvas.width,
                self.canvas.height,
                &kernel,
            );
        }

        if let Err(err) =
            composite_rgba8_premul(&mut self.frame, self.scratch.data_as_u8_slice(), key.blend)
        {
            self.error.get_or_insert(err);
        }
    }

    fn kernel_for(&mut self, blur_radius: f32) -> Option<Vec<u32>> {
        if !(blur_radius.is_finite() && blur_radius > 0.0) {
            return None;
        }
        let bits = blur_radius.to_bits();
        if let Some((_, k)) = self.kernels.iter().find(|(b, _)| *b == bits) {
            return Some(k.clone());
        }
        match gaussian_kernel_q16(radius_to_sigma(blur_radius)) {
            Ok(k) => {
                self.kernels.push((bits, k.clone()));
                Some(k)
            }
            Err(err) => {
                self.error.get_or_insert(err);
                None
            }
        }
    }

    fn push_clips(&mut self) -> usize {
        for clip in &self.state.clips {
            self.ctx.set_transform(affine_to_cpu(clip.transform));
            self.ctx.push_clip_layer(&rect_to_cpu(clip.rect).to_path(PATH_TOLERANCE));
        }
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.state.clips.len()
    }

    fn pop_clips(&mut self, n: usize) {
        for _ in 0..n {
            self.ctx.pop_layer();
        }
    }
}

impl Surface for CpuCanvas {
    fn clear(&mut self, color: Rgba8) {
        // Anything still pending would be covered anyway.
        self.batch = None;
        self.ctx.reset();
        let premul = color.to_premul_array();
        for px in self.frame.chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn concat(&mut self, transform: Affine) {
        self.state.transform *= transform;
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clips.push(ClipState {
            rect,
            transform: self.state.transform,
        });
    }

    fn stroke_lines(&mut self, lines: &[Line], style: &LineStyle) {
        if lines.is_empty() {
            return;
        }
        self.begin(BatchKey {
            blur_radius: style.blur_radius,
            blend: BlendMode::Normal,
        });

        let mut path = vello_cpu::kurbo::BezPath::new();
        for line in lines {
            path.move_to(point_to_cpu(line.p0));
            path.line_to(point_to_cpu(line.p1));
        }

        let clips = self.push_clips();
        self.ctx.set_paint(color_to_cpu(style.color));
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(style.width).with_caps(vello_cpu::kurbo::Cap::Butt),
        );
        self.ctx.stroke_path(&path);
        self.pop_clips(clips);
    }

    fn fill_circle(&mut self, circle: Circle, style: &FillStyle) {
        self.begin(BatchKey {
            blur_radius: 0.0,
            blend: style.blend,
        });

        let clips = self.push_clips();
        match &style.shader {
            Shader::Solid(color) => self.ctx.set_paint(color_to_cpu(*color)),
            Shader::Radial(gradient) if gradient.is_degenerate() => {
                let last = gradient.stops.last().map_or(Rgba8::TRANSPARENT, |s| s.color);
                self.ctx.set_paint(color_to_cpu(last));
            }
            Shader::Radial(gradient) => {
                let stops: Vec<(f32, vello_cpu::peniko::Color)> = gradient
                    .stops
                    .iter()
                    .map(|s| (s.offset.clamp(0.0, 1.0), color_to_cpu(s.color)))
                    .collect();
                let paint = vello_cpu::peniko::Gradient::new_radial(
                    point_to_cpu(gradient.center),
                    gradient.radius as f32,
                )
                .with_stops(stops.as_slice())
                .with_extend(extend_to_cpu(gradient.extend));
                self.ctx.set_paint(paint);
            }
        }
        let shape = vello_cpu::kurbo::Circle::new(point_to_cpu(circle.center), circle.radius);
        self.ctx.fill_path(&shape.to_path(PATH_TOLERANCE));
        self.pop_clips(clips);
    }

    fn font_metrics(&mut self, style: &TextStyle) -> FontMetrics {
        match self.text.as_mut() {
            Some(engine) => engine.metrics(style.size_px),
            None => {
                let size = f64::from(style.size_px);
                FontMetrics {
                    ascent: -0.8 * size,
                    descent: 0.2 * size,
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        let Some(engine) = self.text.as_mut() else {
            if !self.warned_no_text {
                tracing::warn!("no typeface set on the canvas, skipping text");
                self.warned_no_text = true;
            }
            return;
        };
        let layout = engine.layout_line(text, style.size_px);
        let font = engine.font().clone();
        let Some(baseline) = layout.lines().next().map(|l| l.metrics().baseline) else {
            return;
        };

        self.begin(BatchKey {
            blur_radius: style.blur_radius,
            blend: BlendMode::Normal,
        });

        let clips = self.push_clips();
        let anchor = Affine::translate((
            origin.x - f64::from(layout.width()) / 2.0,
            origin.y - f64::from(baseline),
        ));
        self.ctx
            .set_transform(affine_to_cpu(self.state.transform * anchor));
        self.ctx.set_paint(color_to_cpu(style.color));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.pop_clips(clips);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn extend_to_cpu(e: GradientExtend) -> vello_cpu::peniko::Extend {
    match e {
        GradientExtend::Pad => vello_cpu::peniko::Extend::Pad,
        GradientExtend::Repeat => vello_cpu::peniko::Extend::Repeat,
        GradientExtend::Mirror => vello_cpu::peniko::Extend::Reflect,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

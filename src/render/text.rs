use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{FaceError, FaceResult};
use crate::render::surface::FontMetrics;

/// Font used to draw the time digits.
///
/// Construction parses the font and fails if it exposes no family, so a typeface that exists
/// can always be laid out.
#[derive(Clone)]
pub struct Typeface {
    bytes: Arc<Vec<u8>>,
    family: String,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("family", &self.family)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Typeface {
    /// Validate and wrap raw TrueType/OpenType bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> FaceResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &bytes)?;
        Ok(Self {
            bytes: Arc::new(bytes),
            family,
        })
    }

    /// Read and validate a font file.
    pub fn from_path(path: impl AsRef<Path>) -> FaceResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            FaceError::resource(format!("read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes)
    }

    /// Family name reported by the font.
    pub fn family(&self) -> &str {
        &self.family
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> FaceResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| FaceError::resource("no font families registered from font bytes"))?;

    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_owned)
        .ok_or_else(|| FaceError::resource("registered font family has no name"))
}

/// Parley layout state bound to one [`Typeface`].
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    font: vello_cpu::peniko::FontData,
    metrics_cache: Vec<(u32, FontMetrics)>,
}

impl TextLayoutEngine {
    pub(crate) fn new(typeface: &Typeface) -> FaceResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &typeface.bytes)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(typeface.bytes.as_ref().clone()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
            metrics_cache: Vec::new(),
        })
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` on a single unbroken line.
    pub(crate) fn layout_line(&mut self, text: &str, size_px: f32) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Line ascent and descent at `size_px`, cached per size.
    pub(crate) fn metrics(&mut self, size_px: f32) -> FontMetrics {
        let key = size_px.to_bits();
        if let Some((_, m)) = self.metrics_cache.iter().find(|(k, _)| *k == key) {
            return *m;
        }

        let layout = self.layout_line("0", size_px);
        let size = f64::from(size_px);
        let metrics = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                FontMetrics {
                    ascent: -f64::from(m.ascent),
                    descent: f64::from(m.descent),
                }
            })
            .unwrap_or(FontMetrics {
                ascent: -0.8 * size,
                descent: 0.2 * size,
            });
        self.metrics_cache.push((key, metrics));
        metrics
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;

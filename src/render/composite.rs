use crate::foundation::error::{FaceError, FaceResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::surface::BlendMode;

fn check_buffers(dst: &[u8], src: &[u8]) -> FaceResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FaceError::render(
            "compositing expects equal-length rgba8 buffers",
        ));
    }
    Ok(())
}

/// Composite premultiplied `src` over `dst` with `mode`.
pub(crate) fn composite_rgba8_premul(dst: &mut [u8], src: &[u8], mode: BlendMode) -> FaceResult<()> {
    check_buffers(dst, src)?;
    match mode {
        BlendMode::Normal => over_in_place(dst, src),
        BlendMode::Multiply => blend_in_place(dst, src, |s, d| s * d),
    }
    Ok(())
}

fn over_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3];
        if sa == 0 {
            continue;
        }
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - u16::from(sa);
        for c in 0..4 {
            d[c] = s[c].saturating_add(mul_div255_u8(u16::from(d[c]), inv));
        }
    }
}

// W3C separable blend followed by source-over:
//   out_a = sa + da * (1 - sa)
//   out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da
fn blend_in_place<F>(dst: &mut [u8], src: &[u8], blend: F)
where
    F: Fn(f32, f32) -> f32,
{
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = f32::from(s[3]) / 255.0;
        if sa <= 0.0 {
            continue;
        }
        let da = f32::from(d[3]) / 255.0;

        for c in 0..3 {
            let sp = f32::from(s[c]) / 255.0;
            let dp = f32::from(d[c]) / 255.0;
            let sc = (sp / sa).clamp(0.0, 1.0);
            let dc = if da > 0.0 { (dp / da).clamp(0.0, 1.0) } else { 0.0 };
            let b = blend(sc, dc).clamp(0.0, 1.0);
            let out = (sp * (1.0 - da) + dp * (1.0 - sa) + b * sa * da).clamp(0.0, 1.0);
            d[c] = to_u8(out);
        }
        d[3] = to_u8((sa + da * (1.0 - sa)).clamp(0.0, 1.0));
    }
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

//! Separable gaussian blur over premultiplied RGBA8, used for the glow of lines and text.
//!
//! Weights are Q16 fixed point and sum to exactly `1 << 16`, so a uniform image stays uniform.

use crate::foundation::error::{FaceError, FaceResult};

/// Map a blur radius in pixels to a gaussian sigma (`radius / sqrt(3) + 0.5`).
pub(crate) fn radius_to_sigma(radius_px: f32) -> f32 {
    if radius_px > 0.0 {
        radius_px * 0.577_35 + 0.5
    } else {
        0.0
    }
}

/// Normalized Q16 weights for a kernel spanning `3 * sigma` on each side.
pub(crate) fn gaussian_kernel_q16(sigma: f32) -> FaceResult<Vec<u32>> {
    if sigma == 0.0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(FaceError::render("blur sigma must be finite and >= 0"));
    }

    let half = (3.0 * sigma).ceil().max(1.0) as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f64> = (-half..=half)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();

    let mut weights: Vec<u32> = raw
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Push the rounding error into the center tap.
    let total: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + (65536 - total)).clamp(0, 65536) as u32;
    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, k: &[u32], axis: Axis) {
    let half = (k.len() / 2) as isize;
    let (len, stride) = match axis {
        Axis::Horizontal => (width, 1),
        Axis::Vertical => (height, width),
    };

    for y in 0..height {
        for x in 0..width {
            let pos = match axis {
                Axis::Horizontal => x,
                Axis::Vertical => y,
            } as isize;
            let base = y * width + x - (pos as usize) * stride;

            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let p = (pos + ki as isize - half).clamp(0, len as isize - 1) as usize;
                let idx = (base + p * stride) * 4;
                for (a, &c) in acc.iter_mut().zip(&src[idx..idx + 4]) {
                    *a += u64::from(kw) * u64::from(c);
                }
            }

            let out = (y * width + x) * 4;
            for (d, a) in dst[out..out + 4].iter_mut().zip(acc) {
                *d = q16_to_u8(a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

/// Blur `buf` in place; `tmp` must be the same length.
pub(crate) fn blur_rgba8_premul_in_place(
    buf: &mut [u8],
    tmp: &mut [u8],
    width: u32,
    height: u32,
    kernel_q16: &[u32],
) {
    if kernel_q16.len() <= 1 || width == 0 || height == 0 {
        return;
    }
    let (w, h) = (width as usize, height as usize);
    blur_pass(buf, tmp, w, h, kernel_q16, Axis::Horizontal);
    blur_pass(tmp, buf, w, h, kernel_q16, Axis::Vertical);
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;

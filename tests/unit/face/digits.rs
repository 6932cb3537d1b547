use super::*;
use crate::render::recording::{DrawCommand, RecordingSurface};

#[test]
fn coefficient_is_a_decimal_digit_of_the_timestamp() {
    let ts = 1_234_567_890_123;
    assert_eq!(scale_coefficient(ts, 0), 3);
    assert_eq!(scale_coefficient(ts, 1), 2);
    assert_eq!(scale_coefficient(ts, 2), 1);
    assert_eq!(scale_coefficient(ts, 3), 0);
    assert_eq!(scale_coefficient(ts, 12), 1);
    assert_eq!(scale_coefficient(ts, 13), 0);
}

#[test]
fn coefficient_past_u64_range_is_zero() {
    assert_eq!(scale_coefficient(u64::MAX, 19), 1);
    assert_eq!(scale_coefficient(u64::MAX, 20), 0);
    assert_eq!(scale_coefficient(u64::MAX, usize::MAX), 0);
}

#[test]
fn scale_is_progress_to_the_coefficient() {
    assert_eq!(digit_scale(0.5, 3), 0.125);
    assert_eq!(digit_scale(1.0, 9), 1.0);
    assert_eq!(digit_scale(0.0, 4), 0.0);
}

#[test]
fn zero_to_the_zero_is_one() {
    assert_eq!(digit_scale(0.0, 0), 1.0);
    assert_eq!(digit_scale(0.3, 0), 1.0);
    assert_eq!(digit_scale(f64::NAN, 2), 0.0);
}

#[test]
fn origins_are_evenly_spread_and_vertically_centered() {
    let metrics = FontMetrics {
        ascent: -60.0,
        descent: 20.0,
    };
    let canvas = Canvas::new(450, 400);
    let first = digit_origin(canvas, 0, 8, metrics);
    let last = digit_origin(canvas, 7, 8, metrics);
    assert_eq!(first, Point::new(50.0, 220.0));
    assert_eq!(last, Point::new(400.0, 220.0));
}

#[test]
fn draws_each_character_scaled_about_the_center() {
    let canvas = Canvas::new(450, 450);
    let animator = DigitAnimator::new(&DigitsConfig::default());
    let mut s = RecordingSurface::new();
    animator.draw(&mut s, canvas, 0.5, 1_234_567_890_123, "12 34 56");

    let texts: Vec<_> = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::DrawText {
                text,
                origin,
                transform,
                ..
            } => Some((text.clone(), *origin, *transform)),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 8);

    let chars: String = texts.iter().map(|(t, ..)| t.as_str()).collect();
    assert_eq!(chars, "12 34 56");

    let center = canvas.center();
    let (_, origin, transform) = &texts[0];
    assert_eq!(origin.x, 50.0);
    assert_eq!(*transform, kurbo::Affine::scale_about(0.125, center));
    assert_eq!(*transform * center, center);

    // Index 3 reads digit 0 of the timestamp, so that character is at full size.
    assert_eq!(texts[3].2, kurbo::Affine::scale_about(1.0, center));
    assert_eq!(s.depth(), 0);
}

#[test]
fn animator_uses_the_configured_text_style() {
    let animator = DigitAnimator::new(&DigitsConfig::default());
    assert_eq!(animator.style().size_px, 65.0);
    assert_eq!(animator.style().blur_radius, 1.0);
}

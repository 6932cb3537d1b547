use super::*;
use crate::render::surface::{BlendMode, Shader};

fn line_style() -> LineStyle {
    LineStyle {
        color: Rgba8::GREEN,
        width: 2.0,
        blur_radius: 1.0,
    }
}

#[test]
fn save_restore_scopes_transform_and_clip() {
    let mut s = RecordingSurface::new();
    s.save();
    s.concat(Affine::translate((10.0, 0.0)));
    s.clip_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    s.stroke_lines(&[Line::new((0.0, 0.0), (1.0, 1.0))], &line_style());
    s.restore();
    s.stroke_lines(&[Line::new((0.0, 0.0), (1.0, 1.0))], &line_style());

    let strokes: Vec<_> = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::StrokeLines {
                transform, clips, ..
            } => Some((*transform, clips.len())),
            _ => None,
        })
        .collect();
    assert_eq!(strokes[0], (Affine::translate((10.0, 0.0)), 1));
    assert_eq!(strokes[1], (Affine::IDENTITY, 0));
    assert_eq!(s.depth(), 0);
}

#[test]
fn unbalanced_restore_is_ignored() {
    let mut s = RecordingSurface::new();
    s.concat(Affine::scale(2.0));
    s.restore();
    assert_eq!(s.transform(), Affine::scale(2.0));
}

#[test]
fn clip_region_tests_points_in_device_space() {
    let clip = ClipRegion {
        rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        transform: Affine::translate((100.0, 0.0)),
    };
    assert!(clip.contains_device(Point::new(105.0, 5.0)));
    assert!(!clip.contains_device(Point::new(5.0, 5.0)));
}

#[test]
fn metrics_scale_with_text_size() {
    let mut s = RecordingSurface::with_metrics(-1.0, 0.5);
    let m = s.font_metrics(&TextStyle {
        color: Rgba8::GREEN,
        size_px: 20.0,
        blur_radius: 0.0,
    });
    assert_eq!(m.ascent, -20.0);
    assert_eq!(m.descent, 10.0);
}

#[test]
fn draws_filters_state_changes() {
    let mut s = RecordingSurface::new();
    s.clear(Rgba8::BLACK);
    s.save();
    s.fill_circle(
        Circle::new((0.0, 0.0), 1.0),
        &FillStyle {
            shader: Shader::Solid(Rgba8::WHITE),
            blend: BlendMode::Multiply,
        },
    );
    s.restore();
    assert_eq!(s.commands().len(), 4);
    assert_eq!(s.draws().count(), 2);

    s.reset();
    assert!(s.commands().is_empty());
}

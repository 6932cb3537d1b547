use super::*;
use crate::render::recording::{DrawCommand, RecordingSurface};

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{a} != {b}");
}

#[test]
fn horizon_moves_from_middle_to_lower_band() {
    approx(horizon_top(400.0, 0.24, 0.0), 200.0);
    approx(horizon_top(400.0, 0.24, 1.0), 248.0);
    let eased = crate::animation::ease::ease_in_out_sine(0.25);
    approx(horizon_top(400.0, 0.24, eased), 207.029_437);
}

#[test]
fn scroll_phase_wraps_every_period() {
    approx(scroll_phase(0, 5000.0), 0.0);
    approx(scroll_phase(1250, 5000.0), 0.25);
    approx(scroll_phase(5000, 5000.0), 0.0);
    approx(scroll_phase(12_500, 5000.0), 0.5);
    assert_eq!(scroll_phase(10, 0.0), 0.0);
}

#[test]
fn default_grid_has_seven_verticals_and_six_horizontals() {
    let g = plane_geometry(Canvas::new(400, 400), &GridConfig::default(), 0.5, 0.3);
    assert_eq!(g.verticals.len(), 7);
    assert_eq!(g.horizontals.len(), 6);
}

#[test]
fn verticals_fan_out_from_the_vanishing_point() {
    let g = plane_geometry(Canvas::new(400, 300), &GridConfig::default(), 1.0, 0.0);
    for line in &g.verticals {
        assert_eq!(line.p0, Point::new(200.0, -150.0));
        approx(line.p1.y, 300.0);
    }
    approx(g.verticals[0].p1.x, 0.0);
    approx(g.verticals[3].p1.x, 200.0);
    approx(g.verticals[6].p1.x, 400.0);
    assert_eq!(g.clip, Rect::new(0.0, g.top, 400.0, 300.0));
}

#[test]
fn horizontals_stay_inside_the_plane_and_are_evenly_spaced() {
    let canvas = Canvas::new(400, 400);
    let g = plane_geometry(canvas, &GridConfig::default(), 1.0, 0.0);
    let plane_height = 400.0 - g.top;
    for (i, line) in g.horizontals.iter().enumerate() {
        approx(line.p0.y, line.p1.y);
        approx(line.p0.x, 0.0);
        approx(line.p1.x, 400.0);
        approx(line.p0.y, g.top + plane_height * i as f64 / 6.0);
    }

    let g = plane_geometry(canvas, &GridConfig::default(), 0.3, 0.9);
    for line in &g.horizontals {
        assert!(line.p0.y >= g.top && line.p0.y < 400.0);
    }
}

#[test]
fn horizontals_drift_downwards_with_phase() {
    let canvas = Canvas::new(400, 400);
    let a = plane_geometry(canvas, &GridConfig::default(), 1.0, 0.0);
    let b = plane_geometry(canvas, &GridConfig::default(), 1.0, 0.05);
    for (la, lb) in a.horizontals.iter().zip(&b.horizontals) {
        approx(lb.p0.y - la.p0.y, (400.0 - a.top) * 0.05);
    }
}

#[test]
fn collapsed_plane_does_not_produce_nan() {
    let grid = GridConfig {
        plane_spacing: 1.0,
        ..GridConfig::default()
    };
    let g = plane_geometry(Canvas::new(100, 100), &grid, 1.0, 0.5);
    for line in &g.horizontals {
        assert!(line.p0.y.is_finite());
        approx(line.p0.y, 100.0);
    }
}

#[test]
fn mirrored_planes_share_segments_and_differ_by_rotation() {
    let canvas = Canvas::new(300, 300);
    let drawer = GridPlaneDrawer::new(&GridConfig::default(), 1000);
    let mut s = RecordingSurface::new();
    drawer.draw(&mut s, canvas, 0.7, 1234);

    let strokes: Vec<_> = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::StrokeLines {
                lines, transform, ..
            } => Some((lines.clone(), *transform)),
            _ => None,
        })
        .collect();
    assert_eq!(strokes.len(), 6);

    let (ground, ceiling) = strokes.split_at(3);
    let rotation = kurbo::Affine::rotate_about(std::f64::consts::PI, canvas.center());
    for ((gl, gt), (cl, ct)) in ground.iter().zip(ceiling) {
        assert_eq!(gl, cl);
        assert_eq!(*gt, kurbo::Affine::IDENTITY);
        let coeffs = ct.as_coeffs();
        for (a, b) in coeffs.iter().zip(rotation.as_coeffs()) {
            approx(*a, b);
        }
    }
    assert_eq!(s.depth(), 0);
}

#[test]
fn only_verticals_are_clipped() {
    let drawer = GridPlaneDrawer::new(&GridConfig::default(), 1000);
    let mut s = RecordingSurface::new();
    drawer.draw(&mut s, Canvas::new(200, 200), 1.0, 0);

    let clipped: Vec<_> = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::StrokeLines { lines, clips, .. } => Some((lines.len(), clips.len())),
            _ => None,
        })
        .collect();
    assert_eq!(clipped[0], (1, 0));
    assert_eq!(clipped[1], (7, 1));
    assert_eq!(clipped[2], (6, 0));
}

#[test]
fn drawer_uses_the_configured_line_style() {
    let drawer = GridPlaneDrawer::new(&GridConfig::default(), 1000);
    assert_eq!(drawer.style().width, 2.0);
    assert_eq!(drawer.style().blur_radius, 1.0);
    assert_eq!(
        drawer.style().color,
        crate::foundation::color::Rgba8::GREEN
    );
}

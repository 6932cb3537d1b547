use super::*;
use crate::animation::clock::ManualClock;
use crate::foundation::color::Rgba8;
use crate::render::recording::{DrawCommand, RecordingSurface};
use chrono::Utc;

fn face_at(now_ms: u64) -> (Arc<ManualClock>, CyberFace, VisibilityNotifier) {
    let clock = Arc::new(ManualClock::new(now_ms));
    let (face, notifier) = CyberFace::new(FaceConfig::default(), clock.clone()).unwrap();
    (clock, face, notifier)
}

fn frame(now_ms: u64, w: u32, h: u32) -> FrameContext {
    FrameContext {
        now_ms,
        canvas: Canvas::new(w, h),
        time_text: "12 34 56".to_owned(),
    }
}

fn horizon_of(s: &RecordingSurface) -> f64 {
    s.commands()
        .iter()
        .find_map(|c| match c {
            DrawCommand::StrokeLines { lines, .. } => Some(lines[0].p0.y),
            _ => None,
        })
        .unwrap()
}

#[test]
fn progress_follows_the_eased_entrance() {
    let (_clock, face, _n) = face_at(10_000);
    assert_eq!(face.progress_at(10_000), 0.0);
    assert!((face.progress_at(10_250) - 0.146_446_609).abs() < 1e-6);
    assert!((face.progress_at(10_500) - 0.5).abs() < 1e-12);
    assert_eq!(face.progress_at(11_000), 1.0);
    assert_eq!(face.progress_at(11_500), 1.0);
    assert_eq!(face.progress_at(9_000), 0.0);
}

#[test]
fn layers_are_drawn_in_order() {
    let (_clock, mut face, _n) = face_at(0);
    let mut s = RecordingSurface::new();
    face.render_frame(&mut s, &frame(500, 400, 400));

    let kinds: Vec<&str> = s
        .draws()
        .map(|c| match c {
            DrawCommand::Clear(_) => "clear",
            DrawCommand::StrokeLines { .. } => "lines",
            DrawCommand::DrawText { .. } => "text",
            DrawCommand::FillCircle { .. } => "circle",
            _ => unreachable!(),
        })
        .collect();

    let mut expected = vec!["clear"];
    expected.extend(["lines"; 6]);
    expected.extend(["text"; 8]);
    expected.push("circle");
    assert_eq!(kinds, expected);
    assert_eq!(s.depth(), 0);
    assert_eq!(s.commands()[0], DrawCommand::Clear(Rgba8::BLACK));
}

#[test]
fn horizon_matches_the_entrance_scenarios() {
    let (_clock, mut face, _n) = face_at(0);

    let mut s = RecordingSurface::new();
    face.render_frame(&mut s, &frame(250, 400, 400));
    assert!((horizon_of(&s) - 207.029_437).abs() < 1e-4);

    let mut s = RecordingSurface::new();
    face.render_frame(&mut s, &frame(1_500, 400, 400));
    assert!((horizon_of(&s) - 248.0).abs() < 1e-9);
}

#[test]
fn empty_canvas_draws_nothing() {
    let (_clock, mut face, _n) = face_at(0);
    let mut s = RecordingSurface::new();
    face.render_frame(&mut s, &frame(100, 0, 400));
    face.render_frame(&mut s, &frame(100, 400, 0));
    face.render_frame(&mut s, &frame(100, 0, 0));
    assert!(s.commands().is_empty());
}

#[test]
fn visibility_event_restarts_the_animation_on_the_next_frame() {
    let (clock, mut face, notifier) = face_at(0);
    let mut s = RecordingSurface::new();

    face.render_frame(&mut s, &frame(5_000, 100, 100));
    assert_eq!(face.progress_at(5_000), 1.0);

    clock.set(6_000);
    assert!(notifier.set_visible(true));
    face.render_frame(&mut s, &frame(6_000, 100, 100));
    assert_eq!(face.last_visible_ms(), 6_000);
    assert!(face.is_visible());
    assert_eq!(face.progress_at(6_000), 0.0);
}

#[test]
fn events_are_applied_even_for_empty_frames() {
    let (clock, mut face, notifier) = face_at(0);
    clock.set(700);
    notifier.set_visible(true);
    face.render_frame(&mut RecordingSurface::new(), &frame(700, 0, 0));
    assert_eq!(face.last_visible_ms(), 700);
}

#[test]
fn render_formats_the_host_timestamp() {
    let (_clock, mut face, _n) = face_at(0);
    let mut s = RecordingSurface::new();
    let t = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    face.render(&mut s, Canvas::new(200, 200), &t);

    let text: String = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::DrawText { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(text, "03 04 05");
}

#[test]
fn digit_scales_are_seeded_by_the_visibility_timestamp() {
    let (_clock, mut face, _n) = face_at(1_234_567_890_123);
    let mut s = RecordingSurface::new();
    face.render_frame(&mut s, &frame(1_234_567_890_123, 200, 200));

    // Progress is 0, so only characters whose seed digit is 0 are visible.
    let visible: Vec<bool> = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::DrawText { transform, .. } => Some(transform.determinant() != 0.0),
            _ => None,
        })
        .collect();
    assert_eq!(
        visible,
        [false, false, false, true, false, false, false, false]
    );
}

#[test]
fn destroy_is_idempotent_and_stops_rendering() {
    let (_clock, mut face, notifier) = face_at(0);
    assert!(face.destroy());
    assert!(!face.destroy());
    assert!(face.is_destroyed());
    assert!(!notifier.set_visible(true));

    let mut s = RecordingSurface::new();
    face.render_frame(&mut s, &frame(100, 100, 100));
    assert!(s.commands().is_empty());
}

#[test]
fn dropping_the_face_unsubscribes() {
    let (_clock, face, notifier) = face_at(0);
    drop(face);
    assert!(!notifier.set_visible(false));
}

#[test]
fn invalid_config_is_a_construction_error() {
    let mut config = FaceConfig::default();
    config.grid.horizontal_lines = 0;
    let err = CyberFace::new(config, Arc::new(ManualClock::new(0))).unwrap_err();
    assert!(matches!(err, crate::FaceError::Config(_)));
}

#[test]
fn frame_interval_is_the_interactive_cadence() {
    let (_clock, face, _n) = face_at(0);
    assert_eq!(face.frame_interval(), Duration::from_millis(16));
}

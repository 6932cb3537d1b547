use super::*;

#[test]
fn empty_when_any_dimension_is_zero() {
    assert!(Canvas::new(0, 400).is_empty());
    assert!(Canvas::new(400, 0).is_empty());
    assert!(Canvas::new(0, 0).is_empty());
    assert!(!Canvas::new(1, 1).is_empty());
}

#[test]
fn center_and_rect_follow_dimensions() {
    let c = Canvas::new(400, 300);
    assert_eq!(c.center(), Point::new(200.0, 150.0));
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 400.0, 300.0));
}

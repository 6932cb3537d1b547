use super::*;

#[test]
fn system_clock_is_non_decreasing() {
    let clock = SystemClock::new();
    let mut prev = clock.now_ms();
    assert!(prev > 0);
    for _ in 0..1000 {
        let now = clock.now_ms();
        assert!(now >= prev);
        prev = now;
    }
}

#[test]
fn manual_clock_set_and_advance() {
    let clock = ManualClock::new(1_000);
    assert_eq!(clock.now_ms(), 1_000);
    clock.advance(16);
    assert_eq!(clock.now_ms(), 1_016);
    clock.set(5);
    assert_eq!(clock.now_ms(), 5);
}

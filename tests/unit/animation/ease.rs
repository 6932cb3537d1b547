use super::*;

const ALL: [Ease; 4] = [Ease::Linear, Ease::InOutSine, Ease::InOutQuad, Ease::InOutCubic];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
    assert_eq!(ease_in_out_sine(0.0), 0.0);
    assert_eq!(ease_in_out_sine(1.0), 1.0);
}

#[test]
fn monotonic_on_unit_interval() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=200 {
            let v = ease.apply(f64::from(i) / 200.0);
            assert!(v >= prev, "{ease:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn sine_is_point_symmetric_about_midpoint() {
    for i in 0..=100 {
        let x = f64::from(i) / 100.0;
        let lhs = ease_in_out_sine(x);
        let rhs = 1.0 - ease_in_out_sine(1.0 - x);
        assert!((lhs - rhs).abs() < 1e-12, "x={x}: {lhs} vs {rhs}");
    }
}

#[test]
fn sine_has_flat_ends() {
    let h = 1e-4;
    assert!(ease_in_out_sine(h) / h < 1e-3);
    assert!((1.0 - ease_in_out_sine(1.0 - h)) / h < 1e-3);
}

#[test]
fn out_of_range_inputs_clamp() {
    assert_eq!(Ease::InOutSine.apply(-0.5), 0.0);
    assert_eq!(Ease::InOutSine.apply(1.5), 1.0);
    assert_eq!(Ease::InOutSine.apply(f64::NAN), 0.0);
}

#[test]
fn known_value_at_quarter() {
    let v = Ease::InOutSine.apply(0.25);
    assert!((v - 0.146_446_609_4).abs() < 1e-9);
}

#[test]
fn default_is_in_out_sine() {
    assert_eq!(Ease::default(), Ease::InOutSine);
    let parsed: Ease = serde_json::from_str("\"in_out_cubic\"").unwrap();
    assert_eq!(parsed, Ease::InOutCubic);
}

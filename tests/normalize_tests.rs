use approx::assert_abs_diff_eq;
use chart_cards::core::{bar_fraction, normalize};

#[test]
fn flat_domain_maps_to_full_scale() {
    assert_eq!(normalize(7.0, 7.0, 7.0), 1.0);
    assert_eq!(normalize(0.0, 0.0, 0.0), 1.0);
    assert_eq!(normalize(-3.0, 12.0, 12.0), 1.0);
}

#[test]
fn values_are_clamped_into_unit_range() {
    assert_abs_diff_eq!(normalize(25.0, 0.0, 100.0), 0.25);
    assert_eq!(normalize(150.0, 0.0, 100.0), 1.0);
    assert_eq!(normalize(-10.0, 0.0, 100.0), 0.0);
}

#[test]
fn non_finite_inputs_never_leak() {
    assert_eq!(normalize(f64::NAN, 0.0, 10.0), 0.0);
    assert_eq!(normalize(f64::INFINITY, 0.0, 10.0), 0.0);
    assert_eq!(normalize(5.0, 0.0, f64::INFINITY), 1.0);
    assert_eq!(normalize(5.0, f64::NAN, 10.0), 1.0);
}

#[test]
fn bar_fraction_floors_visible_width() {
    let zero = bar_fraction(0.0, 80.0, 0.05);
    assert_eq!(zero.exact, 0.0);
    assert_eq!(zero.visible, 0.05);

    let half = bar_fraction(40.0, 80.0, 0.05);
    assert_abs_diff_eq!(half.exact, 0.5);
    assert_abs_diff_eq!(half.visible, 0.5);
}

#[test]
fn bar_fraction_with_zero_max_is_floor_only() {
    let fraction = bar_fraction(0.0, 0.0, 0.05);
    assert_eq!(fraction.exact, 0.0);
    assert_eq!(fraction.visible, 0.05);
}

use approx::assert_abs_diff_eq;
use chart_cards::core::{
    ArcFillMode, ArcLayout, ColoredDataPoint, legend_entries, partition, partition_angles,
    sort_by_value_desc,
};
use chart_cards::render::Color;

fn scenario_b_values() -> Vec<f64> {
    vec![3.0, 4.0, 2.0, 1.0, 1.0, 1.0, 0.0]
}

fn colored(values: &[f64]) -> Vec<ColoredDataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| ColoredDataPoint::new(format!("S{index}"), *value, Color::BLACK))
        .collect()
}

#[test]
fn scenario_b_keeps_proportions_and_floors_zero_slice() {
    let arcs = partition_angles(&scenario_b_values(), 1.0, 2.0, 0.5);
    assert_eq!(arcs.len(), 7);

    // Raw angles plus seven gaps need 374°, so everything scales by 360 / 374.
    let scale = 360.0 / 374.0;
    assert_abs_diff_eq!(arcs[0].sweep_angle, 90.0 * scale - 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arcs[1].sweep_angle, 120.0 * scale - 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arcs[2].sweep_angle, 60.0 * scale - 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arcs[3].sweep_angle, 30.0 * scale - 2.0, epsilon = 1e-9);
    assert_eq!(arcs[6].sweep_angle, 0.5);

    let ratio = (arcs[1].sweep_angle + 2.0) / (arcs[0].sweep_angle + 2.0);
    assert_abs_diff_eq!(ratio, 4.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn scenario_b_start_angles_advance_by_scaled_angle_plus_gap() {
    let arcs = partition_angles(&scenario_b_values(), 1.0, 2.0, 0.5);
    let scale = 360.0 / 374.0;
    assert_eq!(arcs[0].start_angle, 0.0);
    assert_abs_diff_eq!(arcs[1].start_angle, 90.0 * scale + 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arcs[2].start_angle, 210.0 * scale + 4.0, epsilon = 1e-9);

    for pair in arcs.windows(2) {
        assert!(pair[1].start_angle > pair[0].start_angle);
    }
    let last = arcs.last().expect("last arc");
    assert!(last.start_angle + last.sweep_angle <= 360.0 + 1e-9);
}

#[test]
fn partition_is_idempotent() {
    let first = partition_angles(&scenario_b_values(), 0.37, 2.0, 0.5);
    let second = partition_angles(&scenario_b_values(), 0.37, 2.0, 0.5);
    assert_eq!(first, second);
}

#[test]
fn input_order_is_preserved() {
    let arcs = partition_angles(&[1.0, 5.0, 2.0], 1.0, 0.0, 0.0);
    assert!(arcs[1].sweep_angle > arcs[2].sweep_angle);
    assert!(arcs[2].sweep_angle > arcs[0].sweep_angle);
}

#[test]
fn progress_zero_collapses_to_floor() {
    let arcs = partition_angles(&[1.0, 2.0, 3.0], 0.0, 2.0, 0.5);
    assert!(arcs.iter().all(|arc| arc.sweep_angle == 0.5));
    assert_eq!(arcs[1].start_angle, 2.0);
    assert_eq!(arcs[2].start_angle, 4.0);
}

#[test]
fn progress_is_clamped() {
    let over = partition_angles(&[1.0, 1.0], 3.0, 0.0, 0.0);
    let full = partition_angles(&[1.0, 1.0], 1.0, 0.0, 0.0);
    assert_eq!(over, full);
}

#[test]
fn many_tiny_slices_still_fit_one_turn() {
    let mut values = vec![0.0; 120];
    values[0] = 1_000.0;
    let arcs = partition_angles(&values, 1.0, 2.0, 0.5);
    let footprint: f64 = arcs.iter().map(|arc| arc.sweep_angle + 2.0).sum();
    assert!(footprint <= 360.0 + 1e-6);
    assert!(arcs.iter().all(|arc| arc.sweep_angle >= 0.5 - 1e-9));

    let last = arcs.last().expect("last arc");
    assert!(last.start_angle + last.sweep_angle <= 360.0 + 1e-6);
    for pair in arcs.windows(2) {
        assert!(pair[0].start_angle + pair[0].sweep_angle <= pair[1].start_angle + 1e-9);
    }
}

#[test]
fn more_slices_than_the_floor_allows_shrinks_gap_and_floor() {
    let values = vec![1.0; 200];
    let arcs = partition_angles(&values, 1.0, 2.0, 0.5);
    let last = arcs.last().expect("last arc");
    assert!(last.start_angle + last.sweep_angle <= 360.0 + 1e-6);
    assert!(arcs.iter().all(|arc| arc.sweep_angle > 0.0));
}

#[test]
fn pie_layout_grows_slices_in_place() {
    let points = colored(&[1.0, 1.0, 2.0]);
    let half = partition(&points, 0.5, ArcLayout::pie());
    let full = partition(&points, 1.0, ArcLayout::pie());

    assert_eq!(ArcLayout::pie().fill_mode, ArcFillMode::InPlace);
    for (half, full) in half.iter().zip(&full) {
        assert_eq!(half.start_angle, full.start_angle);
        assert_abs_diff_eq!(half.sweep_angle * 2.0, full.sweep_angle, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(full[2].start_angle, 180.0, epsilon = 1e-9);
}

#[test]
fn slices_carry_point_colors() {
    let points = vec![
        ColoredDataPoint::new("a", 1.0, Color::BLACK),
        ColoredDataPoint::new("b", 1.0, Color::WHITE),
    ];
    let slices = partition(&points, 1.0, ArcLayout::donut());
    assert_eq!(slices[0].color, Color::BLACK);
    assert_eq!(slices[1].color, Color::WHITE);
}

#[test]
fn legend_reports_share_of_total() {
    let entries = legend_entries(&colored(&[1.0, 3.0]));
    assert_abs_diff_eq!(entries[0].percentage, 25.0);
    assert_abs_diff_eq!(entries[1].percentage, 75.0);
    assert_eq!(entries[1].text, "S1: 75.0%");
}

#[test]
fn legend_with_zero_total_reports_zero() {
    let entries = legend_entries(&colored(&[0.0, 0.0]));
    assert!(entries.iter().all(|entry| entry.percentage == 0.0));
    assert_eq!(entries[0].text, "S0: 0.0%");
}

#[test]
fn descending_sort_is_stable() {
    let points = vec![
        ColoredDataPoint::new("low", 1.0, Color::BLACK),
        ColoredDataPoint::new("first-high", 5.0, Color::BLACK),
        ColoredDataPoint::new("second-high", 5.0, Color::BLACK),
    ];
    let sorted = sort_by_value_desc(&points);
    let labels: Vec<&str> = sorted.iter().map(|point| point.label.as_str()).collect();
    assert_eq!(labels, ["first-high", "second-high", "low"]);
}

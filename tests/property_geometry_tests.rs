use chart_cards::core::{
    bar_fraction, build_path, normalize, partition_angles, partition_in_place, plan_axis,
};
use kurbo::{PathEl, Point};
use proptest::prelude::*;

proptest! {
    #[test]
    fn flat_domain_normalizes_to_one(value in -1_000.0f64..1_000.0, domain in -1_000.0f64..1_000.0) {
        prop_assert_eq!(normalize(value, domain, domain), 1.0);
    }

    #[test]
    fn normalized_values_inside_domain_stay_in_unit_range(
        low in -1_000.0f64..1_000.0,
        span in 0.01f64..1_000.0,
        factor in 0.0f64..1.0
    ) {
        let value = low + span * factor;
        let normalized = normalize(value, low, low + span);
        prop_assert!((-1e-9..=1.0 + 1e-9).contains(&normalized));
    }

    #[test]
    fn gapped_partition_fits_one_turn(
        values in prop::collection::vec(0.001f64..1_000.0, 1..50),
        progress in 0.0f64..=1.0
    ) {
        let arcs = partition_angles(&values, progress, 2.0, 0.5);
        prop_assert_eq!(arcs.len(), values.len());
        prop_assert_eq!(&arcs, &partition_angles(&values, progress, 2.0, 0.5));

        let footprint: f64 = arcs.iter().map(|arc| arc.sweep_angle + 2.0).sum();
        prop_assert!(footprint <= 360.0 + 1e-6, "footprint {footprint}");
        for arc in &arcs {
            prop_assert!(arc.sweep_angle >= 0.5 - 1e-9);
            prop_assert!(arc.start_angle >= 0.0);
        }
        for pair in arcs.windows(2) {
            prop_assert!(pair[1].start_angle >= pair[0].start_angle + pair[0].sweep_angle - 1e-9);
        }
    }

    #[test]
    fn settled_pie_covers_full_turn(values in prop::collection::vec(0.001f64..1_000.0, 1..50)) {
        let arcs = partition_in_place(&values, 1.0);
        let total: f64 = arcs.iter().map(|arc| arc.sweep_angle).sum();
        prop_assert!((total - 360.0).abs() < 1e-6);

        let again = partition_in_place(&values, 1.0);
        prop_assert_eq!(arcs, again);
    }

    #[test]
    fn gridlines_rise_from_zero_past_the_maximum(
        max_value in 0.0f64..1_000_000.0,
        height in 1.0f64..2_000.0,
        spacing in 1.0f64..200.0
    ) {
        let plan = plan_axis(max_value, height, spacing);
        prop_assert_eq!(plan.gridline_values.first().copied(), Some(0.0));
        prop_assert!(plan.max_extent >= max_value);
        prop_assert!(plan.step > 0.0);
        for pair in plan.gridline_values.windows(2) {
            prop_assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn paths_pass_through_every_point(
        ys in prop::collection::vec(0.0f64..500.0, 1..40),
        spacing in 1.0f64..200.0,
        smooth in any::<bool>()
    ) {
        let points: Vec<Point> = ys
            .iter()
            .enumerate()
            .map(|(index, &y)| Point::new(index as f64 * spacing, y))
            .collect();
        let path = build_path(&points, smooth).expect("path");
        let anchors: Vec<Point> = path
            .elements()
            .iter()
            .filter_map(|element| match *element {
                PathEl::MoveTo(point) | PathEl::LineTo(point) | PathEl::CurveTo(_, _, point) => {
                    Some(point)
                }
                _ => None,
            })
            .collect();
        prop_assert_eq!(anchors, points);
    }

    #[test]
    fn visible_bar_fraction_respects_floor(
        value in 0.0f64..1_000.0,
        max_extra in 0.0f64..1_000.0,
        floor in 0.0f64..=1.0
    ) {
        let max_value = value + max_extra;
        let fraction = bar_fraction(value, max_value, floor);
        prop_assert!(fraction.visible >= floor);
        prop_assert!(fraction.visible <= 1.0 + 1e-12);
        prop_assert!(fraction.exact <= fraction.visible);
    }
}

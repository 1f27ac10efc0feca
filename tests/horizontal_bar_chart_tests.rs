use std::time::Duration;

use approx::assert_abs_diff_eq;
use chart_cards::core::{ColoredDataPoint, DatasetCollection, Viewport};
use chart_cards::interaction::PresentationMode;
use chart_cards::render::{Color, LineStrokeStyle, RenderFrame};
use chart_cards::{ChartError, ChartWidget, HorizontalBarChart, HorizontalBarChartConfig};
use kurbo::Rect;

fn area() -> Rect {
    Rect::new(0.0, 0.0, 400.0, 600.0)
}

fn red() -> Color {
    Color::rgb(1.0, 0.0, 0.0)
}

fn yearly() -> DatasetCollection {
    DatasetCollection::new()
        .with_dataset(
            "2023",
            vec![
                ColoredDataPoint::new("A", 80.0, red()),
                ColoredDataPoint::new("B", 40.0, Color::BLACK),
                ColoredDataPoint::new("C", 0.0, Color::GRAY),
            ],
        )
        .with_dataset(
            "2024",
            vec![
                ColoredDataPoint::new("A", 10.0, red()),
                ColoredDataPoint::new("B", 20.0, Color::BLACK),
            ],
        )
}

fn draw(chart: &mut HorizontalBarChart, now_ms: u64) -> RenderFrame {
    let mut frame = RenderFrame::new(Viewport::new(400.0, 600.0));
    chart
        .draw(
            &mut frame,
            area(),
            PresentationMode::Inline,
            Duration::from_millis(now_ms),
        )
        .expect("draw");
    frame.validate().expect("valid frame");
    frame
}

#[test]
fn settled_bars_keep_minimum_visible_fraction() {
    let mut chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    draw(&mut chart, 0);
    let frame = draw(&mut chart, 2_000);

    let bars: Vec<_> = frame.rects().filter(|rect| rect.height == 24.0).collect();
    assert_eq!(bars.len(), 3);
    // Bar area is the 400 px card minus 16 px content and 8 px list padding per side.
    assert_abs_diff_eq!(bars[0].width, 352.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[1].width, 176.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[2].width, 352.0 * 0.05, epsilon = 1e-9);
    assert_eq!(bars[0].fill_color, red());
}

#[test]
fn bars_animate_together_from_zero() {
    let mut chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    let first = draw(&mut chart, 0);
    assert_eq!(first.rects().filter(|rect| rect.height == 24.0).count(), 0);

    let mid = draw(&mut chart, 600);
    let widths: Vec<f64> = mid
        .rects()
        .filter(|rect| rect.height == 24.0)
        .map(|rect| rect.width)
        .collect();
    assert_eq!(widths.len(), 3);
    assert!(widths[0] > 0.0 && widths[0] < 352.0);
    assert!(chart.is_animating(Duration::from_millis(600)));
    assert!(!chart.is_animating(Duration::from_millis(1_200)));
}

#[test]
fn row_text_shows_whole_values_or_percentages() {
    let mut chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    let texts: Vec<String> = draw(&mut chart, 0)
        .texts()
        .map(|text| text.text.clone())
        .collect();
    assert!(texts.contains(&"A (80)".to_owned()));
    assert!(texts.contains(&"C (0)".to_owned()));

    let config = HorizontalBarChartConfig::default().with_show_as_percentage(true);
    let mut chart = HorizontalBarChart::new(yearly(), config).expect("chart");
    let texts: Vec<String> = draw(&mut chart, 0)
        .texts()
        .map(|text| text.text.clone())
        .collect();
    assert!(texts.contains(&"A (100%)".to_owned()));
    assert!(texts.contains(&"B (50%)".to_owned()));
    assert!(texts.contains(&"C (0%)".to_owned()));
}

#[test]
fn legend_lists_labels_and_whole_values() {
    let mut chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    let frame = draw(&mut chart, 0);

    let swatches = frame.rects().filter(|rect| rect.height == 16.0).count();
    assert_eq!(swatches, 3);
    let big_values: Vec<&str> = frame
        .texts()
        .filter(|text| text.font_size_px == 24.0)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(big_values, ["80", "40", "0"]);
}

#[test]
fn gridlines_alternate_solid_and_dashed() {
    let mut chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    let frame = draw(&mut chart, 0);

    let gridlines: Vec<_> = frame.lines().filter(|line| line.x1 == line.x2).collect();
    assert_eq!(gridlines.len(), 12);
    assert_eq!(gridlines[0].stroke_style, LineStrokeStyle::Solid);
    assert_eq!(
        gridlines[1].stroke_style,
        LineStrokeStyle::Dashed {
            dash: 10.0,
            gap: 10.0
        }
    );
    assert_abs_diff_eq!(gridlines[11].x1 - gridlines[0].x1, 352.0, epsilon = 1e-9);
}

#[test]
fn tabs_only_show_with_several_datasets() {
    let chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    assert_eq!(chart.tab_rects(area()).len(), 2);

    let single = DatasetCollection::new()
        .with_dataset("only", vec![ColoredDataPoint::new("A", 1.0, red())]);
    let mut chart =
        HorizontalBarChart::new(single, HorizontalBarChartConfig::default()).expect("chart");
    assert!(chart.tab_rects(area()).is_empty());
    let frame = draw(&mut chart, 0);
    assert!(frame.texts().all(|text| text.text != "only"));
}

#[test]
fn selected_tab_is_underlined() {
    let mut chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    let frame = draw(&mut chart, 0);
    let underlines: Vec<_> = frame.lines().filter(|line| line.y1 == line.y2).collect();
    assert_eq!(underlines.len(), 1);
    assert_abs_diff_eq!(underlines[0].x2 - underlines[0].x1, 16.0, epsilon = 1e-9);

    let selected = frame
        .texts()
        .find(|text| text.text == "2023")
        .expect("selected tab");
    assert_eq!(selected.color, Color::BLACK);
    let other = frame
        .texts()
        .find(|text| text.text == "2024")
        .expect("other tab");
    assert_eq!(other.color, Color::GRAY);
}

#[test]
fn tapping_a_tab_switches_dataset_and_replays_bars() {
    let mut chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    draw(&mut chart, 0);
    assert_eq!(
        draw(&mut chart, 2_000)
            .rects()
            .filter(|rect| rect.height == 24.0)
            .count(),
        3
    );

    let second_tab = chart.tab_rects(area())[1];
    let center = second_tab.center();
    assert!(chart.handle_tap(area(), PresentationMode::Inline, center.x, center.y));
    assert_eq!(chart.selected_key(), Some("2024"));

    let frame = draw(&mut chart, 2_000);
    assert_eq!(frame.rects().filter(|rect| rect.height == 24.0).count(), 0);
    let frame = draw(&mut chart, 4_000);
    assert_eq!(frame.rects().filter(|rect| rect.height == 24.0).count(), 2);
}

#[test]
fn tapping_outside_tabs_changes_nothing() {
    let mut chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    assert!(!chart.handle_tap(area(), PresentationMode::Inline, 300.0, 500.0));
    assert_eq!(chart.selected_key(), Some("2023"));
}

#[test]
fn selecting_unknown_dataset_fails() {
    let mut chart =
        HorizontalBarChart::new(yearly(), HorizontalBarChartConfig::default()).expect("chart");
    let err = chart.select_dataset("1999").expect_err("unknown");
    assert!(matches!(err, ChartError::UnknownDataset(_)));
    assert!(!chart.select_dataset("2023").expect("current key"));
}

#[test]
fn no_datasets_shows_placeholder() {
    let mut chart = HorizontalBarChart::new(
        DatasetCollection::new(),
        HorizontalBarChartConfig::default(),
    )
    .expect("chart");
    let frame = draw(&mut chart, 0);
    assert_eq!(frame.primitives.len(), 1);
    assert_eq!(
        frame.texts().next().map(|text| text.text.as_str()),
        Some("No data to display")
    );
}

#[test]
fn single_gridline_config_is_rejected() {
    let config = HorizontalBarChartConfig::default().with_gridline_count(1);
    assert!(HorizontalBarChart::new(yearly(), config).is_err());
}

fn ten_rows() -> DatasetCollection {
    let points: Vec<ColoredDataPoint> = (0..10)
        .map(|i| ColoredDataPoint::new(format!("row{i}"), f64::from(i + 1), red()))
        .collect();
    DatasetCollection::new().with_dataset("2024", points)
}

fn row_texts(frame: &RenderFrame) -> Vec<String> {
    frame
        .texts()
        .filter(|text| text.text.contains('('))
        .map(|text| text.text.clone())
        .collect()
}

fn legend_labels(frame: &RenderFrame) -> Vec<String> {
    frame
        .texts()
        .filter(|text| text.text.starts_with("row") && !text.text.contains('('))
        .map(|text| text.text.clone())
        .collect()
}

#[test]
fn bar_list_scrolls_to_its_last_row() {
    let mut chart =
        HorizontalBarChart::new(ten_rows(), HorizontalBarChartConfig::default()).expect("chart");
    let first = draw(&mut chart, 0);
    // 300 px list cap holds five 58 px rows.
    assert_eq!(row_texts(&first).len(), 5);
    assert_eq!(row_texts(&first)[0], "row0 (1)");
    assert_abs_diff_eq!(chart.scroll().max_offset(), 280.0, epsilon = 1e-9);

    chart.scroll_to(10_000.0);
    let last = draw(&mut chart, 2_000);
    let rows = row_texts(&last);
    assert_eq!(rows.first().map(String::as_str), Some("row5 (6)"));
    assert_eq!(rows.last().map(String::as_str), Some("row9 (10)"));
    assert_eq!(last.rects().filter(|rect| rect.height == 24.0).count(), 5);
}

#[test]
fn legend_row_scrolls_horizontally() {
    let mut chart =
        HorizontalBarChart::new(ten_rows(), HorizontalBarChartConfig::default()).expect("chart");
    let first = draw(&mut chart, 0);
    assert_eq!(legend_labels(&first), ["row0", "row1", "row2", "row3"]);
    assert!(chart.legend_scroll().max_offset() > 0.0);

    chart.scroll_legend_to(10_000.0);
    let last = draw(&mut chart, 0);
    assert_eq!(legend_labels(&last), ["row6", "row7", "row8", "row9"]);
    for text in last.texts().filter(|text| text.text.starts_with("row")) {
        assert!(text.x >= 16.0 && text.x <= 384.0);
    }
}

#[test]
fn switching_dataset_scrolls_back_to_top() {
    let mut datasets = ten_rows();
    let copy = datasets.get("2024").cloned().expect("dataset");
    datasets.insert("2025", copy);
    let mut chart =
        HorizontalBarChart::new(datasets, HorizontalBarChartConfig::default()).expect("chart");
    draw(&mut chart, 0);
    chart.scroll_to(100.0);
    assert_eq!(chart.scroll().offset(), 100.0);

    assert!(chart.select_dataset("2025").expect("select"));
    assert_eq!(chart.scroll().offset(), 0.0);
}

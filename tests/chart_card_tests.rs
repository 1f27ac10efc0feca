use std::time::Duration;

use chart_cards::core::{ColoredDataPoint, DataPoint, DatasetCollection, Series, Viewport};
use chart_cards::interaction::PresentationMode;
use chart_cards::render::{Color, NullRenderer, TextHAlign};
use chart_cards::{
    BarChart, BarChartConfig, CardConfig, ChartCard, ChartError, HorizontalBarChart,
    HorizontalBarChartConfig,
};
use kurbo::Rect;

fn viewport() -> Viewport {
    Viewport::new(400.0, 600.0)
}

fn bar_card(title: &str) -> ChartCard<BarChart, NullRenderer> {
    let series = Series::new(vec![DataPoint::new("North", 10.0), DataPoint::new("South", 5.0)]);
    let chart = BarChart::new(series, BarChartConfig::default()).expect("chart");
    ChartCard::new(NullRenderer::default(), chart, CardConfig::new(title)).expect("card")
}

#[test]
fn inline_card_is_capped_at_max_height() {
    let card = bar_card("Sales");
    assert_eq!(card.mode(), PresentationMode::Inline);
    assert_eq!(card.card_rect(viewport()), Rect::new(0.0, 0.0, 400.0, 300.0));
    assert_eq!(card.content_rect(viewport()), Rect::new(0.0, 48.0, 400.0, 300.0));
    assert_eq!(
        card.toggle_button_rect(viewport()),
        Rect::new(352.0, 0.0, 400.0, 48.0)
    );
}

#[test]
fn expanded_card_fills_viewport_minus_margin() {
    let mut card = bar_card("Sales");
    card.expand();
    assert_eq!(card.card_rect(viewport()), Rect::new(32.0, 32.0, 368.0, 568.0));
    assert_eq!(card.content_rect(viewport()), Rect::new(48.0, 112.0, 352.0, 552.0));
    assert_eq!(
        card.toggle_button_rect(viewport()),
        Rect::new(304.0, 48.0, 352.0, 96.0)
    );
}

#[test]
fn toggle_button_expands_and_closes() {
    let mut card = bar_card("Sales");
    assert!(card.handle_tap(viewport(), 376.0, 24.0));
    assert_eq!(card.mode(), PresentationMode::Expanded);

    assert!(card.handle_tap(viewport(), 328.0, 72.0));
    assert_eq!(card.mode(), PresentationMode::Inline);

    card.toggle_expanded();
    assert!(card.mode().is_expanded());
    card.collapse();
    assert_eq!(card.mode(), PresentationMode::Inline);
}

#[test]
fn taps_outside_button_and_content_are_ignored() {
    let mut card = bar_card("Sales");
    assert!(!card.handle_tap(viewport(), 100.0, 24.0));
    assert!(!card.handle_tap(viewport(), 100.0, 450.0));
    assert_eq!(card.mode(), PresentationMode::Inline);
}

#[test]
fn content_taps_reach_dataset_tabs() {
    let datasets = DatasetCollection::new()
        .with_dataset("2023", vec![ColoredDataPoint::new("A", 1.0, Color::BLACK)])
        .with_dataset("2024", vec![ColoredDataPoint::new("A", 2.0, Color::BLACK)]);
    let chart =
        HorizontalBarChart::new(datasets, HorizontalBarChartConfig::default()).expect("chart");
    let mut card =
        ChartCard::new(NullRenderer::default(), chart, CardConfig::new("Yearly")).expect("card");

    let tabs = card.widget().tab_rects(card.content_rect(viewport()));
    assert_eq!(tabs.len(), 2);
    let target = tabs[1].center();

    assert!(card.handle_tap(viewport(), target.x, target.y));
    assert_eq!(card.widget().selected_key(), Some("2024"));
    assert!(!card.handle_tap(viewport(), target.x, target.y), "already selected");
}

#[test]
fn render_hands_validated_frame_to_renderer() {
    let mut card = bar_card("Sales");
    card.render(viewport(), Duration::ZERO).expect("render");

    let renderer = card.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_text_count, 5, "title plus label and value per row");
    assert_eq!(renderer.last_arc_count, 0);
}

#[test]
fn shell_draws_background_title_and_icon() {
    let mut card = bar_card("Sales");
    let inline = card.build_frame(viewport(), Duration::ZERO).expect("frame");
    let background = inline.rects().next().expect("background");
    assert_eq!(background.corner_radius, 16.0);
    assert_eq!(background.fill_color, Color::from_argb(0xFFEADDFF));
    assert_eq!(inline.lines().count(), 5, "expand icon");

    let title = inline.texts().next().expect("title");
    assert_eq!(title.text, "Sales");
    assert_eq!(title.x, 16.0);
    assert_eq!(title.h_align, TextHAlign::Left);

    card.expand();
    let expanded = card.build_frame(viewport(), Duration::ZERO).expect("frame");
    assert_eq!(expanded.lines().count(), 2, "close icon");
    let title = expanded.texts().next().expect("title");
    assert_eq!(title.x, 200.0);
    assert_eq!(title.font_size_px, 20.0);
    assert_eq!(title.h_align, TextHAlign::Center);
}

#[test]
fn long_title_is_ellipsized() {
    let mut card = bar_card("Quarterly revenue by region across every sales channel we operate");
    let frame = card.build_frame(viewport(), Duration::ZERO).expect("frame");
    let title = frame.texts().next().expect("title");
    assert!(title.text.ends_with('…'));
    assert!(title.text.len() < card.title().len());
}

#[test]
fn invalid_viewport_is_rejected() {
    let mut card = bar_card("Sales");
    let err = card
        .render(Viewport::new(0.0, 600.0), Duration::ZERO)
        .expect_err("zero width");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
    assert_eq!(card.renderer().frames_rendered, 0);
}

#[test]
fn invalid_card_config_is_rejected() {
    let series = Series::new(vec![DataPoint::new("A", 1.0)]);
    let chart = BarChart::new(series, BarChartConfig::default()).expect("chart");
    let config = CardConfig::new("Sales").with_max_height(-1.0);
    assert!(ChartCard::new(NullRenderer::default(), chart, config).is_err());
}

#[test]
fn card_reports_widget_animation() {
    let mut card = bar_card("Sales");
    card.render(viewport(), Duration::ZERO).expect("render");
    assert!(card.is_animating(Duration::from_millis(100)));
    assert!(!card.is_animating(Duration::from_secs(2)));
}

use std::ops::Range;
use std::time::Duration;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AxisPlan, DataPoint, HorizontalMargins, HorizontalPlan, LabeledValue, Series,
    build_fill_path, build_path, plan_axis, plan_horizontal,
};
use crate::error::ChartResult;
use crate::interaction::{PresentationMode, ScrollViewport};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PathPaint, PathPrimitive, Primitive,
    RenderFrame, TextHAlign, TextPrimitive,
};

use super::layout_helpers::{centered_text_top, push_no_data_placeholder};
use super::validation::{validate_color, validate_non_negative, validate_positive};
use super::{ChartWidget, JsonConfig};

const AXIS_LABEL_COLUMN_PX: f64 = 50.0;
const X_LABEL_GAP_PX: f64 = 8.0;
const DIVIDER_STROKE_PX: f64 = 1.0;

/// Layout and styling of the scrollable line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartConfig {
    /// Points are never closer than this; the chart scrolls instead.
    #[serde(default = "default_x_min_point_spacing")]
    pub x_min_point_spacing: f64,
    /// Target pixel distance between value gridlines.
    #[serde(default = "default_y_min_point_spacing")]
    pub y_min_point_spacing: f64,
    #[serde(default)]
    pub margins: HorizontalMargins,
    /// Space below the x axis for labels.
    #[serde(default = "default_padding_bottom")]
    pub padding_bottom: f64,
    #[serde(default = "default_padding_top")]
    pub padding_top: f64,
    #[serde(default = "default_padding_end")]
    pub padding_end: f64,
    #[serde(default = "default_axis_color")]
    pub axis_color: Color,
    #[serde(default = "default_axis_stroke_width")]
    pub axis_stroke_width: f64,
    #[serde(default = "default_interval_line_color")]
    pub interval_line_color: Color,
    #[serde(default = "default_interval_stroke_width")]
    pub interval_stroke_width: f64,
    #[serde(default = "default_interval_dash")]
    pub interval_dash: f64,
    #[serde(default = "default_interval_gap")]
    pub interval_gap: f64,
    #[serde(default = "default_true")]
    pub fill_graph: bool,
    #[serde(default = "default_fill_color")]
    pub fill_color: Color,
    #[serde(default = "default_line_color")]
    pub line_color: Color,
    #[serde(default = "default_line_stroke_width")]
    pub line_stroke_width: f64,
    #[serde(default = "default_point_color")]
    pub point_color: Color,
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
    #[serde(default = "default_true")]
    pub smooth_lines: bool,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            x_min_point_spacing: default_x_min_point_spacing(),
            y_min_point_spacing: default_y_min_point_spacing(),
            margins: HorizontalMargins::default(),
            padding_bottom: default_padding_bottom(),
            padding_top: default_padding_top(),
            padding_end: default_padding_end(),
            axis_color: default_axis_color(),
            axis_stroke_width: default_axis_stroke_width(),
            interval_line_color: default_interval_line_color(),
            interval_stroke_width: default_interval_stroke_width(),
            interval_dash: default_interval_dash(),
            interval_gap: default_interval_gap(),
            fill_graph: true,
            fill_color: default_fill_color(),
            line_color: default_line_color(),
            line_stroke_width: default_line_stroke_width(),
            point_color: default_point_color(),
            point_radius: default_point_radius(),
            smooth_lines: true,
            label_font_size: default_label_font_size(),
            text_color: default_text_color(),
        }
    }
}

impl LineChartConfig {
    #[must_use]
    pub fn with_smooth_lines(mut self, smooth_lines: bool) -> Self {
        self.smooth_lines = smooth_lines;
        self
    }

    #[must_use]
    pub fn with_fill_graph(mut self, fill_graph: bool) -> Self {
        self.fill_graph = fill_graph;
        self
    }

    #[must_use]
    pub fn with_point_spacing(mut self, x_min: f64, y_min: f64) -> Self {
        self.x_min_point_spacing = x_min;
        self.y_min_point_spacing = y_min;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: HorizontalMargins) -> Self {
        self.margins = margins;
        self
    }
}

impl JsonConfig for LineChartConfig {
    fn validate(&self) -> ChartResult<()> {
        validate_non_negative("x_min_point_spacing", self.x_min_point_spacing)?;
        validate_positive("y_min_point_spacing", self.y_min_point_spacing)?;
        validate_non_negative("margins.left_axis_offset", self.margins.left_axis_offset)?;
        validate_non_negative("margins.trailing_margin", self.margins.trailing_margin)?;
        validate_non_negative("padding_bottom", self.padding_bottom)?;
        validate_non_negative("padding_top", self.padding_top)?;
        validate_non_negative("padding_end", self.padding_end)?;
        validate_color("axis_color", self.axis_color)?;
        validate_positive("axis_stroke_width", self.axis_stroke_width)?;
        validate_color("interval_line_color", self.interval_line_color)?;
        validate_positive("interval_stroke_width", self.interval_stroke_width)?;
        validate_positive("interval_dash", self.interval_dash)?;
        validate_positive("interval_gap", self.interval_gap)?;
        validate_color("fill_color", self.fill_color)?;
        validate_color("line_color", self.line_color)?;
        validate_positive("line_stroke_width", self.line_stroke_width)?;
        validate_color("point_color", self.point_color)?;
        validate_positive("point_radius", self.point_radius)?;
        validate_positive("label_font_size", self.label_font_size)?;
        validate_color("text_color", self.text_color)
    }
}

fn default_x_min_point_spacing() -> f64 {
    100.0
}

fn default_y_min_point_spacing() -> f64 {
    50.0
}

fn default_padding_bottom() -> f64 {
    60.0
}

fn default_padding_top() -> f64 {
    20.0
}

fn default_padding_end() -> f64 {
    16.0
}

fn default_axis_color() -> Color {
    Color::BLACK
}

fn default_axis_stroke_width() -> f64 {
    2.0
}

fn default_interval_line_color() -> Color {
    Color::LIGHT_GRAY
}

fn default_interval_stroke_width() -> f64 {
    1.0
}

fn default_interval_dash() -> f64 {
    10.0
}

fn default_interval_gap() -> f64 {
    15.0
}

fn default_true() -> bool {
    true
}

fn default_fill_color() -> Color {
    Color::from_argb(0xFF7D5260)
}

fn default_line_color() -> Color {
    Color::from_argb(0xFF6750A4)
}

fn default_line_stroke_width() -> f64 {
    2.0
}

fn default_point_color() -> Color {
    Color::from_argb(0xFF625B71)
}

fn default_point_radius() -> f64 {
    5.0
}

fn default_label_font_size() -> f64 {
    12.0
}

fn default_text_color() -> Color {
    Color::from_argb(0xFF1D1B20)
}

/// Pixel layout of one line chart frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartLayout {
    pub axis: AxisPlan,
    pub horizontal: HorizontalPlan,
    /// Screen x where the scrollable plot starts, right of the value-axis column.
    pub plot_left: f64,
    /// Screen x where the visible plot ends.
    pub plot_right: f64,
    pub plot_top: f64,
    /// Screen y of the x axis.
    pub baseline_y: f64,
}

impl LineChartLayout {
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        (self.baseline_y - self.plot_top).max(0.0)
    }

    /// Screen position of point `index` at scroll `offset`.
    #[must_use]
    pub fn point_position(&self, index: usize, value: f64, offset: f64) -> Point {
        Point::new(
            self.plot_left + self.horizontal.point_offset(index) - offset,
            self.axis.value_to_y(value, self.baseline_y, self.plot_height()),
        )
    }
}

/// Scrollable line chart with a fixed value axis.
///
/// When the points need more room than the viewport offers, the plot scrolls
/// horizontally and starts scrolled to the most recent point.
#[derive(Debug, Clone)]
pub struct LineChart {
    config: LineChartConfig,
    series: Series<DataPoint>,
    scroll: ScrollViewport,
    /// Total width and scroll extent of the last applied layout.
    laid_out: Option<(f64, f64)>,
}

impl LineChart {
    pub fn new(series: Series<DataPoint>, config: LineChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            series,
            scroll: ScrollViewport::default(),
            laid_out: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LineChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn series(&self) -> &Series<DataPoint> {
        &self.series
    }

    pub fn set_series(&mut self, series: Series<DataPoint>) {
        debug!(
            series_id = series.id().get(),
            points = series.len(),
            "set line chart series"
        );
        self.series = series;
    }

    #[must_use]
    pub fn scroll(&self) -> &ScrollViewport {
        &self.scroll
    }

    /// Scrolls the plot to `offset`, clamped to the current extent.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll.scroll_to(offset);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll.scroll_by(delta);
    }

    /// Computes the axis and horizontal plans for `area`.
    #[must_use]
    pub fn layout(&self, area: Rect) -> LineChartLayout {
        let config = &self.config;
        let plot_width = (area.width() - config.padding_end).max(0.0);
        let horizontal = plan_horizontal(
            self.series.len(),
            plot_width,
            config.x_min_point_spacing,
            config.margins,
        );
        let axis = plan_axis(
            self.series.max_value(),
            area.height(),
            config.y_min_point_spacing,
        );
        let baseline_y = (area.y1 - config.padding_bottom).max(area.y0);
        LineChartLayout {
            axis,
            horizontal,
            plot_left: area.x0 + config.margins.left_axis_offset,
            plot_right: area.x0 + plot_width,
            plot_top: (area.y0 + config.padding_top).min(baseline_y),
            baseline_y,
        }
    }

    fn sync_scroll(&mut self, plan: &HorizontalPlan, now: Duration) {
        let extent = (plan.total_required_width, plan.max_scroll_offset);
        if self.laid_out != Some(extent) {
            self.laid_out = Some(extent);
            self.scroll.relayout(plan.max_scroll_offset, now);
        }
        if self.scroll.tick(now) {
            trace!(offset = self.scroll.offset(), "scrolled line chart to end");
        }
    }

    /// Indices whose points fall in the visible window, widened by one
    /// neighbor on each side so path segments reach the edges.
    fn visible_range(&self, layout: &LineChartLayout, offset: f64) -> Range<usize> {
        let count = self.series.len();
        let spacing = layout.horizontal.spacing;
        if count <= 1 || spacing <= 0.0 {
            return 0..count;
        }
        let window_start = offset;
        let window_end = offset + (layout.plot_right - layout.plot_left).max(0.0);
        let first = (window_start / spacing).floor().max(0.0) as usize;
        let last = (window_end / spacing).ceil().max(0.0) as usize;
        let start = first.saturating_sub(1).min(count);
        start..last.saturating_add(2).min(count).max(start)
    }

    fn push_value_axis(&self, frame: &mut RenderFrame, area: Rect, layout: &LineChartLayout) {
        let config = &self.config;
        let plot_height = layout.plot_height();
        let column_center = area.x0 + AXIS_LABEL_COLUMN_PX / 2.0;
        for &value in &layout.axis.gridline_values {
            let y = layout.axis.value_to_y(value, layout.baseline_y, plot_height);
            frame.push(Primitive::Line(
                LinePrimitive::new(
                    layout.plot_left,
                    y,
                    layout.plot_right.max(layout.plot_left),
                    y,
                    config.interval_stroke_width,
                    config.interval_line_color,
                )
                .with_stroke_style(LineStrokeStyle::Dashed {
                    dash: config.interval_dash,
                    gap: config.interval_gap,
                }),
            ));
            frame.push(Primitive::Text(TextPrimitive::new(
                format!("{}", value.trunc() as i64),
                column_center,
                centered_text_top(y, 0.0, config.label_font_size),
                config.label_font_size,
                config.text_color,
                TextHAlign::Center,
            )));
        }
        frame.push(Primitive::Line(LinePrimitive::new(
            layout.plot_left,
            layout.plot_top,
            layout.plot_left,
            layout.baseline_y,
            DIVIDER_STROKE_PX,
            Color::BLACK,
        )));
    }
}

impl ChartWidget for LineChart {
    fn draw(
        &mut self,
        frame: &mut RenderFrame,
        area: Rect,
        mode: PresentationMode,
        now: Duration,
    ) -> ChartResult<()> {
        if self.series.is_empty() {
            push_no_data_placeholder(frame, area);
            return Ok(());
        }

        let layout = self.layout(area);
        self.sync_scroll(&layout.horizontal, now);
        let offset = self.scroll.offset();
        let config = &self.config;

        self.push_value_axis(frame, area, &layout);

        let axis_end = (layout.plot_left + layout.horizontal.series_extent() - offset)
            .min(layout.plot_right);
        if axis_end > layout.plot_left {
            frame.push(Primitive::Line(LinePrimitive::new(
                layout.plot_left,
                layout.baseline_y,
                axis_end,
                layout.baseline_y,
                config.axis_stroke_width,
                config.axis_color,
            )));
        }

        let range = self.visible_range(&layout, offset);
        let points: Vec<Point> = self.series.points()[range.clone()]
            .iter()
            .enumerate()
            .map(|(local, point)| layout.point_position(range.start + local, point.value(), offset))
            .collect();

        if config.fill_graph {
            if let Some(fill) = build_fill_path(&points, layout.baseline_y, config.smooth_lines) {
                frame.push(Primitive::Path(PathPrimitive::new(
                    fill,
                    config.fill_color,
                    PathPaint::Fill,
                )));
            }
        }
        if let Some(stroke) = build_path(&points, config.smooth_lines) {
            frame.push(Primitive::Path(PathPrimitive::new(
                stroke,
                config.line_color,
                PathPaint::Stroke {
                    width: config.line_stroke_width,
                },
            )));
        }

        let min_x = layout.plot_left - config.point_radius;
        let max_x = layout.plot_right + config.point_radius;
        let label_top = layout.baseline_y + X_LABEL_GAP_PX;
        for (point, sample) in points.iter().zip(&self.series.points()[range]) {
            if point.x < min_x || point.x > max_x {
                continue;
            }
            frame.push(Primitive::Circle(CirclePrimitive::new(
                point.x,
                point.y,
                config.point_radius,
                config.point_color,
            )));
            if !sample.label.is_empty() {
                frame.push(Primitive::Text(TextPrimitive::new(
                    sample.label.clone(),
                    point.x,
                    label_top,
                    config.label_font_size,
                    config.text_color,
                    TextHAlign::Center,
                )));
            }
        }

        trace!(
            points = self.series.len(),
            drawn = points.len(),
            offset,
            needs_scroll = layout.horizontal.needs_scroll,
            ?mode,
            "drew line chart"
        );
        Ok(())
    }

    /// Keeps frames coming until the deferred scroll-to-end has run.
    fn is_animating(&self, _now: Duration) -> bool {
        self.scroll.is_scroll_pending()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{LineChart, LineChartConfig};
    use crate::core::{DataPoint, Series};

    #[test]
    fn vanishing_spacing_keeps_the_whole_series_visible() {
        let series: Series<DataPoint> = (0..3)
            .map(|i| DataPoint::new(format!("P{i}"), f64::from(i)))
            .collect();
        let chart = LineChart::new(series, LineChartConfig::default()).expect("chart");
        let mut layout = chart.layout(Rect::new(0.0, 0.0, 400.0, 300.0));
        layout.horizontal.spacing = f64::MIN_POSITIVE / 4.0;

        assert_eq!(chart.visible_range(&layout, 0.0), 0..3);
    }
}

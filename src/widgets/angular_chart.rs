use std::time::Duration;

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    ANGULAR_ANIMATION_DURATION, ArcLayout, ColoredDataPoint, ProgressAnimation, Series, SliceArc,
    Tween, format_percentage, legend_entries, partition,
};
use crate::error::ChartResult;
use crate::interaction::PresentationMode;
use crate::render::{
    ArcPrimitive, ArcStyle, CirclePrimitive, Color, Primitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::layout_helpers::{
    centered_text_top, estimate_label_text_width_px, push_no_data_placeholder,
};
use super::validation::{
    validate_arc_layout, validate_color, validate_non_negative, validate_positive, validate_tween,
};
use super::{ChartWidget, JsonConfig};

const LEGEND_MARKER_BOX_PX: f64 = 24.0;
const LEGEND_MARKER_RADIUS_PX: f64 = 8.0;
const LEGEND_MARKER_GAP_PX: f64 = 8.0;

/// Filled pie wedges or a gapped donut ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngularStyle {
    Pie,
    #[default]
    Donut,
}

/// Geometry, legend and timing of a pie or donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularChartConfig {
    #[serde(default)]
    pub style: AngularStyle,
    #[serde(default)]
    pub layout: ArcLayout,
    /// Side of the square the chart is drawn in.
    #[serde(default = "default_chart_size")]
    pub chart_size: f64,
    /// Chart size multiplier in the expanded overlay.
    #[serde(default = "default_expanded_scale")]
    pub expanded_scale: f64,
    #[serde(default = "default_ring_thickness")]
    pub ring_thickness: f64,
    #[serde(default = "default_chart_padding")]
    pub chart_padding: f64,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    #[serde(default = "default_legend_gap")]
    pub legend_gap: f64,
    #[serde(default = "default_legend_padding_horizontal")]
    pub legend_padding_horizontal: f64,
    #[serde(default = "default_legend_padding_vertical")]
    pub legend_padding_vertical: f64,
    #[serde(default = "default_legend_row_spacing")]
    pub legend_row_spacing: f64,
    #[serde(default = "default_legend_label_font_size")]
    pub legend_label_font_size: f64,
    #[serde(default = "default_legend_value_font_size")]
    pub legend_value_font_size: f64,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default = "default_animation")]
    pub animation: Tween,
}

impl AngularChartConfig {
    /// Filled wedges growing in place, no gaps.
    #[must_use]
    pub fn pie() -> Self {
        Self {
            style: AngularStyle::Pie,
            layout: ArcLayout::pie(),
            ..Self::donut()
        }
    }

    /// 30 px ring with 2° gaps and a 0.5° floor, filling from 0°.
    #[must_use]
    pub fn donut() -> Self {
        Self {
            style: AngularStyle::Donut,
            layout: ArcLayout::donut(),
            chart_size: default_chart_size(),
            expanded_scale: default_expanded_scale(),
            ring_thickness: default_ring_thickness(),
            chart_padding: default_chart_padding(),
            show_legend: true,
            legend_gap: default_legend_gap(),
            legend_padding_horizontal: default_legend_padding_horizontal(),
            legend_padding_vertical: default_legend_padding_vertical(),
            legend_row_spacing: default_legend_row_spacing(),
            legend_label_font_size: default_legend_label_font_size(),
            legend_value_font_size: default_legend_value_font_size(),
            text_color: default_text_color(),
            animation: default_animation(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ArcLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_chart_size(mut self, chart_size: f64) -> Self {
        self.chart_size = chart_size;
        self
    }

    #[must_use]
    pub fn with_ring_thickness(mut self, ring_thickness: f64) -> Self {
        self.ring_thickness = ring_thickness;
        self
    }

    #[must_use]
    pub fn with_show_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: Tween) -> Self {
        self.animation = animation;
        self
    }

    fn arc_style(&self) -> ArcStyle {
        match self.style {
            AngularStyle::Pie => ArcStyle::Wedge,
            AngularStyle::Donut => ArcStyle::Ring {
                thickness: self.ring_thickness,
            },
        }
    }
}

impl Default for AngularChartConfig {
    fn default() -> Self {
        Self::donut()
    }
}

impl JsonConfig for AngularChartConfig {
    fn validate(&self) -> ChartResult<()> {
        validate_arc_layout(self.layout)?;
        validate_positive("chart_size", self.chart_size)?;
        validate_positive("expanded_scale", self.expanded_scale)?;
        validate_positive("ring_thickness", self.ring_thickness)?;
        validate_non_negative("chart_padding", self.chart_padding)?;
        validate_non_negative("legend_gap", self.legend_gap)?;
        validate_non_negative("legend_padding_horizontal", self.legend_padding_horizontal)?;
        validate_non_negative("legend_padding_vertical", self.legend_padding_vertical)?;
        validate_non_negative("legend_row_spacing", self.legend_row_spacing)?;
        validate_positive("legend_label_font_size", self.legend_label_font_size)?;
        validate_positive("legend_value_font_size", self.legend_value_font_size)?;
        validate_color("text_color", self.text_color)?;
        validate_tween("animation", self.animation)
    }
}

fn default_chart_size() -> f64 {
    200.0
}

fn default_expanded_scale() -> f64 {
    1.5
}

fn default_ring_thickness() -> f64 {
    30.0
}

fn default_chart_padding() -> f64 {
    8.0
}

fn default_true() -> bool {
    true
}

fn default_legend_gap() -> f64 {
    16.0
}

fn default_legend_padding_horizontal() -> f64 {
    16.0
}

fn default_legend_padding_vertical() -> f64 {
    8.0
}

fn default_legend_row_spacing() -> f64 {
    8.0
}

fn default_legend_label_font_size() -> f64 {
    14.0
}

fn default_legend_value_font_size() -> f64 {
    12.0
}

fn default_text_color() -> Color {
    Color::from_argb(0xFF1D1B20)
}

fn default_animation() -> Tween {
    Tween::new(ANGULAR_ANIMATION_DURATION)
}

/// Pie or donut chart with a percentage legend.
///
/// The fill animation replays whenever a series with a new identity is set.
#[derive(Debug, Clone)]
pub struct AngularChart {
    config: AngularChartConfig,
    series: Series<ColoredDataPoint>,
    animation: ProgressAnimation,
}

impl AngularChart {
    pub fn new(series: Series<ColoredDataPoint>, config: AngularChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let animation = ProgressAnimation::new(config.animation);
        Ok(Self {
            config,
            series,
            animation,
        })
    }

    pub fn pie(series: Series<ColoredDataPoint>) -> ChartResult<Self> {
        Self::new(series, AngularChartConfig::pie())
    }

    pub fn donut(series: Series<ColoredDataPoint>) -> ChartResult<Self> {
        Self::new(series, AngularChartConfig::donut())
    }

    #[must_use]
    pub fn config(&self) -> &AngularChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AngularChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.animation.set_tween(config.animation);
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn series(&self) -> &Series<ColoredDataPoint> {
        &self.series
    }

    pub fn set_series(&mut self, series: Series<ColoredDataPoint>) {
        debug!(
            series_id = series.id().get(),
            slices = series.len(),
            style = ?self.config.style,
            "set angular chart series"
        );
        self.series = series;
    }

    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        self.animation.progress(now)
    }

    /// Slices for the current series at `now`, without advancing identity tracking.
    #[must_use]
    pub fn slices(&self, now: Duration) -> Vec<SliceArc> {
        partition(self.series.points(), self.progress(now), self.config.layout)
    }

    fn push_legend(&self, frame: &mut RenderFrame, bounds: Rect) {
        let config = &self.config;
        let row_height = LEGEND_MARKER_BOX_PX;
        let left = bounds.x0 + config.legend_padding_horizontal;
        let mut top = bounds.y0 + config.legend_padding_vertical;
        for entry in legend_entries(self.series.points()) {
            if top + row_height > bounds.y1 {
                break;
            }
            frame.push(Primitive::Circle(CirclePrimitive::new(
                left + LEGEND_MARKER_BOX_PX / 2.0,
                top + row_height / 2.0,
                LEGEND_MARKER_RADIUS_PX,
                entry.color,
            )));
            let label = format!("{}: ", entry.label);
            let label_x = left + LEGEND_MARKER_BOX_PX + LEGEND_MARKER_GAP_PX;
            frame.push(Primitive::Text(
                TextPrimitive::new(
                    label.clone(),
                    label_x,
                    centered_text_top(top, row_height, config.legend_label_font_size),
                    config.legend_label_font_size,
                    config.text_color,
                    TextHAlign::Left,
                )
                .bold(),
            ));
            frame.push(Primitive::Text(TextPrimitive::new(
                format_percentage(entry.percentage),
                label_x + estimate_label_text_width_px(&label, config.legend_label_font_size),
                centered_text_top(top, row_height, config.legend_value_font_size),
                config.legend_value_font_size,
                config.text_color,
                TextHAlign::Left,
            )));
            top += row_height + config.legend_row_spacing;
        }
    }
}

impl ChartWidget for AngularChart {
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
        self.animation.sync_identity(self.series.id(), now);

        let config = &self.config;
        let scale = if mode.is_expanded() {
            config.expanded_scale
        } else {
            1.0
        };
        let side = (config.chart_size * scale)
            .min(area.width())
            .min(area.height())
            .max(0.0);
        let center_x = area.center().x;
        let center_y = area.y0 + side / 2.0;
        let style = config.arc_style();
        let outer_radius = (side / 2.0 - config.chart_padding).max(0.0);

        let slices = self.slices(now);
        if outer_radius > 0.0 {
            for slice in &slices {
                frame.push(Primitive::Arc(ArcPrimitive {
                    center_x,
                    center_y,
                    radius: outer_radius,
                    start_angle: slice.start_angle,
                    sweep_angle: slice.sweep_angle,
                    color: slice.color,
                    style,
                }));
            }
        }

        if config.show_legend {
            let legend_top = area.y0 + side + config.legend_gap;
            if legend_top < area.y1 {
                self.push_legend(frame, Rect::new(area.x0, legend_top, area.x1, area.y1));
            }
        }

        trace!(
            slices = slices.len(),
            progress = self.progress(now),
            style = ?config.style,
            ?mode,
            "drew angular chart"
        );
        Ok(())
    }

    fn is_animating(&self, now: Duration) -> bool {
        self.animation.is_animating(now)
    }
}

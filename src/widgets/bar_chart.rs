use std::time::Duration;

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::animation::millis;
use crate::core::{
    BAR_ANIMATION_DURATION, BAR_ANIMATION_STAGGER, DataPoint, LabeledValue, Series,
    StaggeredProgress, Tween, format_percentage, normalize,
};
use crate::error::ChartResult;
use crate::interaction::{PresentationMode, ScrollViewport};
use crate::render::{
    Color, Primitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::layout_helpers::{centered_text_top, ellipsize, push_no_data_placeholder};
use super::validation::{validate_color, validate_non_negative, validate_positive, validate_tween};
use super::{ChartWidget, JsonConfig};

const LABEL_WEIGHT: f64 = 2.0;
const BAR_WEIGHT: f64 = 5.0;
const VALUE_WEIGHT: f64 = 1.0;
const COLUMN_GAP_PX: f64 = 8.0;
const ROW_FIT_EPSILON: f64 = 1e-6;

/// Layout and timing of the vertical list of horizontal bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    #[serde(default = "default_bar_color")]
    pub bar_color: Color,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default = "default_bar_height")]
    pub bar_height: f64,
    #[serde(default = "default_space_between_bars")]
    pub space_between_bars: f64,
    #[serde(default = "default_horizontal_padding")]
    pub horizontal_padding: f64,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,
    #[serde(default = "default_font_size")]
    pub label_font_size: f64,
    #[serde(default = "default_font_size")]
    pub value_font_size: f64,
    /// Bar height multiplier in the expanded overlay.
    #[serde(default = "default_expanded_bar_scale")]
    pub expanded_bar_scale: f64,
    #[serde(default = "default_animation")]
    pub animation: Tween,
    /// Extra delay per row: row `i` starts `i * stagger` after the first.
    #[serde(with = "millis", default = "default_stagger")]
    pub stagger: Duration,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            bar_color: default_bar_color(),
            text_color: default_text_color(),
            bar_height: default_bar_height(),
            space_between_bars: default_space_between_bars(),
            horizontal_padding: default_horizontal_padding(),
            corner_radius: default_corner_radius(),
            label_font_size: default_font_size(),
            value_font_size: default_font_size(),
            expanded_bar_scale: default_expanded_bar_scale(),
            animation: default_animation(),
            stagger: default_stagger(),
        }
    }
}

impl BarChartConfig {
    #[must_use]
    pub fn with_bar_color(mut self, color: Color) -> Self {
        self.bar_color = color;
        self
    }

    #[must_use]
    pub fn with_bar_height(mut self, bar_height: f64) -> Self {
        self.bar_height = bar_height;
        self
    }

    #[must_use]
    pub fn with_space_between_bars(mut self, space: f64) -> Self {
        self.space_between_bars = space;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: Tween, stagger: Duration) -> Self {
        self.animation = animation;
        self.stagger = stagger;
        self
    }
}

impl JsonConfig for BarChartConfig {
    fn validate(&self) -> ChartResult<()> {
        validate_color("bar_color", self.bar_color)?;
        validate_color("text_color", self.text_color)?;
        validate_positive("bar_height", self.bar_height)?;
        validate_non_negative("space_between_bars", self.space_between_bars)?;
        validate_non_negative("horizontal_padding", self.horizontal_padding)?;
        validate_non_negative("corner_radius", self.corner_radius)?;
        validate_positive("label_font_size", self.label_font_size)?;
        validate_positive("value_font_size", self.value_font_size)?;
        validate_positive("expanded_bar_scale", self.expanded_bar_scale)?;
        validate_tween("animation", self.animation)
    }
}

fn default_bar_color() -> Color {
    Color::from_argb(0xFF6750A4)
}

fn default_text_color() -> Color {
    Color::from_argb(0xFF1D1B20)
}

fn default_bar_height() -> f64 {
    20.0
}

fn default_space_between_bars() -> f64 {
    6.0
}

fn default_horizontal_padding() -> f64 {
    16.0
}

fn default_corner_radius() -> f64 {
    12.0
}

fn default_font_size() -> f64 {
    12.0
}

fn default_expanded_bar_scale() -> f64 {
    2.0
}

fn default_animation() -> Tween {
    Tween::new(BAR_ANIMATION_DURATION)
}

fn default_stagger() -> Duration {
    BAR_ANIMATION_STAGGER
}

/// Rows of `label | bar | value`, bars scaled against the largest value.
///
/// Bars grow from zero with a per-row stagger whenever a new series is shown.
/// Rows that do not fit the area scroll vertically.
#[derive(Debug, Clone)]
pub struct BarChart {
    config: BarChartConfig,
    series: Series<DataPoint>,
    animation: StaggeredProgress,
    scroll: ScrollViewport,
}

impl BarChart {
    pub fn new(series: Series<DataPoint>, config: BarChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let animation = StaggeredProgress::new(config.animation, config.stagger);
        Ok(Self {
            config,
            series,
            animation,
            scroll: ScrollViewport::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BarChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.animation.set_timing(config.animation, config.stagger);
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn series(&self) -> &Series<DataPoint> {
        &self.series
    }

    /// Replaces the data. A series with a new identity replays the animation.
    pub fn set_series(&mut self, series: Series<DataPoint>) {
        debug!(
            series_id = series.id().get(),
            points = series.len(),
            "set bar chart series"
        );
        self.series = series;
        self.scroll.scroll_to(0.0);
    }

    /// Vertical scroll state; the extent is the one of the last drawn frame.
    #[must_use]
    pub fn scroll(&self) -> &ScrollViewport {
        &self.scroll
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll.scroll_to(offset);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll.scroll_by(delta);
    }

    /// Animated progress of row `index` at `now`.
    #[must_use]
    pub fn row_progress(&self, index: usize, now: Duration) -> f64 {
        self.animation.progress(index, now)
    }

    fn bar_height(&self, mode: PresentationMode) -> f64 {
        match mode {
            PresentationMode::Inline => self.config.bar_height,
            PresentationMode::Expanded => self.config.bar_height * self.config.expanded_bar_scale,
        }
    }
}

impl ChartWidget for BarChart {
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

        let bar_height = self.bar_height(mode);
        let spacing = self.config.space_between_bars;
        let row_pitch = bar_height + spacing;
        let first_row_top = spacing + spacing / 2.0;
        let content_height = first_row_top + row_pitch * self.series.len() as f64;
        self.scroll.set_extent(content_height - area.height());
        let offset = self.scroll.offset();

        let config = &self.config;
        let left = area.x0 + config.horizontal_padding;
        let inner_width = (area.width() - 2.0 * config.horizontal_padding).max(0.0);
        let unit = inner_width / (LABEL_WEIGHT + BAR_WEIGHT + VALUE_WEIGHT);
        let label_width = (unit * LABEL_WEIGHT - COLUMN_GAP_PX).max(0.0);
        let bar_left = left + unit * LABEL_WEIGHT;
        let bar_column_width = unit * BAR_WEIGHT;
        let value_right = left + inner_width;
        let max_value = self.series.max_value();

        let mut drawn = 0usize;
        for (index, point) in self.series.iter().enumerate() {
            let top = area.y0 + first_row_top + row_pitch * index as f64 - offset;
            if top < area.y0 - ROW_FIT_EPSILON {
                continue;
            }
            if top + bar_height > area.y1 + ROW_FIT_EPSILON {
                break;
            }

            let label = ellipsize(&point.label, config.label_font_size, label_width);
            if !label.is_empty() {
                frame.push(Primitive::Text(
                    TextPrimitive::new(
                        label,
                        left,
                        centered_text_top(top, bar_height, config.label_font_size),
                        config.label_font_size,
                        config.text_color,
                        TextHAlign::Left,
                    )
                    .bold(),
                ));
            }

            let fraction = normalize(point.magnitude(), 0.0, max_value);
            let width = bar_column_width * fraction * self.animation.progress(index, now);
            if width > 0.0 {
                frame.push(Primitive::Rect(
                    RectPrimitive::new(bar_left, top, width, bar_height, config.bar_color)
                        .with_corner_radius(config.corner_radius),
                ));
            }

            frame.push(Primitive::Text(TextPrimitive::new(
                format_percentage(point.value()),
                value_right,
                centered_text_top(top, bar_height, config.value_font_size),
                config.value_font_size,
                config.text_color,
                TextHAlign::Right,
            )));
            drawn += 1;
        }

        trace!(
            rows = drawn,
            total_rows = self.series.len(),
            offset,
            ?mode,
            "drew bar chart"
        );
        Ok(())
    }

    fn is_animating(&self, now: Duration) -> bool {
        self.animation.is_animating(self.series.len(), now)
    }
}

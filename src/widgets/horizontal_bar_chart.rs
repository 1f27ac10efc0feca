use std::time::Duration;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::animation::millis;
use crate::core::{
    ColoredDataPoint, DatasetCollection, HORIZONTAL_BAR_ANIMATION_DURATION, LabeledValue,
    StaggeredProgress, Tween, bar_fraction, format_whole,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{PresentationMode, ScrollViewport};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, Primitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::layout_helpers::{
    centered_text_top, ellipsize, estimate_label_text_width_px, push_no_data_placeholder,
};
use super::validation::{validate_color, validate_non_negative, validate_positive, validate_tween};
use super::{ChartWidget, JsonConfig};

const TAB_PADDING_PX: f64 = 8.0;
const TAB_SPACING_PX: f64 = 8.0;
const TAB_UNDERLINE_WIDTH_PX: f64 = 16.0;
const TAB_UNDERLINE_THICKNESS_PX: f64 = 2.0;
const SECTION_GAP_PX: f64 = 8.0;
const BARS_GAP_PX: f64 = 16.0;
const LEGEND_SWATCH_PX: f64 = 16.0;
const LEGEND_ITEM_PADDING_PX: f64 = 16.0;
const LEGEND_ROW_GAP_PX: f64 = 8.0;
const BARS_HORIZONTAL_PADDING_PX: f64 = 8.0;
const ROW_VERTICAL_PADDING_PX: f64 = 8.0;
const LABEL_TO_BAR_GAP_PX: f64 = 4.0;
/// Corner radius as a share of the shape height.
const ROUNDED_SHARE: f64 = 0.3;
const GRIDLINE_STROKE_PX: f64 = 1.0;
const FIT_EPSILON: f64 = 1e-6;

/// Layout, formatting and timing of the multi-dataset horizontal bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalBarChartConfig {
    /// Show `value / max` as a whole percent instead of the raw value.
    #[serde(default)]
    pub show_as_percentage: bool,
    #[serde(default = "default_gridline_count")]
    pub gridline_count: usize,
    #[serde(default = "default_bar_height")]
    pub bar_height: f64,
    /// Smallest drawn width fraction, so zero-valued bars stay visible.
    #[serde(default = "default_min_fraction")]
    pub min_fraction: f64,
    #[serde(default = "default_content_padding")]
    pub content_padding: f64,
    /// Height cap for the bar list.
    #[serde(default = "default_max_bars_height")]
    pub max_bars_height: f64,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
    #[serde(default = "default_label_font_size")]
    pub tab_font_size: f64,
    #[serde(default = "default_legend_value_font_size")]
    pub legend_value_font_size: f64,
    #[serde(default = "default_gridline_color")]
    pub gridline_color: Color,
    #[serde(default = "default_muted_text_color")]
    pub muted_text_color: Color,
    #[serde(default = "default_strong_text_color")]
    pub strong_text_color: Color,
    #[serde(default = "default_animation")]
    pub animation: Tween,
    /// Per-row delay; 0 animates every bar together.
    #[serde(with = "millis", default)]
    pub stagger: Duration,
}

impl Default for HorizontalBarChartConfig {
    fn default() -> Self {
        Self {
            show_as_percentage: false,
            gridline_count: default_gridline_count(),
            bar_height: default_bar_height(),
            min_fraction: default_min_fraction(),
            content_padding: default_content_padding(),
            max_bars_height: default_max_bars_height(),
            label_font_size: default_label_font_size(),
            tab_font_size: default_label_font_size(),
            legend_value_font_size: default_legend_value_font_size(),
            gridline_color: default_gridline_color(),
            muted_text_color: default_muted_text_color(),
            strong_text_color: default_strong_text_color(),
            animation: default_animation(),
            stagger: Duration::ZERO,
        }
    }
}

impl HorizontalBarChartConfig {
    #[must_use]
    pub fn with_show_as_percentage(mut self, show_as_percentage: bool) -> Self {
        self.show_as_percentage = show_as_percentage;
        self
    }

    #[must_use]
    pub fn with_gridline_count(mut self, gridline_count: usize) -> Self {
        self.gridline_count = gridline_count;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: Tween, stagger: Duration) -> Self {
        self.animation = animation;
        self.stagger = stagger;
        self
    }
}

impl JsonConfig for HorizontalBarChartConfig {
    fn validate(&self) -> ChartResult<()> {
        if self.gridline_count == 1 {
            return Err(ChartError::InvalidConfig(
                "gridline_count must be 0 or >= 2".to_owned(),
            ));
        }
        validate_positive("bar_height", self.bar_height)?;
        validate_non_negative("min_fraction", self.min_fraction)?;
        if self.min_fraction > 1.0 {
            return Err(ChartError::InvalidConfig(
                "min_fraction must be <= 1".to_owned(),
            ));
        }
        validate_non_negative("content_padding", self.content_padding)?;
        validate_positive("max_bars_height", self.max_bars_height)?;
        validate_positive("label_font_size", self.label_font_size)?;
        validate_positive("tab_font_size", self.tab_font_size)?;
        validate_positive("legend_value_font_size", self.legend_value_font_size)?;
        validate_color("gridline_color", self.gridline_color)?;
        validate_color("muted_text_color", self.muted_text_color)?;
        validate_color("strong_text_color", self.strong_text_color)?;
        validate_tween("animation", self.animation)
    }
}

fn default_gridline_count() -> usize {
    12
}

fn default_bar_height() -> f64 {
    24.0
}

fn default_min_fraction() -> f64 {
    0.05
}

fn default_content_padding() -> f64 {
    16.0
}

fn default_max_bars_height() -> f64 {
    300.0
}

fn default_label_font_size() -> f64 {
    14.0
}

fn default_legend_value_font_size() -> f64 {
    24.0
}

fn default_gridline_color() -> Color {
    Color::LIGHT_GRAY.with_alpha(0.5)
}

fn default_muted_text_color() -> Color {
    Color::GRAY
}

fn default_strong_text_color() -> Color {
    Color::BLACK
}

fn default_animation() -> Tween {
    Tween::new(HORIZONTAL_BAR_ANIMATION_DURATION)
}

type TabRects = SmallVec<[Rect; 8]>;

/// Horizontal bars for one of several keyed datasets.
///
/// A tab row (shown only with more than one dataset) switches the selected
/// dataset; switching replays the bar animation from zero. The bar list
/// scrolls vertically past `max_bars_height` and the legend row scrolls
/// horizontally when its items overflow.
#[derive(Debug, Clone)]
pub struct HorizontalBarChart {
    config: HorizontalBarChartConfig,
    datasets: DatasetCollection,
    animation: StaggeredProgress,
    scroll: ScrollViewport,
    legend_scroll: ScrollViewport,
}

impl HorizontalBarChart {
    pub fn new(datasets: DatasetCollection, config: HorizontalBarChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let animation = StaggeredProgress::new(config.animation, config.stagger);
        Ok(Self {
            config,
            datasets,
            animation,
            scroll: ScrollViewport::default(),
            legend_scroll: ScrollViewport::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &HorizontalBarChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: HorizontalBarChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.animation.set_timing(config.animation, config.stagger);
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn datasets(&self) -> &DatasetCollection {
        &self.datasets
    }

    pub fn set_datasets(&mut self, datasets: DatasetCollection) {
        debug!(datasets = datasets.len(), "set horizontal bar datasets");
        self.datasets = datasets;
        self.animation.reset();
        self.reset_scroll();
    }

    #[must_use]
    pub fn selected_key(&self) -> Option<&str> {
        self.datasets.selected_key()
    }

    /// Switches to dataset `key`. Returns whether the selection changed.
    pub fn select_dataset(&mut self, key: &str) -> ChartResult<bool> {
        let changed = self.datasets.select(key)?;
        if changed {
            self.animation.reset();
            self.reset_scroll();
        }
        Ok(changed)
    }

    /// Vertical scroll state of the bar list, sized by the last drawn frame.
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

    /// Horizontal scroll state of the legend row.
    #[must_use]
    pub fn legend_scroll(&self) -> &ScrollViewport {
        &self.legend_scroll
    }

    pub fn scroll_legend_to(&mut self, offset: f64) {
        self.legend_scroll.scroll_to(offset);
    }

    pub fn scroll_legend_by(&mut self, delta: f64) {
        self.legend_scroll.scroll_by(delta);
    }

    fn reset_scroll(&mut self) {
        self.scroll.scroll_to(0.0);
        self.legend_scroll.scroll_to(0.0);
    }

    /// Hit areas of the dataset tabs inside `area`, in dataset order.
    ///
    /// Empty when there is at most one dataset.
    #[must_use]
    pub fn tab_rects(&self, area: Rect) -> TabRects {
        let mut rects = TabRects::new();
        if self.datasets.len() <= 1 {
            return rects;
        }
        let content = content_rect(area, self.config.content_padding);
        let height = self.tab_row_height();
        let mut x = content.x0;
        for key in self.datasets.keys() {
            let width = estimate_label_text_width_px(key, self.config.tab_font_size)
                + 2.0 * TAB_PADDING_PX;
            rects.push(Rect::new(x, content.y0, x + width, content.y0 + height));
            x += width + TAB_SPACING_PX;
        }
        rects
    }

    fn tab_row_height(&self) -> f64 {
        2.0 * TAB_PADDING_PX + self.config.tab_font_size + TAB_UNDERLINE_THICKNESS_PX
    }

    fn legend_height(&self) -> f64 {
        LEGEND_SWATCH_PX + LEGEND_ROW_GAP_PX + self.config.legend_value_font_size
    }

    fn row_pitch(&self) -> f64 {
        2.0 * ROW_VERTICAL_PADDING_PX
            + self.config.label_font_size
            + LABEL_TO_BAR_GAP_PX
            + self.config.bar_height
    }

    fn push_tabs(&self, frame: &mut RenderFrame, area: Rect) {
        let config = &self.config;
        let selected = self.datasets.selected_key();
        for (rect, key) in self.tab_rects(area).into_iter().zip(self.datasets.keys()) {
            if rect.x0 >= area.x1 {
                break;
            }
            let is_selected = selected == Some(key);
            let color = if is_selected {
                config.strong_text_color
            } else {
                config.muted_text_color
            };
            let text_top = rect.y0 + TAB_PADDING_PX;
            frame.push(Primitive::Text(TextPrimitive::new(
                key,
                rect.center().x,
                text_top,
                config.tab_font_size,
                color,
                TextHAlign::Center,
            )));
            if is_selected {
                let y = text_top + config.tab_font_size + TAB_UNDERLINE_THICKNESS_PX / 2.0;
                let half = TAB_UNDERLINE_WIDTH_PX / 2.0;
                frame.push(Primitive::Line(LinePrimitive::new(
                    rect.center().x - half,
                    y,
                    rect.center().x + half,
                    y,
                    TAB_UNDERLINE_THICKNESS_PX,
                    config.strong_text_color,
                )));
            }
        }
    }

    fn legend_item_width(&self, point: &ColoredDataPoint) -> f64 {
        let config = &self.config;
        let label_width = estimate_label_text_width_px(&point.label, config.label_font_size);
        let value_width = estimate_label_text_width_px(
            &format_whole(point.value()),
            config.legend_value_font_size,
        );
        (LEGEND_SWATCH_PX + LEGEND_ROW_GAP_PX + label_width).max(value_width)
    }

    fn legend_content_width(&self, points: &[ColoredDataPoint]) -> f64 {
        points
            .iter()
            .map(|point| self.legend_item_width(point) + 2.0 * LEGEND_ITEM_PADDING_PX)
            .sum()
    }

    /// Draws the legend items that fit `bounds` entirely at scroll `offset`.
    fn push_legend(
        &self,
        frame: &mut RenderFrame,
        points: &[ColoredDataPoint],
        bounds: Rect,
        offset: f64,
    ) {
        let config = &self.config;
        let mut x = bounds.x0 - offset;
        for point in points {
            let left = x + LEGEND_ITEM_PADDING_PX;
            let item_width = self.legend_item_width(point);
            x = left + item_width + LEGEND_ITEM_PADDING_PX;
            if left < bounds.x0 - FIT_EPSILON {
                continue;
            }
            if left + item_width > bounds.x1 + FIT_EPSILON {
                break;
            }

            frame.push(Primitive::Rect(
                RectPrimitive::new(left, bounds.y0, LEGEND_SWATCH_PX, LEGEND_SWATCH_PX, point.color)
                    .with_corner_radius(LEGEND_SWATCH_PX * ROUNDED_SHARE),
            ));
            frame.push(Primitive::Text(TextPrimitive::new(
                point.label.clone(),
                left + LEGEND_SWATCH_PX + LEGEND_ROW_GAP_PX,
                centered_text_top(bounds.y0, LEGEND_SWATCH_PX, config.label_font_size),
                config.label_font_size,
                config.muted_text_color,
                TextHAlign::Left,
            )));
            frame.push(Primitive::Text(TextPrimitive::new(
                format_whole(point.value()),
                left,
                bounds.y0 + LEGEND_SWATCH_PX + LEGEND_ROW_GAP_PX,
                config.legend_value_font_size,
                config.strong_text_color,
                TextHAlign::Left,
            )));
        }
    }

    /// Vertical gridlines evenly spread over `bounds`; odd ones are dashed.
    fn push_gridlines(&self, frame: &mut RenderFrame, bounds: Rect) {
        let count = self.config.gridline_count;
        if count < 2 {
            return;
        }
        let spacing = bounds.width() / (count - 1) as f64;
        for index in 0..count {
            let x = bounds.x0 + spacing * index as f64;
            let style = if index % 2 == 0 {
                LineStrokeStyle::Solid
            } else {
                LineStrokeStyle::Dashed {
                    dash: 10.0,
                    gap: 10.0,
                }
            };
            frame.push(Primitive::Line(
                LinePrimitive::new(
                    x,
                    bounds.y0,
                    x,
                    bounds.y1,
                    GRIDLINE_STROKE_PX,
                    self.config.gridline_color,
                )
                .with_stroke_style(style),
            ));
        }
    }

    fn row_text(&self, point: &ColoredDataPoint, exact_fraction: f64) -> String {
        let displayed = if self.config.show_as_percentage {
            format!("{}%", (exact_fraction * 100.0).trunc() as i64)
        } else {
            format_whole(point.value())
        };
        format!("{} ({displayed})", point.label)
    }
}

impl ChartWidget for HorizontalBarChart {
    fn draw(
        &mut self,
        frame: &mut RenderFrame,
        area: Rect,
        mode: PresentationMode,
        now: Duration,
    ) -> ChartResult<()> {
        let Some(series) = self.datasets.selected_series().cloned() else {
            push_no_data_placeholder(frame, area);
            return Ok(());
        };
        self.animation.sync_identity(series.id(), now);

        let content = content_rect(area, self.config.content_padding);
        let mut cursor = content.y0;
        if self.datasets.len() > 1 {
            self.push_tabs(frame, area);
            cursor += self.tab_row_height() + SECTION_GAP_PX;
        }

        if series.is_empty() {
            push_no_data_placeholder(frame, Rect::new(content.x0, cursor, content.x1, content.y1));
            return Ok(());
        }

        let legend_bounds = Rect::new(content.x0, cursor, content.x1, cursor + self.legend_height());
        self.legend_scroll
            .set_extent(self.legend_content_width(series.points()) - legend_bounds.width());
        self.push_legend(frame, series.points(), legend_bounds, self.legend_scroll.offset());
        cursor = legend_bounds.y1 + BARS_GAP_PX;

        let pitch = self.row_pitch();
        let list_height = (pitch * series.len() as f64)
            .min(self.config.max_bars_height)
            .min((content.y1 - cursor).max(0.0));
        let bars = Rect::new(
            content.x0 + BARS_HORIZONTAL_PADDING_PX,
            cursor,
            (content.x1 - BARS_HORIZONTAL_PADDING_PX).max(content.x0 + BARS_HORIZONTAL_PADDING_PX),
            cursor + list_height,
        );
        self.push_gridlines(frame, bars);
        self.scroll.set_extent(pitch * series.len() as f64 - list_height);
        let offset = self.scroll.offset();

        let config = &self.config;
        let max_value = series.max_value();
        let mut drawn = 0usize;
        for (index, point) in series.iter().enumerate() {
            let top = bars.y0 + pitch * index as f64 - offset;
            if top < bars.y0 - FIT_EPSILON {
                continue;
            }
            if top + pitch > bars.y1 + FIT_EPSILON {
                break;
            }
            let fraction = bar_fraction(point.value(), max_value, config.min_fraction);
            let label_top = top + ROW_VERTICAL_PADDING_PX;
            let text = ellipsize(
                &self.row_text(point, fraction.exact),
                config.label_font_size,
                bars.width(),
            );
            if !text.is_empty() {
                frame.push(Primitive::Text(TextPrimitive::new(
                    text,
                    bars.x0,
                    label_top,
                    config.label_font_size,
                    config.muted_text_color,
                    TextHAlign::Left,
                )));
            }

            let width = bars.width() * fraction.visible * self.animation.progress(index, now);
            if width > 0.0 {
                frame.push(Primitive::Rect(
                    RectPrimitive::new(
                        bars.x0,
                        label_top + config.label_font_size + LABEL_TO_BAR_GAP_PX,
                        width,
                        config.bar_height,
                        point.color,
                    )
                    .with_corner_radius(config.bar_height * ROUNDED_SHARE),
                ));
            }
            drawn += 1;
        }

        trace!(
            dataset = self.datasets.selected_key().unwrap_or_default(),
            rows = drawn,
            offset,
            ?mode,
            "drew horizontal bar chart"
        );
        Ok(())
    }

    fn is_animating(&self, now: Duration) -> bool {
        let rows = self.datasets.selected_series().map_or(0, |series| series.len());
        self.animation.is_animating(rows, now)
    }

    fn handle_tap(&mut self, area: Rect, _mode: PresentationMode, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        let hit = self
            .tab_rects(area)
            .iter()
            .position(|rect| rect.contains(point));
        let Some(index) = hit else {
            return false;
        };
        let Some(key) = self.datasets.keys().nth(index).map(str::to_owned) else {
            return false;
        };
        self.select_dataset(&key).unwrap_or(false)
    }
}

fn content_rect(area: Rect, padding: f64) -> Rect {
    let x0 = area.x0 + padding;
    let y0 = area.y0 + padding;
    Rect::new(x0, y0, (area.x1 - padding).max(x0), (area.y1 - padding).max(y0))
}

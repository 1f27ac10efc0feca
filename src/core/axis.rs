//! Value-axis step planning and horizontal extent planning for point series.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::core::types::magnitude;

/// Below this maximum the axis uses a fixed small step.
pub const SMALL_SCALE_LIMIT: f64 = 50.0;
pub const SMALL_SCALE_STEP: f64 = 5.0;
/// Share of the available height used to derive the interval count.
pub const USABLE_HEIGHT_RATIO: f64 = 0.8;
/// Steps are rounded up to a multiple of this.
pub const NICE_STEP_MULTIPLE: f64 = 10.0;
/// Gridlines continue up to `max_value * GRIDLINE_HEADROOM`.
pub const GRIDLINE_HEADROOM: f64 = 2.0;
const MAX_GRIDLINES: usize = 4096;

pub type GridlineValues = SmallVec<[f64; 16]>;

/// Step and gridlines for one value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPlan {
    pub step: f64,
    /// `0, step, 2 * step, ...`, strictly increasing.
    pub gridline_values: GridlineValues,
    /// Last gridline value; the top of the plotted range.
    pub max_extent: f64,
}

impl AxisPlan {
    /// Maps a value onto the vertical pixel range `[baseline_y - plot_height, baseline_y]`.
    ///
    /// A zero extent pins everything to the baseline.
    #[must_use]
    pub fn value_to_y(&self, value: f64, baseline_y: f64, plot_height: f64) -> f64 {
        if self.max_extent <= 0.0 {
            return baseline_y;
        }
        baseline_y - magnitude(value) / self.max_extent * plot_height
    }
}

/// Plans a "nice" step and the gridlines for a value axis.
///
/// Small maxima (< 50) use a fixed step of 5. Otherwise the usable height
/// (80% of `available_height`) is split into as many `min_point_spacing`
/// intervals as fit, and the raw step is rounded up to a multiple of 10.
/// Gridlines run to twice the maximum, leaving headroom above the data, and
/// always reach at least `max_value`.
#[must_use]
pub fn plan_axis(max_value: f64, available_height: f64, min_point_spacing: f64) -> AxisPlan {
    let max_value = magnitude(max_value);
    let step = nice_step(max_value, available_height, min_point_spacing);

    let mut count = ((max_value / step) * GRIDLINE_HEADROOM).floor() as usize + 1;
    if count > MAX_GRIDLINES {
        warn!(max_value, step, count, "gridline count capped");
        count = MAX_GRIDLINES;
    }
    let mut gridline_values: GridlineValues = (0..count).map(|index| step * index as f64).collect();
    if let Some(&last) = gridline_values.last() {
        if last < max_value {
            gridline_values.push((max_value / step).ceil() * step);
        }
    }
    let max_extent = gridline_values.last().copied().unwrap_or(0.0);

    AxisPlan {
        step,
        gridline_values,
        max_extent,
    }
}

fn nice_step(max_value: f64, available_height: f64, min_point_spacing: f64) -> f64 {
    if max_value < SMALL_SCALE_LIMIT {
        return SMALL_SCALE_STEP;
    }

    let usable_height = if available_height.is_finite() {
        available_height.max(0.0) * USABLE_HEIGHT_RATIO
    } else {
        0.0
    };
    let interval_count = if min_point_spacing.is_finite() && min_point_spacing > 0.0 {
        (usable_height / min_point_spacing)
            .floor()
            .clamp(1.0, MAX_GRIDLINES as f64)
    } else {
        1.0
    };
    let raw_step = max_value / interval_count;
    (raw_step / NICE_STEP_MULTIPLE).ceil() * NICE_STEP_MULTIPLE
}

/// Fixed margins around the horizontally laid out points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalMargins {
    /// Width reserved for the fixed value-axis column.
    pub left_axis_offset: f64,
    /// Space kept after the last point.
    pub trailing_margin: f64,
}

impl Default for HorizontalMargins {
    fn default() -> Self {
        Self {
            left_axis_offset: 60.0,
            trailing_margin: 20.0,
        }
    }
}

/// Horizontal placement of a point series and its scroll needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPlan {
    pub point_count: usize,
    /// Distance between consecutive points.
    pub spacing: f64,
    /// Width the series needs including both margins.
    pub total_required_width: f64,
    pub needs_scroll: bool,
    /// Width to allocate for the scrollable content.
    pub content_width: f64,
    /// Largest valid scroll offset; the initial offset.
    pub max_scroll_offset: f64,
    /// Space between the axis column and the trailing margin.
    pub available_width: f64,
}

impl HorizontalPlan {
    /// X offset of point `index`, relative to the start of the plot area.
    ///
    /// A lone point is centered in the available width.
    #[must_use]
    pub fn point_offset(&self, index: usize) -> f64 {
        if self.point_count == 1 {
            return self.available_width / 2.0;
        }
        self.spacing * index as f64
    }

    /// X offset just past the last point.
    #[must_use]
    pub fn series_extent(&self) -> f64 {
        self.spacing * self.point_count.saturating_sub(1) as f64
    }
}

/// Plans point spacing for a series of `point_count` points in `viewport_width`.
///
/// Points spread over the available width but never closer than
/// `min_point_spacing`; when that overflows the viewport the plan asks for
/// horizontal scrolling, starting scrolled to the end.
#[must_use]
pub fn plan_horizontal(
    point_count: usize,
    viewport_width: f64,
    min_point_spacing: f64,
    margins: HorizontalMargins,
) -> HorizontalPlan {
    let viewport_width = finite_non_negative(viewport_width);
    let left = finite_non_negative(margins.left_axis_offset);
    let trailing = finite_non_negative(margins.trailing_margin);
    let min_spacing = finite_non_negative(min_point_spacing);

    let available_width = (viewport_width - left - trailing).max(0.0);
    let gaps = point_count.saturating_sub(1) as f64;
    let ideal_spacing = if point_count > 1 {
        available_width / gaps
    } else {
        available_width
    };
    let spacing = ideal_spacing.max(min_spacing);
    let total_required_width = left + gaps * spacing + trailing;
    let needs_scroll = total_required_width > viewport_width;
    let content_width = if needs_scroll {
        left + gaps * spacing
    } else {
        viewport_width
    };

    HorizontalPlan {
        point_count,
        spacing,
        total_required_width,
        needs_scroll,
        content_width,
        max_scroll_offset: (content_width - viewport_width).max(0.0),
        available_width,
    }
}

fn finite_non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

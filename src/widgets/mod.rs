//! Chart widgets and the card that hosts them.
//!
//! Each widget owns its config, its data and its animation state, and draws
//! itself into a content rectangle of a [`RenderFrame`]. [`ChartCard`] adds the
//! title header, the expand/collapse affordance and the renderer hand-off.

use std::time::Duration;

use kurbo::Rect;

use crate::error::ChartResult;
use crate::interaction::PresentationMode;
use crate::render::RenderFrame;

mod angular_chart;
mod bar_chart;
mod card;
mod horizontal_bar_chart;
mod json_contract;
mod layout_helpers;
mod line_chart;
mod validation;

pub use angular_chart::{AngularChart, AngularChartConfig, AngularStyle};
pub use bar_chart::{BarChart, BarChartConfig};
pub use card::{CardConfig, ChartCard};
pub use horizontal_bar_chart::{HorizontalBarChart, HorizontalBarChartConfig};
pub use json_contract::JsonConfig;
pub use line_chart::{LineChart, LineChartConfig, LineChartLayout};

/// A chart that can draw itself into a content area.
pub trait ChartWidget {
    /// Appends this frame's primitives for `area` at frame time `now`.
    fn draw(
        &mut self,
        frame: &mut RenderFrame,
        area: Rect,
        mode: PresentationMode,
        now: Duration,
    ) -> ChartResult<()>;

    /// Whether another frame is needed to advance an animation.
    fn is_animating(&self, now: Duration) -> bool;

    /// Handles a tap inside `area`. Returns whether widget state changed.
    fn handle_tap(&mut self, _area: Rect, _mode: PresentationMode, _x: f64, _y: f64) -> bool {
        false
    }
}

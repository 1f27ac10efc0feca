//! chart-cards: headless animated chart widgets.
//!
//! The crate computes chart geometry (value normalization, slice angles, axis
//! steps, line paths) and per-widget animation state, and emits
//! backend-agnostic draw primitives in a [`render::RenderFrame`]. A host UI
//! supplies the frame time, taps and a [`render::Renderer`].

pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;
pub mod widgets;

pub use error::{ChartError, ChartResult};
pub use widgets::{
    AngularChart, AngularChartConfig, BarChart, BarChartConfig, CardConfig, ChartCard,
    ChartWidget, HorizontalBarChart, HorizontalBarChartConfig, JsonConfig, LineChart,
    LineChartConfig,
};

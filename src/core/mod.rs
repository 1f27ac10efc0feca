//! Pure chart math and per-widget animation state.

pub mod angle;
pub mod animation;
pub mod axis;
pub mod legend;
pub mod normalize;
pub mod path;
pub mod series;
pub mod types;

pub use angle::{
    ArcAngles, ArcFillMode, ArcLayout, FULL_CIRCLE_DEGREES, SliceArc, partition,
    partition_angles, partition_in_place, sort_by_value_desc,
};
pub use animation::{
    ANGULAR_ANIMATION_DURATION, AnimationPhase, BAR_ANIMATION_DURATION, BAR_ANIMATION_STAGGER,
    Easing, FrameClock, HORIZONTAL_BAR_ANIMATION_DURATION, ProgressAnimation, StaggeredProgress,
    Tween,
};
pub use axis::{
    AxisPlan, GridlineValues, HorizontalMargins, HorizontalPlan, plan_axis, plan_horizontal,
};
pub use legend::{LegendEntry, format_percentage, format_whole, legend_entries};
pub use normalize::{BarFraction, bar_fraction, normalize};
pub use path::{build_fill_path, build_path};
pub use series::{DatasetCollection, Series, SeriesId};
pub use types::{ColoredDataPoint, DataPoint, LabeledValue, Viewport, magnitude};

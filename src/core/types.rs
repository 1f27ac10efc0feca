use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Pixel area a widget is laid out into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Labeled sample used by bar and line charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Labeled sample carrying its own slice/bar color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColoredDataPoint {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

impl ColoredDataPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, color: Color) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// Common read access over plain and colored samples.
pub trait LabeledValue {
    fn label(&self) -> &str;
    fn value(&self) -> f64;

    /// Value as a drawable magnitude: negative and non-finite values count as 0.
    fn magnitude(&self) -> f64 {
        magnitude(self.value())
    }
}

impl LabeledValue for DataPoint {
    fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> f64 {
        self.value
    }
}

impl LabeledValue for ColoredDataPoint {
    fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> f64 {
        self.value
    }
}

#[must_use]
pub fn magnitude(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

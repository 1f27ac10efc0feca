use serde::{Deserialize, Serialize};

use crate::core::types::{ColoredDataPoint, LabeledValue};
use crate::render::Color;

/// One legend row for a pie or donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub percentage: f64,
    pub text: String,
}

/// Builds legend rows in slice order. Percentages are 0 when the total is 0.
#[must_use]
pub fn legend_entries(points: &[ColoredDataPoint]) -> Vec<LegendEntry> {
    let total: f64 = points.iter().map(LabeledValue::magnitude).sum();
    points
        .iter()
        .map(|point| {
            let percentage = if total > 0.0 && total.is_finite() {
                point.magnitude() / total * 100.0
            } else {
                0.0
            };
            LegendEntry {
                label: point.label.clone(),
                color: point.color,
                percentage,
                text: format!("{}: {}", point.label, format_percentage(percentage)),
            }
        })
        .collect()
}

/// Formats a percentage with one decimal, e.g. `"42.5%"`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return "0.0%".to_owned();
    }
    format!("{value:.1}%")
}

/// Formats a value as a whole number, truncating toward zero.
#[must_use]
pub fn format_whole(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    format!("{}", value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::{format_percentage, format_whole};

    #[test]
    fn percentage_uses_one_decimal() {
        assert_eq!(format_percentage(33.333), "33.3%");
        assert_eq!(format_percentage(f64::NAN), "0.0%");
    }

    #[test]
    fn whole_truncates() {
        assert_eq!(format_whole(143.9), "143");
        assert_eq!(format_whole(0.0), "0");
    }
}

/// Maps `value` into `[0, 1]` relative to `[domain_min, domain_max]`.
///
/// A flat domain (`domain_min == domain_max`) maps everything to full scale
/// (`1.0`). Non-finite inputs never leak out: a non-finite value maps to `0.0`
/// and a non-finite domain is treated as flat.
#[must_use]
pub fn normalize(value: f64, domain_min: f64, domain_max: f64) -> f64 {
    if !domain_min.is_finite() || !domain_max.is_finite() || domain_max == domain_min {
        return 1.0;
    }
    if !value.is_finite() {
        return 0.0;
    }

    ((value - domain_min) / (domain_max - domain_min)).clamp(0.0, 1.0)
}

/// Width fraction of one bar relative to the largest bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarFraction {
    /// `value / max_value`, 0 when the maximum is 0. Used for percentage text.
    pub exact: f64,
    /// `exact` raised to the minimum visible fraction. Used for drawing.
    pub visible: f64,
}

/// Computes a bar's width fraction with a visibility floor.
///
/// Zero-valued bars still draw at `min_fraction` so they never vanish.
#[must_use]
pub fn bar_fraction(value: f64, max_value: f64, min_fraction: f64) -> BarFraction {
    let exact = if !max_value.is_finite() || max_value <= 0.0 || !value.is_finite() {
        0.0
    } else {
        (value / max_value).max(0.0)
    };
    let floor = if min_fraction.is_finite() {
        min_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };

    BarFraction {
        exact,
        visible: exact.max(floor),
    }
}

use crate::core::{ArcLayout, Easing, Tween};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub(crate) fn validate_positive(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(ChartError::InvalidConfig(format!("{name} must be finite and > 0")))
}

pub(crate) fn validate_non_negative(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(ChartError::InvalidConfig(format!("{name} must be finite and >= 0")))
}

pub(crate) fn validate_color(name: &str, color: Color) -> ChartResult<()> {
    color
        .validate()
        .map_err(|err| ChartError::InvalidConfig(format!("{name}: {err}")))
}

pub(crate) fn validate_tween(name: &str, tween: Tween) -> ChartResult<()> {
    if let Easing::CubicBezier { x1, y1, x2, y2 } = tween.easing {
        let x_in_range = |x: f64| x.is_finite() && (0.0..=1.0).contains(&x);
        if !x_in_range(x1) || !x_in_range(x2) || !y1.is_finite() || !y2.is_finite() {
            return Err(ChartError::InvalidConfig(format!(
                "{name} easing control points need x in [0, 1] and finite y"
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_arc_layout(layout: ArcLayout) -> ChartResult<()> {
    validate_non_negative("gap_angle", layout.gap_angle)?;
    validate_non_negative("min_sweep", layout.min_sweep)?;
    if layout.gap_angle >= 360.0 {
        return Err(ChartError::InvalidConfig("gap_angle must be < 360".to_owned()));
    }
    Ok(())
}

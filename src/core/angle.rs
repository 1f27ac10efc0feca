//! Angular partitioning for pie and donut charts.
//!
//! Angles are in degrees, 0° at the 3 o'clock position, growing clockwise.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::types::{ColoredDataPoint, LabeledValue, magnitude};
use crate::render::Color;

pub const FULL_CIRCLE_DEGREES: f64 = 360.0;

const FOOTPRINT_EPSILON: f64 = 1e-9;

/// How slices grow while the fill animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArcFillMode {
    /// The whole ring fills from 0°: every slice and its position scale with progress.
    #[default]
    Sweep,
    /// Slices sit at their final position and grow their sweep in place.
    InPlace,
}

/// Gap/floor/fill settings for one partition pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcLayout {
    pub gap_angle: f64,
    pub min_sweep: f64,
    pub fill_mode: ArcFillMode,
}

impl ArcLayout {
    /// Ring with 2° gaps and a 0.5° floor.
    #[must_use]
    pub const fn donut() -> Self {
        Self {
            gap_angle: 2.0,
            min_sweep: 0.5,
            fill_mode: ArcFillMode::Sweep,
        }
    }

    /// Filled pie, no gaps, slices grow in place.
    #[must_use]
    pub const fn pie() -> Self {
        Self {
            gap_angle: 0.0,
            min_sweep: 0.0,
            fill_mode: ArcFillMode::InPlace,
        }
    }
}

impl Default for ArcLayout {
    fn default() -> Self {
        Self::donut()
    }
}

/// Start and sweep of one slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcAngles {
    pub start_angle: f64,
    pub sweep_angle: f64,
}

/// Drawable slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceArc {
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub color: Color,
}

/// Partitions colored samples into slices, in input order.
#[must_use]
pub fn partition(points: &[ColoredDataPoint], progress: f64, layout: ArcLayout) -> Vec<SliceArc> {
    let values: Vec<f64> = points.iter().map(LabeledValue::value).collect();
    let angles = match layout.fill_mode {
        ArcFillMode::Sweep => {
            partition_angles(&values, progress, layout.gap_angle, layout.min_sweep)
        }
        ArcFillMode::InPlace => partition_in_place(&values, progress),
    };

    angles
        .into_iter()
        .zip(points)
        .map(|(angles, point)| SliceArc {
            start_angle: angles.start_angle,
            sweep_angle: angles.sweep_angle,
            color: point.color,
        })
        .collect()
}

/// Gap-aware partition with a minimum visible sweep.
///
/// Each slice gets `value / total * 360 * progress`; when those plus one gap
/// per slice exceed a full turn everything is scaled down uniformly. The gap
/// is then cut from each slice and the sweep is floored at `min_sweep`. Start
/// angles advance by the scaled (un-gapped) angle plus `gap * index`.
///
/// If floored slices would push the footprint `sum(sweep + gap)` past 360°,
/// the unfloored slices are shrunk to make room and positions advance by
/// footprint instead.
#[must_use]
pub fn partition_angles(
    values: &[f64],
    progress: f64,
    gap_angle: f64,
    min_sweep: f64,
) -> Vec<ArcAngles> {
    let count = values.len();
    if count == 0 {
        return Vec::new();
    }

    let gap = non_negative(gap_angle);
    let min_sweep = non_negative(min_sweep);
    let progress = clamp_progress(progress);

    let shares = shares(values);
    if shares.iter().all(|share| *share == 0.0) {
        return (0..count)
            .map(|index| ArcAngles {
                start_angle: gap * index as f64,
                sweep_angle: 0.0,
            })
            .collect();
    }

    let animated: Vec<f64> = shares
        .iter()
        .map(|share| share * FULL_CIRCLE_DEGREES * progress)
        .collect();
    let total_needed = animated.iter().sum::<f64>() + count as f64 * gap;
    let scale = if total_needed > FULL_CIRCLE_DEGREES {
        FULL_CIRCLE_DEGREES / total_needed
    } else {
        1.0
    };
    let scaled: Vec<f64> = animated.iter().map(|angle| angle * scale).collect();

    let floor_footprint = gap + min_sweep;
    let footprint: f64 = scaled.iter().map(|angle| angle.max(floor_footprint)).sum();
    if footprint <= FULL_CIRCLE_DEGREES + FOOTPRINT_EPSILON {
        return place(&scaled, gap, min_sweep);
    }

    if count as f64 * floor_footprint >= FULL_CIRCLE_DEGREES {
        warn!(
            count,
            gap,
            min_sweep,
            "slice floor does not fit a full turn; shrinking gap and floor"
        );
        let even = FULL_CIRCLE_DEGREES / count as f64;
        let ratio = even / floor_footprint;
        return place_by_footprint(&vec![even; count], gap * ratio, min_sweep * ratio);
    }

    place_by_footprint(&rebalance(&scaled, floor_footprint), gap, min_sweep)
}

/// Pie-style partition: start angles are final, sweeps grow with progress.
#[must_use]
pub fn partition_in_place(values: &[f64], progress: f64) -> Vec<ArcAngles> {
    let progress = clamp_progress(progress);
    let mut start = 0.0;
    shares(values)
        .into_iter()
        .map(|share| {
            let angle = share * FULL_CIRCLE_DEGREES;
            let arc = ArcAngles {
                start_angle: start,
                sweep_angle: angle * progress,
            };
            start += angle;
            arc
        })
        .collect()
}

/// Stable descending sort by value, for callers that want largest-first slices.
#[must_use]
pub fn sort_by_value_desc<P: LabeledValue + Clone>(points: &[P]) -> Vec<P> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|point| Reverse(OrderedFloat(point.magnitude())));
    sorted
}

fn place(footprints: &[f64], gap: f64, min_sweep: f64) -> Vec<ArcAngles> {
    let mut start = 0.0;
    footprints
        .iter()
        .enumerate()
        .map(|(index, &angle)| {
            let arc = ArcAngles {
                start_angle: start + gap * index as f64,
                sweep_angle: (angle - gap).max(min_sweep),
            };
            start += angle;
            arc
        })
        .collect()
}

/// Lays slices end to end: each start advances by the previous footprint
/// (`sweep + gap`), so the last slice ends within the turn.
fn place_by_footprint(footprints: &[f64], gap: f64, min_sweep: f64) -> Vec<ArcAngles> {
    let mut start = 0.0;
    footprints
        .iter()
        .map(|&footprint| {
            let arc = ArcAngles {
                start_angle: start,
                sweep_angle: (footprint - gap).max(min_sweep),
            };
            start += footprint;
            arc
        })
        .collect()
}

/// Shrinks unfloored slices until floored ones fit at `floor_footprint` each.
///
/// Callers guarantee `count * floor_footprint < 360`.
fn rebalance(scaled: &[f64], floor_footprint: f64) -> Vec<f64> {
    let mut floored: Vec<bool> = scaled
        .iter()
        .map(|angle| *angle <= floor_footprint)
        .collect();
    let mut footprints = scaled.to_vec();

    loop {
        let floored_count = floored.iter().filter(|floored| **floored).count();
        let budget = FULL_CIRCLE_DEGREES - floored_count as f64 * floor_footprint;
        let free: f64 = scaled
            .iter()
            .zip(&floored)
            .filter(|(_, floored)| !**floored)
            .map(|(angle, _)| *angle)
            .sum();
        if free <= 0.0 {
            break;
        }

        let factor = budget / free;
        let mut changed = false;
        for (index, angle) in scaled.iter().enumerate() {
            if floored[index] {
                continue;
            }
            let shrunk = angle * factor;
            if shrunk <= floor_footprint {
                floored[index] = true;
                changed = true;
            }
            footprints[index] = shrunk;
        }
        if !changed {
            break;
        }
    }

    for (footprint, floored) in footprints.iter_mut().zip(&floored) {
        if *floored {
            *footprint = floor_footprint;
        }
    }
    footprints
}

/// Fraction of the total per value. All zero when nothing is drawable.
fn shares(values: &[f64]) -> Vec<f64> {
    let magnitudes: Vec<f64> = values.iter().copied().map(magnitude).collect();
    // Dividing by the max first keeps the sum finite for huge inputs.
    let max = magnitudes.iter().copied().fold(0.0, f64::max);
    if max == 0.0 {
        return vec![0.0; values.len()];
    }
    let relative: Vec<f64> = magnitudes.iter().map(|value| value / max).collect();
    let total: f64 = relative.iter().sum();
    relative.iter().map(|value| value / total).collect()
}

fn non_negative(angle: f64) -> f64 {
    if angle.is_finite() { angle.max(0.0) } else { 0.0 }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

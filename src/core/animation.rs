//! Frame-driven progress animation.
//!
//! Time is explicit: hosts pass the current frame time as a `Duration` since
//! any fixed origin (see [`FrameClock`]). Every query is a pure function of
//! the stored start time and `now`, so replaying the same frame times gives
//! the same geometry.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::series::SeriesId;

pub const ANGULAR_ANIMATION_DURATION: Duration = Duration::from_millis(800);
pub const BAR_ANIMATION_DURATION: Duration = Duration::from_millis(500);
pub const BAR_ANIMATION_STAGGER: Duration = Duration::from_millis(50);
pub const HORIZONTAL_BAR_ANIMATION_DURATION: Duration = Duration::from_millis(1200);

/// Time curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Standard decelerating curve, cubic bezier `(0.4, 0.0, 0.2, 1.0)`.
    #[default]
    FastOutSlowIn,
    /// Cubic bezier through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    /// `x1` and `x2` must lie in `[0, 1]`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    #[must_use]
    pub fn transform(self, fraction: f64) -> f64 {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self {
            Self::Linear => fraction,
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let (mut low, mut high) = (0.0, 1.0);
    let mut t = x;
    for _ in 0..48 {
        let sampled = bezier_axis(x1, x2, t);
        if (sampled - x).abs() < 1e-9 {
            break;
        }
        if sampled < x {
            low = t;
        } else {
            high = t;
        }
        t = (low + high) / 2.0;
    }

    let eased = bezier_axis(y1, y2, t);
    if eased.is_finite() { eased } else { x }
}

fn bezier_axis(p1: f64, p2: f64, t: f64) -> f64 {
    let inverse = 1.0 - t;
    3.0 * inverse * inverse * t * p1 + 3.0 * inverse * t * t * p2 + t * t * t
}

/// Duration, delay and easing of one 0 -> 1 run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    #[serde(with = "millis")]
    pub duration: Duration,
    #[serde(with = "millis", default)]
    pub delay: Duration,
    #[serde(default)]
    pub easing: Easing,
}

impl Tween {
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            easing: Easing::FastOutSlowIn,
        }
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Eased progress `elapsed` after the run was started.
    #[must_use]
    pub fn progress_at(self, elapsed: Duration) -> f64 {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let linear = active.as_secs_f64() / self.duration.as_secs_f64();
        self.easing.transform(linear)
    }

    /// Total time from start until the run settles.
    #[must_use]
    pub fn total(self) -> Duration {
        self.delay.saturating_add(self.duration)
    }
}

/// Lifecycle of one animated quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationPhase {
    /// Never started; progress is 0.
    Idle,
    Running,
    /// Reached 1 and holds until the next restart.
    Settled,
}

/// Whole-series progress keyed on series identity.
///
/// A new identity restarts the run at 0, even mid-flight and even when the
/// new series holds equal values. Partial progress is never carried over.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressAnimation {
    tween: Tween,
    identity: Option<SeriesId>,
    started_at: Option<Duration>,
}

impl ProgressAnimation {
    #[must_use]
    pub fn new(tween: Tween) -> Self {
        Self {
            tween,
            identity: None,
            started_at: None,
        }
    }

    #[must_use]
    pub fn tween(&self) -> Tween {
        self.tween
    }

    /// Replaces the tween; an in-flight run keeps its start time.
    pub fn set_tween(&mut self, tween: Tween) {
        self.tween = tween;
    }

    #[must_use]
    pub fn identity(&self) -> Option<SeriesId> {
        self.identity
    }

    /// Restarts when `identity` differs from the tracked one. Returns whether it restarted.
    pub fn sync_identity(&mut self, identity: SeriesId, now: Duration) -> bool {
        if self.identity == Some(identity) {
            return false;
        }
        debug!(
            previous = ?self.identity.map(SeriesId::get),
            next = identity.get(),
            "identity changed, restarting animation"
        );
        self.identity = Some(identity);
        self.restart(now);
        true
    }

    pub fn restart(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    /// Drops back to `Idle` and forgets the tracked identity.
    pub fn reset(&mut self) {
        self.identity = None;
        self.started_at = None;
    }

    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        match self.started_at {
            Some(started_at) => self.tween.progress_at(now.saturating_sub(started_at)),
            None => 0.0,
        }
    }

    #[must_use]
    pub fn phase(&self, now: Duration) -> AnimationPhase {
        phase_for(self.started_at, self.tween.total(), now)
    }

    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.phase(now) == AnimationPhase::Running
    }
}

/// Per-item progress for bar lists: item `i` starts `i * stagger` after the run.
#[derive(Debug, Clone, PartialEq)]
pub struct StaggeredProgress {
    base: ProgressAnimation,
    stagger: Duration,
}

impl StaggeredProgress {
    #[must_use]
    pub fn new(tween: Tween, stagger: Duration) -> Self {
        Self {
            base: ProgressAnimation::new(tween),
            stagger,
        }
    }

    #[must_use]
    pub fn stagger(&self) -> Duration {
        self.stagger
    }

    pub fn set_timing(&mut self, tween: Tween, stagger: Duration) {
        self.base.set_tween(tween);
        self.stagger = stagger;
    }

    pub fn sync_identity(&mut self, identity: SeriesId, now: Duration) -> bool {
        self.base.sync_identity(identity, now)
    }

    pub fn restart(&mut self, now: Duration) {
        self.base.restart(now);
    }

    pub fn reset(&mut self) {
        self.base.reset();
    }

    #[must_use]
    pub fn progress(&self, index: usize, now: Duration) -> f64 {
        match self.base.started_at {
            Some(started_at) => {
                let elapsed = now.saturating_sub(started_at);
                self.base
                    .tween
                    .progress_at(elapsed.saturating_sub(self.offset(index)))
            }
            None => 0.0,
        }
    }

    /// Phase of the whole list, settled once the last item settles.
    #[must_use]
    pub fn phase(&self, item_count: usize, now: Duration) -> AnimationPhase {
        let last_offset = self.offset(item_count.saturating_sub(1));
        phase_for(
            self.base.started_at,
            self.base.tween.total().saturating_add(last_offset),
            now,
        )
    }

    #[must_use]
    pub fn is_animating(&self, item_count: usize, now: Duration) -> bool {
        self.phase(item_count, now) == AnimationPhase::Running
    }

    fn offset(&self, index: usize) -> Duration {
        self.stagger
            .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

fn phase_for(started_at: Option<Duration>, total: Duration, now: Duration) -> AnimationPhase {
    match started_at {
        None => AnimationPhase::Idle,
        Some(started_at) if now.saturating_sub(started_at) >= total => AnimationPhase::Settled,
        Some(_) => AnimationPhase::Running,
    }
}

/// Monotonic frame-time source for hosts without their own frame clock.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    #[must_use]
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time since the clock started.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Serializes a `Duration` as whole milliseconds.
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(
        duration: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Easing, Tween};

    #[test]
    fn fast_out_slow_in_hits_endpoints() {
        assert_eq!(Easing::FastOutSlowIn.transform(0.0), 0.0);
        assert_eq!(Easing::FastOutSlowIn.transform(1.0), 1.0);
    }

    #[test]
    fn fast_out_slow_in_leads_linear_in_the_middle() {
        let eased = Easing::FastOutSlowIn.transform(0.5);
        assert!(eased > 0.5 && eased < 1.0, "eased={eased}");
    }

    #[test]
    fn delay_holds_progress_at_zero() {
        let tween = Tween::new(Duration::from_millis(100))
            .with_delay(Duration::from_millis(40))
            .with_easing(Easing::Linear);
        assert_eq!(tween.progress_at(Duration::from_millis(30)), 0.0);
        assert!((tween.progress_at(Duration::from_millis(90)) - 0.5).abs() < 1e-9);
        assert_eq!(tween.progress_at(Duration::from_millis(500)), 1.0);
    }

    #[test]
    fn zero_duration_settles_immediately() {
        let tween = Tween::new(Duration::ZERO);
        assert_eq!(tween.progress_at(Duration::ZERO), 1.0);
    }
}

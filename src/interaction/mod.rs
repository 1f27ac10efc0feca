use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Delay between a layout change and the automatic scroll to the end,
/// leaving the host one layout pass to settle the scroll extent.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Where a chart card is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PresentationMode {
    /// Inside its card in the host layout.
    #[default]
    Inline,
    /// In a fullscreen overlay.
    Expanded,
}

impl PresentationMode {
    #[must_use]
    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

/// Horizontal scroll position of a chart whose content overflows its viewport.
///
/// After every relayout the viewport schedules a jump to the end (most recent
/// data) once [`SCROLL_SETTLE_DELAY`] has passed. Manual scrolling cancels a
/// pending jump.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollViewport {
    offset: f64,
    max_offset: f64,
    scroll_to_end_at: Option<Duration>,
}

impl ScrollViewport {
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn max_offset(&self) -> f64 {
        self.max_offset
    }

    #[must_use]
    pub fn is_scroll_pending(&self) -> bool {
        self.scroll_to_end_at.is_some()
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.max_offset
    }

    /// Applies a new scroll extent and schedules the jump to the end.
    pub fn relayout(&mut self, max_offset: f64, now: Duration) {
        self.max_offset = if max_offset.is_finite() {
            max_offset.max(0.0)
        } else {
            0.0
        };
        self.offset = self.offset.clamp(0.0, self.max_offset);
        self.scroll_to_end_at = Some(now.saturating_add(SCROLL_SETTLE_DELAY));
        trace!(max_offset = self.max_offset, "scroll viewport relayout");
    }

    /// Applies a new scroll extent without scheduling a jump, keeping the
    /// current offset when it is still in range.
    pub fn set_extent(&mut self, max_offset: f64) {
        let max_offset = if max_offset.is_finite() {
            max_offset.max(0.0)
        } else {
            0.0
        };
        if max_offset != self.max_offset {
            trace!(max_offset, "scroll viewport extent changed");
        }
        self.max_offset = max_offset;
        self.offset = self.offset.clamp(0.0, self.max_offset);
    }

    /// Resolves a pending jump once its deadline passed. Returns whether it scrolled.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.scroll_to_end_at {
            Some(deadline) if now >= deadline => {
                self.scroll_to_end_at = None;
                self.offset = self.max_offset;
                true
            }
            _ => false,
        }
    }

    /// Scrolls to `offset`, clamped to the valid range.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_to_end_at = None;
        if offset.is_finite() {
            self.offset = offset.clamp(0.0, self.max_offset);
        }
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.offset + delta);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::ScrollViewport;

    #[test]
    fn jumps_to_end_only_after_settle_delay() {
        let mut viewport = ScrollViewport::default();
        viewport.relayout(250.0, Duration::from_millis(100));
        assert!(!viewport.tick(Duration::from_millis(105)));
        assert_eq!(viewport.offset(), 0.0);
        assert!(viewport.tick(Duration::from_millis(110)));
        assert_eq!(viewport.offset(), 250.0);
    }

    #[test]
    fn manual_scroll_cancels_pending_jump() {
        let mut viewport = ScrollViewport::default();
        viewport.relayout(250.0, Duration::ZERO);
        viewport.scroll_to(40.0);
        assert!(!viewport.tick(Duration::from_secs(1)));
        assert_eq!(viewport.offset(), 40.0);
    }

    #[test]
    fn extent_change_keeps_offset_without_jumping() {
        let mut viewport = ScrollViewport::default();
        viewport.set_extent(300.0);
        assert_eq!(viewport.offset(), 0.0);
        assert!(!viewport.is_scroll_pending());
        viewport.scroll_to(250.0);
        viewport.set_extent(100.0);
        assert_eq!(viewport.offset(), 100.0);
        viewport.set_extent(f64::NAN);
        assert_eq!(viewport.offset(), 0.0);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut viewport = ScrollViewport::default();
        viewport.relayout(100.0, Duration::ZERO);
        viewport.scroll_to(500.0);
        assert_eq!(viewport.offset(), 100.0);
        viewport.scroll_by(-1_000.0);
        assert_eq!(viewport.offset(), 0.0);
    }
}

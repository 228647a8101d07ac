//! Tab indicator synchronization.
//!
//! The indicator is a pill that sits under the active tab. Its position is
//! measured rather than computed: the active tab's bounding box relative to
//! the tab strip gives `left` and `width`.
//!
//! Measurement can fail on first run because the page has not been laid out
//! yet (tabs report zero width). In that case the sync is deferred by a short
//! delay and retried, a bounded number of times. Once a measurement has
//! succeeded, later failures are skipped silently.

use crate::render::Layout;
use crate::section::Section;
use crate::types::IndicatorBounds;
use std::time::Duration;
use tracing::debug;

/// What to do with the indicator right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorStep {
    Apply(IndicatorBounds),
    /// Schedule a resync after this delay.
    Defer(Duration),
    Skip,
}

#[derive(Debug, Clone)]
pub struct IndicatorSync {
    defer: Duration,
    max_deferrals: u32,
    deferrals: u32,
    settled: bool,
    pending: bool,
}

impl IndicatorSync {
    pub fn new(defer: Duration, max_deferrals: u32) -> Self {
        Self {
            defer,
            max_deferrals,
            deferrals: 0,
            settled: false,
            pending: false,
        }
    }

    /// Whether a resync is currently scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Decide how to place the indicator for `active`.
    pub fn plan(&mut self, layout: &dyn Layout, active: Section) -> IndicatorStep {
        if !layout.has_indicator() {
            return IndicatorStep::Skip;
        }
        let (Some(tab), Some(strip)) = (layout.tab_rect(active), layout.tab_strip_rect()) else {
            return IndicatorStep::Skip;
        };
        match IndicatorBounds::measure(tab, strip) {
            Some(bounds) => {
                self.settled = true;
                IndicatorStep::Apply(bounds)
            }
            None if self.settled || self.pending => IndicatorStep::Skip,
            None if self.deferrals < self.max_deferrals => {
                self.deferrals += 1;
                self.pending = true;
                debug!(
                    attempt = self.deferrals,
                    "tabs not laid out, deferring indicator sync"
                );
                IndicatorStep::Defer(self.defer)
            }
            None => {
                debug!("tabs never laid out, giving up on indicator sync");
                IndicatorStep::Skip
            }
        }
    }

    /// Called when a scheduled resync fires, before re-planning.
    pub fn resync_fired(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::two_tab_surface;
    use crate::types::Rect;

    #[test]
    fn applies_measured_bounds() {
        let surface = two_tab_surface();
        let mut sync = IndicatorSync::new(Duration::from_millis(50), 3);
        let step = sync.plan(&surface, Section::ABOUT);
        assert_eq!(
            step,
            IndicatorStep::Apply(IndicatorBounds {
                left: 96.0,
                width: 84.0
            })
        );
    }

    #[test]
    fn missing_indicator_is_skipped() {
        let mut surface = two_tab_surface();
        surface.layout.indicator = false;
        let mut sync = IndicatorSync::new(Duration::from_millis(50), 3);
        assert_eq!(sync.plan(&surface, Section::GALLERY), IndicatorStep::Skip);
    }

    #[test]
    fn missing_tab_is_skipped_without_deferral() {
        let surface = two_tab_surface();
        let mut sync = IndicatorSync::new(Duration::from_millis(50), 3);
        assert_eq!(sync.plan(&surface, Section::new(5)), IndicatorStep::Skip);
        assert!(!sync.is_pending());
    }

    #[test]
    fn unlaid_tabs_defer_once_per_pending_resync() {
        let mut surface = two_tab_surface();
        surface.layout.tabs = vec![Rect::new(0.0, 0.0, 0.0, 0.0); 2];
        let mut sync = IndicatorSync::new(Duration::from_millis(50), 3);

        assert_eq!(
            sync.plan(&surface, Section::GALLERY),
            IndicatorStep::Defer(Duration::from_millis(50))
        );
        // A second call while the resync is pending does not stack timers.
        assert_eq!(sync.plan(&surface, Section::GALLERY), IndicatorStep::Skip);
    }

    #[test]
    fn deferral_is_bounded() {
        let mut surface = two_tab_surface();
        surface.layout.tabs = vec![Rect::new(0.0, 0.0, 0.0, 0.0); 2];
        let mut sync = IndicatorSync::new(Duration::from_millis(50), 2);

        for _ in 0..2 {
            assert!(matches!(
                sync.plan(&surface, Section::GALLERY),
                IndicatorStep::Defer(_)
            ));
            sync.resync_fired();
        }
        assert_eq!(sync.plan(&surface, Section::GALLERY), IndicatorStep::Skip);
    }

    #[test]
    fn no_deferral_after_first_success() {
        let mut surface = two_tab_surface();
        let mut sync = IndicatorSync::new(Duration::from_millis(50), 3);
        assert!(matches!(
            sync.plan(&surface, Section::GALLERY),
            IndicatorStep::Apply(_)
        ));

        surface.layout.tabs = vec![Rect::new(0.0, 0.0, 0.0, 0.0); 2];
        assert_eq!(sync.plan(&surface, Section::GALLERY), IndicatorStep::Skip);
    }
}

//! Gesture classification for touch swipes and mouse drags.
//!
//! Touch and mouse share one algorithm. A gesture records its origin on
//! start, asks on every move whether the browser's default scroll/selection
//! should be suppressed, and on end turns the horizontal distance travelled
//! into either a tap or a directional swipe:
//!
//! ```text
//! diff_x = origin.x - end.x
//!
//! |diff_x| <= threshold   → tap (no navigation)
//!  diff_x  >  threshold   → pointer moved left  → forward (next section)
//!  diff_x  < -threshold   → pointer moved right → backward (previous section)
//! ```
//!
//! Moves that are more horizontal than vertical suppress the default action,
//! so vertical scrolling inside a section passes through untouched.
//!
//! ## Mouse vs Touch
//!
//! A mouse drag never starts on an interactive element (link, button, image)
//! so that clicking content is not swallowed by drag navigation. Touch has
//! no such exclusion: a swipe that starts on an image still navigates.

use crate::types::Point;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Input device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Element under the pointer when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Plain,
    Link,
    Button,
    Image,
}

impl TargetKind {
    pub fn is_interactive(self) -> bool {
        !matches!(self, TargetKind::Plain)
    }
}

/// What the adapter should do with the browser default for a move event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveVerdict {
    PassThrough,
    SuppressDefault,
}

/// Direction of a classified swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Pointer travelled left: advance to the next section.
    Forward,
    /// Pointer travelled right: go back to the previous section.
    Backward,
}

/// Result of ending a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// No gesture was in progress, or the end carried no coordinates.
    Inert,
    /// The gesture stayed within the threshold.
    Tap,
    Swipe(SwipeDirection),
}

/// In-flight gesture bookkeeping, owned by the router state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    /// Where the current gesture began. Present only between start and end.
    pub origin: Option<Point>,
    /// True only between a qualifying mouse-down and its mouse-up.
    pub dragging: bool,
}

impl GestureState {
    fn reset(&mut self) {
        self.origin = None;
        self.dragging = false;
    }
}

/// Stateless classifier; all gesture state lives in [`GestureState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureClassifier {
    threshold: f64,
}

impl GestureClassifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Begin a gesture. Returns whether an origin was recorded.
    pub fn start(
        &self,
        state: &mut GestureState,
        kind: PointerKind,
        point: Option<Point>,
        target: TargetKind,
    ) -> bool {
        let Some(point) = point else {
            return false;
        };
        match kind {
            PointerKind::Mouse => {
                if target.is_interactive() {
                    trace!(?target, "mouse down on interactive element, not dragging");
                    return false;
                }
                state.origin = Some(point);
                state.dragging = true;
            }
            PointerKind::Touch => {
                state.origin = Some(point);
            }
        }
        true
    }

    /// Classify a move against the recorded origin.
    pub fn moved(
        &self,
        state: &GestureState,
        kind: PointerKind,
        point: Option<Point>,
    ) -> MoveVerdict {
        if kind == PointerKind::Mouse && !state.dragging {
            return MoveVerdict::PassThrough;
        }
        let (Some(origin), Some(point)) = (state.origin, point) else {
            return MoveVerdict::PassThrough;
        };
        let diff_x = origin.x - point.x;
        let diff_y = origin.y - point.y;
        if diff_x.abs() > diff_y.abs() {
            MoveVerdict::SuppressDefault
        } else {
            MoveVerdict::PassThrough
        }
    }

    /// Finish a gesture and classify it.
    ///
    /// A mouse-up without a drag in progress is ignored and leaves any touch
    /// gesture untouched. Every other end resets the gesture state.
    pub fn end(
        &self,
        state: &mut GestureState,
        kind: PointerKind,
        point: Option<Point>,
    ) -> GestureOutcome {
        if kind == PointerKind::Mouse && !state.dragging {
            return GestureOutcome::Inert;
        }
        let origin = state.origin;
        state.reset();

        let (Some(origin), Some(point)) = (origin, point) else {
            return GestureOutcome::Inert;
        };
        let diff_x = origin.x - point.x;
        if diff_x.abs() <= self.threshold {
            GestureOutcome::Tap
        } else if diff_x > 0.0 {
            GestureOutcome::Swipe(SwipeDirection::Forward)
        } else {
            GestureOutcome::Swipe(SwipeDirection::Backward)
        }
    }

    /// Abandon the current gesture without navigating.
    pub fn cancel(&self, state: &mut GestureState) {
        state.reset();
    }
}

//! Rendering adapter boundary.
//!
//! The router never touches the page. It reads layout through [`Layout`] and
//! describes every visual side effect as a [`RenderIntent`]; a [`Surface`]
//! applies those intents to whatever actually draws (the DOM in a browser,
//! [`crate::headless::HeadlessSurface`] in tests and the `simulate` command).
//!
//! Both animation paths are expressed as data: a tween when an animation
//! driver is loaded, otherwise a direct style assignment that relies on the
//! container's CSS transition. Either way the end state is identical.

use crate::section::Section;
use crate::types::{HistoryState, IndicatorBounds, Rect};
use serde::{Deserialize, Serialize};

/// How the slider container moves to its new offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TransformMotion {
    /// Animation driver tween.
    Tween { duration_ms: u64, easing: String },
    /// Direct `transform` assignment, animated by this CSS transition.
    CssTransition { transition: String },
    /// Immediate placement with transitions suppressed.
    Snap,
}

/// How the indicator moves to its new bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IndicatorMotion {
    Tween { duration_s: f64, easing: String },
    Immediate,
}

/// A single visual or history side effect requested by the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum RenderIntent {
    /// Translate the slider container so that `section` fills the viewport.
    Transform {
        section: Section,
        offset_px: f64,
        motion: TransformMotion,
    },
    /// Toggle the active styling of one tab.
    TabState { section: Section, active: bool },
    /// Move the indicator under the active tab.
    Indicator {
        bounds: IndicatorBounds,
        motion: IndicatorMotion,
    },
    /// Push a session history entry.
    PushHistory { path: String, state: HistoryState },
    /// Replace the document title.
    SetTitle { title: String },
}

/// Read-only view of the page the router needs to make decisions.
///
/// Every query tolerates missing elements: `false`, `None`, or zero.
pub trait Layout {
    /// Width of one section, in CSS pixels.
    fn viewport_width(&self) -> f64;

    /// Whether the slider container exists.
    fn has_container(&self) -> bool;

    /// Whether the indicator element exists.
    fn has_indicator(&self) -> bool;

    /// Bounding box of the tab bound to `section`, if that tab exists.
    fn tab_rect(&self, section: Section) -> Option<Rect>;

    /// Bounding box of the element containing the tabs.
    fn tab_strip_rect(&self) -> Option<Rect>;

    /// Whether the animation driver is loaded right now.
    fn tween_available(&self) -> bool;
}

/// A layout that can also apply intents.
pub trait Surface: Layout {
    fn apply(&mut self, intent: &RenderIntent);
}

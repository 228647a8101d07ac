//! Shared geometry and history types.
//!
//! These types cross the boundary between the router and its rendering
//! adapter, and are serialized into session scripts and the intent trace,
//! so they must stay identical on both sides.

use serde::{Deserialize, Serialize};

/// A screen coordinate in CSS pixels, as reported by pointer and touch events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box as returned by `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A zero-width box means the element exists but has not been laid out yet.
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0
    }
}

/// Horizontal placement of the tab indicator, relative to the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBounds {
    pub left: f64,
    pub width: f64,
}

impl IndicatorBounds {
    /// Measure a tab against its container.
    ///
    /// Returns `None` while the tab has no layout (zero width).
    pub fn measure(tab: Rect, container: Rect) -> Option<Self> {
        if !tab.is_laid_out() {
            return None;
        }
        Some(Self {
            left: tab.left - container.left,
            width: tab.width,
        })
    }
}

/// State object attached to every pushed history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Ordinal of the section the entry points at.
    pub section: usize,
}

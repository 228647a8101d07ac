//! Shared test utilities for the router test suite.
//!
//! Provides a standard two-tab page, event builders for keys and gestures,
//! and intent assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut el = gallery_loop();
//! for event in touch_swipe(600.0, 500.0) {
//!     el.dispatch(event);
//! }
//! assert_eq!(el.router().current(), Section::ABOUT);
//! ```
//!
//! Standard geometry (viewport 1280px):
//!
//! ```text
//! strip  left 20  width 180
//! tab 0  left 20  width 96    → indicator left 0,  width 96
//! tab 1  left 116 width 84    → indicator left 96, width 84
//! ```

use crate::config::RouterConfig;
use crate::event_loop::EventLoop;
use crate::gesture::{PointerKind, TargetKind};
use crate::headless::{HeadlessLayout, HeadlessSurface};
use crate::render::RenderIntent;
use crate::router::{GesturePhase, Key, PointerEvent, RouterEvent, SectionRouter};
use crate::types::Point;

// =========================================================================
// Pages
// =========================================================================

/// Headless page at `/` with the standard two-tab geometry.
pub fn two_tab_surface() -> HeadlessSurface {
    HeadlessSurface::new(HeadlessLayout::default(), "/", "DOMAIN KING")
}

/// Mounted event loop on the Gallery section with stock config.
pub fn gallery_loop() -> EventLoop<HeadlessSurface> {
    let router = SectionRouter::new(&RouterConfig::default(), "/").unwrap();
    EventLoop::new(router, two_tab_surface())
}

// =========================================================================
// Event builders
// =========================================================================

pub fn key(key: Key) -> RouterEvent {
    RouterEvent::Key { key }
}

pub fn pointer(phase: GesturePhase, kind: PointerKind, x: f64, y: f64) -> RouterEvent {
    RouterEvent::Pointer(PointerEvent {
        phase,
        kind,
        point: Some(Point::new(x, y)),
        target: TargetKind::Plain,
    })
}

/// Touch start at `(from_x, 300)`, a horizontal move, touch end at `(to_x, 300)`.
pub fn touch_swipe(from_x: f64, to_x: f64) -> Vec<RouterEvent> {
    gesture(PointerKind::Touch, from_x, to_x)
}

/// Mouse down, move, and up along the same line as [`touch_swipe`].
pub fn mouse_drag(from_x: f64, to_x: f64) -> Vec<RouterEvent> {
    gesture(PointerKind::Mouse, from_x, to_x)
}

fn gesture(kind: PointerKind, from_x: f64, to_x: f64) -> Vec<RouterEvent> {
    vec![
        pointer(GesturePhase::Start, kind, from_x, 300.0),
        pointer(GesturePhase::Move, kind, (from_x + to_x) / 2.0, 302.0),
        pointer(GesturePhase::End, kind, to_x, 300.0),
    ]
}

// =========================================================================
// Assertions
// =========================================================================

pub fn has_history_push(intents: &[RenderIntent]) -> bool {
    intents
        .iter()
        .any(|i| matches!(i, RenderIntent::PushHistory { .. }))
}

//! # Domain King
//!
//! Section router for the Domain King portfolio: a single-page slider with a
//! Gallery pane and an About pane, navigated by tab clicks, arrow keys, mouse
//! drags, and touch swipes, with an animated tab indicator and session
//! history integration.
//!
//! # Architecture: State Machine + Rendering Adapter
//!
//! ```text
//! input event ─▶ SectionRouter ─▶ Reaction ─▶ Surface (DOM / headless)
//!                     ▲              │
//!                     │              └─ timers ─▶ EventLoop ─┐
//!                     └──────────── timer fired ◀────────────┘
//! ```
//!
//! The router never touches the page. It reads geometry through
//! [`render::Layout`] and answers every event with data: render intents,
//! timers, and a move verdict. This keeps three concerns apart:
//!
//! - **Decisions** live in [`router`], [`gesture`], and [`indicator`], and are
//!   unit-tested without a DOM.
//! - **Effects** are applied by a [`render::Surface`]; the crate ships
//!   [`headless::HeadlessSurface`] for tests and simulation.
//! - **Time** is owned by [`event_loop::EventLoop`], a single-threaded loop
//!   with a virtual clock, so lock windows and deferrals are deterministic.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`router`] | Section state machine: transition lock, triggers, history |
//! | [`gesture`] | Touch/mouse gesture classifier (tap vs directional swipe) |
//! | [`indicator`] | Tab indicator measurement with deferred first sync |
//! | [`readiness`] | Bounded wait for the animation driver |
//! | [`render`] | Render intents and the `Layout`/`Surface` adapter traits |
//! | [`headless`] | In-memory surface with session history |
//! | [`event_loop`] | Virtual-time event loop and activity trace |
//! | [`session`] | JSON session scripts replayed by `simulate` |
//! | [`shell`] | HTML page shell implementing the DOM contract |
//! | [`config`] | `router.toml` loading, validation, and merging |
//! | [`section`] | Section ordinals, specs, and path resolution |
//! | [`types`] | Shared geometry and history types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Owner, No Locks
//!
//! All navigation state sits in one [`router::SectionRouter`] mutated through
//! `&mut self` from a single loop. There is no global instance: whoever
//! composes the page constructs the router and hands it to the loop.
//!
//! ## Fixed Lock, Not Animation Completion
//!
//! A section change holds the transition lock for the configured duration,
//! regardless of how the animation actually runs. Requests during the lock
//! are dropped rather than queued, so rapid input cannot pile up transitions.
//!
//! ## Two Animation Paths, One End State
//!
//! When the animation driver is loaded, intents ask for a tween; otherwise a
//! direct style assignment rides the container's CSS transition. Driver
//! presence is checked on every call. Both paths end with the same section
//! fully in view and the indicator under the same tab.

pub mod config;
pub mod event_loop;
pub mod gesture;
pub mod headless;
pub mod indicator;
pub mod output;
pub mod readiness;
pub mod render;
pub mod router;
pub mod section;
pub mod session;
pub mod shell;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

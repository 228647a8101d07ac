//! Scripted input sessions.
//!
//! A session is a JSON document describing a page load and a sequence of
//! steps to replay against a headless surface:
//!
//! ```json
//! {
//!   "path": "/",
//!   "layout": { "viewport_width": 1280, "tween": false },
//!   "steps": [
//!     { "event": { "type": "key", "key": "arrow_right" } },
//!     { "advance_ms": 800 },
//!     { "event": { "type": "pointer", "phase": "start", "kind": "touch",
//!                  "point": { "x": 400, "y": 300 } } },
//!     { "event": { "type": "pointer", "phase": "end", "kind": "touch",
//!                  "point": { "x": 460, "y": 300 } } },
//!     "back",
//!     { "layout": { "viewport_width": 800 } },
//!     { "event": { "type": "resize" } }
//!   ]
//! }
//! ```
//!
//! Running a session yields the full activity trace plus the final page
//! state, which the `simulate` command prints.

use crate::config::{ConfigError, RouterConfig};
use crate::event_loop::{EventLoop, TraceEntry};
use crate::headless::{HeadlessLayout, HeadlessSurface};
use crate::router::{RouterEvent, SectionRouter};
use crate::section::Section;
use crate::types::IndicatorBounds;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A replayable page session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    /// Location path at page load.
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub layout: HeadlessLayout,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_path() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Deliver an input event.
    Event(RouterEvent),
    /// Let virtual time pass.
    AdvanceMs(u64),
    /// Browser back button, written as the bare string `"back"`.
    Back,
    /// Browser forward button, written as `"forward"`.
    Forward,
    /// Replace the page geometry (follow with a `resize` event to notify the router).
    Layout(HeadlessLayout),
}

/// Final state after a session has run to idle.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub trace: Vec<TraceEntry>,
    pub section: Section,
    pub section_in_view: Option<Section>,
    pub path: String,
    pub title: String,
    pub history_len: usize,
    pub indicator: Option<IndicatorBounds>,
    pub elapsed_ms: u64,
}

/// Read a session script from disk.
pub fn load_session(path: &Path) -> Result<Session, SessionError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Replay `session` under `config`, then drain all pending timers.
pub fn run_session(config: &RouterConfig, session: &Session) -> Result<SessionReport, SessionError> {
    let router = SectionRouter::new(config, &session.path)?;
    let initial_title = router
        .sections()
        .get(router.current())
        .map(|spec| spec.title.clone())
        .unwrap_or_default();
    let surface = HeadlessSurface::new(session.layout.clone(), &session.path, &initial_title);
    let mut event_loop = EventLoop::new(router, surface);

    for step in &session.steps {
        match step {
            Step::Event(event) => {
                event_loop.dispatch(event.clone());
            }
            Step::AdvanceMs(ms) => event_loop.advance(Duration::from_millis(*ms)),
            Step::Back => {
                event_loop.back();
            }
            Step::Forward => {
                event_loop.forward();
            }
            Step::Layout(layout) => event_loop.surface_mut().relayout(layout.clone()),
        }
    }
    event_loop.run_until_idle();

    let surface = event_loop.surface();
    Ok(SessionReport {
        trace: event_loop.trace().to_vec(),
        section: event_loop.router().current(),
        section_in_view: surface.section_in_view(),
        path: surface.path().to_string(),
        title: surface.title.clone(),
        history_len: surface.history_len(),
        indicator: surface.indicator.as_ref().map(|i| i.bounds),
        elapsed_ms: event_loop.now().as_millis() as u64,
    })
}

//! In-memory page model implementing [`Surface`].
//!
//! `HeadlessSurface` stands in for the browser: it answers layout queries
//! from a scripted [`HeadlessLayout`], applies render intents to a small
//! model of the page (container offset, tab classes, indicator box, title),
//! and keeps a session history with a cursor, so back/forward behave like
//! the real thing.

use crate::render::{IndicatorMotion, Layout, RenderIntent, Surface, TransformMotion};
use crate::section::Section;
use crate::types::{HistoryState, IndicatorBounds, Rect};
use serde::{Deserialize, Serialize};

/// Scripted page geometry and capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadlessLayout {
    pub viewport_width: f64,
    /// Whether `#seamless-slider` exists.
    pub container: bool,
    /// Whether `.slider-indicator` exists.
    pub indicator: bool,
    /// One rect per tab, in section order.
    pub tabs: Vec<Rect>,
    pub tab_strip: Option<Rect>,
    /// Whether the animation driver is loaded.
    pub tween: bool,
}

impl Default for HeadlessLayout {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            container: true,
            indicator: true,
            tabs: vec![
                Rect::new(20.0, 10.0, 96.0, 36.0),
                Rect::new(116.0, 10.0, 84.0, 36.0),
            ],
            tab_strip: Some(Rect::new(20.0, 10.0, 180.0, 36.0)),
            tween: false,
        }
    }
}

/// One session history entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub path: String,
    pub state: Option<HistoryState>,
}

/// Applied visual state of the slider container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerState {
    pub offset_px: f64,
    /// The CSS transition in effect when the offset was assigned, if any.
    pub transition: Option<String>,
    pub tweened: bool,
}

/// Applied visual state of the indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorState {
    pub bounds: IndicatorBounds,
    pub tweened: bool,
}

#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    pub layout: HeadlessLayout,
    pub container: Option<ContainerState>,
    pub indicator: Option<IndicatorState>,
    /// Active flag per tab; absent until the router first styles that tab.
    pub active_tabs: Vec<Option<bool>>,
    pub title: String,
    history: Vec<HistoryEntry>,
    cursor: usize,
}

impl HeadlessSurface {
    /// A page loaded at `path` with a single history entry.
    pub fn new(layout: HeadlessLayout, path: &str, title: &str) -> Self {
        let tab_count = layout.tabs.len();
        Self {
            layout,
            container: None,
            indicator: None,
            active_tabs: vec![None; tab_count],
            title: title.to_string(),
            history: vec![HistoryEntry {
                path: path.to_string(),
                state: None,
            }],
            cursor: 0,
        }
    }

    /// Current location path.
    pub fn path(&self) -> &str {
        &self.history[self.cursor].path
    }

    /// Number of entries in the session history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Move the cursor back one entry, returning the new path.
    pub fn go_back(&mut self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.path().to_string())
    }

    /// Move the cursor forward one entry, returning the new path.
    pub fn go_forward(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.history.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.path().to_string())
    }

    /// Sections whose tab is currently styled active.
    pub fn active_sections(&self) -> Vec<Section> {
        self.active_tabs
            .iter()
            .enumerate()
            .filter(|(_, active)| **active == Some(true))
            .map(|(i, _)| Section::new(i))
            .collect()
    }

    /// Which section fills the viewport, judged from the container offset.
    pub fn section_in_view(&self) -> Option<Section> {
        let container = self.container.as_ref()?;
        if self.layout.viewport_width <= 0.0 {
            return None;
        }
        let index = -container.offset_px / self.layout.viewport_width;
        if index < 0.0 || index.fract() != 0.0 {
            return None;
        }
        Some(Section::new(index as usize))
    }

    /// Replace the layout, keeping applied state and history.
    pub fn relayout(&mut self, layout: HeadlessLayout) {
        self.active_tabs.resize(layout.tabs.len(), None);
        self.layout = layout;
    }
}

impl Layout for HeadlessSurface {
    fn viewport_width(&self) -> f64 {
        self.layout.viewport_width
    }

    fn has_container(&self) -> bool {
        self.layout.container
    }

    fn has_indicator(&self) -> bool {
        self.layout.indicator
    }

    fn tab_rect(&self, section: Section) -> Option<Rect> {
        self.layout.tabs.get(section.index()).copied()
    }

    fn tab_strip_rect(&self) -> Option<Rect> {
        self.layout.tab_strip
    }

    fn tween_available(&self) -> bool {
        self.layout.tween
    }
}

impl Surface for HeadlessSurface {
    fn apply(&mut self, intent: &RenderIntent) {
        match intent {
            RenderIntent::Transform {
                offset_px, motion, ..
            } => {
                let (transition, tweened) = match motion {
                    TransformMotion::Tween { .. } => (None, true),
                    TransformMotion::CssTransition { transition } => {
                        (Some(transition.clone()), false)
                    }
                    TransformMotion::Snap => (None, false),
                };
                self.container = Some(ContainerState {
                    offset_px: *offset_px,
                    transition,
                    tweened,
                });
            }
            RenderIntent::TabState { section, active } => {
                if let Some(slot) = self.active_tabs.get_mut(section.index()) {
                    *slot = Some(*active);
                }
            }
            RenderIntent::Indicator { bounds, motion } => {
                self.indicator = Some(IndicatorState {
                    bounds: *bounds,
                    tweened: matches!(motion, IndicatorMotion::Tween { .. }),
                });
            }
            RenderIntent::PushHistory { path, state } => {
                self.history.truncate(self.cursor + 1);
                self.history.push(HistoryEntry {
                    path: path.clone(),
                    state: Some(*state),
                });
                self.cursor += 1;
            }
            RenderIntent::SetTitle { title } => {
                self.title = title.clone();
            }
        }
    }
}

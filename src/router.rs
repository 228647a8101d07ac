//! The section router state machine.
//!
//! [`SectionRouter`] owns all navigation state: the current section, the
//! transition lock, and the in-flight gesture. It consumes [`RouterEvent`]s
//! and answers each one with a [`Reaction`]: render intents for the surface,
//! timers for the event loop, and, for pointer moves, whether the browser
//! default should be suppressed.
//!
//! ## States
//!
//! ```text
//!            request_section(target)            Unlock timer
//!   idle ───────────────────────────▶ transitioning ─────────▶ idle
//!    ▲          (target != current)        │
//!    │                                     │ further requests: dropped
//!    └─────────────────────────────────────┘
//! ```
//!
//! The lock is held for a fixed duration (the configured transition length),
//! not until the animation reports completion. Requests arriving while it is
//! held are dropped, never queued.
//!
//! ## Triggers
//!
//! | Event | Target | History |
//! |-------|--------|---------|
//! | tab activation | the tab's section | pushed |
//! | ArrowLeft / ArrowRight | previous / next section | pushed |
//! | swipe forward / backward | next / previous section | pushed |
//! | back / forward (popstate) | section of the new path | never pushed |

use crate::config::{AnimationBackend, ConfigError, RouterConfig};
use crate::gesture::{
    GestureClassifier, GestureOutcome, GestureState, MoveVerdict, PointerKind, SwipeDirection,
    TargetKind,
};
use crate::indicator::{IndicatorStep, IndicatorSync};
use crate::readiness::{AnimationReadiness, Readiness, ReadinessPoll};
use crate::render::{IndicatorMotion, Layout, RenderIntent, TransformMotion};
use crate::section::{Section, SectionTable};
use crate::types::{HistoryState, Point};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Keys the router listens to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    #[serde(other)]
    Other,
}

/// Phase of a pointer or touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A touch or mouse event on the slider container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: GesturePhase,
    pub kind: PointerKind,
    /// Client coordinates; `None` for an empty touch list.
    #[serde(default)]
    pub point: Option<Point>,
    #[serde(default)]
    pub target: TargetKind,
}

/// Timers the router asks the event loop to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timer {
    /// Release the transition lock.
    Unlock,
    /// Retry an indicator sync that could not measure the tabs.
    IndicatorResync,
    /// Check whether the animation driver has loaded.
    ReadinessPoll,
}

/// Everything the router reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouterEvent {
    TabActivated { section: Section },
    Key { key: Key },
    Pointer(PointerEvent),
    /// Back/forward navigation landed on `path`.
    PopState { path: String },
    Resize,
    Timer { timer: Timer },
}

/// The router's answer to one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    pub intents: Vec<RenderIntent>,
    pub timers: Vec<(Timer, Duration)>,
    /// Set for pointer moves only.
    pub verdict: Option<MoveVerdict>,
}

impl Reaction {
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty() && self.timers.is_empty() && self.verdict.is_none()
    }
}

/// Mutable navigation state. Only the router writes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterState {
    pub current: Section,
    pub is_animating: bool,
    pub gesture: GestureState,
}

impl RouterState {
    pub fn pointer_origin(&self) -> Option<Point> {
        self.gesture.origin
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.dragging
    }
}

#[derive(Debug, Clone)]
pub struct SectionRouter {
    config: RouterConfig,
    sections: SectionTable,
    state: RouterState,
    classifier: GestureClassifier,
    indicator: IndicatorSync,
    readiness: Option<AnimationReadiness>,
    /// A resize arrived mid-transition; re-place everything on unlock.
    resize_pending: bool,
}

impl SectionRouter {
    /// Build a router whose initial section is resolved from `initial_path`.
    ///
    /// Nothing is rendered until [`SectionRouter::mount`] is called.
    pub fn new(config: &RouterConfig, initial_path: &str) -> Result<Self, ConfigError> {
        let sections = config.section_table()?;
        let current = sections.resolve_path(initial_path);
        let readiness = (config.animation.backend == AnimationBackend::Tween).then(|| {
            AnimationReadiness::new(
                Duration::from_millis(config.animation.readiness_timeout_ms),
                Duration::from_millis(config.animation.readiness_poll_ms),
            )
        });
        debug!(path = initial_path, %current, "router created");
        Ok(Self {
            classifier: GestureClassifier::new(config.gesture.threshold),
            indicator: IndicatorSync::new(
                Duration::from_millis(config.indicator.defer_ms),
                config.indicator.max_deferrals,
            ),
            config: config.clone(),
            sections,
            state: RouterState {
                current,
                is_animating: false,
                gesture: GestureState::default(),
            },
            readiness,
            resize_pending: false,
        })
    }

    pub fn current(&self) -> Section {
        self.state.current
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn sections(&self) -> &SectionTable {
        &self.sections
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Readiness of the animation driver, when the `tween` backend waits for it.
    pub fn readiness(&self) -> Option<Readiness> {
        self.readiness.as_ref().map(AnimationReadiness::state)
    }

    /// Place the initial section without animation and sync the tabs.
    ///
    /// Never touches history: the initial section already matches the path.
    pub fn mount(&mut self, layout: &dyn Layout) -> Reaction {
        let mut reaction = Reaction::default();
        if let Some(readiness) = self.readiness.as_mut() {
            if let ReadinessPoll::Retry(delay) = readiness.poll(layout.tween_available()) {
                reaction.timers.push((Timer::ReadinessPoll, delay));
            }
        }
        self.push_transform(layout, false, &mut reaction);
        self.push_tab_states(layout, &mut reaction);
        self.push_indicator(layout, &mut reaction);
        reaction
    }

    /// Move to `target`.
    ///
    /// No-op when `target` is already shown, when a transition is in flight,
    /// or when `target` is not a configured section.
    pub fn request_section(
        &mut self,
        target: Section,
        record_history: bool,
        layout: &dyn Layout,
    ) -> Reaction {
        if target == self.state.current {
            trace!(%target, "already on section");
            return Reaction::default();
        }
        if self.state.is_animating {
            debug!(%target, "transition in flight, request dropped");
            return Reaction::default();
        }
        let Some(spec) = self.sections.get(target) else {
            debug!(%target, "unknown section, request dropped");
            return Reaction::default();
        };
        let (path, title) = (spec.path.clone(), spec.title.clone());

        info!(from = %self.state.current, to = %target, record_history, "section change");
        self.state.is_animating = true;
        self.state.current = target;

        let mut reaction = Reaction::default();
        self.push_transform(layout, true, &mut reaction);
        if record_history && self.config.history.enabled {
            reaction.intents.push(RenderIntent::PushHistory {
                path,
                state: HistoryState {
                    section: target.index(),
                },
            });
            reaction.intents.push(RenderIntent::SetTitle { title });
        }
        self.push_tab_states(layout, &mut reaction);
        self.push_indicator(layout, &mut reaction);
        reaction
            .timers
            .push((Timer::Unlock, self.config.transition.duration()));
        reaction
    }

    /// React to one event.
    pub fn handle(&mut self, event: &RouterEvent, layout: &dyn Layout) -> Reaction {
        match event {
            RouterEvent::TabActivated { section } => self.request_section(*section, true, layout),
            RouterEvent::Key { key } => match key {
                Key::ArrowLeft => {
                    let target = self.sections.previous(self.state.current);
                    self.request_section(target, true, layout)
                }
                Key::ArrowRight => {
                    let target = self.sections.next(self.state.current);
                    self.request_section(target, true, layout)
                }
                Key::Other => Reaction::default(),
            },
            RouterEvent::Pointer(pointer) => self.handle_pointer(pointer, layout),
            RouterEvent::PopState { path } => {
                let target = self.sections.resolve_path(path);
                self.request_section(target, false, layout)
            }
            RouterEvent::Resize => self.handle_resize(layout),
            RouterEvent::Timer { timer } => self.handle_timer(*timer, layout),
        }
    }

    fn handle_pointer(&mut self, pointer: &PointerEvent, layout: &dyn Layout) -> Reaction {
        let gesture = &mut self.state.gesture;
        match pointer.phase {
            GesturePhase::Start => {
                self.classifier
                    .start(gesture, pointer.kind, pointer.point, pointer.target);
                Reaction::default()
            }
            GesturePhase::Move => Reaction {
                verdict: Some(self.classifier.moved(gesture, pointer.kind, pointer.point)),
                ..Reaction::default()
            },
            GesturePhase::Cancel => {
                self.classifier.cancel(gesture);
                Reaction::default()
            }
            GesturePhase::End => {
                match self.classifier.end(gesture, pointer.kind, pointer.point) {
                    GestureOutcome::Swipe(direction) => {
                        let target = match direction {
                            SwipeDirection::Forward => self.sections.next(self.state.current),
                            SwipeDirection::Backward => {
                                self.sections.previous(self.state.current)
                            }
                        };
                        debug!(?direction, %target, "swipe");
                        self.request_section(target, true, layout)
                    }
                    GestureOutcome::Tap | GestureOutcome::Inert => Reaction::default(),
                }
            }
        }
    }

    fn handle_resize(&mut self, layout: &dyn Layout) -> Reaction {
        let mut reaction = Reaction::default();
        if self.state.is_animating {
            self.resize_pending = true;
            return reaction;
        }
        self.push_transform(layout, false, &mut reaction);
        self.push_indicator(layout, &mut reaction);
        reaction
    }

    fn handle_timer(&mut self, timer: Timer, layout: &dyn Layout) -> Reaction {
        let mut reaction = Reaction::default();
        match timer {
            Timer::Unlock => {
                if !self.state.is_animating {
                    return reaction;
                }
                self.state.is_animating = false;
                debug!(section = %self.state.current, "transition unlocked");
                if std::mem::take(&mut self.resize_pending) {
                    self.push_transform(layout, false, &mut reaction);
                    self.push_indicator(layout, &mut reaction);
                }
            }
            Timer::IndicatorResync => {
                self.indicator.resync_fired();
                self.push_indicator(layout, &mut reaction);
            }
            Timer::ReadinessPoll => {
                if let Some(readiness) = self.readiness.as_mut() {
                    if let ReadinessPoll::Retry(delay) = readiness.poll(layout.tween_available()) {
                        reaction.timers.push((Timer::ReadinessPoll, delay));
                    }
                }
            }
        }
        reaction
    }

    /// Whether the tween path is usable right now. Never cached.
    fn tween_usable(&self, layout: &dyn Layout) -> bool {
        match self.config.animation.backend {
            AnimationBackend::Css => false,
            AnimationBackend::Auto => layout.tween_available(),
            AnimationBackend::Tween => {
                let timed_out = self
                    .readiness
                    .as_ref()
                    .is_some_and(AnimationReadiness::is_timed_out);
                !timed_out && layout.tween_available()
            }
        }
    }

    fn push_transform(&self, layout: &dyn Layout, animate: bool, reaction: &mut Reaction) {
        if !layout.has_container() {
            return;
        }
        let section = self.state.current;
        let motion = if !animate {
            TransformMotion::Snap
        } else if self.tween_usable(layout) {
            TransformMotion::Tween {
                duration_ms: self.config.transition.duration_ms,
                easing: self.config.transition.tween_easing.clone(),
            }
        } else {
            TransformMotion::CssTransition {
                transition: self.config.transition.css.clone(),
            }
        };
        reaction.intents.push(RenderIntent::Transform {
            section,
            offset_px: -(section.index() as f64) * layout.viewport_width(),
            motion,
        });
    }

    fn push_tab_states(&self, layout: &dyn Layout, reaction: &mut Reaction) {
        for (section, _) in self.sections.iter() {
            if layout.tab_rect(section).is_none() {
                continue;
            }
            reaction.intents.push(RenderIntent::TabState {
                section,
                active: section == self.state.current,
            });
        }
    }

    fn push_indicator(&mut self, layout: &dyn Layout, reaction: &mut Reaction) {
        match self.indicator.plan(layout, self.state.current) {
            IndicatorStep::Apply(bounds) => {
                let motion = if self.tween_usable(layout) {
                    IndicatorMotion::Tween {
                        duration_s: self.config.indicator.tween_duration_s,
                        easing: self.config.indicator.easing.clone(),
                    }
                } else {
                    IndicatorMotion::Immediate
                };
                reaction
                    .intents
                    .push(RenderIntent::Indicator { bounds, motion });
            }
            IndicatorStep::Defer(delay) => {
                reaction.timers.push((Timer::IndicatorResync, delay));
            }
            IndicatorStep::Skip => {}
        }
    }
}

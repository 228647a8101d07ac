//! Cooperative single-threaded event loop with a virtual clock.
//!
//! The loop owns the router and the surface. Input events are dispatched
//! immediately; the router's reactions are applied to the surface in order,
//! and any timers it requests are queued against the virtual clock.
//! [`EventLoop::advance`] moves the clock forward, firing due timers in
//! deadline order (ties fire in scheduling order).
//!
//! Nothing blocks and nothing is cancelled: an unlock timer, once scheduled,
//! always fires at its deadline.

use crate::gesture::MoveVerdict;
use crate::headless::HeadlessSurface;
use crate::render::{RenderIntent, Surface};
use crate::router::{Reaction, RouterEvent, SectionRouter, Timer};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;
use tracing::trace;

/// One line of the loop's activity log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub kind: TraceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceKind {
    Input { event: RouterEvent },
    Fired { timer: Timer },
    Applied { intent: RenderIntent },
    Verdict { verdict: MoveVerdict },
}

pub struct EventLoop<S: Surface> {
    router: SectionRouter,
    surface: S,
    now: Duration,
    seq: u64,
    timers: BinaryHeap<Reverse<(Duration, u64, Timer)>>,
    trace: Vec<TraceEntry>,
}

impl<S: Surface> EventLoop<S> {
    /// Take ownership of both halves and mount the router.
    pub fn new(mut router: SectionRouter, mut surface: S) -> Self {
        let reaction = router.mount(&surface);
        for intent in &reaction.intents {
            surface.apply(intent);
        }
        let mut event_loop = Self {
            router,
            surface,
            now: Duration::ZERO,
            seq: 0,
            timers: BinaryHeap::new(),
            trace: Vec::new(),
        };
        event_loop.record_reaction(reaction);
        event_loop
    }

    pub fn router(&self) -> &SectionRouter {
        &self.router
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Number of timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Deliver an input event now. Returns the move verdict, if any.
    pub fn dispatch(&mut self, event: RouterEvent) -> Option<MoveVerdict> {
        let reaction = self.router.handle(&event, &self.surface);
        self.push_trace(TraceKind::Input { event });
        let verdict = reaction.verdict;
        self.apply(reaction);
        verdict
    }

    /// Move the clock forward by `by`, firing every timer that comes due.
    pub fn advance(&mut self, by: Duration) {
        let until = self.now + by;
        while let Some(Reverse((deadline, _, _))) = self.timers.peek() {
            if *deadline > until {
                break;
            }
            let Some(Reverse((deadline, _, timer))) = self.timers.pop() else {
                break;
            };
            self.now = deadline;
            trace!(?timer, at_ms = self.now.as_millis() as u64, "timer fired");
            self.push_trace(TraceKind::Fired { timer });
            let reaction = self.router.handle(&RouterEvent::Timer { timer }, &self.surface);
            self.apply(reaction);
        }
        self.now = until;
    }

    /// Fire timers until none remain.
    pub fn run_until_idle(&mut self) {
        while let Some(Reverse((deadline, _, _))) = self.timers.peek() {
            let by = deadline.saturating_sub(self.now);
            self.advance(by);
        }
    }

    fn apply(&mut self, reaction: Reaction) {
        for intent in &reaction.intents {
            self.surface.apply(intent);
        }
        self.record_reaction(reaction);
    }

    fn record_reaction(&mut self, reaction: Reaction) {
        for intent in reaction.intents {
            self.push_trace(TraceKind::Applied { intent });
        }
        if let Some(verdict) = reaction.verdict {
            self.push_trace(TraceKind::Verdict { verdict });
        }
        for (timer, after) in reaction.timers {
            self.seq += 1;
            self.timers.push(Reverse((self.now + after, self.seq, timer)));
        }
    }

    fn push_trace(&mut self, kind: TraceKind) {
        self.trace.push(TraceEntry {
            at_ms: self.now.as_millis() as u64,
            kind,
        });
    }
}

impl EventLoop<HeadlessSurface> {
    /// Browser back button: move the history cursor and deliver `popstate`.
    pub fn back(&mut self) -> bool {
        match self.surface.go_back() {
            Some(path) => {
                self.dispatch(RouterEvent::PopState { path });
                true
            }
            None => false,
        }
    }

    /// Browser forward button.
    pub fn forward(&mut self) -> bool {
        match self.surface.go_forward() {
            Some(path) => {
                self.dispatch(RouterEvent::PopState { path });
                true
            }
            None => false,
        }
    }
}

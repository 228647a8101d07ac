//! Bounded wait for the animation driver.
//!
//! The tween library may be loaded asynchronously after the router mounts.
//! Rather than retrying a magic number of times, readiness is an explicit
//! state with a deadline: the router polls at a fixed interval until the
//! driver shows up ([`Readiness::Ready`]) or the timeout elapses
//! ([`Readiness::TimedOut`]). Once timed out, the router stays on the CSS
//! path for the rest of the page view even if the driver loads later.

use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Readiness {
    Pending { waited_ms: u64 },
    Ready,
    TimedOut,
}

/// Result of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessPoll {
    Ready,
    TimedOut,
    /// Poll again after this delay.
    Retry(Duration),
}

#[derive(Debug, Clone)]
pub struct AnimationReadiness {
    timeout: Duration,
    interval: Duration,
    waited: Duration,
    state: Readiness,
}

impl AnimationReadiness {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self {
            timeout,
            interval,
            waited: Duration::ZERO,
            state: Readiness::Pending { waited_ms: 0 },
        }
    }

    pub fn state(&self) -> Readiness {
        self.state
    }

    pub fn is_timed_out(&self) -> bool {
        self.state == Readiness::TimedOut
    }

    /// Record one observation of driver availability.
    ///
    /// The first call happens at mount time; each `Retry` asks the caller to
    /// call again after the returned delay. Polling a settled wait returns
    /// the settled result.
    pub fn poll(&mut self, available: bool) -> ReadinessPoll {
        match self.state {
            Readiness::Ready => return ReadinessPoll::Ready,
            Readiness::TimedOut => return ReadinessPoll::TimedOut,
            Readiness::Pending { .. } => {}
        }
        if available {
            info!(
                waited_ms = self.waited.as_millis() as u64,
                "animation driver ready"
            );
            self.state = Readiness::Ready;
            return ReadinessPoll::Ready;
        }
        if self.waited >= self.timeout {
            warn!(
                timeout_ms = self.timeout.as_millis() as u64,
                "animation driver did not load, using CSS transitions"
            );
            self.state = Readiness::TimedOut;
            return ReadinessPoll::TimedOut;
        }
        let delay = self.interval.min(self.timeout - self.waited);
        self.waited += delay;
        self.state = Readiness::Pending {
            waited_ms: self.waited.as_millis() as u64,
        };
        ReadinessPoll::Retry(delay)
    }
}

//! Cancellable grace period armed by battery depletion

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraceState {
    Idle,
    Armed { remaining: f64 },
    /// Elapsed, but not yet delivered. A disarm still cancels it.
    Expired,
}

/// Single-shot countdown
///
/// Expiry is two-phase: [`advance`](Self::advance) marks the countdown as
/// expired and [`take_expired`](Self::take_expired) delivers it. Anything
/// processed between the two (a restoration on the same tick) can still
/// cancel with [`disarm`](Self::disarm).
#[derive(Debug, Clone)]
pub struct GracePeriod {
    state: GraceState,
}

impl GracePeriod {
    pub fn new() -> Self {
        Self {
            state: GraceState::Idle,
        }
    }

    /// Armed or expired-but-undelivered
    pub fn is_armed(&self) -> bool {
        !matches!(self.state, GraceState::Idle)
    }

    pub fn remaining(&self) -> Option<f64> {
        match self.state {
            GraceState::Armed { remaining } => Some(remaining),
            GraceState::Expired => Some(0.0),
            GraceState::Idle => None,
        }
    }

    /// Start the countdown, replacing any previous one.
    /// Returns true if an earlier countdown was discarded.
    pub fn arm(&mut self, duration: f64) -> bool {
        let replaced = self.is_armed();
        if replaced {
            debug!("Grace period re-armed, previous countdown discarded");
        }
        self.state = GraceState::Armed {
            remaining: duration.max(0.0),
        };
        replaced
    }

    /// Cancel the countdown. Returns true if there was one to cancel.
    pub fn disarm(&mut self) -> bool {
        let was_armed = self.is_armed();
        self.state = GraceState::Idle;
        was_armed
    }

    /// Count down by `dt`
    pub fn advance(&mut self, dt: f64) {
        if let GraceState::Armed { remaining } = self.state {
            let remaining = remaining - dt;
            self.state = if remaining <= 0.0 {
                GraceState::Expired
            } else {
                GraceState::Armed { remaining }
            };
        }
    }

    /// Deliver a pending expiry exactly once
    pub fn take_expired(&mut self) -> bool {
        if self.state == GraceState::Expired {
            self.state = GraceState::Idle;
            true
        } else {
            false
        }
    }
}

impl Default for GracePeriod {
    fn default() -> Self {
        Self::new()
    }
}

//! Per-session bookkeeping

use chrono::{DateTime, Local};
use dayshift_api::{Outcome, SessionEvent, SessionPhase};
use dayshift_config::SessionRules;
use dayshift_util::{MonotonicInstant, SessionId};

/// Lives, emails and phase for one playthrough
///
/// Created fresh for every session; there is no reset. Once the phase is
/// terminal, [`transition`](Self::transition) refuses to move it again.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub lives: u32,
    pub max_lives: u32,
    pub emails_sent: u32,
    pub min_emails_to_survive: u32,
    pub input_enabled: bool,

    /// Wall-clock start time (for display/logging)
    pub started_at: DateTime<Local>,

    /// Monotonic start time (for logging real session length)
    pub started_at_mono: MonotonicInstant,

    pub ended_at: Option<DateTime<Local>>,
}

impl SessionState {
    pub fn new(rules: &SessionRules) -> Self {
        Self {
            session_id: SessionId::new(),
            phase: SessionPhase::Intro,
            lives: rules.max_lives,
            max_lives: rules.max_lives,
            emails_sent: 0,
            min_emails_to_survive: rules.min_emails_to_survive,
            input_enabled: false,
            started_at: dayshift_util::now(),
            started_at_mono: MonotonicInstant::now(),
            ended_at: None,
        }
    }

    /// Outcome if the day ended right now
    pub fn day_end_outcome(&self) -> Outcome {
        if self.emails_sent >= self.min_emails_to_survive {
            Outcome::Success
        } else {
            Outcome::Fired
        }
    }

    /// Move to `to`, returning the change event. Terminal phases are final.
    pub fn transition(&mut self, to: SessionPhase) -> Option<SessionEvent> {
        if self.phase.is_terminal() || self.phase == to {
            return None;
        }
        let from = self.phase;
        self.phase = to;
        if to.is_terminal() {
            self.ended_at = Some(dayshift_util::now());
        }
        Some(SessionEvent::PhaseChanged { from, to })
    }

    /// Remove one life, returning how many are left
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn record_email(&mut self) -> u32 {
        self.emails_sent += 1;
        self.emails_sent
    }
}

//! Shared types for the dayshift API

use chrono::{DateTime, Local};
use dayshift_util::SessionId;
use serde::{Deserialize, Serialize};

/// Coarse lifecycle stage of one playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Intro screen and fade; input disabled, clock frozen
    Intro,
    /// Clock running, input accepted (unless an interruption is in progress)
    Active,
    /// Day survived with enough emails sent
    EndedSuccess,
    /// Day survived but too few emails sent
    EndedFired,
    /// Ran out of lives
    EndedGameOver,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionPhase::EndedSuccess | SessionPhase::EndedFired | SessionPhase::EndedGameOver
        )
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionPhase::Active)
    }

    /// Outcome for terminal phases
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            SessionPhase::EndedSuccess => Some(Outcome::Success),
            SessionPhase::EndedFired => Some(Outcome::Fired),
            SessionPhase::EndedGameOver => Some(Outcome::GameOver),
            SessionPhase::Intro | SessionPhase::Active => None,
        }
    }
}

/// Terminal outcome of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Fired,
    GameOver,
}

impl Outcome {
    pub fn phase(&self) -> SessionPhase {
        match self {
            Outcome::Success => SessionPhase::EndedSuccess,
            Outcome::Fired => SessionPhase::EndedFired,
            Outcome::GameOver => SessionPhase::EndedGameOver,
        }
    }

    /// Screen shown for this outcome
    pub fn screen(&self) -> Screen {
        match self {
            Outcome::Success => Screen::NextDay,
            Outcome::Fired => Screen::Fired,
            Outcome::GameOver => Screen::GameOver,
        }
    }

    /// Whether the outcome screen hands control back to the main menu
    pub fn returns_to_menu(&self) -> bool {
        matches!(self, Outcome::Fired | Outcome::GameOver)
    }
}

/// Full-screen overlays selected by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Intro,
    NextDay,
    Fired,
    GameOver,
}

/// Where the camera is pointed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFocus {
    /// Near: the laptop the player types on
    Laptop,
    /// Far: the chatty coworker
    Employee,
}

/// 2D point in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: f64,
    pub y: f64,
}

impl FocusPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation toward `to`, `t` clamped to `[0, 1]`
    pub fn lerp(self, to: FocusPoint, t: f64) -> FocusPoint {
        FocusPoint {
            x: dayshift_util::lerp(self.x, to.x, t),
            y: dayshift_util::lerp(self.y, to.y, t),
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicTrack {
    Title,
    Game,
}

/// Point-in-time view of a session for status displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub api_version: u32,
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub lives: u32,
    pub max_lives: u32,
    pub emails_sent: u32,
    pub min_emails_to_survive: u32,
    /// Emails still waiting in the playlist
    pub emails_queued: usize,
    pub day_duration: f64,
    pub time_remaining: f64,
    pub started_at: DateTime<Local>,
    pub ended_at: Option<DateTime<Local>>,
    pub battery_charge: f64,
    pub battery_ratio: f64,
    pub battery_depleted: bool,
    pub grace_period_armed: bool,
    /// Seconds until a life is lost, while the grace period runs
    pub grace_remaining: Option<f64>,
    pub charger_held: bool,
    pub interruption_active: bool,
    pub interruptions_fired: u32,
    pub input_enabled: bool,
}

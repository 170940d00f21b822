//! Event types emitted by the dayshift core
//!
//! Every orchestrator operation returns the events it produced, in order.
//! Some are notifications (`LifeLost`, `SessionEnded`), some are directives
//! for collaborators (`InputEnabled`, `CameraMoved`, `ChatterStarted`).

use chrono::{DateTime, Local};
use dayshift_util::SessionId;
use serde::{Deserialize, Serialize};

use crate::{CameraFocus, FocusPoint, MusicTrack, Outcome, Screen, SessionPhase, API_VERSION};

/// Event envelope, used when events leave the process (e.g. `--json` output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub api_version: u32,
    pub timestamp: DateTime<Local>,
    pub session_id: SessionId,
    pub payload: SessionEvent,
}

impl Event {
    pub fn new(session_id: SessionId, payload: SessionEvent) -> Self {
        Self {
            api_version: API_VERSION,
            timestamp: dayshift_util::now(),
            session_id,
            payload,
        }
    }

    /// Serialize as a single JSON line
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// All events produced by a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Session phase transition
    PhaseChanged { from: SessionPhase, to: SessionPhase },

    /// Select a full-screen overlay, or clear it
    ScreenShown { screen: Option<Screen> },

    /// Intro overlay opacity during the fade (1.0 -> 0.0)
    IntroFade { alpha: f64 },

    /// Enable or disable typing input
    InputEnabled { enabled: bool },

    /// Camera position changed
    CameraMoved { focus: CameraFocus, position: FocusPoint },

    /// Camera zoom (orthographic size) changed
    ZoomChanged { size: f64 },

    /// Start spawning interruption content
    ChatterStarted,

    /// Stop spawning interruption content and clear what is on screen
    ChatterStopped,

    /// One chat bubble spawned by the interruption
    ChatBubble { message: String },

    /// Interruption choreography started
    InterruptionStarted { threshold: f64, time_remaining: f64 },

    /// Interruption choreography finished
    InterruptionFinished,

    /// Battery level changed (for dimming / flicker presenters)
    BatteryChanged { charge: f64, ratio: f64, critical: bool },

    /// Battery charge crossed from above zero to zero
    BatteryDepleted,

    /// Battery charge crossed from zero back above zero
    BatteryRestored,

    /// Grace period started after depletion
    GracePeriodArmed { duration: f64 },

    /// Grace period cancelled by restoration
    GracePeriodCancelled,

    /// A life was lost
    LifeLost { lives_remaining: u32 },

    /// Lives projection for display
    LivesChanged { lives: u32 },

    /// Sent-email counter projection for display
    EmailCountChanged { sent: u32 },

    /// Next email handed to the typing minigame
    EmailLoaded { body: String, remaining: usize },

    /// Every email in the playlist has been loaded
    PlaylistExhausted,

    /// Countdown projection for display
    TimerUpdated { remaining: f64 },

    /// Session reached a terminal phase
    SessionEnded {
        outcome: Outcome,
        emails_sent: u32,
        lives: u32,
    },

    /// Switch background music
    MusicChanged { track: MusicTrack },

    /// Play the click sound effect
    ClickSfx,

    /// Outcome screen finished; the session should be torn down
    ReturnToMenu,
}

impl SessionEvent {
    /// Events emitted every frame; observers usually want to filter these out
    pub fn is_per_frame(&self) -> bool {
        matches!(
            self,
            SessionEvent::IntroFade { .. }
                | SessionEvent::CameraMoved { .. }
                | SessionEvent::ZoomChanged { .. }
                | SessionEvent::BatteryChanged { .. }
                | SessionEvent::TimerUpdated { .. }
        )
    }
}

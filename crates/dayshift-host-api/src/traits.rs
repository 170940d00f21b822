//! Collaborator traits
//!
//! All calls happen on the tick thread, one at a time. Implementations must
//! tolerate redundant calls (e.g. `stop()` on a spawner that is not running).

use dayshift_api::{FocusPoint, MusicTrack, Screen, SessionEvent};

/// The typing minigame
pub trait TypingInput {
    /// Accept or ignore keystrokes
    fn set_input_enabled(&mut self, enabled: bool);

    /// Replace the email being typed
    fn load_email(&mut self, body: &str);
}

/// The scene camera. Interpolation is driven by the core; the rig only
/// applies the values it is given.
pub trait CameraRig {
    fn set_position(&mut self, position: FocusPoint);

    fn set_zoom(&mut self, size: f64);
}

/// Interruption content (the chatty coworker's bubbles)
pub trait InterruptionSpawner {
    /// Begin an interruption; idempotent
    fn start(&mut self);

    /// End an interruption and clear spawned content; idempotent
    fn stop(&mut self);

    /// Show one chat bubble
    fn spawn_bubble(&mut self, message: &str);
}

/// Screens and HUD projections. Pure sink: nothing flows back into the core.
pub trait PresentationSink {
    /// Show a full-screen overlay, or clear it with `None`
    fn show_screen(&mut self, screen: Option<Screen>);

    fn update_timer(&mut self, remaining: f64);

    fn update_lives(&mut self, lives: u32);

    fn update_email_count(&mut self, sent: u32);

    /// Intro overlay opacity
    fn set_intro_alpha(&mut self, _alpha: f64) {}

    /// Battery level for dimming / flicker effects
    fn update_battery(&mut self, _ratio: f64, _critical: bool) {}

    /// Any event no other collaborator consumes (phase changes, life loss, ...)
    fn notify(&mut self, _event: &SessionEvent) {}
}

/// Music and sound effects
pub trait AudioSink {
    /// Switch background music; playing the current track again is a no-op
    fn play_music(&mut self, track: MusicTrack);

    fn play_click(&mut self);
}

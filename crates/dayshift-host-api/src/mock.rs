//! Recording collaborators for unit/integration testing

use dayshift_api::{FocusPoint, MusicTrack, Screen, SessionEvent};
use std::sync::{Arc, Mutex};

use crate::{AudioSink, CameraRig, InterruptionSpawner, PresentationSink, Stage, TypingInput};

/// One call received by a mock collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum StageCall {
    InputEnabled(bool),
    EmailLoaded(String),
    CameraPosition(FocusPoint),
    Zoom(f64),
    ChatterStart,
    ChatterStop,
    Bubble(String),
    Screen(Option<Screen>),
    IntroAlpha(f64),
    Timer(f64),
    Lives(u32),
    EmailCount(u32),
    Battery { ratio: f64, critical: bool },
    Notified(SessionEvent),
    Music(MusicTrack),
    Click,
}

/// Mock collaborator implementing every trait
///
/// Clones share one call log, so a single mock can fill every slot of a
/// [`Stage`] and the test can inspect the interleaved calls afterwards.
#[derive(Debug, Clone, Default)]
pub struct MockStage {
    calls: Arc<Mutex<Vec<StageCall>>>,

    /// Whether the spawner is currently running
    pub chatter_running: Arc<Mutex<bool>>,
}

impl MockStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stage with this mock in every slot
    pub fn full_stage(&self) -> Stage {
        Stage::empty()
            .with_typing(self.clone())
            .with_camera(self.clone())
            .with_spawner(self.clone())
            .with_presentation(self.clone())
            .with_audio(self.clone())
    }

    /// Snapshot of every call so far
    pub fn calls(&self) -> Vec<StageCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls matching a predicate
    pub fn calls_matching(&self, pred: impl Fn(&StageCall) -> bool) -> Vec<StageCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| pred(c))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn is_chatter_running(&self) -> bool {
        *self.chatter_running.lock().unwrap()
    }

    fn record(&self, call: StageCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TypingInput for MockStage {
    fn set_input_enabled(&mut self, enabled: bool) {
        self.record(StageCall::InputEnabled(enabled));
    }

    fn load_email(&mut self, body: &str) {
        self.record(StageCall::EmailLoaded(body.to_string()));
    }
}

impl CameraRig for MockStage {
    fn set_position(&mut self, position: FocusPoint) {
        self.record(StageCall::CameraPosition(position));
    }

    fn set_zoom(&mut self, size: f64) {
        self.record(StageCall::Zoom(size));
    }
}

impl InterruptionSpawner for MockStage {
    fn start(&mut self) {
        *self.chatter_running.lock().unwrap() = true;
        self.record(StageCall::ChatterStart);
    }

    fn stop(&mut self) {
        *self.chatter_running.lock().unwrap() = false;
        self.record(StageCall::ChatterStop);
    }

    fn spawn_bubble(&mut self, message: &str) {
        self.record(StageCall::Bubble(message.to_string()));
    }
}

impl PresentationSink for MockStage {
    fn show_screen(&mut self, screen: Option<Screen>) {
        self.record(StageCall::Screen(screen));
    }

    fn update_timer(&mut self, remaining: f64) {
        self.record(StageCall::Timer(remaining));
    }

    fn update_lives(&mut self, lives: u32) {
        self.record(StageCall::Lives(lives));
    }

    fn update_email_count(&mut self, sent: u32) {
        self.record(StageCall::EmailCount(sent));
    }

    fn set_intro_alpha(&mut self, alpha: f64) {
        self.record(StageCall::IntroAlpha(alpha));
    }

    fn update_battery(&mut self, ratio: f64, critical: bool) {
        self.record(StageCall::Battery { ratio, critical });
    }

    fn notify(&mut self, event: &SessionEvent) {
        self.record(StageCall::Notified(event.clone()));
    }
}

impl AudioSink for MockStage {
    fn play_music(&mut self, track: MusicTrack) {
        self.record(StageCall::Music(track));
    }

    fn play_click(&mut self) {
        self.record(StageCall::Click);
    }
}

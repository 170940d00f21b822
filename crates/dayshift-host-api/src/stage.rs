//! Routing of session events to attached collaborators

use dayshift_api::SessionEvent;
use tracing::trace;

use crate::{
    AudioSink, CameraRig, InterruptionSpawner, PresentationSink, StageCapabilities, TypingInput,
};

/// The set of collaborators a session drives
///
/// Each slot is optional. Directives for an empty slot are dropped without
/// error.
#[derive(Default)]
pub struct Stage {
    typing: Option<Box<dyn TypingInput>>,
    camera: Option<Box<dyn CameraRig>>,
    spawner: Option<Box<dyn InterruptionSpawner>>,
    presentation: Option<Box<dyn PresentationSink>>,
    audio: Option<Box<dyn AudioSink>>,
}

impl Stage {
    /// A stage with nothing attached
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_typing(mut self, typing: impl TypingInput + 'static) -> Self {
        self.typing = Some(Box::new(typing));
        self
    }

    pub fn with_camera(mut self, camera: impl CameraRig + 'static) -> Self {
        self.camera = Some(Box::new(camera));
        self
    }

    pub fn with_spawner(mut self, spawner: impl InterruptionSpawner + 'static) -> Self {
        self.spawner = Some(Box::new(spawner));
        self
    }

    pub fn with_presentation(mut self, presentation: impl PresentationSink + 'static) -> Self {
        self.presentation = Some(Box::new(presentation));
        self
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    /// Capabilities implied by which slots are filled
    pub fn capabilities(&self) -> StageCapabilities {
        StageCapabilities {
            has_typing: self.typing.is_some(),
            has_camera: self.camera.is_some(),
            has_spawner: self.spawner.is_some(),
            has_presentation: self.presentation.is_some(),
            has_audio: self.audio.is_some(),
        }
    }

    /// Apply a batch of events in order
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a SessionEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Dispatch one event to whichever collaborator consumes it
    pub fn apply(&mut self, event: &SessionEvent) {
        if !event.is_per_frame() {
            trace!(?event, "Applying event to stage");
        }
        match event {
            SessionEvent::InputEnabled { enabled } => {
                if let Some(typing) = self.typing.as_mut() {
                    typing.set_input_enabled(*enabled);
                }
            }
            SessionEvent::EmailLoaded { body, .. } => {
                if let Some(typing) = self.typing.as_mut() {
                    typing.load_email(body);
                }
            }
            SessionEvent::CameraMoved { position, .. } => {
                if let Some(camera) = self.camera.as_mut() {
                    camera.set_position(*position);
                }
            }
            SessionEvent::ZoomChanged { size } => {
                if let Some(camera) = self.camera.as_mut() {
                    camera.set_zoom(*size);
                }
            }
            SessionEvent::ChatterStarted => {
                if let Some(spawner) = self.spawner.as_mut() {
                    spawner.start();
                }
            }
            SessionEvent::ChatterStopped => {
                if let Some(spawner) = self.spawner.as_mut() {
                    spawner.stop();
                }
            }
            SessionEvent::ChatBubble { message } => {
                if let Some(spawner) = self.spawner.as_mut() {
                    spawner.spawn_bubble(message);
                }
            }
            SessionEvent::MusicChanged { track } => {
                if let Some(audio) = self.audio.as_mut() {
                    audio.play_music(*track);
                }
            }
            SessionEvent::ClickSfx => {
                if let Some(audio) = self.audio.as_mut() {
                    audio.play_click();
                }
            }
            other => {
                let Some(presentation) = self.presentation.as_mut() else {
                    return;
                };
                match other {
                    SessionEvent::ScreenShown { screen } => presentation.show_screen(*screen),
                    SessionEvent::IntroFade { alpha } => presentation.set_intro_alpha(*alpha),
                    SessionEvent::TimerUpdated { remaining } => {
                        presentation.update_timer(*remaining)
                    }
                    SessionEvent::LivesChanged { lives } => presentation.update_lives(*lives),
                    SessionEvent::EmailCountChanged { sent } => {
                        presentation.update_email_count(*sent)
                    }
                    SessionEvent::BatteryChanged {
                        ratio, critical, ..
                    } => presentation.update_battery(*ratio, *critical),
                    _ => presentation.notify(other),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockStage, StageCall};
    use dayshift_api::{CameraFocus, FocusPoint, MusicTrack, Screen};

    #[test]
    fn empty_stage_drops_everything() {
        let mut stage = Stage::empty();
        assert_eq!(stage.capabilities(), StageCapabilities::none());

        stage.apply(&SessionEvent::ChatterStarted);
        stage.apply(&SessionEvent::InputEnabled { enabled: true });
        stage.apply(&SessionEvent::ReturnToMenu);
    }

    #[test]
    fn routes_directives_to_collaborators() {
        let mock = MockStage::new();
        let mut stage = mock.full_stage();
        assert_eq!(stage.capabilities(), StageCapabilities::full());

        stage.apply_all(&[
            SessionEvent::InputEnabled { enabled: false },
            SessionEvent::CameraMoved {
                focus: CameraFocus::Employee,
                position: FocusPoint::new(-4.0, 0.0),
            },
            SessionEvent::ChatterStarted,
            SessionEvent::ScreenShown {
                screen: Some(Screen::Fired),
            },
            SessionEvent::MusicChanged {
                track: MusicTrack::Title,
            },
        ]);

        assert_eq!(
            mock.calls(),
            vec![
                StageCall::InputEnabled(false),
                StageCall::CameraPosition(FocusPoint::new(-4.0, 0.0)),
                StageCall::ChatterStart,
                StageCall::Screen(Some(Screen::Fired)),
                StageCall::Music(MusicTrack::Title),
            ]
        );
    }

    #[test]
    fn partial_stage_only_reaches_attached() {
        let mock = MockStage::new();
        let mut stage = Stage::empty().with_spawner(mock.clone());

        let caps = stage.capabilities();
        assert!(caps.has_spawner);
        assert!(!caps.has_camera);

        stage.apply(&SessionEvent::ZoomChanged { size: 3.5 });
        stage.apply(&SessionEvent::ChatterStopped);

        assert_eq!(mock.calls(), vec![StageCall::ChatterStop]);
    }

    #[test]
    fn unconsumed_events_reach_notify() {
        let mock = MockStage::new();
        let mut stage = Stage::empty().with_presentation(mock.clone());

        stage.apply(&SessionEvent::LifeLost { lives_remaining: 2 });

        assert_eq!(
            mock.calls(),
            vec![StageCall::Notified(SessionEvent::LifeLost {
                lives_remaining: 2
            })]
        );
    }
}

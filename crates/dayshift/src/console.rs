//! Text console collaborators
//!
//! Renders session directives as lines on stdout. There is no camera: pans
//! and zooms complete instantly and are not shown.

use dayshift_api::{MusicTrack, Screen, SessionEvent};
use dayshift_host_api::{AudioSink, InterruptionSpawner, PresentationSink, Stage, TypingInput};
use dayshift_util::format_countdown;
use tracing::debug;

/// Every console collaborator attached to one stage
pub fn console_stage() -> Stage {
    Stage::empty()
        .with_typing(ConsoleTyping::default())
        .with_spawner(ConsoleSpawner)
        .with_presentation(ConsolePresentation::default())
        .with_audio(ConsoleAudio::default())
}

pub fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Intro => "DAY 1",
        Screen::NextDay => "DAY 2 - you kept your job",
        Screen::Fired => "YOU'RE FIRED",
        Screen::GameOver => "GAME OVER",
    }
}

#[derive(Default)]
pub struct ConsoleTyping {
    enabled: bool,
}

impl TypingInput for ConsoleTyping {
    fn set_input_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            self.enabled = enabled;
            println!("[input] typing {}", if enabled { "enabled" } else { "disabled" });
        }
    }

    fn load_email(&mut self, body: &str) {
        let subject = body.lines().next().unwrap_or_default();
        println!("[email] new email: {}", subject);
    }
}

pub struct ConsoleSpawner;

impl InterruptionSpawner for ConsoleSpawner {
    fn start(&mut self) {
        println!("[coworker] wanders over to your desk");
    }

    fn stop(&mut self) {
        println!("[coworker] wanders off");
    }

    fn spawn_bubble(&mut self, message: &str) {
        println!("[coworker] \"{}\"", message);
    }
}

#[derive(Default)]
pub struct ConsolePresentation {
    last_timer: String,
    critical: bool,
}

impl PresentationSink for ConsolePresentation {
    fn show_screen(&mut self, screen: Option<Screen>) {
        if let Some(screen) = screen {
            println!();
            println!("=== {} ===", screen_title(screen));
            println!();
        }
    }

    fn update_timer(&mut self, remaining: f64) {
        let text = format_countdown(remaining);
        if text == self.last_timer {
            return;
        }
        // Every half minute, then every second for the last ten
        let whole = remaining.max(0.0).floor() as u64;
        if whole % 30 == 0 || whole < 10 {
            println!("[clock] {}", text);
        }
        self.last_timer = text;
    }

    fn update_lives(&mut self, lives: u32) {
        println!("[lives] {}", lives);
    }

    fn update_email_count(&mut self, sent: u32) {
        println!("[emails] sent: {}", sent);
    }

    fn update_battery(&mut self, _ratio: f64, critical: bool) {
        if critical != self.critical {
            self.critical = critical;
            if critical {
                println!("[battery] low - hold the charger ('charge', then 'release')");
            }
        }
    }

    fn notify(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::BatteryDepleted => {
                println!("[battery] dead! recharge before the grace period runs out")
            }
            SessionEvent::BatteryRestored => println!("[battery] back on"),
            SessionEvent::LifeLost { lives_remaining } => {
                println!("[!] you lost a life ({} left)", lives_remaining)
            }
            SessionEvent::InterruptionStarted { .. } => println!("[!] incoming coworker"),
            SessionEvent::PlaylistExhausted => println!("[email] inbox empty"),
            SessionEvent::SessionEnded {
                outcome,
                emails_sent,
                lives,
            } => println!(
                "[day over] {:?}: {} emails sent, {} lives left",
                outcome, emails_sent, lives
            ),
            other => debug!(event = ?other, "Console ignored event"),
        }
    }
}

#[derive(Default)]
pub struct ConsoleAudio {
    current: Option<MusicTrack>,
}

impl AudioSink for ConsoleAudio {
    fn play_music(&mut self, track: MusicTrack) {
        if self.current != Some(track) {
            self.current = Some(track);
            println!("[music] {:?} theme", track);
        }
    }

    fn play_click(&mut self) {
        debug!("Click");
    }
}

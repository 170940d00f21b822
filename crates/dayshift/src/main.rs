//! dayshift - headless runner for the day-cycle simulation
//!
//! Wires together:
//! - Configuration loading
//! - The day-cycle orchestrator
//! - Console collaborators (or JSON event output)
//! - A real-time tick loop and a stdin command channel

mod console;

use anyhow::{Context, Result};
use clap::Parser;
use dayshift_api::{Event, MusicTrack, PlayerCommand, SessionEvent};
use dayshift_config::{DayConfig, load_config, load_config_or_default};
use dayshift_core::DayCycleOrchestrator;
use dayshift_host_api::Stage;
use dayshift_util::{DayshiftError, MonotonicInstant, config_path_without_env, format_countdown};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{SignalKind, signal};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// dayshift - survive the workday: type emails, keep the laptop charged
#[derive(Parser, Debug)]
#[command(name = "dayshift")]
#[command(about = "Headless runner for the dayshift day-cycle simulation", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/dayshift/config.toml, built-in defaults if absent)
    #[arg(short, long, env = "DAYSHIFT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Tick period in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Simulated seconds per real second
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Print events as JSON lines instead of console text
    #[arg(long)]
    json: bool,
}

/// Runner state: at most one live session at a time
struct Runner {
    config: DayConfig,
    stage: Stage,
    json: bool,
    session: Option<DayCycleOrchestrator>,
}

impl Runner {
    fn new(args: &Args) -> Result<Self> {
        let config = match &args.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => {
                let path = config_path_without_env();
                load_config_or_default(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            }
        };

        info!(
            day_seconds = config.session.day_duration.as_secs_f64(),
            max_lives = config.session.max_lives,
            emails = config.emails.bodies.len(),
            "Configuration loaded"
        );

        let stage = if args.json {
            Stage::empty()
        } else {
            console::console_stage()
        };

        Ok(Self {
            config,
            stage,
            json: args.json,
            session: None,
        })
    }

    fn start_session(&mut self) {
        let mut orchestrator =
            DayCycleOrchestrator::new(self.config.clone(), self.stage.capabilities());
        let events = orchestrator.begin();
        self.session = Some(orchestrator);
        self.dispatch(events);
    }

    fn tick(&mut self, dt: f64) {
        let Some(orchestrator) = self.session.as_mut() else {
            return;
        };
        let events = orchestrator.tick(dt);
        let back_to_menu = orchestrator.has_returned_to_menu();
        self.dispatch(events);

        if back_to_menu {
            self.session = None;
            self.print_menu();
        }
    }

    /// Returns false when the runner should exit
    fn handle_line(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }
        match line.parse::<PlayerCommand>() {
            Ok(command) => self.handle_command(command),
            Err(e) => {
                warn!(error = %e, "Bad command");
                eprintln!("{} (try send, charge, release, zoom, status, restart, menu, start, quit)", e);
                true
            }
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) -> bool {
        debug!(?command, "Command received");

        if let Err(e) = self.check_session(command) {
            debug!(?command, error = %e, "Command rejected");
            eprintln!("{}; type 'start'", e);
            return true;
        }

        match command {
            PlayerCommand::SendEmail => self.with_session(|o| o.on_email_completed()),
            PlayerCommand::ChargePress => self.with_session(|o| o.press_charger()),
            PlayerCommand::ChargeRelease => self.with_session(|o| o.release_charger()),
            PlayerCommand::ToggleZoom => self.with_session(|o| o.toggle_zoom()),
            PlayerCommand::Status => self.print_status(),
            PlayerCommand::Restart => {
                info!("Restarting session");
                self.session = None;
                self.start_session();
            }
            PlayerCommand::ReturnToMenu => {
                info!("Returning to menu");
                self.session = None;
                self.dispatch(vec![
                    SessionEvent::MusicChanged {
                        track: MusicTrack::Title,
                    },
                    SessionEvent::ReturnToMenu,
                ]);
                self.print_menu();
            }
            PlayerCommand::Start => {
                if self.session.is_some() {
                    eprintln!("A day is already in progress; use 'restart'");
                } else {
                    self.start_session();
                }
            }
            PlayerCommand::Quit => return false,
        }
        true
    }

    fn check_session(&self, command: PlayerCommand) -> dayshift_util::Result<()> {
        if command.needs_session() && self.session.is_none() {
            return Err(DayshiftError::NoActiveSession);
        }
        Ok(())
    }

    fn with_session(&mut self, op: impl FnOnce(&mut DayCycleOrchestrator) -> Vec<SessionEvent>) {
        if let Some(orchestrator) = self.session.as_mut() {
            let events = op(orchestrator);
            self.dispatch(events);
        }
    }

    fn dispatch(&mut self, events: Vec<SessionEvent>) {
        if !self.json {
            self.stage.apply_all(&events);
            return;
        }

        let Some(session_id) = self.session.as_ref().map(|o| o.session_id().clone()) else {
            // Menu-level events have no session to attach to
            for event in events.iter().filter(|e| !e.is_per_frame()) {
                debug!(?event, "Event outside a session");
            }
            return;
        };
        for payload in events.into_iter().filter(|e| !e.is_per_frame()) {
            match Event::new(session_id.clone(), payload).to_json_line() {
                Ok(line) => println!("{}", line),
                Err(e) => warn!(error = %e, "Failed to serialize event"),
            }
        }
    }

    fn print_status(&self) {
        let Some(orchestrator) = &self.session else {
            return;
        };
        let snapshot = orchestrator.snapshot();

        if self.json {
            match serde_json::to_string(&snapshot) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!(error = %e, "Failed to serialize snapshot"),
            }
            return;
        }

        let grace = match snapshot.grace_remaining {
            Some(left) => format!(" (grace period, {:.1}s left!)", left),
            None => String::new(),
        };
        println!(
            "[status] {:?} | {} of {} left | lives {}/{} | emails {}/{} ({} queued) | battery {:.0}%{}{}{}",
            snapshot.phase,
            format_countdown(snapshot.time_remaining),
            format_countdown(snapshot.day_duration),
            snapshot.lives,
            snapshot.max_lives,
            snapshot.emails_sent,
            snapshot.min_emails_to_survive,
            snapshot.emails_queued,
            snapshot.battery_ratio * 100.0,
            if snapshot.charger_held { " charging" } else { "" },
            grace,
            if snapshot.interruption_active { " | interrupted" } else { "" },
        );
    }

    fn print_menu(&self) {
        if !self.json {
            println!("[menu] type 'start' to begin a new day, 'quit' to exit");
        }
    }

    async fn run(mut self, tick: Duration, time_scale: f64) -> Result<()> {
        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;

        let mut tick_timer = tokio::time::interval(tick);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = MonotonicInstant::now();

        self.start_session();
        info!(tick_ms = tick.as_millis() as u64, time_scale, "Runner started");

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down");
                    break;
                }

                _ = tick_timer.tick() => {
                    let now = MonotonicInstant::now();
                    let dt = now.duration_since(last_tick).as_secs_f64() * time_scale;
                    last_tick = now;
                    self.tick(dt);
                }

                line = lines.next_line(), if stdin_open => {
                    match line {
                        Ok(Some(line)) => {
                            if !self.handle_line(&line) {
                                info!("Quit requested");
                                break;
                            }
                        }
                        Ok(None) => {
                            debug!("stdin closed");
                            stdin_open = false;
                        }
                        Err(e) => {
                            warn!(error = %e, "Failed to read stdin");
                            stdin_open = false;
                        }
                    }
                }
            }
        }

        if let Some(orchestrator) = &self.session {
            info!(
                session_id = %orchestrator.session_id(),
                phase = ?orchestrator.phase(),
                "Abandoning session"
            );
        }
        info!("Shutdown complete");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (stderr, so stdout stays clean for output)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "dayshift starting");

    if args.tick_ms == 0 {
        anyhow::bail!("--tick-ms must be at least 1");
    }
    if !(args.time_scale.is_finite() && args.time_scale > 0.0) {
        anyhow::bail!("--time-scale must be a positive number");
    }

    let runner = Runner::new(&args)?;
    runner
        .run(Duration::from_millis(args.tick_ms), args.time_scale)
        .await
}

//! Day-cycle orchestrator

use dayshift_api::{
    API_VERSION, CameraFocus, MusicTrack, Outcome, Screen, SessionEvent, SessionPhase,
    SessionSnapshot,
};
use dayshift_config::DayConfig;
use dayshift_host_api::StageCapabilities;
use dayshift_util::SessionId;
use tracing::{debug, info, warn};

use crate::{
    BatteryModel, BatterySignal, CameraController, Charger, ChatterSpawner, ChoreographyCue,
    EmailPlaylist, GracePeriod, InterruptionScheduler, IntroCue, IntroSequence, PlaylistItem,
    SessionClock, SessionState,
};

/// Owns one working day from the intro card to the outcome screen
///
/// Single-threaded: every mutation happens inside `tick` or one of the
/// event operations, and each returns the events it produced in order.
#[derive(Debug)]
pub struct DayCycleOrchestrator {
    config: DayConfig,
    capabilities: StageCapabilities,
    session: SessionState,
    clock: SessionClock,
    battery: BatteryModel,
    charger: Charger,
    grace: GracePeriod,
    interruptions: InterruptionScheduler,
    intro: IntroSequence,
    camera: CameraController,
    playlist: EmailPlaylist,
    chatter: ChatterSpawner,
    started: bool,
    /// Seconds left on a losing outcome screen
    menu_countdown: Option<f64>,
    returned_to_menu: bool,
}

impl DayCycleOrchestrator {
    pub fn new(config: DayConfig, capabilities: StageCapabilities) -> Self {
        let day = config.session.day_duration.as_secs_f64();
        let seed = config.emails.shuffle_seed;

        let session = SessionState::new(&config.session);
        info!(
            session_id = %session.session_id,
            day_seconds = day,
            max_lives = config.session.max_lives,
            has_camera = capabilities.has_camera,
            "Session created"
        );

        Self {
            clock: SessionClock::new(day),
            battery: BatteryModel::new(
                config.battery.max_charge.as_secs_f64(),
                config.battery.critical_ratio,
            ),
            charger: Charger::new(config.charger.charge_multiplier),
            grace: GracePeriod::new(),
            interruptions: InterruptionScheduler::new(
                day,
                config.interruption.interval.as_secs_f64(),
                config.interruption.hold.as_secs_f64(),
            ),
            intro: IntroSequence::new(
                config.transition.intro_screen.as_secs_f64(),
                config.transition.fade.as_secs_f64(),
            ),
            camera: CameraController::new(config.camera.clone(), capabilities.has_camera),
            playlist: EmailPlaylist::new(
                config.emails.bodies.clone(),
                config.emails.next_email_delay.as_secs_f64(),
                seed,
            ),
            chatter: ChatterSpawner::new(
                config.interruption.messages.clone(),
                config.interruption.spawn_interval.as_secs_f64(),
                seed,
            ),
            session,
            config,
            capabilities,
            started: false,
            menu_countdown: None,
            returned_to_menu: false,
        }
    }

    // --- Queries ---

    pub fn session_id(&self) -> &SessionId {
        &self.session.session_id
    }

    pub fn config(&self) -> &DayConfig {
        &self.config
    }

    pub fn capabilities(&self) -> StageCapabilities {
        self.capabilities
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn lives(&self) -> u32 {
        self.session.lives
    }

    pub fn emails_sent(&self) -> u32 {
        self.session.emails_sent
    }

    pub fn time_remaining(&self) -> f64 {
        self.clock.remaining()
    }

    pub fn battery(&self) -> &BatteryModel {
        &self.battery
    }

    pub fn grace_period(&self) -> &GracePeriod {
        &self.grace
    }

    pub fn interruptions(&self) -> &InterruptionScheduler {
        &self.interruptions
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn is_interruption_active(&self) -> bool {
        self.interruptions.is_active()
    }

    pub fn input_enabled(&self) -> bool {
        self.session.input_enabled
    }

    /// The losing outcome screen has run its course
    pub fn has_returned_to_menu(&self) -> bool {
        self.returned_to_menu
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            api_version: API_VERSION,
            session_id: self.session.session_id.clone(),
            phase: self.session.phase,
            lives: self.session.lives,
            max_lives: self.session.max_lives,
            emails_sent: self.session.emails_sent,
            min_emails_to_survive: self.session.min_emails_to_survive,
            emails_queued: self.playlist.remaining(),
            day_duration: self.clock.total(),
            time_remaining: self.clock.remaining(),
            started_at: self.session.started_at,
            ended_at: self.session.ended_at,
            battery_charge: self.battery.charge(),
            battery_ratio: self.battery.ratio(),
            battery_depleted: self.battery.is_depleted(),
            grace_period_armed: self.grace.is_armed(),
            grace_remaining: self.grace.remaining(),
            charger_held: self.charger.is_held(),
            interruption_active: self.interruptions.is_active(),
            interruptions_fired: self.interruptions.fired(),
            input_enabled: self.session.input_enabled,
        }
    }

    // --- Operations ---

    /// Show the intro card and push initial projections.
    /// Called implicitly by the first `tick`.
    pub fn begin(&mut self) -> Vec<SessionEvent> {
        if self.started {
            return Vec::new();
        }
        self.started = true;

        info!(session_id = %self.session.session_id, "Session starting");

        let mut events = vec![
            SessionEvent::MusicChanged {
                track: MusicTrack::Game,
            },
            SessionEvent::ScreenShown {
                screen: Some(Screen::Intro),
            },
            SessionEvent::IntroFade { alpha: 1.0 },
            SessionEvent::ZoomChanged {
                size: self.camera.zoom(),
            },
            SessionEvent::CameraMoved {
                focus: self.camera.focus(),
                position: self.camera.position(),
            },
        ];
        self.set_input(false, &mut events);
        events.push(SessionEvent::TimerUpdated {
            remaining: self.clock.remaining(),
        });
        events.push(SessionEvent::LivesChanged {
            lives: self.session.lives,
        });
        events.push(SessionEvent::EmailCountChanged {
            sent: self.session.emails_sent,
        });
        events.push(self.battery_changed());
        events
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f64) -> Vec<SessionEvent> {
        let mut events = self.begin();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        // The countdown starts on the tick after activation
        let was_active = self.session.phase.is_active();

        // Runs in every phase
        self.camera.advance(dt, &mut events);
        self.advance_intro(dt, &mut events);
        self.advance_interruption(dt, &mut events);
        self.advance_chatter(dt, &mut events);
        self.advance_outcome_screen(dt, &mut events);

        if self.session.phase.is_terminal() {
            return events;
        }
        let counting = was_active && self.session.phase.is_active();

        // Clock before anything else
        let mut remaining = self.clock.remaining();
        if counting {
            remaining = self.clock.advance(dt);
            events.push(SessionEvent::TimerUpdated { remaining });
            if self.clock.is_expired() {
                let outcome = self.session.day_end_outcome();
                self.end_session(outcome, &mut events);
                return events;
            }
        }

        // The battery drains from the first frame. A crossing during the intro
        // only flips the latch. Grace expiry is delivered after this tick's
        // restoration had a chance to cancel it.
        self.grace.advance(dt);
        let charge = self.charger.charge_for(dt);
        if charge > 0.0 {
            self.battery.recharge(charge);
        }
        match self.battery.drain(dt) {
            Some(BatterySignal::Depleted) => {
                events.push(SessionEvent::BatteryDepleted);
                events.extend(self.on_battery_depleted());
            }
            Some(BatterySignal::Restored) => {
                events.push(SessionEvent::BatteryRestored);
                events.extend(self.on_battery_restored());
            }
            None => {}
        }
        events.push(self.battery_changed());

        if self.grace.take_expired() {
            events.extend(self.on_grace_period_expired());
        }
        if !counting || !self.session.phase.is_active() {
            return events;
        }

        if let Some(threshold) = self.interruptions.try_fire(remaining) {
            self.start_interruption(threshold, remaining, &mut events);
        }

        if let Some(item) = self.playlist.advance(dt) {
            self.load_item(item, &mut events);
        }

        events
    }

    /// The typing minigame finished an email
    pub fn on_email_completed(&mut self) -> Vec<SessionEvent> {
        if self.session.phase.is_terminal() {
            debug!("Email completion after session end ignored");
            return Vec::new();
        }

        let sent = self.session.record_email();
        info!(session_id = %self.session.session_id, emails_sent = sent, "Email sent");

        if self.session.phase.is_active() {
            self.playlist.schedule_next();
        }
        vec![SessionEvent::EmailCountChanged { sent }]
    }

    /// Battery hit empty: start (or restart) the grace period
    pub fn on_battery_depleted(&mut self) -> Vec<SessionEvent> {
        if !self.session.phase.is_active() {
            return Vec::new();
        }

        let duration = self.config.transition.grace_period.as_secs_f64();
        let replaced = self.grace.arm(duration);
        warn!(
            session_id = %self.session.session_id,
            grace_seconds = duration,
            replaced,
            "Battery depleted, grace period armed"
        );
        vec![SessionEvent::GracePeriodArmed { duration }]
    }

    /// Battery came back above zero: cancel a pending grace period
    pub fn on_battery_restored(&mut self) -> Vec<SessionEvent> {
        if self.session.phase.is_terminal() || !self.grace.disarm() {
            return Vec::new();
        }

        info!(session_id = %self.session.session_id, "Battery restored, grace period cancelled");
        vec![SessionEvent::GracePeriodCancelled]
    }

    /// The grace period ran out without a restoration
    pub fn on_grace_period_expired(&mut self) -> Vec<SessionEvent> {
        if !self.session.phase.is_active() {
            return Vec::new();
        }
        self.grace.disarm();

        let mut events = Vec::new();
        let lives = self.session.lose_life();
        warn!(session_id = %self.session.session_id, lives, "Life lost");
        events.push(SessionEvent::LifeLost {
            lives_remaining: lives,
        });
        events.push(SessionEvent::LivesChanged { lives });

        if lives == 0 {
            self.end_session(Outcome::GameOver, &mut events);
        } else {
            self.battery.refill();
        }
        events
    }

    /// Start holding the charger
    pub fn press_charger(&mut self) -> Vec<SessionEvent> {
        if !self.session.phase.is_active() || !self.charger.press() {
            return Vec::new();
        }
        debug!("Charger pressed");
        vec![SessionEvent::ClickSfx]
    }

    pub fn release_charger(&mut self) -> Vec<SessionEvent> {
        if self.charger.release() {
            debug!("Charger released");
        }
        Vec::new()
    }

    /// Flip between laptop and room zoom; ignored during interruptions
    pub fn toggle_zoom(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.session.phase.is_active() && !self.interruptions.is_active() {
            self.camera.toggle_zoom(&mut events);
            debug!(target_zoom = self.camera.zoom_target(), "Zoom toggled");
        }
        events
    }

    // --- Internals ---

    fn advance_intro(&mut self, dt: f64, events: &mut Vec<SessionEvent>) {
        if self.session.phase != SessionPhase::Intro {
            return;
        }
        match self.intro.advance(dt) {
            Some(IntroCue::Fade(alpha)) => events.push(SessionEvent::IntroFade { alpha }),
            Some(IntroCue::Finished) => {
                events.push(SessionEvent::IntroFade { alpha: 0.0 });
                self.activate(events);
            }
            None => {}
        }
    }

    fn activate(&mut self, events: &mut Vec<SessionEvent>) {
        let Some(change) = self.session.transition(SessionPhase::Active) else {
            return;
        };
        info!(session_id = %self.session.session_id, "Day started");

        events.push(change);
        events.push(SessionEvent::ScreenShown { screen: None });
        self.set_input(true, events);
        self.camera.zoom_to_laptop(events);

        if let Some(item) = self.playlist.next_item() {
            self.load_item(item, events);
        }
    }

    fn start_interruption(&mut self, threshold: f64, remaining: f64, events: &mut Vec<SessionEvent>) {
        info!(
            session_id = %self.session.session_id,
            threshold,
            time_remaining = remaining,
            "Interruption started"
        );
        events.push(SessionEvent::InterruptionStarted {
            threshold,
            time_remaining: remaining,
        });
        self.camera.zoom_to_normal(events);
        self.set_input(false, events);
        self.camera.pan_to(CameraFocus::Employee, events);
    }

    /// Steps after the session has ended only clean up; they never touch
    /// input or the camera.
    fn advance_interruption(&mut self, dt: f64, events: &mut Vec<SessionEvent>) {
        let settled = self.camera.is_settled();
        let Some(cue) = self.interruptions.advance(dt, settled) else {
            return;
        };
        let active = self.session.phase.is_active();

        match cue {
            ChoreographyCue::ArrivedAtEmployee => {
                if active && self.chatter.start() {
                    events.push(SessionEvent::ChatterStarted);
                }
            }
            ChoreographyCue::HoldElapsed => {
                if self.chatter.stop() {
                    events.push(SessionEvent::ChatterStopped);
                }

                if active {
                    self.camera.pan_to(CameraFocus::Laptop, events);
                } else {
                    self.interruptions.finish();
                    self.finish_interruption(events);
                }
            }
            ChoreographyCue::ArrivedAtLaptop => {
                if active {
                    self.set_input(true, events);
                    self.camera.zoom_to_laptop(events);
                }
                self.finish_interruption(events);
            }
        }
    }

    fn finish_interruption(&mut self, events: &mut Vec<SessionEvent>) {
        info!(
            session_id = %self.session.session_id,
            phase = ?self.session.phase,
            "Interruption finished"
        );
        events.push(SessionEvent::InterruptionFinished);
    }

    fn advance_chatter(&mut self, dt: f64, events: &mut Vec<SessionEvent>) {
        if self.session.phase.is_terminal() {
            return;
        }
        for message in self.chatter.advance(dt) {
            events.push(SessionEvent::ChatBubble { message });
        }
    }

    fn advance_outcome_screen(&mut self, dt: f64, events: &mut Vec<SessionEvent>) {
        let Some(remaining) = self.menu_countdown else {
            return;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.menu_countdown = Some(remaining);
            return;
        }

        self.menu_countdown = None;
        self.returned_to_menu = true;
        info!(session_id = %self.session.session_id, "Returning to menu");
        events.push(SessionEvent::MusicChanged {
            track: MusicTrack::Title,
        });
        events.push(SessionEvent::ReturnToMenu);
    }

    fn end_session(&mut self, outcome: Outcome, events: &mut Vec<SessionEvent>) {
        let Some(change) = self.session.transition(outcome.phase()) else {
            return;
        };
        events.push(change);

        self.set_input(false, events);
        self.camera.zoom_to_normal(events);
        self.grace.disarm();
        self.charger.release();
        self.playlist.cancel_pending();

        events.push(SessionEvent::ScreenShown {
            screen: Some(outcome.screen()),
        });
        events.push(SessionEvent::SessionEnded {
            outcome,
            emails_sent: self.session.emails_sent,
            lives: self.session.lives,
        });

        if outcome.returns_to_menu() {
            self.menu_countdown = Some(self.config.transition.outcome_screen.as_secs_f64());
        }

        let real_seconds = self.session.started_at_mono.elapsed().as_secs_f64();
        info!(
            session_id = %self.session.session_id,
            ?outcome,
            emails_sent = self.session.emails_sent,
            lives = self.session.lives,
            day_seconds_played = self.clock.elapsed(),
            real_seconds,
            "Session ended"
        );
    }

    fn set_input(&mut self, enabled: bool, events: &mut Vec<SessionEvent>) {
        self.session.input_enabled = enabled;
        events.push(SessionEvent::InputEnabled { enabled });
    }

    fn load_item(&mut self, item: PlaylistItem, events: &mut Vec<SessionEvent>) {
        match item {
            PlaylistItem::Email { body, remaining } => {
                debug!(remaining, "Email loaded");
                events.push(SessionEvent::EmailLoaded { body, remaining });
            }
            PlaylistItem::Exhausted => {
                info!(session_id = %self.session.session_id, "Playlist exhausted");
                events.push(SessionEvent::PlaylistExhausted);
            }
        }
    }

    fn battery_changed(&self) -> SessionEvent {
        SessionEvent::BatteryChanged {
            charge: self.battery.charge(),
            ratio: self.battery.ratio(),
            critical: self.battery.is_critical(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const DT: f64 = 0.25;

    fn headless(config: DayConfig) -> DayCycleOrchestrator {
        DayCycleOrchestrator::new(config, StageCapabilities::none())
    }

    /// Run through the intro (2s hold + 1s fade)
    fn start(config: DayConfig) -> DayCycleOrchestrator {
        let mut orch = headless(config);
        run(&mut orch, 3.0);
        assert_eq!(orch.phase(), SessionPhase::Active);
        orch
    }

    fn run(orch: &mut DayCycleOrchestrator, seconds: f64) -> Vec<SessionEvent> {
        let ticks = (seconds / DT).round() as usize;
        (0..ticks).flat_map(|_| orch.tick(DT)).collect()
    }

    fn count(events: &[SessionEvent], pred: impl Fn(&SessionEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    fn long_battery() -> DayConfig {
        let mut config = DayConfig::default();
        config.battery.max_charge = Duration::from_secs(10_000);
        config
    }

    #[test]
    fn begin_pushes_initial_projections_once() {
        let mut orch = headless(DayConfig::default());
        let events = orch.begin();

        assert!(events.contains(&SessionEvent::ScreenShown {
            screen: Some(Screen::Intro)
        }));
        assert!(events.contains(&SessionEvent::MusicChanged {
            track: MusicTrack::Game
        }));
        assert!(events.contains(&SessionEvent::LivesChanged { lives: 3 }));
        assert!(events.contains(&SessionEvent::TimerUpdated { remaining: 180.0 }));
        assert!(orch.begin().is_empty());
    }

    #[test]
    fn intro_then_active() {
        let mut orch = headless(DayConfig::default());

        let events = run(&mut orch, 2.75);
        assert_eq!(orch.phase(), SessionPhase::Intro);
        assert!(events.contains(&SessionEvent::IntroFade { alpha: 0.5 }));
        assert!(!orch.input_enabled());

        let events = orch.tick(DT);
        assert_eq!(orch.phase(), SessionPhase::Active);
        assert!(events.contains(&SessionEvent::PhaseChanged {
            from: SessionPhase::Intro,
            to: SessionPhase::Active
        }));
        assert!(events.contains(&SessionEvent::ScreenShown { screen: None }));
        assert!(events.contains(&SessionEvent::InputEnabled { enabled: true }));
        assert!(events.contains(&SessionEvent::ZoomChanged { size: 3.5 }));

        // The countdown has not moved yet, the battery has
        assert_eq!(orch.time_remaining(), 180.0);
        assert_eq!(orch.battery().charge(), 2.0);
    }

    #[test]
    fn depletion_during_intro_is_latched_but_not_punished() {
        let mut config = DayConfig::default();
        config.transition.intro_screen = Duration::from_secs(4);
        config.battery.max_charge = Duration::from_secs(2);
        let mut orch = headless(config);

        let events = run(&mut orch, 2.0);
        assert_eq!(orch.phase(), SessionPhase::Intro);
        assert_eq!(count(&events, |e| *e == SessionEvent::BatteryDepleted), 1);
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::GracePeriodArmed { .. })));
        assert!(orch.battery().is_depleted());

        // Play starts on an empty battery; sitting there never re-fires
        let events = run(&mut orch, 10.0);
        assert_eq!(orch.phase(), SessionPhase::Active);
        assert_eq!(count(&events, |e| *e == SessionEvent::BatteryDepleted), 0);
        assert!(!orch.grace_period().is_armed());
        assert_eq!(orch.lives(), 3);
    }

    #[test]
    fn day_end_without_emails_is_fired() {
        let mut orch = start(long_battery());
        let events = run(&mut orch, 180.0);

        assert_eq!(orch.phase(), SessionPhase::EndedFired);
        assert_eq!(orch.time_remaining(), 0.0);
        assert!(events.contains(&SessionEvent::SessionEnded {
            outcome: Outcome::Fired,
            emails_sent: 0,
            lives: 3
        }));
        assert!(events.contains(&SessionEvent::ScreenShown {
            screen: Some(Screen::Fired)
        }));
        assert!(!orch.input_enabled());
    }

    #[test]
    fn day_end_with_enough_emails_is_success() {
        let mut orch = start(long_battery());
        run(&mut orch, 30.0);
        orch.on_email_completed();
        run(&mut orch, 30.0);
        assert_eq!(
            orch.on_email_completed(),
            vec![SessionEvent::EmailCountChanged { sent: 2 }]
        );
        assert_eq!(orch.phase(), SessionPhase::Active);

        let events = run(&mut orch, 120.0);
        assert_eq!(orch.phase(), SessionPhase::EndedSuccess);
        assert!(events.contains(&SessionEvent::ScreenShown {
            screen: Some(Screen::NextDay)
        }));

        // Success stays on its screen
        let events = run(&mut orch, 10.0);
        assert!(!events.contains(&SessionEvent::ReturnToMenu));
        assert!(!orch.has_returned_to_menu());
    }

    #[test]
    fn life_lost_when_grace_period_runs_out() {
        // Times count from construction, intro included
        let mut orch = headless(DayConfig::default());

        let events = run(&mut orch, 5.0);
        assert_eq!(orch.phase(), SessionPhase::Active);
        assert_eq!(count(&events, |e| *e == SessionEvent::BatteryDepleted), 1);
        assert!(events.contains(&SessionEvent::GracePeriodArmed { duration: 2.0 }));
        assert!(orch.grace_period().is_armed());

        let events = run(&mut orch, 1.75);
        assert_eq!(count(&events, |e| matches!(e, SessionEvent::LifeLost { .. })), 0);

        let events = orch.tick(DT);
        assert!(events.contains(&SessionEvent::LifeLost { lives_remaining: 2 }));
        assert_eq!(orch.lives(), 2);
        assert_eq!(orch.battery().charge(), 5.0);

        // Full recharge restores on the next drain
        let events = orch.tick(DT);
        assert!(events.contains(&SessionEvent::BatteryRestored));
        assert!(!orch.grace_period().is_armed());
    }

    #[test]
    fn restoration_within_grace_period_saves_the_life() {
        let mut orch = headless(DayConfig::default());
        run(&mut orch, 5.75);

        orch.press_charger();
        let events = orch.tick(DT);
        orch.release_charger();

        assert_eq!(count(&events, |e| *e == SessionEvent::BatteryRestored), 1);
        assert!(events.contains(&SessionEvent::GracePeriodCancelled));

        // The cancelled countdown had a second left
        let events = run(&mut orch, 1.75);
        assert_eq!(count(&events, |e| matches!(e, SessionEvent::LifeLost { .. })), 0);
        assert_eq!(orch.lives(), 3);
    }

    #[test]
    fn restoration_wins_on_the_expiry_tick() {
        let mut config = DayConfig::default();
        config.transition.grace_period = Duration::from_secs_f64(0.25);
        let mut orch = start(config);
        run(&mut orch, 2.0);
        assert!(orch.grace_period().is_armed());

        // This tick both elapses the grace period and restores the battery
        orch.press_charger();
        let events = orch.tick(DT);

        assert!(events.contains(&SessionEvent::GracePeriodCancelled));
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::LifeLost { .. })));
        assert_eq!(orch.lives(), 3);
    }

    #[test]
    fn rearming_costs_at_most_one_life() {
        let mut orch = start(long_battery());

        orch.on_battery_depleted();
        run(&mut orch, 1.0);
        orch.on_battery_depleted();

        // The first arming would have expired here
        let events = run(&mut orch, 1.75);
        assert_eq!(count(&events, |e| matches!(e, SessionEvent::LifeLost { .. })), 0);

        let events = run(&mut orch, 5.0);
        assert_eq!(count(&events, |e| matches!(e, SessionEvent::LifeLost { .. })), 1);
        assert_eq!(orch.lives(), 2);
    }

    #[test]
    fn running_out_of_lives_is_game_over() {
        let mut orch = start(DayConfig::default());

        // Lives go at 7s, 14s and 21s
        let events = run(&mut orch, 18.0);
        assert_eq!(orch.phase(), SessionPhase::EndedGameOver);
        assert_eq!(orch.lives(), 0);
        assert_eq!(orch.time_remaining(), 162.0);
        assert_eq!(count(&events, |e| matches!(e, SessionEvent::LifeLost { .. })), 3);
        assert!(events.contains(&SessionEvent::SessionEnded {
            outcome: Outcome::GameOver,
            emails_sent: 0,
            lives: 0
        }));

        // Outcome screen, then back to the menu exactly once
        let events = run(&mut orch, 3.75);
        assert!(!events.contains(&SessionEvent::ReturnToMenu));
        let events = run(&mut orch, 10.0);
        assert_eq!(count(&events, |e| *e == SessionEvent::ReturnToMenu), 1);
        assert!(events.contains(&SessionEvent::MusicChanged {
            track: MusicTrack::Title
        }));
        assert!(orch.has_returned_to_menu());
    }

    #[test]
    fn terminal_session_ignores_everything() {
        let mut orch = start(DayConfig::default());
        run(&mut orch, 18.0);
        assert_eq!(orch.phase(), SessionPhase::EndedGameOver);

        assert!(orch.on_email_completed().is_empty());
        assert!(orch.on_battery_depleted().is_empty());
        assert!(orch.on_battery_restored().is_empty());
        assert!(orch.on_grace_period_expired().is_empty());
        assert!(orch.press_charger().is_empty());
        assert!(orch.toggle_zoom().is_empty());

        let events = run(&mut orch, 100.0);
        assert!(!events.iter().any(|e| matches!(
            e,
            SessionEvent::TimerUpdated { .. }
                | SessionEvent::BatteryChanged { .. }
                | SessionEvent::InterruptionStarted { .. }
        )));
        assert_eq!(orch.time_remaining(), 162.0);
        assert_eq!(orch.emails_sent(), 0);
        assert_eq!(orch.phase(), SessionPhase::EndedGameOver);
    }

    #[test]
    fn interruption_suspends_input_but_not_the_clock() {
        let mut orch = start(long_battery());
        run(&mut orch, 59.75);
        assert!(!orch.is_interruption_active());

        let events = orch.tick(DT);
        assert!(events.contains(&SessionEvent::InterruptionStarted {
            threshold: 120.0,
            time_remaining: 120.0
        }));
        assert!(orch.is_interruption_active());
        assert!(!orch.input_enabled());

        let events = orch.tick(DT);
        assert!(events.contains(&SessionEvent::ChatterStarted));
        assert_eq!(count(&events, |e| matches!(e, SessionEvent::ChatBubble { .. })), 1);
        assert_eq!(orch.time_remaining(), 119.75);

        // Manual zoom is locked out
        assert!(orch.toggle_zoom().is_empty());

        let events = run(&mut orch, 15.0);
        assert!(events.contains(&SessionEvent::ChatterStopped));
        assert!(orch.is_interruption_active());
        assert!(!orch.input_enabled());

        let events = orch.tick(DT);
        assert!(events.contains(&SessionEvent::InputEnabled { enabled: true }));
        assert!(events.contains(&SessionEvent::InterruptionFinished));
        assert!(!orch.is_interruption_active());
        assert_eq!(orch.time_remaining(), 104.5);
    }

    #[test]
    fn day_end_preempts_final_threshold() {
        let mut orch = start(long_battery());
        let events = run(&mut orch, 200.0);

        let thresholds: Vec<f64> = events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::InterruptionStarted { threshold, .. } => Some(*threshold),
                _ => None,
            })
            .collect();
        assert_eq!(thresholds, vec![120.0, 60.0]);
        assert_eq!(orch.interruptions().next_threshold(), 0.0);
    }

    #[test]
    fn game_over_mid_interruption_skips_restore_steps() {
        let mut config = DayConfig::default();
        config.session.max_lives = 1;
        config.battery.max_charge = Duration::from_secs(62);
        let mut orch = start(config);

        run(&mut orch, 60.0);
        assert!(orch.is_interruption_active());

        let events = run(&mut orch, 1.0);
        assert_eq!(orch.phase(), SessionPhase::EndedGameOver);
        assert!(events.contains(&SessionEvent::InputEnabled { enabled: false }));

        // Choreography still runs out, but only cleans up
        let events = run(&mut orch, 20.0);
        assert_eq!(count(&events, |e| *e == SessionEvent::ChatterStopped), 1);
        assert_eq!(count(&events, |e| *e == SessionEvent::InterruptionFinished), 1);
        assert!(!events.contains(&SessionEvent::InputEnabled { enabled: true }));
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::ChatBubble { .. })));
        assert!(!orch.is_interruption_active());
        assert!(!orch.input_enabled());
    }

    #[test]
    fn ending_before_arrival_never_starts_chatter() {
        let mut config = DayConfig::default();
        config.session.max_lives = 1;
        config.battery.max_charge = Duration::from_secs_f64(61.25);
        let mut orch = DayCycleOrchestrator::new(config, StageCapabilities::full());

        // Fires at 63s; the last life goes one tick later, mid-pan
        run(&mut orch, 63.0);
        assert!(orch.is_interruption_active());
        orch.tick(DT);
        assert_eq!(orch.phase(), SessionPhase::EndedGameOver);

        let events = run(&mut orch, 20.0);
        assert!(!events.iter().any(|e| matches!(
            e,
            SessionEvent::ChatterStarted | SessionEvent::ChatterStopped | SessionEvent::ChatBubble { .. }
        )));
        assert_eq!(count(&events, |e| *e == SessionEvent::InterruptionFinished), 1);
        assert!(!orch.is_interruption_active());
    }

    #[test]
    fn holding_the_charger_at_full_reads_full() {
        let mut orch = start(DayConfig::default());
        orch.press_charger();

        let events = run(&mut orch, 2.0);
        assert_eq!(orch.battery().charge(), 5.0);
        let last_reading = events
            .iter()
            .rev()
            .find(|e| matches!(e, SessionEvent::BatteryChanged { .. }));
        assert_eq!(
            last_reading,
            Some(&SessionEvent::BatteryChanged {
                charge: 5.0,
                ratio: 1.0,
                critical: false
            })
        );
    }

    #[test]
    fn charger_only_works_while_active() {
        let mut orch = headless(DayConfig::default());
        assert!(orch.press_charger().is_empty());

        run(&mut orch, 3.0);
        assert_eq!(orch.press_charger(), vec![SessionEvent::ClickSfx]);
        assert!(orch.press_charger().is_empty());
    }

    #[test]
    fn playlist_feeds_the_typer() {
        let mut config = long_battery();
        config.emails.bodies = vec!["first".into(), "second".into()];
        config.emails.shuffle_seed = Some(1);
        let mut orch = headless(config);

        let events = run(&mut orch, 3.0);
        assert_eq!(
            count(&events, |e| matches!(e, SessionEvent::EmailLoaded { remaining: 1, .. })),
            1
        );

        orch.on_email_completed();
        let events = run(&mut orch, 0.75);
        assert_eq!(count(&events, |e| matches!(e, SessionEvent::EmailLoaded { .. })), 0);
        let events = orch.tick(DT);
        assert_eq!(
            count(&events, |e| matches!(e, SessionEvent::EmailLoaded { remaining: 0, .. })),
            1
        );

        orch.on_email_completed();
        let events = run(&mut orch, 1.0);
        assert_eq!(count(&events, |e| *e == SessionEvent::PlaylistExhausted), 1);
        assert_eq!(orch.emails_sent(), 2);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut orch = start(DayConfig::default());
        run(&mut orch, 1.0);

        let snapshot = orch.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Active);
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.time_remaining, 179.0);
        assert_eq!(snapshot.battery_charge, 1.0);
        assert_eq!(snapshot.battery_ratio, 0.2);
        assert!(snapshot.input_enabled);
        assert!(!snapshot.grace_period_armed);
        assert_eq!(snapshot.grace_remaining, None);
        assert_eq!(snapshot.day_duration, 180.0);
        assert!(!snapshot.charger_held);
        assert_eq!(snapshot.interruptions_fired, 0);
        assert!(snapshot.ended_at.is_none());
        assert_eq!(&snapshot.session_id, orch.session_id());

        // Half a second into the grace period, charger just pressed
        run(&mut orch, 1.5);
        orch.press_charger();
        let snapshot = orch.snapshot();
        assert!(snapshot.battery_depleted);
        assert_eq!(snapshot.grace_remaining, Some(1.5));
        assert!(snapshot.charger_held);

        run(&mut orch, 200.0);
        let snapshot = orch.snapshot();
        assert!(snapshot.ended_at.is_some_and(|end| end >= snapshot.started_at));
        assert_eq!(snapshot.phase, SessionPhase::EndedFired);
        assert_eq!(snapshot.interruptions_fired, 2);
    }

    #[test]
    fn bad_dt_is_ignored() {
        let mut orch = start(DayConfig::default());
        orch.tick(f64::NAN);
        orch.tick(-1.0);
        assert_eq!(orch.time_remaining(), 180.0);
    }
}

//! Validated configuration structures

use crate::schema::{
    RawBattery, RawCamera, RawCharger, RawConfig, RawEmails, RawInterruption, RawSession,
    RawTransition,
};
use dayshift_api::FocusPoint;
use std::time::Duration;

/// Lines the chatty coworker cycles through when none are configured
pub const DEFAULT_CHAT_MESSAGES: &[&str] = &[
    "HI!",
    "What? Wow...",
    "Hey...",
    "Did you hear?",
    "About the boss...",
    "He's so bossy!",
    "Working hard?",
    "Look at this!",
    "Crazy weather!",
    "Do you have a sec?",
    "Just one question...",
    "Wait, really?",
];

/// Validated configuration ready for use by the core
#[derive(Debug, Clone, PartialEq)]
pub struct DayConfig {
    pub session: SessionRules,
    pub transition: TransitionTimings,
    pub battery: BatterySettings,
    pub charger: ChargerSettings,
    pub interruption: InterruptionSettings,
    pub camera: CameraSettings,
    pub emails: EmailSettings,
}

impl DayConfig {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            session: SessionRules::from_raw(raw.session),
            transition: TransitionTimings::from_raw(raw.transition),
            battery: BatterySettings::from_raw(raw.battery),
            charger: ChargerSettings::from_raw(raw.charger),
            interruption: InterruptionSettings::from_raw(raw.interruption),
            camera: CameraSettings::from_raw(raw.camera),
            emails: EmailSettings::from_raw(raw.emails),
        }
    }
}

impl Default for DayConfig {
    fn default() -> Self {
        Self::from_raw(RawConfig::empty())
    }
}

/// Win/lose rules for one day
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRules {
    pub max_lives: u32,
    pub day_duration: Duration,
    pub min_emails_to_survive: u32,
}

impl SessionRules {
    fn from_raw(raw: RawSession) -> Self {
        Self {
            max_lives: raw.max_lives.unwrap_or(3),
            day_duration: secs(raw.day_duration_seconds, 180.0),
            min_emails_to_survive: raw.min_emails_to_survive.unwrap_or(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTimings {
    pub intro_screen: Duration,
    pub fade: Duration,
    pub grace_period: Duration,
    pub outcome_screen: Duration,
}

impl TransitionTimings {
    fn from_raw(raw: RawTransition) -> Self {
        Self {
            intro_screen: secs(raw.intro_screen_seconds, 2.0),
            fade: secs(raw.fade_seconds, 1.0),
            grace_period: secs(raw.grace_period_seconds, 2.0),
            outcome_screen: secs(raw.outcome_screen_seconds, 4.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatterySettings {
    /// Full charge, expressed as seconds of drain
    pub max_charge: Duration,
    pub critical_ratio: f64,
}

impl BatterySettings {
    fn from_raw(raw: RawBattery) -> Self {
        Self {
            max_charge: secs(raw.max_charge_seconds, 5.0),
            critical_ratio: raw.critical_ratio.unwrap_or(0.25),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargerSettings {
    pub charge_multiplier: f64,
}

impl ChargerSettings {
    fn from_raw(raw: RawCharger) -> Self {
        Self {
            charge_multiplier: raw.charge_multiplier.unwrap_or(3.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterruptionSettings {
    pub interval: Duration,
    pub hold: Duration,
    pub spawn_interval: Duration,
    pub messages: Vec<String>,
}

impl InterruptionSettings {
    fn from_raw(raw: RawInterruption) -> Self {
        Self {
            interval: secs(raw.interval_seconds, 60.0),
            hold: secs(raw.hold_seconds, 15.0),
            spawn_interval: secs(raw.spawn_interval_seconds, 0.8),
            messages: raw.messages.unwrap_or_else(|| {
                DEFAULT_CHAT_MESSAGES.iter().map(|m| m.to_string()).collect()
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub pan_speed: f64,
    pub zoom_speed: f64,
    pub normal_zoom: f64,
    pub laptop_zoom: f64,
    pub laptop_focus: FocusPoint,
    pub employee_focus: FocusPoint,
}

impl CameraSettings {
    fn from_raw(raw: RawCamera) -> Self {
        let point = |p: Option<[f64; 2]>, default: FocusPoint| {
            p.map(|[x, y]| FocusPoint::new(x, y)).unwrap_or(default)
        };

        Self {
            pan_speed: raw.pan_speed.unwrap_or(2.0),
            zoom_speed: raw.zoom_speed.unwrap_or(2.0),
            normal_zoom: raw.normal_zoom.unwrap_or(5.0),
            laptop_zoom: raw.laptop_zoom.unwrap_or(3.5),
            laptop_focus: point(raw.laptop_focus, FocusPoint::new(0.0, 0.0)),
            employee_focus: point(raw.employee_focus, FocusPoint::new(-4.0, 0.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailSettings {
    pub bodies: Vec<String>,
    pub next_email_delay: Duration,
    pub shuffle_seed: Option<u64>,
}

impl EmailSettings {
    fn from_raw(raw: RawEmails) -> Self {
        Self {
            bodies: raw.bodies,
            next_email_delay: secs(raw.next_email_delay_seconds, 1.0),
            shuffle_seed: raw.shuffle_seed,
        }
    }
}

fn secs(value: Option<f64>, default: f64) -> Duration {
    Duration::from_secs_f64(value.unwrap_or(default))
}

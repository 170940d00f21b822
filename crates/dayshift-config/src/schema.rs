//! Raw configuration schema (as parsed from TOML)
//!
//! Every table and key is optional. Missing values fall back to the
//! defaults in [`crate::policy`].

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Lives, day length, quota
    #[serde(default)]
    pub session: RawSession,

    /// Intro, grace and outcome-screen timings
    #[serde(default)]
    pub transition: RawTransition,

    #[serde(default)]
    pub battery: RawBattery,

    #[serde(default)]
    pub charger: RawCharger,

    /// Chatty coworker interruptions
    #[serde(default)]
    pub interruption: RawInterruption,

    #[serde(default)]
    pub camera: RawCamera,

    /// Email playlist
    #[serde(default)]
    pub emails: RawEmails,
}

impl RawConfig {
    /// A config with the current version and nothing else set
    pub fn empty() -> Self {
        Self {
            config_version: crate::CURRENT_CONFIG_VERSION,
            session: RawSession::default(),
            transition: RawTransition::default(),
            battery: RawBattery::default(),
            charger: RawCharger::default(),
            interruption: RawInterruption::default(),
            camera: RawCamera::default(),
            emails: RawEmails::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSession {
    pub max_lives: Option<u32>,

    /// Length of the working day in seconds
    pub day_duration_seconds: Option<f64>,

    /// Emails needed to keep the job
    pub min_emails_to_survive: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTransition {
    /// How long the "Day 1" screen is fully visible
    pub intro_screen_seconds: Option<f64>,

    /// How long the "Day 1" screen takes to fade out
    pub fade_seconds: Option<f64>,

    /// Time after depletion before a life is lost
    pub grace_period_seconds: Option<f64>,

    /// How long the fired / game-over screen stays before returning to menu
    pub outcome_screen_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBattery {
    /// Seconds from full to empty
    pub max_charge_seconds: Option<f64>,

    /// Ratio below which the battery is shown as critical
    pub critical_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCharger {
    /// Charge gained per second of holding, relative to drain
    pub charge_multiplier: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawInterruption {
    /// Countdown spacing between interruptions
    pub interval_seconds: Option<f64>,

    /// How long the coworker keeps talking
    pub hold_seconds: Option<f64>,

    /// Seconds between chat bubbles
    pub spawn_interval_seconds: Option<f64>,

    /// Lines the coworker says
    pub messages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCamera {
    pub pan_speed: Option<f64>,
    pub zoom_speed: Option<f64>,

    /// Orthographic size when looking at the whole room
    pub normal_zoom: Option<f64>,

    /// Orthographic size when looking at the laptop
    pub laptop_zoom: Option<f64>,

    /// `[x, y]`
    pub laptop_focus: Option<[f64; 2]>,

    /// `[x, y]`
    pub employee_focus: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEmails {
    /// Email bodies; empty disables the playlist
    #[serde(default)]
    pub bodies: Vec<String>,

    /// Pause between finishing one email and loading the next
    pub next_email_delay_seconds: Option<f64>,

    /// Fixed shuffle seed for reproducible runs
    pub shuffle_seed: Option<u64>,
}

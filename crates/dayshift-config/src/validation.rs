//! Configuration validation

use crate::schema::RawConfig;
use std::time::Duration;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("interruption.interval_seconds ({interval}s) must be shorter than the day ({day}s)")]
    IntervalExceedsDay { interval: f64, day: f64 },

    #[error("interruption.hold_seconds ({hold}s) must be shorter than interval_seconds ({interval}s)")]
    HoldExceedsInterval { hold: f64, interval: f64 },

    #[error("emails.bodies[{index}] is empty")]
    EmptyEmailBody { index: usize },

    #[error("interruption.messages[{index}] is empty")]
    EmptyChatMessage { index: usize },
}

/// Validate a raw configuration, collecting every problem
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.session.max_lives == Some(0) {
        errors.push(ValidationError::InvalidValue {
            field: "session.max_lives",
            message: "must be at least 1".into(),
        });
    }

    let durations = [
        ("session.day_duration_seconds", config.session.day_duration_seconds),
        ("transition.intro_screen_seconds", config.transition.intro_screen_seconds),
        ("transition.fade_seconds", config.transition.fade_seconds),
        ("transition.grace_period_seconds", config.transition.grace_period_seconds),
        ("battery.max_charge_seconds", config.battery.max_charge_seconds),
        ("interruption.interval_seconds", config.interruption.interval_seconds),
        ("interruption.hold_seconds", config.interruption.hold_seconds),
        ("interruption.spawn_interval_seconds", config.interruption.spawn_interval_seconds),
        ("emails.next_email_delay_seconds", config.emails.next_email_delay_seconds),
    ];
    for (field, value) in durations {
        if let Some(value) = value {
            let error = check_positive(field, value).or_else(|| check_duration(field, value));
            if let Some(error) = error {
                errors.push(error);
            }
        }
    }

    let positive = [
        ("charger.charge_multiplier", config.charger.charge_multiplier),
        ("camera.pan_speed", config.camera.pan_speed),
        ("camera.zoom_speed", config.camera.zoom_speed),
        ("camera.normal_zoom", config.camera.normal_zoom),
        ("camera.laptop_zoom", config.camera.laptop_zoom),
    ];
    for (field, value) in positive {
        if let Some(value) = value {
            if let Some(error) = check_positive(field, value) {
                errors.push(error);
            }
        }
    }

    if let Some(outcome) = config.transition.outcome_screen_seconds {
        if !outcome.is_finite() || outcome < 0.0 {
            errors.push(ValidationError::InvalidValue {
                field: "transition.outcome_screen_seconds",
                message: format!("must be a non-negative number of seconds, got {}", outcome),
            });
        } else if let Some(error) = check_duration("transition.outcome_screen_seconds", outcome) {
            errors.push(error);
        }
    }

    if let Some(ratio) = config.battery.critical_ratio {
        if !(ratio > 0.0 && ratio < 1.0) {
            errors.push(ValidationError::InvalidValue {
                field: "battery.critical_ratio",
                message: format!("must be between 0 and 1 (exclusive), got {}", ratio),
            });
        }
    }

    for (field, point) in [
        ("camera.laptop_focus", config.camera.laptop_focus),
        ("camera.employee_focus", config.camera.employee_focus),
    ] {
        if let Some([x, y]) = point {
            if !x.is_finite() || !y.is_finite() {
                errors.push(ValidationError::InvalidValue {
                    field,
                    message: "coordinates must be finite".into(),
                });
            }
        }
    }

    errors.extend(validate_interruption_spacing(config));

    for (index, body) in config.emails.bodies.iter().enumerate() {
        if body.trim().is_empty() {
            errors.push(ValidationError::EmptyEmailBody { index });
        }
    }

    if let Some(messages) = &config.interruption.messages {
        if messages.is_empty() {
            errors.push(ValidationError::InvalidValue {
                field: "interruption.messages",
                message: "must contain at least one message".into(),
            });
        }
        for (index, message) in messages.iter().enumerate() {
            if message.trim().is_empty() {
                errors.push(ValidationError::EmptyChatMessage { index });
            }
        }
    }

    errors
}

/// Interruptions must fit inside the day, and each must finish before the next is due.
/// Checked against defaults for whichever side is not configured.
fn validate_interruption_spacing(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let day = config.session.day_duration_seconds.unwrap_or(180.0);
    let interval = config.interruption.interval_seconds.unwrap_or(60.0);
    let hold = config.interruption.hold_seconds.unwrap_or(15.0);

    // Non-positive values are already reported individually
    if day <= 0.0 || interval <= 0.0 || hold <= 0.0 {
        return errors;
    }

    if interval >= day {
        errors.push(ValidationError::IntervalExceedsDay { interval, day });
    }
    if hold >= interval {
        errors.push(ValidationError::HoldExceedsInterval { hold, interval });
    }

    errors
}

fn check_positive(field: &'static str, value: f64) -> Option<ValidationError> {
    if value.is_finite() && value > 0.0 {
        None
    } else {
        Some(ValidationError::InvalidValue {
            field,
            message: format!("must be a positive number, got {}", value),
        })
    }
}

/// Rejects seconds too large to hold in a `Duration`
fn check_duration(field: &'static str, seconds: f64) -> Option<ValidationError> {
    Duration::try_from_secs_f64(seconds)
        .err()
        .map(|_| ValidationError::InvalidValue {
            field,
            message: format!("{} seconds is out of range", seconds),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_valid() {
        assert!(validate_config(&RawConfig::empty()).is_empty());
    }

    #[test]
    fn zero_lives_rejected() {
        let mut raw = RawConfig::empty();
        raw.session.max_lives = Some(0);

        let errors = validate_config(&raw);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::InvalidValue { field: "session.max_lives", .. }
        ));
    }

    #[test]
    fn non_positive_durations_rejected() {
        let mut raw = RawConfig::empty();
        raw.transition.grace_period_seconds = Some(0.0);
        raw.battery.max_charge_seconds = Some(-5.0);
        raw.camera.pan_speed = Some(f64::NAN);

        let errors = validate_config(&raw);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn huge_durations_rejected() {
        let mut raw = RawConfig::empty();
        raw.session.day_duration_seconds = Some(1e20);
        raw.transition.outcome_screen_seconds = Some(1e30);

        let errors = validate_config(&raw);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidValue { field: "session.day_duration_seconds", .. }
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidValue { field: "transition.outcome_screen_seconds", .. }
        )));
    }

    #[test]
    fn outcome_screen_may_be_zero() {
        let mut raw = RawConfig::empty();
        raw.transition.outcome_screen_seconds = Some(0.0);
        assert!(validate_config(&raw).is_empty());
    }

    #[test]
    fn interval_must_fit_in_day() {
        let mut raw = RawConfig::empty();
        raw.session.day_duration_seconds = Some(50.0);

        let errors = validate_config(&raw);
        assert_eq!(
            errors,
            vec![ValidationError::IntervalExceedsDay {
                interval: 60.0,
                day: 50.0
            }]
        );
    }

    #[test]
    fn hold_must_fit_in_interval() {
        let mut raw = RawConfig::empty();
        raw.interruption.hold_seconds = Some(60.0);

        let errors = validate_config(&raw);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::HoldExceedsInterval { .. }]
        ));
    }

    #[test]
    fn empty_strings_rejected() {
        let mut raw = RawConfig::empty();
        raw.emails.bodies = vec!["Subject: ok".into(), "   ".into()];
        raw.interruption.messages = Some(vec!["".into(), "hey".into()]);

        let errors = validate_config(&raw);
        assert!(errors.contains(&ValidationError::EmptyEmailBody { index: 1 }));
        assert!(errors.contains(&ValidationError::EmptyChatMessage { index: 0 }));
    }

    #[test]
    fn critical_ratio_bounds() {
        let mut raw = RawConfig::empty();
        raw.battery.critical_ratio = Some(1.0);
        assert_eq!(validate_config(&raw).len(), 1);

        raw.battery.critical_ratio = Some(0.3);
        assert!(validate_config(&raw).is_empty());
    }
}

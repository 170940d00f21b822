//! Config validation CLI tool
//!
//! Validates a dayshift configuration file and reports any errors.

use dayshift_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a dayshift configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            eprintln!("  validate-config config.example.toml");
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match dayshift_config::load_config(&config_path) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", dayshift_config::CURRENT_CONFIG_VERSION);
            println!(
                "  Day: {} ({} lives, {} emails to survive)",
                dayshift_util::format_duration(config.session.day_duration),
                config.session.max_lives,
                config.session.min_emails_to_survive
            );
            println!(
                "  Battery: {:.1}s full charge, {:.1}s grace period",
                config.battery.max_charge.as_secs_f64(),
                config.transition.grace_period.as_secs_f64()
            );
            println!(
                "  Interruptions: every {:.0}s for {:.0}s ({} lines)",
                config.interruption.interval.as_secs_f64(),
                config.interruption.hold.as_secs_f64(),
                config.interruption.messages.len()
            );
            if config.emails.bodies.is_empty() {
                println!("  Emails: playlist disabled");
            } else {
                println!("  Emails: {}", config.emails.bodies.len());
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                dayshift_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                dayshift_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                dayshift_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                dayshift_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        dayshift_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}

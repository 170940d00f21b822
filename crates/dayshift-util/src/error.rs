//! Error types for dayshift

use thiserror::Error;

/// Core error type for dayshift operations that can fail
///
/// The simulation itself never fails; these cover the runner's command
/// channel around it.
#[derive(Debug, Error)]
pub enum DayshiftError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No active session")]
    NoActiveSession,
}

impl DayshiftError {
    pub fn unknown_command(cmd: impl Into<String>) -> Self {
        Self::UnknownCommand(cmd.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DayshiftError>;

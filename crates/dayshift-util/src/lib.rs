//! Shared utilities for dayshift
//!
//! This crate provides:
//! - ID types (SessionId)
//! - Time utilities (monotonic time, countdown formatting, interpolation)
//! - Error types
//! - Default paths for the config file

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;

//! Shared types for dayshift
//!
//! This crate defines the vocabulary shared by the core, the collaborators
//! and the runner:
//! - Session phases, outcomes, screens, camera focus
//! - Events (core -> collaborators / observers)
//! - Player commands (runner -> core)
//! - Versioning

mod commands;
mod events;
mod types;

pub use commands::*;
pub use events::*;
pub use types::*;

/// Current event schema version
pub const API_VERSION: u32 = 1;

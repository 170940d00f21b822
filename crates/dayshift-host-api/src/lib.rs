//! Collaborator interfaces for dayshift
//!
//! This crate defines the boundary between the session core and everything
//! that renders, plays sound or accepts keystrokes. It contains no
//! platform code itself. Every collaborator is optional: a missing one
//! turns the corresponding directives into silent no-ops.

mod capabilities;
mod mock;
mod stage;
mod traits;

pub use capabilities::*;
pub use mock::*;
pub use stage::*;
pub use traits::*;

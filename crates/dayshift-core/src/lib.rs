//! Day-cycle orchestrator for dayshift
//!
//! This crate contains the simulation of one working day:
//! - Battery model with an edge-triggered depletion latch
//! - Cancellable grace period after depletion
//! - Interruption scheduling and its camera/chatter choreography
//! - Session clock, intro sequence and win/lose evaluation
//!
//! Everything is driven by `tick(dt)` from a single thread. Operations never
//! call collaborators directly; they return the `SessionEvent`s describing what
//! collaborators should do.

mod battery;
mod camera;
mod charger;
mod chatter;
mod clock;
mod grace;
mod interruption;
mod intro;
mod orchestrator;
mod playlist;
mod session;

pub use battery::*;
pub use camera::*;
pub use charger::*;
pub use chatter::*;
pub use clock::*;
pub use grace::*;
pub use interruption::*;
pub use intro::*;
pub use orchestrator::*;
pub use playlist::*;
pub use session::*;

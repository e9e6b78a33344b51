//! Engine: the cooperative scheduler and its lifecycle controller.
//!
//! One [`RevealEngine`] owns one text source and at most one in-flight
//! run, advancing only when the host offers it a tick. See the crate
//! docs for the full scheduling model.

mod controller;
mod state;

pub use controller::RevealEngine;
pub use state::{RunPhase, StreamState};

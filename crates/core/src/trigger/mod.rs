//! Update triggers.
//!
//! A trigger is a source of "evaluate token(s) now" events. It calls the
//! orchestrator's update entry points on its own schedule and has no other
//! effects. Time-based and event-based variants are provided; direct calls
//! to the orchestrator remain first-class, so running with zero triggers is
//! a valid (manual) deployment.

mod on_mint;
mod periodic;
mod traits;

pub use on_mint::OnMintTrigger;
pub use periodic::PeriodicSweepTrigger;
pub use traits::Trigger;

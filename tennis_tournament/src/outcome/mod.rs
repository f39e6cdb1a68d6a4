//! Outcome module: the finalized record of a completed tournament.
//!
//! An outcome names the champion and keeps a snapshot of every match played,
//! in bracket order. Once finalized the snapshot is write-once.

pub mod errors;
pub mod models;

pub use errors::{OutcomeError, OutcomeResult};
pub use models::{OutcomeId, TournamentOutcome};

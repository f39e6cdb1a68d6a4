//! Matches: a single contest between two players and its outcome rule.

pub mod errors;
pub mod models;

pub use errors::{MatchError, MatchResult};
pub use models::{Match, MatchId, TieBreak};

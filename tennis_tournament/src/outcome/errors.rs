//! Outcome error types.

use thiserror::Error;

use crate::errors::ErrorKind;
use crate::matches::MatchId;
use crate::player::PlayerId;
use crate::tournament::TournamentId;

/// Outcome errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutcomeError {
    /// Match history is locked
    #[error("Outcome is finalized; its matches cannot be changed")]
    Finalized,

    #[error("Winner {0} is not one of the tournament's players")]
    WinnerNotInRoster(PlayerId),

    #[error("Match {match_id} belongs to tournament {actual}, not {expected}")]
    ForeignMatch {
        match_id: MatchId,
        expected: TournamentId,
        actual: TournamentId,
    },
}

impl OutcomeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OutcomeError::Finalized => ErrorKind::State,
            _ => ErrorKind::Validation,
        }
    }
}

/// Result type for outcome operations
pub type OutcomeResult<T> = Result<T, OutcomeError>;

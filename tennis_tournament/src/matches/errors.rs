//! Match error types.

use thiserror::Error;

use crate::player::PlayerId;

/// Match construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Rounds are numbered from 1
    #[error("Invalid round number: {0}")]
    InvalidRound(u32),

    /// A player cannot face themselves
    #[error("Player {0} cannot be paired against themselves")]
    SamePlayer(PlayerId),
}

/// Result type for match operations
pub type MatchResult<T> = Result<T, MatchError>;

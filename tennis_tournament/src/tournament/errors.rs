//! Tournament error types.

use thiserror::Error;

use super::models::{TournamentId, TournamentStatus, TournamentType};
use crate::errors::ErrorKind;
use crate::matches::{MatchError, MatchId};
use crate::player::{PlayerId, PlayerType};

/// Tournament errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    #[error("Tournament must have players")]
    EmptyRoster,

    #[error("Player count must be a power of two of at least 2, got {0}")]
    InvalidPlayerCount(usize),

    #[error("All players must be of type {expected}: {player} is {actual}")]
    PlayerTypeMismatch {
        expected: TournamentType,
        player: String,
        actual: PlayerType,
    },

    #[error("Player already registered: {0}")]
    DuplicatePlayer(PlayerId),

    #[error("Player {0} is not part of this tournament")]
    UnknownPlayer(PlayerId),

    #[error("Tournament not in correct state: expected {expected:?}, got {actual:?}")]
    InvalidState {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },

    #[error("Tournament is cancelled")]
    Cancelled,

    #[error("Match {match_id} belongs to tournament {actual}, not {expected}")]
    ForeignMatch {
        match_id: MatchId,
        expected: TournamentId,
        actual: TournamentId,
    },

    #[error("Cannot pair an odd number of winners: {0}")]
    OddWinnerCount(usize),

    #[error("Unsupported tournament type: {0}")]
    UnsupportedType(String),

    #[error(transparent)]
    Match(#[from] MatchError),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::InvalidState { .. } | TournamentError::Cancelled => ErrorKind::State,
            _ => ErrorKind::Validation,
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

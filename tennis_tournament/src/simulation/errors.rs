//! Simulation error types.

use thiserror::Error;

use crate::errors::ErrorKind;
use crate::matches::MatchId;
use crate::outcome::OutcomeError;
use crate::player::PlayerType;
use crate::tournament::{TournamentError, TournamentId};

/// Simulation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("Tournament must have players")]
    EmptyRoster,

    #[error("Player count must be a power of two of at least 2, got {0}")]
    InvalidPlayerCount(usize),

    #[error("Tournament {0} has already been completed")]
    AlreadyCompleted(TournamentId),

    #[error("Both players must be of the same type, got {player1} and {player2}")]
    MixedMatch {
        player1: PlayerType,
        player2: PlayerType,
    },

    #[error("{strategy} match strategy cannot play {actual} players")]
    StrategyMismatch {
        strategy: PlayerType,
        actual: PlayerType,
    },

    #[error("Unsupported tournament type: {0}")]
    UnsupportedTournamentType(String),

    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    /// A generated match was never played
    #[error("Match {0} has no winner after simulation")]
    MissingWinner(MatchId),

    /// Bracket did not fold to N - 1 matches
    #[error("Bracket for {players} players produced {matches} matches")]
    BracketSizeMismatch { players: usize, matches: usize },

    #[error("Simulation ended without a champion")]
    NoChampion,

    #[error(transparent)]
    Tournament(#[from] TournamentError),

    #[error("Failed to build outcome: {0}")]
    Outcome(#[from] OutcomeError),
}

impl SimulationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimulationError::AlreadyCompleted(_) => ErrorKind::State,
            SimulationError::MissingWinner(_)
            | SimulationError::BracketSizeMismatch { .. }
            | SimulationError::NoChampion
            | SimulationError::Outcome(_) => ErrorKind::Internal,
            SimulationError::Tournament(e) => e.kind(),
            _ => ErrorKind::Validation,
        }
    }

    /// Broken invariant in pairing or outcome logic
    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }

    /// Message safe to show to an end user; internal details are withheld
    pub fn client_message(&self) -> String {
        if self.is_internal() {
            "Internal error while simulating tournament".to_string()
        } else {
            self.to_string()
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

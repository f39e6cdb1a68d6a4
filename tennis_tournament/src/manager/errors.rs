//! Manager error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::errors::ErrorKind;
use crate::player::{PlayerError, PlayerId};
use crate::simulation::SimulationError;
use crate::tournament::{TournamentError, TournamentId};

/// Errors surfaced by [`TournamentManager`](super::TournamentManager)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Tournament {0} has already been completed")]
    AlreadyCompleted(TournamentId),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error(transparent)]
    Tournament(#[from] TournamentError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ManagerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ManagerError::PlayerNotFound(_) | ManagerError::TournamentNotFound(_) => ErrorKind::NotFound,
            ManagerError::AlreadyCompleted(_) => ErrorKind::State,
            ManagerError::Player(_) => ErrorKind::Validation,
            ManagerError::Tournament(e) => e.kind(),
            ManagerError::Simulation(e) => e.kind(),
            ManagerError::Repository(e) => e.kind(),
        }
    }

    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }

    /// Message safe to show to an end user
    pub fn client_message(&self) -> String {
        match self {
            ManagerError::Simulation(e) => e.client_message(),
            e if e.is_internal() => "Internal error".to_string(),
            e => e.to_string(),
        }
    }
}

/// Result type for manager operations
pub type ManagerResult<T> = Result<T, ManagerError>;

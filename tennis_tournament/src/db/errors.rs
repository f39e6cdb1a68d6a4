//! Repository error types.

use thiserror::Error;
use uuid::Uuid;

use crate::errors::ErrorKind;

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: Uuid },
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::Duplicate { .. } => ErrorKind::Validation,
        }
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

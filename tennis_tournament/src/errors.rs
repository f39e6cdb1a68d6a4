//! Error classification shared by the module error types.

use serde::Serialize;
use std::fmt;

/// Broad category of an error, used by callers to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Bad input: roster size, player type, attribute ranges
    Validation,
    /// Operation not allowed in the current lifecycle state
    State,
    /// Referenced entity does not exist
    NotFound,
    /// Broken internal invariant; indicates a bug, never retried
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::State => write!(f, "state"),
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

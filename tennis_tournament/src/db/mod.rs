//! Persistence collaborators.
//!
//! The engine itself never performs I/O. Callers persist players,
//! tournaments, matches and outcomes through these repository traits; the
//! in-memory implementations back the command-line tool and the tests.

pub mod errors;
pub mod memory;
pub mod repository;

pub use errors::{RepositoryError, RepositoryResult};
pub use memory::{
    InMemoryMatchRepository, InMemoryOutcomeRepository, InMemoryPlayerRepository,
    InMemoryTournamentRepository,
};
pub use repository::{MatchRepository, OutcomeRepository, PlayerRepository, TournamentRepository};

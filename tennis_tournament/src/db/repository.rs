//! Repository trait definitions for testability and dependency injection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::errors::RepositoryResult;
use crate::matches::{Match, MatchId};
use crate::outcome::{OutcomeId, TournamentOutcome};
use crate::player::{Player, PlayerId};
use crate::tournament::{Tournament, TournamentId, TournamentStatus, TournamentType};

/// Trait for player repository operations
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// All players, ordered by name
    async fn get_all(&self) -> RepositoryResult<Vec<Arc<Player>>>;

    async fn get_by_id(&self, id: PlayerId) -> RepositoryResult<Option<Arc<Player>>>;

    /// Store a new player and return the shared handle
    async fn add(&self, player: Player) -> RepositoryResult<Arc<Player>>;

    /// Replace a stored player with the same id
    async fn update(&self, player: Player) -> RepositoryResult<Arc<Player>>;

    /// Returns whether a player was removed
    async fn delete(&self, id: PlayerId) -> RepositoryResult<bool>;
}

/// Trait for tournament repository operations
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// All tournaments, ordered by start date
    async fn get_all(&self) -> RepositoryResult<Vec<Tournament>>;

    async fn get_by_id(&self, id: TournamentId) -> RepositoryResult<Option<Tournament>>;

    async fn get_by_type(&self, tournament_type: TournamentType) -> RepositoryResult<Vec<Tournament>>;

    /// Tournaments starting within `[start, end]`
    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Tournament>>;

    async fn get_by_status(&self, status: TournamentStatus) -> RepositoryResult<Vec<Tournament>>;

    async fn add(&self, tournament: Tournament) -> RepositoryResult<TournamentId>;

    async fn update(&self, tournament: Tournament) -> RepositoryResult<()>;

    async fn delete(&self, id: TournamentId) -> RepositoryResult<bool>;
}

/// Trait for match repository operations
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// All matches in insertion order
    async fn get_all(&self) -> RepositoryResult<Vec<Match>>;

    async fn get_by_id(&self, id: MatchId) -> RepositoryResult<Option<Match>>;

    async fn get_by_tournament(&self, tournament_id: TournamentId) -> RepositoryResult<Vec<Match>>;

    async fn get_by_tournament_and_round(
        &self,
        tournament_id: TournamentId,
        round: u32,
    ) -> RepositoryResult<Vec<Match>>;

    async fn get_by_player(&self, player_id: PlayerId) -> RepositoryResult<Vec<Match>>;

    async fn add(&self, game: Match) -> RepositoryResult<MatchId>;

    async fn add_range(&self, matches: Vec<Match>) -> RepositoryResult<usize>;

    async fn update(&self, game: Match) -> RepositoryResult<()>;

    async fn delete(&self, id: MatchId) -> RepositoryResult<bool>;
}

/// Trait for outcome repository operations
#[async_trait]
pub trait OutcomeRepository: Send + Sync {
    /// All outcomes, ordered by completion date
    async fn get_all(&self) -> RepositoryResult<Vec<TournamentOutcome>>;

    async fn get_by_id(&self, id: OutcomeId) -> RepositoryResult<Option<TournamentOutcome>>;

    async fn get_by_tournament(&self, tournament_id: TournamentId) -> RepositoryResult<Option<TournamentOutcome>>;

    async fn get_by_tournament_type(
        &self,
        tournament_type: TournamentType,
    ) -> RepositoryResult<Vec<TournamentOutcome>>;

    /// Outcomes completed within `[start, end]`
    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TournamentOutcome>>;

    async fn get_by_winner(&self, player_id: PlayerId) -> RepositoryResult<Vec<TournamentOutcome>>;

    async fn add(&self, outcome: TournamentOutcome) -> RepositoryResult<OutcomeId>;

    async fn delete(&self, id: OutcomeId) -> RepositoryResult<bool>;
}

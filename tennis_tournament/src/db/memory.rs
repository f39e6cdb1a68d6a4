//! In-memory repositories backed by `tokio::sync::RwLock`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::errors::{RepositoryError, RepositoryResult};
use super::repository::{MatchRepository, OutcomeRepository, PlayerRepository, TournamentRepository};
use crate::matches::{Match, MatchId};
use crate::outcome::{OutcomeId, TournamentOutcome};
use crate::player::{Player, PlayerId};
use crate::tournament::{Tournament, TournamentId, TournamentStatus, TournamentType};

fn in_range(date: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start <= date && date <= end
}

/// Player store keyed by id
#[derive(Debug, Default, Clone)]
pub struct InMemoryPlayerRepository {
    players: Arc<RwLock<HashMap<PlayerId, Arc<Player>>>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn get_all(&self) -> RepositoryResult<Vec<Arc<Player>>> {
        let mut players: Vec<_> = self.players.read().await.values().cloned().collect();
        players.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(players)
    }

    async fn get_by_id(&self, id: PlayerId) -> RepositoryResult<Option<Arc<Player>>> {
        Ok(self.players.read().await.get(&id).cloned())
    }

    async fn add(&self, player: Player) -> RepositoryResult<Arc<Player>> {
        let mut players = self.players.write().await;
        if players.contains_key(&player.id()) {
            return Err(RepositoryError::Duplicate {
                entity: "Player",
                id: player.id(),
            });
        }
        let player = Arc::new(player);
        players.insert(player.id(), Arc::clone(&player));
        Ok(player)
    }

    async fn update(&self, player: Player) -> RepositoryResult<Arc<Player>> {
        let mut players = self.players.write().await;
        let Some(slot) = players.get_mut(&player.id()) else {
            return Err(RepositoryError::NotFound {
                entity: "Player",
                id: player.id(),
            });
        };
        *slot = Arc::new(player);
        Ok(Arc::clone(slot))
    }

    async fn delete(&self, id: PlayerId) -> RepositoryResult<bool> {
        Ok(self.players.write().await.remove(&id).is_some())
    }
}

/// Tournament store keyed by id
#[derive(Debug, Default, Clone)]
pub struct InMemoryTournamentRepository {
    tournaments: Arc<RwLock<HashMap<TournamentId, Tournament>>>,
}

impl InMemoryTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, keep: F) -> Vec<Tournament>
    where
        F: Fn(&Tournament) -> bool + Send,
    {
        let mut found: Vec<_> = self
            .tournaments
            .read()
            .await
            .values()
            .filter(|t| keep(t))
            .cloned()
            .collect();
        found.sort_by_key(|t| t.start_date());
        found
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournamentRepository {
    async fn get_all(&self) -> RepositoryResult<Vec<Tournament>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn get_by_id(&self, id: TournamentId) -> RepositoryResult<Option<Tournament>> {
        Ok(self.tournaments.read().await.get(&id).cloned())
    }

    async fn get_by_type(&self, tournament_type: TournamentType) -> RepositoryResult<Vec<Tournament>> {
        Ok(self.filtered(|t| t.tournament_type() == tournament_type).await)
    }

    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Tournament>> {
        Ok(self.filtered(|t| in_range(t.start_date(), start, end)).await)
    }

    async fn get_by_status(&self, status: TournamentStatus) -> RepositoryResult<Vec<Tournament>> {
        Ok(self.filtered(|t| t.status() == status).await)
    }

    async fn add(&self, tournament: Tournament) -> RepositoryResult<TournamentId> {
        let mut tournaments = self.tournaments.write().await;
        let id = tournament.id();
        if tournaments.contains_key(&id) {
            return Err(RepositoryError::Duplicate {
                entity: "Tournament",
                id,
            });
        }
        tournaments.insert(id, tournament);
        Ok(id)
    }

    async fn update(&self, tournament: Tournament) -> RepositoryResult<()> {
        let mut tournaments = self.tournaments.write().await;
        match tournaments.get_mut(&tournament.id()) {
            Some(slot) => {
                *slot = tournament;
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "Tournament",
                id: tournament.id(),
            }),
        }
    }

    async fn delete(&self, id: TournamentId) -> RepositoryResult<bool> {
        Ok(self.tournaments.write().await.remove(&id).is_some())
    }
}

/// Match store; keeps insertion order so brackets read back in play order
#[derive(Debug, Default, Clone)]
pub struct InMemoryMatchRepository {
    matches: Arc<RwLock<Vec<Match>>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, keep: F) -> Vec<Match>
    where
        F: Fn(&Match) -> bool + Send,
    {
        self.matches.read().await.iter().filter(|m| keep(m)).cloned().collect()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn get_all(&self) -> RepositoryResult<Vec<Match>> {
        Ok(self.matches.read().await.clone())
    }

    async fn get_by_id(&self, id: MatchId) -> RepositoryResult<Option<Match>> {
        Ok(self.matches.read().await.iter().find(|m| m.id() == id).cloned())
    }

    async fn get_by_tournament(&self, tournament_id: TournamentId) -> RepositoryResult<Vec<Match>> {
        Ok(self.filtered(|m| m.tournament_id() == tournament_id).await)
    }

    async fn get_by_tournament_and_round(
        &self,
        tournament_id: TournamentId,
        round: u32,
    ) -> RepositoryResult<Vec<Match>> {
        Ok(self
            .filtered(|m| m.tournament_id() == tournament_id && m.round() == round)
            .await)
    }

    async fn get_by_player(&self, player_id: PlayerId) -> RepositoryResult<Vec<Match>> {
        Ok(self.filtered(|m| m.involves(player_id)).await)
    }

    async fn add(&self, game: Match) -> RepositoryResult<MatchId> {
        let mut matches = self.matches.write().await;
        let id = game.id();
        if matches.iter().any(|m| m.id() == id) {
            return Err(RepositoryError::Duplicate { entity: "Match", id });
        }
        matches.push(game);
        Ok(id)
    }

    async fn add_range(&self, games: Vec<Match>) -> RepositoryResult<usize> {
        let mut matches = self.matches.write().await;
        // All or nothing: check every id before inserting any
        for (i, game) in games.iter().enumerate() {
            let id = game.id();
            if matches.iter().chain(&games[..i]).any(|m| m.id() == id) {
                return Err(RepositoryError::Duplicate { entity: "Match", id });
            }
        }
        let count = games.len();
        matches.extend(games);
        Ok(count)
    }

    async fn update(&self, game: Match) -> RepositoryResult<()> {
        let mut matches = self.matches.write().await;
        match matches.iter_mut().find(|m| m.id() == game.id()) {
            Some(slot) => {
                *slot = game;
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "Match",
                id: game.id(),
            }),
        }
    }

    async fn delete(&self, id: MatchId) -> RepositoryResult<bool> {
        let mut matches = self.matches.write().await;
        let before = matches.len();
        matches.retain(|m| m.id() != id);
        Ok(matches.len() != before)
    }
}

/// Outcome store keyed by id
#[derive(Debug, Default, Clone)]
pub struct InMemoryOutcomeRepository {
    outcomes: Arc<RwLock<HashMap<OutcomeId, TournamentOutcome>>>,
}

impl InMemoryOutcomeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, keep: F) -> Vec<TournamentOutcome>
    where
        F: Fn(&TournamentOutcome) -> bool + Send,
    {
        let mut found: Vec<_> = self
            .outcomes
            .read()
            .await
            .values()
            .filter(|o| keep(o))
            .cloned()
            .collect();
        found.sort_by_key(|o| o.completion_date());
        found
    }
}

#[async_trait]
impl OutcomeRepository for InMemoryOutcomeRepository {
    async fn get_all(&self) -> RepositoryResult<Vec<TournamentOutcome>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn get_by_id(&self, id: OutcomeId) -> RepositoryResult<Option<TournamentOutcome>> {
        Ok(self.outcomes.read().await.get(&id).cloned())
    }

    async fn get_by_tournament(&self, tournament_id: TournamentId) -> RepositoryResult<Option<TournamentOutcome>> {
        Ok(self
            .outcomes
            .read()
            .await
            .values()
            .find(|o| o.tournament_id() == tournament_id)
            .cloned())
    }

    async fn get_by_tournament_type(
        &self,
        tournament_type: TournamentType,
    ) -> RepositoryResult<Vec<TournamentOutcome>> {
        Ok(self.filtered(|o| o.tournament_type() == tournament_type).await)
    }

    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TournamentOutcome>> {
        Ok(self.filtered(|o| in_range(o.completion_date(), start, end)).await)
    }

    async fn get_by_winner(&self, player_id: PlayerId) -> RepositoryResult<Vec<TournamentOutcome>> {
        Ok(self.filtered(|o| o.winner().id() == player_id).await)
    }

    async fn add(&self, outcome: TournamentOutcome) -> RepositoryResult<OutcomeId> {
        let mut outcomes = self.outcomes.write().await;
        let id = outcome.id();
        if outcomes.contains_key(&id) {
            return Err(RepositoryError::Duplicate { entity: "Outcome", id });
        }
        if let Some(existing) = outcomes.values().find(|o| o.tournament_id() == outcome.tournament_id()) {
            return Err(RepositoryError::Duplicate {
                entity: "Outcome",
                id: existing.id(),
            });
        }
        outcomes.insert(id, outcome);
        Ok(id)
    }

    async fn delete(&self, id: OutcomeId) -> RepositoryResult<bool> {
        Ok(self.outcomes.write().await.remove(&id).is_some())
    }
}

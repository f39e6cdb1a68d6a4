//! Tournament manager: player registration, tournament creation and simulation.

use chrono::{DateTime, Utc};
use log::{info, warn};
use rand::{RngCore, rngs::StdRng};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::errors::{ManagerError, ManagerResult};
use crate::db::{
    InMemoryMatchRepository, InMemoryOutcomeRepository, InMemoryPlayerRepository, InMemoryTournamentRepository,
    MatchRepository, OutcomeRepository, PlayerRepository, RepositoryError, TournamentRepository,
};
use crate::matches::{Match, MatchId};
use crate::outcome::TournamentOutcome;
use crate::player::{Player, PlayerId, PlayerSpec};
use crate::simulation::TournamentSimulationService;
use crate::tournament::{Tournament, TournamentError, TournamentId, TournamentStatus, TournamentType};

/// Tournament manager
pub struct TournamentManager<R: RngCore + Send = StdRng> {
    players: Arc<dyn PlayerRepository>,
    tournaments: Arc<dyn TournamentRepository>,
    matches: Arc<dyn MatchRepository>,
    outcomes: Arc<dyn OutcomeRepository>,
    simulator: Arc<Mutex<TournamentSimulationService<R>>>,
}

impl<R: RngCore + Send> Clone for TournamentManager<R> {
    fn clone(&self) -> Self {
        Self {
            players: Arc::clone(&self.players),
            tournaments: Arc::clone(&self.tournaments),
            matches: Arc::clone(&self.matches),
            outcomes: Arc::clone(&self.outcomes),
            simulator: Arc::clone(&self.simulator),
        }
    }
}

impl TournamentManager<StdRng> {
    /// Manager over fresh in-memory repositories
    pub fn in_memory(simulator: TournamentSimulationService) -> Self {
        Self::new(
            Arc::new(InMemoryPlayerRepository::new()),
            Arc::new(InMemoryTournamentRepository::new()),
            Arc::new(InMemoryMatchRepository::new()),
            Arc::new(InMemoryOutcomeRepository::new()),
            simulator,
        )
    }
}

impl<R: RngCore + Send> TournamentManager<R> {
    pub fn new(
        players: Arc<dyn PlayerRepository>,
        tournaments: Arc<dyn TournamentRepository>,
        matches: Arc<dyn MatchRepository>,
        outcomes: Arc<dyn OutcomeRepository>,
        simulator: TournamentSimulationService<R>,
    ) -> Self {
        Self {
            players,
            tournaments,
            matches,
            outcomes,
            simulator: Arc::new(Mutex::new(simulator)),
        }
    }

    /// Validate and store a new player
    pub async fn register_player(&self, spec: PlayerSpec) -> ManagerResult<Arc<Player>> {
        let player = Player::try_from(spec).inspect_err(|e| warn!("Rejected player registration: {e}"))?;
        let player = self.players.add(player).await?;
        info!("Registered {} player {} ({})", player.player_type(), player.name(), player.id());
        Ok(player)
    }

    pub async fn get_player(&self, id: PlayerId) -> ManagerResult<Arc<Player>> {
        self.players
            .get_by_id(id)
            .await?
            .ok_or(ManagerError::PlayerNotFound(id))
    }

    pub async fn list_players(&self) -> ManagerResult<Vec<Arc<Player>>> {
        Ok(self.players.get_all().await?)
    }

    /// Replace a player's attributes, keeping its id.
    ///
    /// Tournaments created earlier keep the attributes the player had when
    /// they were created.
    pub async fn update_player(&self, id: PlayerId, spec: PlayerSpec) -> ManagerResult<Arc<Player>> {
        self.get_player(id).await?;
        let player = spec
            .into_player_with_id(id)
            .inspect_err(|e| warn!("Rejected update of player {id}: {e}"))?;
        Ok(self.players.update(player).await?)
    }

    pub async fn delete_player(&self, id: PlayerId) -> ManagerResult<()> {
        if self.players.delete(id).await? {
            info!("Deleted player {id}");
            Ok(())
        } else {
            Err(ManagerError::PlayerNotFound(id))
        }
    }

    /// Create and store a scheduled tournament from registered players.
    ///
    /// The roster must be non-empty, a power of two in size, and made of
    /// existing players of the tournament's type.
    pub async fn create_tournament(
        &self,
        tournament_type: TournamentType,
        player_ids: &[PlayerId],
        start_date: DateTime<Utc>,
    ) -> ManagerResult<Tournament> {
        if player_ids.is_empty() {
            warn!("Rejected {tournament_type} tournament without players");
            return Err(TournamentError::EmptyRoster.into());
        }

        let mut roster = Vec::with_capacity(player_ids.len());
        for &id in player_ids {
            let player = self
                .get_player(id)
                .await
                .inspect_err(|_| warn!("Rejected {tournament_type} tournament: unknown player {id}"))?;
            roster.push(player);
        }

        let tournament = Tournament::with_players(tournament_type, roster, start_date)
            .inspect_err(|e| warn!("Rejected {tournament_type} tournament: {e}"))?;
        self.tournaments.add(tournament.clone()).await?;

        info!(
            "Created {} tournament {} with {} players",
            tournament_type,
            tournament.id(),
            tournament.players().len()
        );
        Ok(tournament)
    }

    /// Play a stored tournament to completion and persist the results.
    ///
    /// The simulator lock is held from the fetch to the last write, so calls
    /// through one manager never play the same tournament twice. The outcome
    /// is written first and claims the tournament for managers sharing the
    /// repositories; a failed later write removes what was already stored.
    pub async fn simulate_tournament(&self, id: TournamentId) -> ManagerResult<TournamentOutcome> {
        let mut simulator = self.simulator.lock().await;

        let mut tournament = self.get_tournament(id).await?;
        if tournament.status() == TournamentStatus::Completed {
            warn!("Tournament {id} has already been simulated");
            return Err(ManagerError::AlreadyCompleted(id));
        }

        let outcome = simulator
            .simulate_tournament(&mut tournament)
            .inspect_err(|e| warn!("Simulation of tournament {id} failed: {e}"))?;
        self.persist_results(tournament, &outcome).await?;
        drop(simulator);

        info!("Tournament {} won by {}", id, outcome.winner().name());
        Ok(outcome)
    }

    async fn persist_results(&self, tournament: Tournament, outcome: &TournamentOutcome) -> ManagerResult<()> {
        let id = tournament.id();
        let outcome_id = match self.outcomes.add(outcome.clone()).await {
            Ok(outcome_id) => outcome_id,
            Err(RepositoryError::Duplicate { .. }) => {
                warn!("Tournament {id} was completed by another run");
                return Err(ManagerError::AlreadyCompleted(id));
            }
            Err(e) => return Err(e.into()),
        };

        let played: Vec<MatchId> = tournament.matches().iter().map(Match::id).collect();
        if let Err(e) = self.matches.add_range(tournament.matches().to_vec()).await {
            warn!("Failed to store matches of tournament {id}: {e}");
            self.outcomes.delete(outcome_id).await?;
            return Err(e.into());
        }

        if let Err(e) = self.tournaments.update(tournament).await {
            warn!("Failed to store completed tournament {id}: {e}");
            for match_id in played {
                self.matches.delete(match_id).await?;
            }
            self.outcomes.delete(outcome_id).await?;
            return Err(e.into());
        }
        Ok(())
    }

    /// Cancel a scheduled or running tournament
    pub async fn cancel_tournament(&self, id: TournamentId) -> ManagerResult<Tournament> {
        let mut tournament = self.get_tournament(id).await?;
        tournament
            .cancel()
            .inspect_err(|e| warn!("Cannot cancel tournament {id}: {e}"))?;
        self.tournaments.update(tournament.clone()).await?;
        info!("Cancelled tournament {id}");
        Ok(tournament)
    }

    pub async fn get_tournament(&self, id: TournamentId) -> ManagerResult<Tournament> {
        self.tournaments
            .get_by_id(id)
            .await?
            .ok_or(ManagerError::TournamentNotFound(id))
    }

    pub async fn list_tournaments(&self) -> ManagerResult<Vec<Tournament>> {
        Ok(self.tournaments.get_all().await?)
    }

    pub async fn tournaments_by_type(&self, tournament_type: TournamentType) -> ManagerResult<Vec<Tournament>> {
        Ok(self.tournaments.get_by_type(tournament_type).await?)
    }

    pub async fn tournaments_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ManagerResult<Vec<Tournament>> {
        Ok(self.tournaments.get_by_date_range(start, end).await?)
    }

    pub async fn tournaments_by_status(&self, status: TournamentStatus) -> ManagerResult<Vec<Tournament>> {
        Ok(self.tournaments.get_by_status(status).await?)
    }

    /// Outcome of a tournament, if it has been played
    pub async fn outcome_for_tournament(&self, id: TournamentId) -> ManagerResult<Option<TournamentOutcome>> {
        Ok(self.outcomes.get_by_tournament(id).await?)
    }

    pub async fn outcomes_by_type(&self, tournament_type: TournamentType) -> ManagerResult<Vec<TournamentOutcome>> {
        Ok(self.outcomes.get_by_tournament_type(tournament_type).await?)
    }

    pub async fn outcomes_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ManagerResult<Vec<TournamentOutcome>> {
        Ok(self.outcomes.get_by_date_range(start, end).await?)
    }

    /// Titles won by a player
    pub async fn outcomes_by_winner(&self, player_id: PlayerId) -> ManagerResult<Vec<TournamentOutcome>> {
        Ok(self.outcomes.get_by_winner(player_id).await?)
    }

    pub async fn matches_for_tournament(&self, id: TournamentId) -> ManagerResult<Vec<Match>> {
        Ok(self.matches.get_by_tournament(id).await?)
    }

    pub async fn matches_for_player(&self, player_id: PlayerId) -> ManagerResult<Vec<Match>> {
        Ok(self.matches.get_by_player(player_id).await?)
    }
}

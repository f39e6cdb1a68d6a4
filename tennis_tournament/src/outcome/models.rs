//! Tournament outcome model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::errors::{OutcomeError, OutcomeResult};
use crate::matches::Match;
use crate::player::{Player, PlayerId};
use crate::tournament::{Tournament, TournamentId, TournamentType};

/// Outcome ID type
pub type OutcomeId = Uuid;

/// Champion and full match history of a completed tournament
#[derive(Debug, Clone, Serialize)]
pub struct TournamentOutcome {
    id: OutcomeId,
    tournament_id: TournamentId,
    tournament_type: TournamentType,
    winner: Arc<Player>,
    completion_date: DateTime<Utc>,
    matches: Vec<Match>,
    is_finalized: bool,
}

impl TournamentOutcome {
    /// Build an open (not yet finalized) outcome for `tournament`.
    ///
    /// The winner must be on the tournament's roster and every match must
    /// belong to the tournament.
    pub fn new(tournament: &Tournament, winner: Arc<Player>, matches: Vec<Match>) -> OutcomeResult<Self> {
        if !tournament.contains_player(winner.id()) {
            return Err(OutcomeError::WinnerNotInRoster(winner.id()));
        }

        let mut outcome = Self {
            id: Uuid::new_v4(),
            tournament_id: tournament.id(),
            tournament_type: tournament.tournament_type(),
            winner,
            completion_date: Utc::now(),
            matches: Vec::new(),
            is_finalized: false,
        };
        outcome.set_matches(matches)?;
        Ok(outcome)
    }

    pub fn id(&self) -> OutcomeId {
        self.id
    }

    pub fn tournament_id(&self) -> TournamentId {
        self.tournament_id
    }

    pub fn tournament_type(&self) -> TournamentType {
        self.tournament_type
    }

    pub fn winner(&self) -> &Arc<Player> {
        &self.winner
    }

    pub fn completion_date(&self) -> DateTime<Utc> {
        self.completion_date
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn is_finalized(&self) -> bool {
        self.is_finalized
    }

    /// Number of rounds in the recorded bracket
    pub fn rounds(&self) -> u32 {
        self.matches.iter().map(Match::round).max().unwrap_or(0)
    }

    /// The last match of the highest round
    pub fn final_match(&self) -> Option<&Match> {
        let last_round = self.rounds();
        self.matches.iter().rev().find(|m| m.round() == last_round)
    }

    /// Every recorded match the player took part in
    pub fn matches_for_player(&self, player_id: PlayerId) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.involves(player_id))
    }

    /// Append one match to an open outcome
    pub fn add_match(&mut self, game: Match) -> OutcomeResult<()> {
        if self.is_finalized {
            return Err(OutcomeError::Finalized);
        }
        self.check_owner(&game)?;
        self.matches.push(game);
        Ok(())
    }

    /// Replace the match history of an open outcome
    pub fn set_matches(&mut self, matches: Vec<Match>) -> OutcomeResult<()> {
        if self.is_finalized {
            return Err(OutcomeError::Finalized);
        }
        for game in &matches {
            self.check_owner(game)?;
        }
        self.matches = matches;
        Ok(())
    }

    /// Lock the match history. One-way.
    pub fn mark_as_finalized(&mut self) {
        self.is_finalized = true;
    }

    fn check_owner(&self, game: &Match) -> OutcomeResult<()> {
        if game.tournament_id() != self.tournament_id {
            return Err(OutcomeError::ForeignMatch {
                match_id: game.id(),
                expected: self.tournament_id,
                actual: game.tournament_id(),
            });
        }
        Ok(())
    }
}

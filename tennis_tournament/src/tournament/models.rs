//! Tournament model and bracket generation.

use chrono::{DateTime, Utc};
use log::debug;
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr, sync::Arc};
use uuid::Uuid;

use super::errors::{TournamentError, TournamentResult};
use crate::matches::Match;
use crate::player::{Player, PlayerId, PlayerType};

/// Tournament ID type
pub type TournamentId = Uuid;

/// Tournament type; fixes which player variant may enter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentType {
    #[serde(alias = "Male")]
    Male,
    #[serde(alias = "Female")]
    Female,
}

impl TournamentType {
    /// The player variant admitted to this kind of tournament
    pub fn player_type(&self) -> PlayerType {
        match self {
            TournamentType::Male => PlayerType::Male,
            TournamentType::Female => PlayerType::Female,
        }
    }
}

impl From<PlayerType> for TournamentType {
    fn from(player_type: PlayerType) -> Self {
        match player_type {
            PlayerType::Male => TournamentType::Male,
            PlayerType::Female => TournamentType::Female,
        }
    }
}

impl fmt::Display for TournamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentType::Male => write!(f, "Male"),
            TournamentType::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for TournamentType {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<PlayerType>()
            .map(TournamentType::from)
            .map_err(|_| TournamentError::UnsupportedType(s.trim().to_string()))
    }
}

/// Tournament state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentStatus {
    /// Roster open, no matches yet
    Scheduled,
    /// Rounds being played
    InProgress,
    /// Champion decided
    Completed,
    /// Tournament cancelled
    Cancelled,
}

/// `n > 0 && n & (n - 1) == 0`
pub fn is_power_of_two(n: usize) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

/// A single-elimination tournament.
///
/// The roster is fixed once play starts and the match log only ever grows.
/// Every mutation goes through a method that re-checks status, roster size
/// and player type.
#[derive(Debug, Clone, Serialize)]
pub struct Tournament {
    id: TournamentId,
    tournament_type: TournamentType,
    players: Vec<Arc<Player>>,
    matches: Vec<Match>,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    status: TournamentStatus,
}

impl Tournament {
    /// Create a scheduled tournament starting now
    pub fn new(tournament_type: TournamentType, players: Vec<Player>) -> TournamentResult<Self> {
        let players = players.into_iter().map(Arc::new).collect();
        Self::with_players(tournament_type, players, Utc::now())
    }

    /// Create a scheduled tournament from shared players
    pub fn with_players(
        tournament_type: TournamentType,
        players: Vec<Arc<Player>>,
        start_date: DateTime<Utc>,
    ) -> TournamentResult<Self> {
        validate_roster(&players, tournament_type)?;

        Ok(Self {
            players,
            ..Self::scheduled(tournament_type, start_date)
        })
    }

    /// Create a scheduled tournament with an empty roster
    pub fn scheduled(tournament_type: TournamentType, start_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_type,
            players: Vec::new(),
            matches: Vec::new(),
            start_date,
            end_date: None,
            status: TournamentStatus::Scheduled,
        }
    }

    pub fn id(&self) -> TournamentId {
        self.id
    }

    pub fn tournament_type(&self) -> TournamentType {
        self.tournament_type
    }

    pub fn players(&self) -> &[Arc<Player>] {
        &self.players
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn contains_player(&self, player_id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id() == player_id)
    }

    /// Matches of one round, in pairing order
    pub fn matches_in_round(&self, round: u32) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.round() == round)
    }

    /// Highest round paired so far (0 before play starts)
    pub fn current_round(&self) -> u32 {
        self.matches.last().map_or(0, Match::round)
    }

    /// Number of rounds a full bracket for this roster takes
    pub fn total_rounds(&self) -> u32 {
        if self.players.is_empty() {
            0
        } else {
            self.players.len().trailing_zeros()
        }
    }

    /// Add one player while the tournament is scheduled.
    ///
    /// Unlike `set_players`, this does not check that the roster size is a
    /// power of two. The size is checked again when play starts, so a roster
    /// may pass through odd sizes while it is filled one player at a time.
    pub fn add_player(&mut self, player: Arc<Player>) -> TournamentResult<()> {
        self.require_status(TournamentStatus::Scheduled)?;
        check_player_type(&player, self.tournament_type)?;
        if self.contains_player(player.id()) {
            return Err(TournamentError::DuplicatePlayer(player.id()));
        }

        self.players.push(player);
        Ok(())
    }

    /// Replace the roster while the tournament is scheduled
    pub fn set_players(&mut self, players: Vec<Arc<Player>>) -> TournamentResult<()> {
        self.require_status(TournamentStatus::Scheduled)?;
        validate_roster(&players, self.tournament_type)?;

        self.players = players;
        Ok(())
    }

    /// Append a match to the log
    pub fn add_match(&mut self, game: Match) -> TournamentResult<()> {
        if self.status == TournamentStatus::Cancelled {
            return Err(TournamentError::Cancelled);
        }
        if game.tournament_id() != self.id {
            return Err(TournamentError::ForeignMatch {
                match_id: game.id(),
                expected: self.id,
                actual: game.tournament_id(),
            });
        }
        for player in [game.player1(), game.player2()] {
            if !self.contains_player(player.id()) {
                return Err(TournamentError::UnknownPlayer(player.id()));
            }
        }

        self.matches.push(game);
        Ok(())
    }

    /// Cancel a scheduled or running tournament
    pub fn cancel(&mut self) -> TournamentResult<()> {
        match self.status {
            TournamentStatus::Scheduled | TournamentStatus::InProgress => {
                self.status = TournamentStatus::Cancelled;
                Ok(())
            }
            TournamentStatus::Completed => Err(TournamentError::InvalidState {
                expected: TournamentStatus::InProgress,
                actual: TournamentStatus::Completed,
            }),
            TournamentStatus::Cancelled => Err(TournamentError::Cancelled),
        }
    }

    /// Shuffle the roster and pair it into round one.
    ///
    /// Moves the tournament from `Scheduled` to `InProgress` and returns the
    /// new matches.
    pub fn generate_initial_matches<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> TournamentResult<&mut [Match]> {
        self.require_status(TournamentStatus::Scheduled)?;
        validate_roster(&self.players, self.tournament_type)?;

        let mut shuffled = self.players.clone();
        shuffled.shuffle(rng);

        let first = self.matches.len();
        self.append_round(&shuffled, 1)?;
        self.status = TournamentStatus::InProgress;

        debug!(
            "Tournament {} round 1 paired: {} matches",
            self.id,
            self.matches.len() - first
        );
        Ok(&mut self.matches[first..])
    }

    /// Pair the previous round's winners, in the order given, into `next_round`.
    ///
    /// With fewer than two winners the bracket is finished: the tournament is
    /// marked `Completed`, the end date stamped, and no matches are returned.
    pub fn generate_next_round_matches(
        &mut self,
        winners: &[Arc<Player>],
        next_round: u32,
    ) -> TournamentResult<&mut [Match]> {
        self.require_status(TournamentStatus::InProgress)?;
        for winner in winners {
            if !self.contains_player(winner.id()) {
                return Err(TournamentError::UnknownPlayer(winner.id()));
            }
        }

        let first = self.matches.len();
        if winners.len() < 2 {
            self.complete();
            return Ok(&mut self.matches[first..]);
        }
        if winners.len() % 2 != 0 {
            return Err(TournamentError::OddWinnerCount(winners.len()));
        }

        self.append_round(winners, next_round)?;
        debug!(
            "Tournament {} round {} paired: {} matches",
            self.id,
            next_round,
            self.matches.len() - first
        );
        Ok(&mut self.matches[first..])
    }

    fn append_round(&mut self, entrants: &[Arc<Player>], round: u32) -> TournamentResult<()> {
        let round_matches = entrants
            .chunks_exact(2)
            .map(|pair| Match::new(Arc::clone(&pair[0]), Arc::clone(&pair[1]), round, self.id))
            .collect::<Result<Vec<_>, _>>()?;
        self.matches.extend(round_matches);
        Ok(())
    }

    fn complete(&mut self) {
        self.status = TournamentStatus::Completed;
        self.end_date = Some(Utc::now().max(self.start_date));
    }

    fn require_status(&self, expected: TournamentStatus) -> TournamentResult<()> {
        if self.status == TournamentStatus::Cancelled {
            return Err(TournamentError::Cancelled);
        }
        if self.status != expected {
            return Err(TournamentError::InvalidState {
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }
}

fn check_player_type(player: &Player, tournament_type: TournamentType) -> TournamentResult<()> {
    if player.player_type() != tournament_type.player_type() {
        return Err(TournamentError::PlayerTypeMismatch {
            expected: tournament_type,
            player: player.name().to_string(),
            actual: player.player_type(),
        });
    }
    Ok(())
}

fn validate_roster(players: &[Arc<Player>], tournament_type: TournamentType) -> TournamentResult<()> {
    if players.is_empty() {
        return Err(TournamentError::EmptyRoster);
    }
    if players.len() < 2 || !is_power_of_two(players.len()) {
        return Err(TournamentError::InvalidPlayerCount(players.len()));
    }

    let mut seen = HashSet::with_capacity(players.len());
    for player in players {
        check_player_type(player, tournament_type)?;
        if !seen.insert(player.id()) {
            return Err(TournamentError::DuplicatePlayer(player.id()));
        }
    }
    Ok(())
}

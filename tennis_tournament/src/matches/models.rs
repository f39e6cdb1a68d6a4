//! Match model and the winner rule.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use uuid::Uuid;

use super::errors::{MatchError, MatchResult};
use crate::player::{Player, PlayerId};
use crate::tournament::TournamentId;

/// Match ID type
pub type MatchId = Uuid;

/// Which side takes a match whose scores are exactly equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TieBreak {
    #[default]
    PlayerOne,
    PlayerTwo,
}

/// One contest between two players.
///
/// Players are shared with the tournament roster through `Arc`, so a match
/// refers to the same player values the tournament owns. The winner is unset
/// until the match is played.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    id: MatchId,
    player1: Arc<Player>,
    player2: Arc<Player>,
    round: u32,
    match_date: DateTime<Utc>,
    tournament_id: TournamentId,
    #[serde(rename = "winner_id", serialize_with = "serialize_winner_id")]
    winner: Option<Arc<Player>>,
}

impl Match {
    /// Create an unplayed match
    pub fn new(
        player1: Arc<Player>,
        player2: Arc<Player>,
        round: u32,
        tournament_id: TournamentId,
    ) -> MatchResult<Self> {
        if round == 0 {
            return Err(MatchError::InvalidRound(round));
        }
        if player1.id() == player2.id() {
            return Err(MatchError::SamePlayer(player1.id()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            player1,
            player2,
            round,
            match_date: Utc::now(),
            tournament_id,
            winner: None,
        })
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn player1(&self) -> &Arc<Player> {
        &self.player1
    }

    pub fn player2(&self) -> &Arc<Player> {
        &self.player2
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn match_date(&self) -> DateTime<Utc> {
        self.match_date
    }

    pub fn tournament_id(&self) -> TournamentId {
        self.tournament_id
    }

    pub fn winner(&self) -> Option<&Arc<Player>> {
        self.winner.as_ref()
    }

    /// The player who did not win, once the match is decided
    pub fn loser(&self) -> Option<&Arc<Player>> {
        let winner = self.winner.as_ref()?;
        if Arc::ptr_eq(winner, &self.player1) {
            Some(&self.player2)
        } else {
            Some(&self.player1)
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Whether the player takes part in this match
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player1.id() == player_id || self.player2.id() == player_id
    }

    /// Both players' scores for the given luck factors
    pub fn scores(&self, luck_factor1: f64, luck_factor2: f64) -> (f64, f64) {
        (
            self.player1.compute_score(luck_factor1),
            self.player2.compute_score(luck_factor2),
        )
    }

    /// Decide the match: the higher score wins and an exact tie goes to
    /// player 1.
    pub fn determine_winner(&mut self, luck_factor1: f64, luck_factor2: f64) -> Arc<Player> {
        self.determine_winner_with(luck_factor1, luck_factor2, TieBreak::PlayerOne)
    }

    /// Decide the match, settling an exact tie with `tie_break`.
    ///
    /// Overwrites any previous winner.
    pub fn determine_winner_with(
        &mut self,
        luck_factor1: f64,
        luck_factor2: f64,
        tie_break: TieBreak,
    ) -> Arc<Player> {
        let (score1, score2) = self.scores(luck_factor1, luck_factor2);
        let player1_wins = if score1 == score2 {
            tie_break == TieBreak::PlayerOne
        } else {
            score1 > score2
        };

        let winner = if player1_wins {
            Arc::clone(&self.player1)
        } else {
            Arc::clone(&self.player2)
        };
        self.winner = Some(Arc::clone(&winner));
        winner
    }
}

fn serialize_winner_id<S: Serializer>(
    winner: &Option<Arc<Player>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    winner.as_ref().map(|p| p.id()).serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Arc<Player>, Arc<Player>) {
        (
            Arc::new(Player::male("Strong", 90, 90, 90).unwrap()),
            Arc::new(Player::male("Weak", 40, 40, 40).unwrap()),
        )
    }

    #[test]
    fn test_new_match_is_undecided() {
        let (p1, p2) = pair();
        let m = Match::new(p1, p2, 1, Uuid::new_v4()).unwrap();
        assert!(!m.is_decided());
        assert!(m.winner().is_none());
        assert!(m.loser().is_none());
    }

    #[test]
    fn test_rejects_round_zero_and_self_pairing() {
        let (p1, p2) = pair();
        assert_eq!(
            Match::new(Arc::clone(&p1), p2, 0, Uuid::new_v4()).unwrap_err(),
            MatchError::InvalidRound(0)
        );
        assert_eq!(
            Match::new(Arc::clone(&p1), Arc::clone(&p1), 1, Uuid::new_v4()).unwrap_err(),
            MatchError::SamePlayer(p1.id())
        );
    }

    #[test]
    fn test_higher_score_wins_either_side() {
        let (strong, weak) = pair();
        let mut m = Match::new(Arc::clone(&strong), Arc::clone(&weak), 1, Uuid::new_v4()).unwrap();
        let winner = m.determine_winner(0.0, 19.9);
        assert!(Arc::ptr_eq(&winner, &strong));
        assert!(Arc::ptr_eq(m.loser().unwrap(), &weak));

        let mut reversed = Match::new(Arc::clone(&weak), Arc::clone(&strong), 1, Uuid::new_v4()).unwrap();
        let winner = reversed.determine_winner(19.9, 0.0);
        assert!(Arc::ptr_eq(&winner, &strong));
    }

    #[test]
    fn test_exact_tie_follows_tie_break() {
        let p1 = Arc::new(Player::female("Twin A", 80, 70).unwrap());
        let p2 = Arc::new(Player::female("Twin B", 80, 70).unwrap());
        let mut m = Match::new(Arc::clone(&p1), Arc::clone(&p2), 2, Uuid::new_v4()).unwrap();

        assert!(Arc::ptr_eq(&m.determine_winner(5.0, 5.0), &p1));
        assert!(Arc::ptr_eq(
            &m.determine_winner_with(5.0, 5.0, TieBreak::PlayerTwo),
            &p2
        ));
        assert!(Arc::ptr_eq(m.winner().unwrap(), &p2), "second call overwrites");
    }

    #[test]
    fn test_luck_can_swing_a_close_match() {
        let p1 = Arc::new(Player::female("A", 80, 70).unwrap());
        let p2 = Arc::new(Player::female("B", 80, 71).unwrap());
        // 0.3 attribute gap is overturned by a 1.0 luck gap (0.1 weight * 10)
        let mut m = Match::new(Arc::clone(&p1), Arc::clone(&p2), 1, Uuid::new_v4()).unwrap();
        assert!(Arc::ptr_eq(&m.determine_winner(10.0, 0.0), &p1));
        assert!(Arc::ptr_eq(&m.determine_winner(0.0, 0.0), &p2));
    }

    #[test]
    fn test_serializes_winner_as_id() {
        let (strong, weak) = pair();
        let mut m = Match::new(Arc::clone(&strong), weak, 1, Uuid::new_v4()).unwrap();
        let before = serde_json::to_value(&m).unwrap();
        assert!(before["winner_id"].is_null());

        m.determine_winner(10.0, 10.0);
        let after = serde_json::to_value(&m).unwrap();
        assert_eq!(after["winner_id"], strong.id().to_string());
        assert_eq!(after["round"], 1);
    }
}

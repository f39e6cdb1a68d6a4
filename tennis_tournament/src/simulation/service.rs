//! Tournament simulation: drives a scheduled tournament to a finalized outcome.

use log::{debug, error, info};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use std::sync::Arc;

use super::config::SimulationConfig;
use super::errors::{SimulationError, SimulationResult};
use super::strategy::{MatchSimulationStrategy, MatchSimulationStrategyFactory, SimulationStrategy};
use crate::matches::Match;
use crate::outcome::TournamentOutcome;
use crate::player::Player;
use crate::tournament::{Tournament, TournamentStatus, is_power_of_two};

/// Plays every round of a tournament.
///
/// The service owns its random source. Each service is meant for one caller
/// at a time; simulate distinct tournaments concurrently with one service
/// (and so one random stream) each.
#[derive(Debug)]
pub struct TournamentSimulationService<R: RngCore = StdRng> {
    strategies: MatchSimulationStrategyFactory,
    rng: R,
}

impl TournamentSimulationService<StdRng> {
    /// Service seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible service
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for TournamentSimulationService<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> TournamentSimulationService<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_factory(MatchSimulationStrategyFactory::default(), rng)
    }

    pub fn with_config(config: SimulationConfig, rng: R) -> Self {
        Self::with_factory(MatchSimulationStrategyFactory::new(config), rng)
    }

    pub fn with_factory(strategies: MatchSimulationStrategyFactory, rng: R) -> Self {
        Self { strategies, rng }
    }

    /// Simulate `tournament` from round one to its champion.
    ///
    /// On success the tournament is `Completed` and the returned outcome is
    /// finalized, holding all `N - 1` matches in bracket order.
    ///
    /// # Errors
    ///
    /// - `AlreadyCompleted` if the tournament has been simulated before
    /// - `EmptyRoster` / `InvalidPlayerCount` for a roster that cannot form a bracket
    /// - `Tournament` errors from the bracket state machine (e.g. cancelled)
    /// - `MissingWinner` / `BracketSizeMismatch` if the bracket was not fully played
    pub fn simulate_tournament(&mut self, tournament: &mut Tournament) -> SimulationResult<TournamentOutcome> {
        if tournament.status() == TournamentStatus::Completed {
            return Err(SimulationError::AlreadyCompleted(tournament.id()));
        }
        let player_count = tournament.players().len();
        if player_count == 0 {
            return Err(SimulationError::EmptyRoster);
        }
        if player_count < 2 || !is_power_of_two(player_count) {
            return Err(SimulationError::InvalidPlayerCount(player_count));
        }

        info!(
            "Simulating {} tournament {} with {} players",
            tournament.tournament_type(),
            tournament.id(),
            player_count
        );

        let strategy = self.strategies.for_tournament_type(tournament.tournament_type());
        let mut played: Vec<Match> = Vec::with_capacity(player_count - 1);
        let mut round = 1;
        let mut pending = tournament.generate_initial_matches(&mut self.rng)?;

        let champion = loop {
            let winners = play_round(&strategy, &mut *pending, &mut self.rng)?;
            played.extend_from_slice(pending);
            debug!("Round {} complete: {} players remain", round, winners.len());

            if winners.len() == 1 {
                // Closes the bracket: no further pairings, tournament completed.
                tournament.generate_next_round_matches(&winners, round + 1)?;
                break winners.into_iter().next().ok_or(SimulationError::NoChampion)?;
            }
            if winners.is_empty() {
                return Err(SimulationError::NoChampion);
            }

            round += 1;
            pending = tournament.generate_next_round_matches(&winners, round)?;
        };

        if let Some(undecided) = played.iter().find(|m| !m.is_decided()) {
            error!(
                "Tournament {} finished with undecided match {}",
                tournament.id(),
                undecided.id()
            );
            return Err(SimulationError::MissingWinner(undecided.id()));
        }
        if played.len() != player_count - 1 {
            error!(
                "Tournament {} produced {} matches for {} players",
                tournament.id(),
                played.len(),
                player_count
            );
            return Err(SimulationError::BracketSizeMismatch {
                players: player_count,
                matches: played.len(),
            });
        }

        let mut outcome = TournamentOutcome::new(tournament, champion, played)?;
        outcome.mark_as_finalized();

        info!(
            "Tournament {} completed after {} rounds: champion {}",
            tournament.id(),
            round,
            outcome.winner().name()
        );
        Ok(outcome)
    }
}

fn play_round<R: RngCore>(
    strategy: &SimulationStrategy,
    matches: &mut [Match],
    rng: &mut R,
) -> SimulationResult<Vec<Arc<Player>>> {
    let mut winners = Vec::with_capacity(matches.len());
    for game in matches.iter_mut() {
        winners.push(strategy.simulate_match(game, &mut *rng)?);
    }
    Ok(winners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerType, seed};
    use crate::tournament::{TournamentError, TournamentType};

    fn tournament(tournament_type: TournamentType, size: usize) -> Tournament {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let roster = seed::random_roster(&mut rng, tournament_type.player_type(), size).unwrap();
        Tournament::new(tournament_type, roster).unwrap()
    }

    #[test]
    fn test_two_player_final() {
        let mut t = tournament(TournamentType::Female, 2);
        let outcome = TournamentSimulationService::seeded(1)
            .simulate_tournament(&mut t)
            .unwrap();
        assert_eq!(outcome.matches().len(), 1);
        assert_eq!(outcome.rounds(), 1);
        assert_eq!(t.status(), TournamentStatus::Completed);
        assert!(outcome.is_finalized());
    }

    #[test]
    fn test_bracket_sizes() {
        for (size, rounds) in [(4usize, 2u32), (8, 3), (16, 4), (32, 5)] {
            let mut t = tournament(TournamentType::Male, size);
            let outcome = TournamentSimulationService::seeded(size as u64)
                .simulate_tournament(&mut t)
                .unwrap();
            assert_eq!(outcome.matches().len(), size - 1);
            assert_eq!(outcome.rounds(), rounds);
            assert_eq!(t.matches().len(), size - 1);
            for round in 1..=rounds {
                let expected = size >> round;
                assert_eq!(t.matches_in_round(round).count(), expected);
            }
        }
    }

    #[test]
    fn test_champion_won_the_final() {
        let mut t = tournament(TournamentType::Female, 8);
        let outcome = TournamentSimulationService::seeded(11)
            .simulate_tournament(&mut t)
            .unwrap();
        let final_match = outcome.final_match().unwrap();
        assert_eq!(final_match.round(), 3);
        assert_eq!(final_match.winner().unwrap().id(), outcome.winner().id());
        assert!(t.contains_player(outcome.winner().id()));
    }

    #[test]
    fn test_same_seed_same_bracket() {
        let base = tournament(TournamentType::Male, 8);
        let mut a = base.clone();
        let mut b = base.clone();
        let oa = TournamentSimulationService::seeded(5).simulate_tournament(&mut a).unwrap();
        let ob = TournamentSimulationService::seeded(5).simulate_tournament(&mut b).unwrap();

        let winners = |o: &TournamentOutcome| -> Vec<_> {
            o.matches().iter().map(|m| m.winner().unwrap().id()).collect()
        };
        assert_eq!(winners(&oa), winners(&ob));
        assert_eq!(oa.winner().id(), ob.winner().id());
    }

    #[test]
    fn test_resimulating_completed_tournament_fails() {
        let mut t = tournament(TournamentType::Male, 4);
        let mut service = TournamentSimulationService::seeded(2);
        service.simulate_tournament(&mut t).unwrap();

        let err = service.simulate_tournament(&mut t).unwrap_err();
        assert_eq!(err, SimulationError::AlreadyCompleted(t.id()));
        assert_eq!(err.kind(), crate::errors::ErrorKind::State);
        assert_eq!(t.matches().len(), 3);
    }

    #[test]
    fn test_cancelled_tournament_is_not_simulated() {
        let mut t = tournament(TournamentType::Female, 4);
        t.cancel().unwrap();
        let err = TournamentSimulationService::seeded(3)
            .simulate_tournament(&mut t)
            .unwrap_err();
        assert_eq!(err, SimulationError::Tournament(TournamentError::Cancelled));
        assert!(t.matches().is_empty());
    }

    #[test]
    fn test_rejects_unplayable_rosters() {
        let mut empty = Tournament::scheduled(TournamentType::Male, chrono::Utc::now());
        let mut service = TournamentSimulationService::seeded(4);
        assert_eq!(
            service.simulate_tournament(&mut empty).unwrap_err(),
            SimulationError::EmptyRoster
        );

        let mut three = Tournament::scheduled(TournamentType::Male, chrono::Utc::now());
        for p in seed::default_roster(PlayerType::Male).unwrap().into_iter().take(3) {
            three.add_player(Arc::new(p)).unwrap();
        }
        assert_eq!(
            service.simulate_tournament(&mut three).unwrap_err(),
            SimulationError::InvalidPlayerCount(3)
        );
        assert_eq!(three.status(), TournamentStatus::Scheduled);
    }

    #[test]
    fn test_in_progress_tournament_is_rejected() {
        let mut t = tournament(TournamentType::Male, 4);
        t.generate_initial_matches(&mut StdRng::seed_from_u64(0)).unwrap();
        let err = TournamentSimulationService::seeded(6)
            .simulate_tournament(&mut t)
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Tournament(TournamentError::InvalidState { .. })
        ));
        assert_eq!(t.matches().len(), 2);
    }

    #[test]
    fn test_internal_errors_are_masked_for_clients() {
        let err = SimulationError::MissingWinner(uuid::Uuid::new_v4());
        assert!(err.is_internal());
        assert_eq!(err.client_message(), "Internal error while simulating tournament");
        assert_eq!(
            SimulationError::InvalidPlayerCount(6).client_message(),
            "Player count must be a power of two of at least 2, got 6"
        );
    }
}

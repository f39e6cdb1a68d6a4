//! Match simulation strategies, one per player variant.
//!
//! Strategies are dispatched through [`SimulationStrategy`] with
//! `enum_dispatch`; a new variant needs a strategy type, an enum entry and a
//! factory arm, and nothing in the tournament service changes.

use enum_dispatch::enum_dispatch;
use log::debug;
use rand::{Rng, RngCore};
use std::sync::Arc;

use super::config::{MAX_LUCK, SimulationConfig, TieBreakPolicy};
use super::errors::{SimulationError, SimulationResult};
use crate::matches::{Match, TieBreak};
use crate::player::{Player, PlayerType};
use crate::tournament::TournamentType;

/// Outcome rule for one kind of match
#[enum_dispatch]
pub trait MatchSimulationStrategy {
    /// Player variant this strategy plays
    fn player_type(&self) -> PlayerType;

    /// Draw luck for both players, decide `game` and return its winner
    fn simulate_match(&self, game: &mut Match, rng: &mut dyn RngCore) -> SimulationResult<Arc<Player>>;
}

/// Men's matches: skill, strength and speed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaleMatchSimulation {
    tie_break: TieBreakPolicy,
}

impl MaleMatchSimulation {
    pub fn new(tie_break: TieBreakPolicy) -> Self {
        Self { tie_break }
    }
}

impl MatchSimulationStrategy for MaleMatchSimulation {
    fn player_type(&self) -> PlayerType {
        PlayerType::Male
    }

    fn simulate_match(&self, game: &mut Match, rng: &mut dyn RngCore) -> SimulationResult<Arc<Player>> {
        play(game, PlayerType::Male, self.tie_break, rng)
    }
}

/// Women's matches: skill and reaction time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FemaleMatchSimulation {
    tie_break: TieBreakPolicy,
}

impl FemaleMatchSimulation {
    pub fn new(tie_break: TieBreakPolicy) -> Self {
        Self { tie_break }
    }
}

impl MatchSimulationStrategy for FemaleMatchSimulation {
    fn player_type(&self) -> PlayerType {
        PlayerType::Female
    }

    fn simulate_match(&self, game: &mut Match, rng: &mut dyn RngCore) -> SimulationResult<Arc<Player>> {
        play(game, PlayerType::Female, self.tie_break, rng)
    }
}

/// Any registered strategy
#[enum_dispatch(MatchSimulationStrategy)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStrategy {
    MaleMatchSimulation,
    FemaleMatchSimulation,
}

fn play(
    game: &mut Match,
    expected: PlayerType,
    tie_break: TieBreakPolicy,
    rng: &mut dyn RngCore,
) -> SimulationResult<Arc<Player>> {
    let player1 = game.player1().player_type();
    let player2 = game.player2().player_type();
    if player1 != player2 {
        return Err(SimulationError::MixedMatch { player1, player2 });
    }
    if player1 != expected {
        return Err(SimulationError::StrategyMismatch {
            strategy: expected,
            actual: player1,
        });
    }

    let luck1 = rng.random_range(0.0..MAX_LUCK);
    let luck2 = rng.random_range(0.0..MAX_LUCK);
    let tie = match tie_break {
        TieBreakPolicy::FavorPlayerOne => TieBreak::PlayerOne,
        TieBreakPolicy::CoinFlip => {
            if rng.random_bool(0.5) {
                TieBreak::PlayerOne
            } else {
                TieBreak::PlayerTwo
            }
        }
    };

    let winner = game.determine_winner_with(luck1, luck2, tie);
    debug!(
        "Round {}: {} vs {} (luck {:.2}/{:.2}) -> {}",
        game.round(),
        game.player1().name(),
        game.player2().name(),
        luck1,
        luck2,
        winner.name()
    );
    Ok(winner)
}

/// Selects the strategy for a tournament type, player or match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSimulationStrategyFactory {
    config: SimulationConfig,
}

impl MatchSimulationStrategyFactory {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    pub fn for_player_type(&self, player_type: PlayerType) -> SimulationStrategy {
        match player_type {
            PlayerType::Male => MaleMatchSimulation::new(self.config.tie_break).into(),
            PlayerType::Female => FemaleMatchSimulation::new(self.config.tie_break).into(),
        }
    }

    pub fn for_tournament_type(&self, tournament_type: TournamentType) -> SimulationStrategy {
        self.for_player_type(tournament_type.player_type())
    }

    /// Resolve a strategy from a type name such as `"male"`
    pub fn for_type_name(&self, name: &str) -> SimulationResult<SimulationStrategy> {
        let player_type = name
            .parse::<PlayerType>()
            .map_err(|_| SimulationError::UnsupportedTournamentType(name.trim().to_string()))?;
        Ok(self.for_player_type(player_type))
    }

    pub fn for_player(&self, player: &Player) -> SimulationStrategy {
        self.for_player_type(player.player_type())
    }

    /// Strategy for a match; both players must be the same variant
    pub fn for_match(&self, game: &Match) -> SimulationResult<SimulationStrategy> {
        let player1 = game.player1().player_type();
        let player2 = game.player2().player_type();
        if player1 != player2 {
            return Err(SimulationError::MixedMatch { player1, player2 });
        }
        Ok(self.for_player_type(player1))
    }
}

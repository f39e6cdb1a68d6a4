//! Simulation module: match strategies and the tournament driver.
//!
//! This module provides:
//! - Per-variant match strategies selected by tournament type
//! - Luck draws from an injected random source
//! - The round loop that folds a bracket down to one champion
//!
//! ## Example
//!
//! ```
//! use tennis_tournament::player::{PlayerType, seed};
//! use tennis_tournament::simulation::TournamentSimulationService;
//! use tennis_tournament::tournament::{Tournament, TournamentStatus, TournamentType};
//!
//! let roster = seed::default_roster(PlayerType::Male).unwrap();
//! let mut tournament = Tournament::new(TournamentType::Male, roster).unwrap();
//!
//! let mut service = TournamentSimulationService::seeded(2024);
//! let outcome = service.simulate_tournament(&mut tournament).unwrap();
//!
//! assert_eq!(outcome.matches().len(), 3);
//! assert_eq!(tournament.status(), TournamentStatus::Completed);
//! println!("Champion: {}", outcome.winner().name());
//! ```

pub mod config;
pub mod errors;
pub mod service;
pub mod strategy;

pub use config::{MAX_LUCK, SimulationConfig, TieBreakPolicy};
pub use errors::{SimulationError, SimulationResult};
pub use service::TournamentSimulationService;
pub use strategy::{
    FemaleMatchSimulation, MaleMatchSimulation, MatchSimulationStrategy,
    MatchSimulationStrategyFactory, SimulationStrategy,
};

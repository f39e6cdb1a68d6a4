//! # Tennis Tournament
//!
//! A single-elimination tennis tournament engine.
//!
//! Given a roster of same-gender players (a power of two, at least two), the
//! engine shuffles the roster into first-round pairings, plays every match
//! with a gender-specific strategy, folds winners into the next round until
//! one champion remains and records the outcome.
//!
//! A match score is a weighted blend of the player's skill level, a variant
//! attribute and a random luck factor:
//!
//! - **Male**: `(strength + speed) / 2` as the variant attribute
//! - **Female**: `reaction_time` as the variant attribute
//!
//! The higher score wins.
//!
//! ## Core Modules
//!
//! - [`player`]: Player records, validation and demo rosters
//! - [`matches`]: A single pairing and its winner
//! - [`tournament`]: Bracket state machine (`Scheduled -> InProgress -> Completed`)
//! - [`outcome`]: Champion and match history of a completed tournament
//! - [`simulation`]: Match strategies and the tournament simulation service
//! - [`db`]: Async repositories with in-memory implementations
//! - [`manager`]: Application service over the engine and repositories
//!
//! ## Example
//!
//! ```
//! use tennis_tournament::{PlayerType, Tournament, TournamentSimulationService, TournamentType};
//! use tennis_tournament::player::seed;
//!
//! let roster = seed::default_roster(PlayerType::Female).unwrap();
//! let mut tournament = Tournament::new(TournamentType::Female, roster).unwrap();
//!
//! let outcome = TournamentSimulationService::seeded(7)
//!     .simulate_tournament(&mut tournament)
//!     .unwrap();
//! assert_eq!(outcome.matches().len(), 3);
//! ```

pub mod errors;
pub use errors::ErrorKind;

/// Players and rosters.
pub mod player;
pub use player::{Player, PlayerError, PlayerId, PlayerKind, PlayerResult, PlayerSpec, PlayerType};

/// Matches.
pub mod matches;
pub use matches::{Match, MatchError, MatchId, TieBreak};

/// Bracket state machine.
pub mod tournament;
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus, TournamentType};

/// Tournament outcomes.
pub mod outcome;
pub use outcome::{OutcomeError, OutcomeId, TournamentOutcome};

/// Match strategies and tournament simulation.
pub mod simulation;
pub use simulation::{
    MatchSimulationStrategy, MatchSimulationStrategyFactory, SimulationConfig, SimulationError, SimulationResult,
    TieBreakPolicy, TournamentSimulationService,
};

/// Persistence collaborators.
pub mod db;

/// Application service.
pub mod manager;
pub use manager::{ManagerError, ManagerResult, TournamentManager};

//! Tournament module: roster, append-only match log and the bracket state machine.
//!
//! A tournament moves through these states:
//! - **Scheduled**: roster may be edited
//! - **InProgress**: round one has been paired; rounds are appended one at a time
//! - **Completed**: a single winner remains
//! - **Cancelled**: terminal, reachable from Scheduled or InProgress
//!
//! ## Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use tennis_tournament::player::{PlayerType, seed};
//! use tennis_tournament::tournament::{Tournament, TournamentStatus, TournamentType};
//!
//! let roster = seed::default_roster(PlayerType::Female).unwrap();
//! let mut tournament = Tournament::new(TournamentType::Female, roster).unwrap();
//!
//! let round_one = tournament
//!     .generate_initial_matches(&mut StdRng::seed_from_u64(1))
//!     .unwrap();
//! assert_eq!(round_one.len(), 2);
//! assert_eq!(tournament.status(), TournamentStatus::InProgress);
//! ```

pub mod errors;
pub mod models;

pub use errors::{TournamentError, TournamentResult};
pub use models::{Tournament, TournamentId, TournamentStatus, TournamentType, is_power_of_two};

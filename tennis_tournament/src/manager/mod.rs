//! Application service tying the engine to the repositories.

pub mod errors;
#[allow(clippy::module_inception)]
pub mod manager;

pub use errors::{ManagerError, ManagerResult};
pub use manager::TournamentManager;

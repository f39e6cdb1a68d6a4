//! Player module: the two competitor variants and their scoring rule.
//!
//! Every player carries a skill level plus variant-specific attributes, all on
//! a 0-100 scale:
//! - **Male**: strength and speed
//! - **Female**: reaction time
//!
//! A player's match score blends 60% skill, 30% variant attribute and 10% luck.
//!
//! ## Example
//!
//! ```
//! use tennis_tournament::player::Player;
//!
//! let nadal = Player::male("Rafael Nadal", 95, 90, 85).unwrap();
//! let score = nadal.compute_score(10.0);
//! assert!((score - 84.25).abs() < 1e-9);
//! ```

pub mod errors;
pub mod models;
pub mod seed;

pub use errors::{PlayerError, PlayerResult};
pub use models::{
    ATTRIBUTE_WEIGHT, LUCK_WEIGHT, MAX_ATTRIBUTE, MAX_NAME_LEN, Player, PlayerId, PlayerKind,
    PlayerSpec, PlayerType, SKILL_WEIGHT, load_roster, parse_roster,
};

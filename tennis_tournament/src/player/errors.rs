//! Player error types.

use thiserror::Error;

use super::models::PlayerType;

/// Player validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// Attribute outside of the 0-100 scale
    #[error("{attribute} must be between 0 and 100, got {value}")]
    AttributeOutOfRange { attribute: &'static str, value: i32 },

    /// Name missing or blank
    #[error("Player name is required")]
    EmptyName,

    /// Name too long
    #[error("Player name cannot exceed {max} characters")]
    NameTooLong { max: usize },

    /// Variant attribute missing from an input record
    #[error("{player_type} players require {attribute}")]
    MissingAttribute {
        player_type: PlayerType,
        attribute: &'static str,
    },

    /// Attribute assigned to the wrong variant
    #[error("{attribute} does not apply to {player_type} players")]
    AttributeNotApplicable {
        player_type: PlayerType,
        attribute: &'static str,
    },

    /// Unknown player type name
    #[error("Unsupported player type: {0}")]
    UnsupportedType(String),

    /// Roster document could not be parsed
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
}

/// Result type for player operations
pub type PlayerResult<T> = Result<T, PlayerError>;

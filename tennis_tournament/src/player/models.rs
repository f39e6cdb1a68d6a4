//! Player data models and the scoring formula.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::errors::{PlayerError, PlayerResult};

/// Player ID type
pub type PlayerId = Uuid;

/// Upper bound of every attribute scale
pub const MAX_ATTRIBUTE: i32 = 100;

/// Longest accepted player name
pub const MAX_NAME_LEN: usize = 100;

/// Share of the score contributed by skill
pub const SKILL_WEIGHT: f64 = 0.6;

/// Share of the score contributed by the variant attribute
pub const ATTRIBUTE_WEIGHT: f64 = 0.3;

/// Share of the score contributed by luck
pub const LUCK_WEIGHT: f64 = 0.1;

/// Player variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    #[serde(alias = "Male")]
    Male,
    #[serde(alias = "Female")]
    Female,
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerType::Male => write!(f, "Male"),
            PlayerType::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for PlayerType {
    type Err = PlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(PlayerType::Male),
            "female" | "f" => Ok(PlayerType::Female),
            other => Err(PlayerError::UnsupportedType(other.to_string())),
        }
    }
}

/// Variant-specific attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "player_type", rename_all = "lowercase")]
pub enum PlayerKind {
    Male { strength: u8, speed: u8 },
    Female { reaction_time: u8 },
}

impl PlayerKind {
    pub fn player_type(&self) -> PlayerType {
        match self {
            PlayerKind::Male { .. } => PlayerType::Male,
            PlayerKind::Female { .. } => PlayerType::Female,
        }
    }
}

/// A tennis player.
///
/// Attributes are range-checked on every assignment, so a constructed
/// `Player` always holds values on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    skill_level: u8,
    #[serde(flatten)]
    kind: PlayerKind,
}

impl Player {
    /// Create a male player
    pub fn male(name: impl Into<String>, skill_level: i32, strength: i32, speed: i32) -> PlayerResult<Self> {
        let kind = PlayerKind::Male {
            strength: check_attribute("strength", strength)?,
            speed: check_attribute("speed", speed)?,
        };
        Self::build(Uuid::new_v4(), name.into(), skill_level, kind)
    }

    /// Create a female player
    pub fn female(name: impl Into<String>, skill_level: i32, reaction_time: i32) -> PlayerResult<Self> {
        let kind = PlayerKind::Female {
            reaction_time: check_attribute("reaction_time", reaction_time)?,
        };
        Self::build(Uuid::new_v4(), name.into(), skill_level, kind)
    }

    fn build(id: PlayerId, name: String, skill_level: i32, kind: PlayerKind) -> PlayerResult<Self> {
        Ok(Self {
            id,
            name: check_name(name)?,
            skill_level: check_attribute("skill_level", skill_level)?,
            kind,
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skill_level(&self) -> u8 {
        self.skill_level
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn player_type(&self) -> PlayerType {
        self.kind.player_type()
    }

    /// Strength (male players only)
    pub fn strength(&self) -> Option<u8> {
        match self.kind {
            PlayerKind::Male { strength, .. } => Some(strength),
            PlayerKind::Female { .. } => None,
        }
    }

    /// Speed (male players only)
    pub fn speed(&self) -> Option<u8> {
        match self.kind {
            PlayerKind::Male { speed, .. } => Some(speed),
            PlayerKind::Female { .. } => None,
        }
    }

    /// Reaction time (female players only)
    pub fn reaction_time(&self) -> Option<u8> {
        match self.kind {
            PlayerKind::Female { reaction_time } => Some(reaction_time),
            PlayerKind::Male { .. } => None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> PlayerResult<()> {
        self.name = check_name(name.into())?;
        Ok(())
    }

    pub fn set_skill_level(&mut self, value: i32) -> PlayerResult<()> {
        self.skill_level = check_attribute("skill_level", value)?;
        Ok(())
    }

    pub fn set_strength(&mut self, value: i32) -> PlayerResult<()> {
        let checked = check_attribute("strength", value)?;
        match &mut self.kind {
            PlayerKind::Male { strength, .. } => {
                *strength = checked;
                Ok(())
            }
            PlayerKind::Female { .. } => Err(PlayerError::AttributeNotApplicable {
                player_type: PlayerType::Female,
                attribute: "strength",
            }),
        }
    }

    pub fn set_speed(&mut self, value: i32) -> PlayerResult<()> {
        let checked = check_attribute("speed", value)?;
        match &mut self.kind {
            PlayerKind::Male { speed, .. } => {
                *speed = checked;
                Ok(())
            }
            PlayerKind::Female { .. } => Err(PlayerError::AttributeNotApplicable {
                player_type: PlayerType::Female,
                attribute: "speed",
            }),
        }
    }

    pub fn set_reaction_time(&mut self, value: i32) -> PlayerResult<()> {
        let checked = check_attribute("reaction_time", value)?;
        match &mut self.kind {
            PlayerKind::Female { reaction_time } => {
                *reaction_time = checked;
                Ok(())
            }
            PlayerKind::Male { .. } => Err(PlayerError::AttributeNotApplicable {
                player_type: PlayerType::Male,
                attribute: "reaction_time",
            }),
        }
    }

    /// The attribute weighted at 30%: mean of strength and speed for men,
    /// reaction time for women.
    pub fn variant_attribute(&self) -> f64 {
        match self.kind {
            PlayerKind::Male { strength, speed } => (f64::from(strength) + f64::from(speed)) / 2.0,
            PlayerKind::Female { reaction_time } => f64::from(reaction_time),
        }
    }

    /// Match score for a given luck factor (expected in `0..20`).
    ///
    /// `0.6 * skill + 0.3 * variant attribute + 0.1 * luck`
    pub fn compute_score(&self, luck_factor: f64) -> f64 {
        SKILL_WEIGHT * f64::from(self.skill_level)
            + ATTRIBUTE_WEIGHT * self.variant_attribute()
            + LUCK_WEIGHT * luck_factor
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (skill {})", self.name, self.skill_level)
    }
}

fn check_attribute(attribute: &'static str, value: i32) -> PlayerResult<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| i32::from(*v) <= MAX_ATTRIBUTE)
        .ok_or(PlayerError::AttributeOutOfRange { attribute, value })
}

fn check_name(name: String) -> PlayerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlayerError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(PlayerError::NameTooLong { max: MAX_NAME_LEN });
    }
    Ok(trimmed.to_string())
}

/// Unvalidated player record, as read from a roster file or a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub player_type: PlayerType,
    pub name: String,
    pub skill_level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_time: Option<i32>,
}

impl PlayerSpec {
    pub fn male(name: impl Into<String>, skill_level: i32, strength: i32, speed: i32) -> Self {
        Self {
            player_type: PlayerType::Male,
            name: name.into(),
            skill_level,
            strength: Some(strength),
            speed: Some(speed),
            reaction_time: None,
        }
    }

    pub fn female(name: impl Into<String>, skill_level: i32, reaction_time: i32) -> Self {
        Self {
            player_type: PlayerType::Female,
            name: name.into(),
            skill_level,
            strength: None,
            speed: None,
            reaction_time: Some(reaction_time),
        }
    }

    /// Validate into a player that keeps an existing identity
    pub fn into_player_with_id(self, id: PlayerId) -> PlayerResult<Player> {
        let kind = match self.player_type {
            PlayerType::Male => {
                let strength = self.strength.ok_or(PlayerError::MissingAttribute {
                    player_type: PlayerType::Male,
                    attribute: "strength",
                })?;
                let speed = self.speed.ok_or(PlayerError::MissingAttribute {
                    player_type: PlayerType::Male,
                    attribute: "speed",
                })?;
                PlayerKind::Male {
                    strength: check_attribute("strength", strength)?,
                    speed: check_attribute("speed", speed)?,
                }
            }
            PlayerType::Female => {
                let reaction_time = self.reaction_time.ok_or(PlayerError::MissingAttribute {
                    player_type: PlayerType::Female,
                    attribute: "reaction_time",
                })?;
                PlayerKind::Female {
                    reaction_time: check_attribute("reaction_time", reaction_time)?,
                }
            }
        };
        Player::build(id, self.name, self.skill_level, kind)
    }
}

impl TryFrom<PlayerSpec> for Player {
    type Error = PlayerError;

    fn try_from(spec: PlayerSpec) -> Result<Self, Self::Error> {
        spec.into_player_with_id(Uuid::new_v4())
    }
}

impl From<&Player> for PlayerSpec {
    fn from(player: &Player) -> Self {
        match player.kind {
            PlayerKind::Male { strength, speed } => Self::male(
                player.name.clone(),
                player.skill_level.into(),
                strength.into(),
                speed.into(),
            ),
            PlayerKind::Female { reaction_time } => Self::female(
                player.name.clone(),
                player.skill_level.into(),
                reaction_time.into(),
            ),
        }
    }
}

/// Parse a JSON array of player records without validating them
pub fn parse_roster(json: &str) -> PlayerResult<Vec<PlayerSpec>> {
    serde_json::from_str(json).map_err(|e| PlayerError::InvalidRoster(e.to_string()))
}

/// Parse a JSON array of player records into validated players
pub fn load_roster(json: &str) -> PlayerResult<Vec<Player>> {
    parse_roster(json)?.into_iter().map(Player::try_from).collect()
}

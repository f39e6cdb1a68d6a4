//! Simulation settings.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::errors::SimulationError;

/// Luck factors are drawn uniformly from `0.0..MAX_LUCK`
pub const MAX_LUCK: f64 = 20.0;

/// How a match with exactly equal scores is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    /// Fair coin from the simulation's random source
    #[default]
    CoinFlip,
    /// Player one takes every tie
    FavorPlayerOne,
}

impl fmt::Display for TieBreakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreakPolicy::CoinFlip => write!(f, "coin_flip"),
            TieBreakPolicy::FavorPlayerOne => write!(f, "favor_player_one"),
        }
    }
}

impl FromStr for TieBreakPolicy {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coin_flip" | "coin" => Ok(TieBreakPolicy::CoinFlip),
            "favor_player_one" | "player_one" => Ok(TieBreakPolicy::FavorPlayerOne),
            other => Err(SimulationError::InvalidConfig(format!(
                "unknown tie-break policy '{other}'"
            ))),
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Tie-break applied when two scores are exactly equal
    pub tie_break: TieBreakPolicy,
}

impl SimulationConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreakPolicy) -> Self {
        self.tie_break = tie_break;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_breaks_ties_with_coin() {
        assert_eq!(SimulationConfig::default().tie_break, TieBreakPolicy::CoinFlip);
    }

    #[test]
    fn test_parse_tie_break() {
        assert_eq!("coin_flip".parse::<TieBreakPolicy>().unwrap(), TieBreakPolicy::CoinFlip);
        assert_eq!(
            "Player_One".parse::<TieBreakPolicy>().unwrap(),
            TieBreakPolicy::FavorPlayerOne
        );
        assert!("random".parse::<TieBreakPolicy>().is_err());
    }
}

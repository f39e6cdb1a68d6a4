//! Simulator configuration management.
//!
//! Command-line flags take priority over environment variables, which take
//! priority over built-in defaults.

use std::path::PathBuf;
use std::str::FromStr;

use tennis_tournament::{TieBreakPolicy, TournamentType, tournament::is_power_of_two};

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Round-by-round bracket
    #[default]
    Text,
    /// The finalized outcome as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Where the roster comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    /// The four built-in players of the tournament's type
    Default,
    /// `n` generated players
    Random(usize),
    /// A JSON roster file
    File(PathBuf),
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tournament_type: Option<String>,
    pub seed: Option<u64>,
    pub players: Option<usize>,
    pub roster: Option<PathBuf>,
    pub json: bool,
}

/// Complete simulator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub tournament_type: TournamentType,
    /// Fixed seed for a reproducible run
    pub seed: Option<u64>,
    pub roster: RosterSource,
    pub output: OutputFormat,
    pub tie_break: TieBreakPolicy,
}

impl SimConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable or flag holds an invalid value
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration reading variables through `lookup`
    pub fn from_lookup<F>(overrides: Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tournament_type = match overrides.tournament_type {
            Some(value) => parse_value("--type", &value)?,
            None => parse_var(&lookup, "TT_TOURNAMENT_TYPE")?.unwrap_or(TournamentType::Male),
        };

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => parse_var(&lookup, "TT_SEED")?,
        };

        // A flag on either side replaces both roster variables
        let roster = match (overrides.players, overrides.roster) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Invalid {
                    var: "--players".to_string(),
                    reason: "Cannot be combined with --roster".to_string(),
                });
            }
            (Some(n), None) => RosterSource::Random(n),
            (None, Some(path)) => RosterSource::File(path),
            (None, None) => match (parse_var::<usize, _>(&lookup, "TT_PLAYERS")?, lookup("TT_ROSTER")) {
                (Some(_), Some(_)) => {
                    return Err(ConfigError::Invalid {
                        var: "TT_PLAYERS".to_string(),
                        reason: "Cannot be combined with TT_ROSTER".to_string(),
                    });
                }
                (Some(n), None) => RosterSource::Random(n),
                (None, Some(path)) => RosterSource::File(PathBuf::from(path)),
                (None, None) => RosterSource::Default,
            },
        };

        let output = if overrides.json {
            OutputFormat::Json
        } else {
            parse_var(&lookup, "TT_OUTPUT")?.unwrap_or_default()
        };

        let tie_break = parse_var(&lookup, "TT_TIE_BREAK")?.unwrap_or_default();

        Ok(SimConfig {
            tournament_type,
            seed,
            roster,
            output,
            tie_break,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let RosterSource::Random(n) = self.roster {
            if n < 2 || !is_power_of_two(n) {
                return Err(ConfigError::Invalid {
                    var: "TT_PLAYERS".to_string(),
                    reason: format!("Must be a power of two of at least 2, got {n}"),
                });
            }
        }
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_value<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse an optional variable; present but malformed is an error
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| parse_value(key, &v)).transpose()
}

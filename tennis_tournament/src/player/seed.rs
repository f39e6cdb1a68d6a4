//! Built-in demo rosters and random roster generation.

use rand::Rng;

use super::errors::PlayerResult;
use super::models::{Player, PlayerType};

/// Attribute floor for generated players
const GENERATED_MIN: i32 = 60;

/// The four-player demo roster for a variant
pub fn default_roster(player_type: PlayerType) -> PlayerResult<Vec<Player>> {
    match player_type {
        PlayerType::Male => [
            ("Rafael Nadal", 95, 90, 85),
            ("Novak Djokovic", 98, 85, 95),
            ("Roger Federer", 96, 80, 90),
            ("Andy Murray", 90, 82, 88),
        ]
        .into_iter()
        .map(|(name, skill, strength, speed)| Player::male(name, skill, strength, speed))
        .collect(),
        PlayerType::Female => [
            ("Serena Williams", 97, 92),
            ("Naomi Osaka", 93, 90),
            ("Ashleigh Barty", 91, 88),
            ("Simona Halep", 89, 86),
        ]
        .into_iter()
        .map(|(name, skill, reaction)| Player::female(name, skill, reaction))
        .collect(),
    }
}

/// Generate `count` players of one variant with attributes drawn from `60..=100`
pub fn random_roster<R: Rng + ?Sized>(
    rng: &mut R,
    player_type: PlayerType,
    count: usize,
) -> PlayerResult<Vec<Player>> {
    (1..=count)
        .map(|n| {
            let name = format!("{player_type} Player {n}");
            let skill = rng.random_range(GENERATED_MIN..=100);
            match player_type {
                PlayerType::Male => Player::male(
                    name,
                    skill,
                    rng.random_range(GENERATED_MIN..=100),
                    rng.random_range(GENERATED_MIN..=100),
                ),
                PlayerType::Female => {
                    Player::female(name, skill, rng.random_range(GENERATED_MIN..=100))
                }
            }
        })
        .collect()
}

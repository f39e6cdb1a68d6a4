/// Property-based tests for bracket simulation using proptest
///
/// These tests verify the bracket invariants across random roster sizes,
/// player attributes and seeds.
use proptest::prelude::*;
use std::collections::HashSet;
use tennis_tournament::{Player, Tournament, TournamentSimulationService, TournamentStatus, TournamentType};

// Strategy to generate a male player with arbitrary valid attributes
fn male_strategy() -> impl Strategy<Value = Player> {
    (0i32..=100, 0i32..=100, 0i32..=100)
        .prop_map(|(skill, strength, speed)| Player::male("Prop Player", skill, strength, speed).unwrap())
}

// Strategy to generate a roster of 2, 4, 8, 16 or 32 players
fn roster_strategy() -> impl Strategy<Value = Vec<Player>> {
    (1u32..=5).prop_flat_map(|exp| prop::collection::vec(male_strategy(), 1usize << exp))
}

proptest! {
    #[test]
    fn test_bracket_has_n_minus_one_matches(roster in roster_strategy(), seed in any::<u64>()) {
        let n = roster.len();
        let mut t = Tournament::new(TournamentType::Male, roster).unwrap();
        let outcome = TournamentSimulationService::seeded(seed).simulate_tournament(&mut t).unwrap();

        prop_assert_eq!(outcome.matches().len(), n - 1);
        prop_assert_eq!(outcome.rounds(), n.trailing_zeros());
        prop_assert_eq!(t.status(), TournamentStatus::Completed);
    }

    #[test]
    fn test_champion_wins_the_final(roster in roster_strategy(), seed in any::<u64>()) {
        let mut t = Tournament::new(TournamentType::Male, roster).unwrap();
        let outcome = TournamentSimulationService::seeded(seed).simulate_tournament(&mut t).unwrap();

        let finals: Vec<_> = t.matches_in_round(t.total_rounds()).collect();
        prop_assert_eq!(finals.len(), 1);
        prop_assert_eq!(finals[0].winner().unwrap().id(), outcome.winner().id());
    }

    #[test]
    fn test_each_player_loses_at_most_once(roster in roster_strategy(), seed in any::<u64>()) {
        let n = roster.len();
        let mut t = Tournament::new(TournamentType::Male, roster).unwrap();
        let outcome = TournamentSimulationService::seeded(seed).simulate_tournament(&mut t).unwrap();

        let losers: HashSet<_> = outcome.matches().iter().map(|m| m.loser().unwrap().id()).collect();
        prop_assert_eq!(losers.len(), n - 1);
        prop_assert!(!losers.contains(&outcome.winner().id()));
    }

    #[test]
    fn test_non_power_of_two_rejected(n in 3usize..64) {
        prop_assume!(!n.is_power_of_two());
        let roster: Vec<_> = (0..n).map(|_| Player::female("Prop Player", 50, 50).unwrap()).collect();
        prop_assert!(Tournament::new(TournamentType::Female, roster).is_err());
    }
}

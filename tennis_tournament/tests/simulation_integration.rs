//! Integration tests for whole-tournament simulation

#[cfg(test)]
mod simulation_tests {
    use std::sync::Arc;
    use tennis_tournament::player::seed;
    use tennis_tournament::{
        ErrorKind, Player, PlayerType, SimulationConfig, SimulationError, TieBreakPolicy, Tournament,
        TournamentSimulationService, TournamentStatus, TournamentType,
    };

    #[test]
    fn test_four_men_scenario() {
        let roster = vec![
            Player::male("Rafael Nadal", 95, 90, 85).unwrap(),
            Player::male("Novak Djokovic", 98, 85, 95).unwrap(),
            Player::male("Roger Federer", 96, 80, 90).unwrap(),
            Player::male("Andy Murray", 90, 82, 88).unwrap(),
        ];
        let ids: Vec<_> = roster.iter().map(Player::id).collect();
        let mut t = Tournament::new(TournamentType::Male, roster).unwrap();

        let outcome = TournamentSimulationService::new().simulate_tournament(&mut t).unwrap();

        assert_eq!(t.matches_in_round(1).count(), 2);
        assert_eq!(t.matches_in_round(2).count(), 1);
        assert_eq!(outcome.rounds(), 2);
        assert_eq!(outcome.matches().len(), 3);
        assert!(ids.contains(&outcome.winner().id()));
        assert_eq!(t.status(), TournamentStatus::Completed);
        assert!(t.end_date().unwrap() >= t.start_date());
    }

    #[test]
    fn test_every_winner_is_a_participant() {
        let roster = seed::default_roster(PlayerType::Female).unwrap();
        let mut t = Tournament::new(TournamentType::Female, roster).unwrap();
        let outcome = TournamentSimulationService::seeded(17).simulate_tournament(&mut t).unwrap();

        for game in outcome.matches() {
            let winner = game.winner().unwrap();
            assert!(Arc::ptr_eq(winner, game.player1()) || Arc::ptr_eq(winner, game.player2()));
        }
    }

    #[test]
    fn test_winners_advance_round_by_round() {
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(8);
        let roster = seed::random_roster(&mut rng, PlayerType::Male, 16).unwrap();
        let mut t = Tournament::new(TournamentType::Male, roster).unwrap();
        TournamentSimulationService::seeded(8).simulate_tournament(&mut t).unwrap();

        for round in 2..=t.total_rounds() {
            let previous: Vec<_> = t
                .matches_in_round(round - 1)
                .map(|m| m.winner().unwrap().id())
                .collect();
            let entrants: Vec<_> = t
                .matches_in_round(round)
                .flat_map(|m| [m.player1().id(), m.player2().id()])
                .collect();
            assert_eq!(previous, entrants);
        }
    }

    #[test]
    fn test_tie_break_policy_reproducible_with_fixed_seed() {
        // identical attributes: only luck separates them
        let roster: Vec<_> = (0..8)
            .map(|n| Player::female(format!("Twin {n}"), 80, 80).unwrap())
            .collect();
        let base = Tournament::new(TournamentType::Female, roster).unwrap();
        let config = SimulationConfig::default().with_tie_break(TieBreakPolicy::FavorPlayerOne);

        let mut a = base.clone();
        let mut b = base;
        let rng = || <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(31);
        let oa = TournamentSimulationService::with_config(config, rng())
            .simulate_tournament(&mut a)
            .unwrap();
        let ob = TournamentSimulationService::with_config(config, rng())
            .simulate_tournament(&mut b)
            .unwrap();
        assert_eq!(oa.winner().id(), ob.winner().id());
    }

    #[test]
    fn test_completed_tournament_is_not_replayed() {
        let roster = seed::default_roster(PlayerType::Male).unwrap();
        let mut t = Tournament::new(TournamentType::Male, roster).unwrap();
        let mut service = TournamentSimulationService::seeded(1);
        service.simulate_tournament(&mut t).unwrap();

        let err = service.simulate_tournament(&mut t).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert!(matches!(err, SimulationError::AlreadyCompleted(_)));
        assert_eq!(t.matches().len(), 3);
    }
}

//! Integration tests for the tournament manager over in-memory repositories

#[cfg(test)]
mod manager_tests {
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use tennis_tournament::db::{
        InMemoryMatchRepository, InMemoryOutcomeRepository, InMemoryPlayerRepository, InMemoryTournamentRepository,
        MatchRepository, OutcomeRepository,
    };
    use tennis_tournament::player::{PlayerType, load_roster, seed};
    use tennis_tournament::{
        ErrorKind, ManagerError, PlayerSpec, TournamentManager, TournamentSimulationService, TournamentStatus,
        TournamentType,
    };

    async fn seeded_manager(player_type: PlayerType) -> (TournamentManager, Vec<uuid::Uuid>) {
        let manager = TournamentManager::in_memory(TournamentSimulationService::seeded(2025));
        let mut ids = Vec::new();
        for player in seed::default_roster(player_type).unwrap() {
            let spec = match player_type {
                PlayerType::Male => PlayerSpec::male(
                    player.name(),
                    player.skill_level().into(),
                    player.strength().unwrap().into(),
                    player.speed().unwrap().into(),
                ),
                PlayerType::Female => PlayerSpec::female(
                    player.name(),
                    player.skill_level().into(),
                    player.reaction_time().unwrap().into(),
                ),
            };
            ids.push(manager.register_player(spec).await.unwrap().id());
        }
        (manager, ids)
    }

    #[tokio::test]
    async fn test_full_flow_with_seed_roster() {
        let (manager, ids) = seeded_manager(PlayerType::Female).await;
        let t = manager
            .create_tournament(TournamentType::Female, &ids, Utc::now())
            .await
            .unwrap();
        assert_eq!(t.status(), TournamentStatus::Scheduled);

        let outcome = manager.simulate_tournament(t.id()).await.unwrap();
        assert!(outcome.is_finalized());
        assert!(ids.contains(&outcome.winner().id()));

        let completed = manager.tournaments_by_status(TournamentStatus::Completed).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(manager.outcomes_by_type(TournamentType::Female).await.unwrap().len(), 1);
        assert!(manager.outcomes_by_type(TournamentType::Male).await.unwrap().is_empty());

        let now = Utc::now();
        let recent = manager
            .outcomes_by_date_range(now - Duration::minutes(5), now + Duration::minutes(5))
            .await
            .unwrap();
        assert_eq!(recent.len(), 1);
    }

    #[tokio::test]
    async fn test_queries_by_type_and_date() {
        let (manager, men) = seeded_manager(PlayerType::Male).await;
        let now = Utc::now();
        manager
            .create_tournament(TournamentType::Male, &men[..2], now - Duration::days(10))
            .await
            .unwrap();
        manager
            .create_tournament(TournamentType::Male, &men, now + Duration::days(10))
            .await
            .unwrap();

        assert_eq!(manager.tournaments_by_type(TournamentType::Male).await.unwrap().len(), 2);
        let past = manager
            .tournaments_by_date_range(now - Duration::days(11), now)
            .await
            .unwrap();
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].players().len(), 2);
    }

    #[tokio::test]
    async fn test_roster_file_registration() {
        let json = r#"[
            {"player_type": "female", "name": "Coco Gauff", "skill_level": 88, "reaction_time": 91},
            {"player_type": "female", "name": "Iga Swiatek", "skill_level": 95, "reaction_time": 89}
        ]"#;
        let manager = TournamentManager::in_memory(TournamentSimulationService::seeded(1));
        let mut ids = Vec::new();
        for player in load_roster(json).unwrap() {
            let spec = PlayerSpec::female(
                player.name(),
                player.skill_level().into(),
                player.reaction_time().unwrap().into(),
            );
            ids.push(manager.register_player(spec).await.unwrap().id());
        }

        let t = manager
            .create_tournament(TournamentType::Female, &ids, Utc::now())
            .await
            .unwrap();
        let outcome = manager.simulate_tournament(t.id()).await.unwrap();
        assert_eq!(outcome.matches().len(), 1);
        assert_eq!(manager.matches_for_player(ids[0]).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_errors_carry_kinds() {
        let (manager, ids) = seeded_manager(PlayerType::Male).await;

        let err = manager
            .create_tournament(TournamentType::Male, &ids[..3], Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.client_message(), "Player count must be a power of two of at least 2, got 3");

        let missing = uuid::Uuid::new_v4();
        let err = manager.get_tournament(missing).await.unwrap_err();
        assert_eq!(err, ManagerError::TournamentNotFound(missing));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_managers_share_repositories() {
        let players = Arc::new(InMemoryPlayerRepository::new());
        let tournaments = Arc::new(InMemoryTournamentRepository::new());
        let matches = Arc::new(InMemoryMatchRepository::new());
        let outcomes = Arc::new(InMemoryOutcomeRepository::new());

        let build = |seed| {
            TournamentManager::new(
                players.clone(),
                tournaments.clone(),
                matches.clone(),
                outcomes.clone(),
                TournamentSimulationService::seeded(seed),
            )
        };
        let registrar = build(1);
        let runner = build(2);

        let a = registrar
            .register_player(PlayerSpec::male("Carlos Alcaraz", 97, 90, 96))
            .await
            .unwrap();
        let b = registrar
            .register_player(PlayerSpec::male("Jannik Sinner", 96, 88, 93))
            .await
            .unwrap();
        let t = registrar
            .create_tournament(TournamentType::Male, &[a.id(), b.id()], Utc::now())
            .await
            .unwrap();

        let outcome = runner.simulate_tournament(t.id()).await.unwrap();
        assert_eq!(matches.get_by_tournament(t.id()).await.unwrap().len(), 1);
        assert_eq!(
            outcomes.get_by_tournament(t.id()).await.unwrap().unwrap().id(),
            outcome.id()
        );
        assert_eq!(
            registrar.get_tournament(t.id()).await.unwrap().status(),
            TournamentStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_concurrent_simulations() {
        let (manager, ids) = seeded_manager(PlayerType::Male).await;
        let mut handles = Vec::new();
        for _ in 0..4 {
            let t = manager
                .create_tournament(TournamentType::Male, &ids, Utc::now())
                .await
                .unwrap();
            let manager = manager.clone();
            handles.push(tokio::spawn(async move { manager.simulate_tournament(t.id()).await }));
        }
        for handle in handles {
            let outcome = handle.await.unwrap().unwrap();
            assert_eq!(outcome.matches().len(), 3);
        }
        assert_eq!(manager.tournaments_by_status(TournamentStatus::Completed).await.unwrap().len(), 4);
    }
}

//! Command-line tennis tournament simulator.
//!
//! Registers a roster, creates a tournament, plays it to a champion and
//! prints the bracket.

mod config;

use anyhow::{Context, Error};
use chrono::Utc;
use log::info;
use pico_args::Arguments;
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;

use config::{OutputFormat, Overrides, RosterSource, SimConfig};
use tennis_tournament::{
    PlayerSpec, SimulationConfig, Tournament, TournamentManager, TournamentOutcome, TournamentSimulationService,
    player::{parse_roster, seed},
};

const HELP: &str = "\
Simulate a single-elimination tennis tournament

USAGE:
  tt_sim [OPTIONS]

OPTIONS:
  --type       TYPE        Tournament type, male or female  [default: env TT_TOURNAMENT_TYPE or male]
  --players    N           Generate N random players (power of two)  [default: env TT_PLAYERS]
  --roster     FILE        Read players from a JSON roster file  [default: env TT_ROSTER]
  --seed       N           Seed for a reproducible run  [default: env TT_SEED or random]

FLAGS:
  --json                   Print the outcome as JSON
  -h, --help               Print help information

ENVIRONMENT:
  TT_TOURNAMENT_TYPE       Tournament type
  TT_PLAYERS               Number of generated players
  TT_ROSTER                Roster file path
  TT_SEED                  Random seed
  TT_OUTPUT                text or json
  TT_TIE_BREAK             coin_flip or favor_player_one
  RUST_LOG                 Log level (e.g., info, debug)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides {
        tournament_type: pargs.opt_value_from_str("--type")?,
        seed: pargs.opt_value_from_str("--seed")?,
        players: pargs.opt_value_from_str("--players")?,
        roster: pargs.opt_value_from_os_str("--roster", |s| Ok::<_, String>(PathBuf::from(s)))?,
        json: pargs.contains("--json"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {remaining:?}");
    }

    env_logger::builder().format_target(false).init();

    let config = SimConfig::from_env(overrides)?;
    config.validate()?;
    info!(
        "Simulating {} tournament (seed: {:?}, roster: {:?})",
        config.tournament_type, config.seed, config.roster
    );

    run(config).await
}

async fn run(config: SimConfig) -> Result<(), Error> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let specs = load_specs(&config, &mut rng)?;

    let simulation = SimulationConfig::default().with_tie_break(config.tie_break);
    let service = TournamentSimulationService::with_config(simulation, rng);
    let manager = TournamentManager::in_memory(service);

    let mut ids = Vec::with_capacity(specs.len());
    for spec in specs {
        let player = manager
            .register_player(spec)
            .await
            .map_err(|e| anyhow::anyhow!("Invalid player: {}", e.client_message()))?;
        ids.push(player.id());
    }

    let tournament = manager
        .create_tournament(config.tournament_type, &ids, Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Cannot create tournament: {}", e.client_message()))?;
    let outcome = manager
        .simulate_tournament(tournament.id())
        .await
        .map_err(|e| anyhow::anyhow!("Simulation failed: {}", e.client_message()))?;
    let played = manager.get_tournament(tournament.id()).await?;

    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => print_bracket(&played, &outcome),
    }
    Ok(())
}

fn load_specs(config: &SimConfig, rng: &mut StdRng) -> Result<Vec<PlayerSpec>, Error> {
    let player_type = config.tournament_type.player_type();
    let players = match &config.roster {
        RosterSource::File(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read roster file {}", path.display()))?;
            return Ok(parse_roster(&json)?);
        }
        RosterSource::Random(n) => seed::random_roster(rng, player_type, *n)?,
        RosterSource::Default => seed::default_roster(player_type)?,
    };
    Ok(players.iter().map(PlayerSpec::from).collect())
}

fn print_bracket(tournament: &Tournament, outcome: &TournamentOutcome) {
    println!(
        "{} tournament {} ({} players)",
        tournament.tournament_type(),
        tournament.id(),
        tournament.players().len()
    );

    for round in 1..=tournament.total_rounds() {
        println!();
        println!("Round {round}");
        for game in tournament.matches_in_round(round) {
            let winner = game.winner().map_or("-", |w| w.name());
            println!("  {} vs {} -> {}", game.player1().name(), game.player2().name(), winner);
        }
    }

    println!();
    println!("Champion: {}", outcome.winner());
}

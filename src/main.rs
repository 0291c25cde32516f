mod config;
mod display;
mod error;
mod parser;
mod schedule;
mod stats;
mod web;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use config::{SchedulerConfig, Strategy};
use display::{print_schedule, print_session_stats, write_schedule_to_file};
use parser::{load_game_log, load_roster, name_lookup, Player};
use schedule::{generate_schedule_with_state, PlayerId};
use stats::session_stats;

#[derive(Parser, Debug)]
#[command(name = "doubles-scheduler", about = "Fair doubles badminton scheduling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a schedule of doubles games
    Schedule {
        /// Roster CSV with id and name columns
        #[arg(long, required_unless_present = "ids")]
        roster: Option<PathBuf>,
        /// Comma-separated player ids (instead of the whole roster)
        #[arg(long, value_delimiter = ',')]
        ids: Option<Vec<PlayerId>>,
        /// Number of games to schedule
        #[arg(short, long)]
        games: usize,
        /// Scheduler config JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Overrides the strategy from the config file
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,
        /// Also write the schedule to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Summarise a session's recorded games
    Stats {
        /// Game log CSV
        #[arg(long)]
        log: PathBuf,
        /// Roster CSV used for display names
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Serve the JSON API
    Web {
        #[arg(short, long, env = "PORT", default_value = "8080")]
        port: u16,
        #[arg(long)]
        roster: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<SchedulerConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(SchedulerConfig::load(path)?),
        None => Ok(SchedulerConfig::default()),
    }
}

fn load_players(path: Option<&PathBuf>) -> Result<Vec<Player>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let players = load_roster(path)?;
            info!(players = players.len(), path = %path.display(), "loaded roster");
            Ok(players)
        }
        None => Ok(Vec::new()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doubles_scheduler=info,actix_web=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Schedule { roster, ids, games, config, strategy, out } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(strategy) = strategy {
                config.strategy = strategy;
            }
            let players = load_players(roster.as_ref())?;
            let names: HashMap<PlayerId, String> = name_lookup(&players);
            let player_ids = ids.unwrap_or_else(|| players.iter().map(|p| p.id).collect());

            let (schedule, state) = generate_schedule_with_state(&player_ids, games, &config)?;
            print_schedule(&schedule, &state, &names);

            if let Some(out) = out {
                write_schedule_to_file(&schedule, &names, &out)?;
                println!("\nSchedule saved to {}", out.display());
            }
        }
        Command::Stats { log, roster } => {
            let names = name_lookup(&load_players(roster.as_ref())?);
            let records = load_game_log(&log)?;
            info!(games = records.len(), path = %log.display(), "loaded game log");
            let stats = session_stats(&records)?;
            print_session_stats(&stats, &names);
        }
        Command::Web { port, roster, config } => {
            let config = load_config(config.as_ref())?;
            let players = load_players(roster.as_ref())?;
            println!("Access the API at http://localhost:{}", port);
            web::start_server(port, web::AppState::new(players, config)).await?;
        }
    }

    Ok(())
}

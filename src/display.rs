use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::schedule::{FairnessState, Pair, PlayerId, Schedule};
use crate::stats::SessionStats;

/// Display name for a player, falling back to the id
pub fn format_player_name(player: PlayerId, names: &HashMap<PlayerId, String>) -> String {
    match names.get(&player) {
        Some(name) => name.clone(),
        None => format!("#{}", player),
    }
}

/// Formats a team as "Alice & Bob"
pub fn format_team(pair: &Pair, names: &HashMap<PlayerId, String>) -> String {
    format!(
        "{} & {}",
        format_player_name(pair.first(), names),
        format_player_name(pair.second(), names)
    )
}

/// One line per game: "Game N: A & B vs C & D"
pub fn schedule_lines(schedule: &Schedule, names: &HashMap<PlayerId, String>) -> Vec<String> {
    schedule
        .games
        .iter()
        .enumerate()
        .map(|(round, game)| {
            format!(
                "Game {}: {} vs {}",
                round + 1,
                format_team(&game.team_a, names),
                format_team(&game.team_b, names)
            )
        })
        .collect()
}

/// Writes a schedule to a file, one game per line under a header
pub fn write_schedule_to_file<P: AsRef<Path>>(
    schedule: &Schedule,
    names: &HashMap<PlayerId, String>,
    path: P,
) -> Result<(), std::io::Error> {
    let mut file = File::create(path)?;
    writeln!(file, "** Doubles schedule ({} games) **", schedule.len())?;
    for line in schedule_lines(schedule, names) {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

/// Prints a schedule followed by how often each player plays and sits out
pub fn print_schedule(schedule: &Schedule, state: &FairnessState, names: &HashMap<PlayerId, String>) {
    println!("\n=== Schedule ===");
    for line in schedule_lines(schedule, names) {
        println!("  {}", line);
    }

    println!("\nParticipation:");
    for &player in state.players() {
        let counters = state.player(player);
        println!(
            "  {} -> plays {}, sits out {}",
            format_player_name(player, names),
            counters.play_count,
            counters.rounds_sat_out
        );
    }
}

/// Prints session statistics in a readable format
pub fn print_session_stats(stats: &SessionStats, names: &HashMap<PlayerId, String>) {
    println!("\n=== Session Stats ({} games) ===", stats.games_counted);

    println!("\nPlayers:");
    for player in stats.players() {
        let earnings = stats.player_earnings.get(&player).copied().unwrap_or(0.0);
        let wins = stats.player_wins.get(&player).copied().unwrap_or(0);
        let losses = stats.player_losses.get(&player).copied().unwrap_or(0);
        println!(
            "  {} -> {}W / {}L, earnings {:+.2}",
            format_player_name(player, names),
            wins,
            losses,
            earnings
        );
    }

    println!("\nPairings:");
    for stat in &stats.pairing_stats {
        println!("  {} -> {}W / {}L", format_team(&stat.pair, names), stat.wins, stat.losses);
    }
}

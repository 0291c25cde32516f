use csv::Reader;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::error::LoadError;
use crate::schedule::PlayerId;
use crate::stats::GameRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// One row of a game log: both teams flattened into columns
#[derive(Debug, Deserialize)]
struct GameLogRow {
    team_a_1: PlayerId,
    team_a_2: PlayerId,
    team_b_1: PlayerId,
    team_b_2: PlayerId,
    score_a: u32,
    score_b: u32,
    #[serde(default)]
    amount_bet: Option<f64>,
}

impl From<GameLogRow> for GameRecord {
    fn from(row: GameLogRow) -> Self {
        GameRecord {
            team_a: vec![row.team_a_1, row.team_a_2],
            team_b: vec![row.team_b_1, row.team_b_2],
            score_a: row.score_a,
            score_b: row.score_b,
            amount_bet: row.amount_bet.unwrap_or(0.0),
        }
    }
}

/// Parses a player id, returning None if empty or not a number
fn parse_player_id(value: &str) -> Option<PlayerId> {
    value.trim().parse().ok()
}

/// Loads the player roster from a CSV file with `id` and `name` columns
///
/// Rows without a usable id or name are skipped, as are repeated names.
/// A repeated id is an error since it would make the roster ambiguous.
pub fn load_roster<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Player>, LoadError> {
    let mut reader = Reader::from_path(csv_path)?;
    let headers = reader.headers()?.clone();

    let id_col = headers.iter().position(|h| h.trim().eq_ignore_ascii_case("id")).unwrap_or(0);
    let name_col = headers.iter().position(|h| h.trim().eq_ignore_ascii_case("name")).unwrap_or(1);

    let mut players = Vec::new();
    let mut ids: HashSet<PlayerId> = HashSet::new();
    let mut names: HashSet<String> = HashSet::new();

    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let name = record.get(name_col).unwrap_or("").trim().to_string();
        let id = match record.get(id_col).and_then(parse_player_id) {
            Some(id) => id,
            None => {
                warn!(line = line + 2, "skipping roster row without a numeric id");
                continue;
            }
        };

        if name.is_empty() {
            warn!(line = line + 2, id, "skipping roster row without a name");
            continue;
        }
        if !ids.insert(id) {
            return Err(LoadError::DuplicateId { id });
        }
        if !names.insert(name.to_lowercase()) {
            warn!(line = line + 2, %name, "player already exists, skipping");
            continue;
        }

        players.push(Player { id, name });
    }

    Ok(players)
}

/// Loads recorded games from a CSV file
///
/// Expected header: `team_a_1,team_a_2,team_b_1,team_b_2,score_a,score_b,amount_bet`
pub fn load_game_log<P: AsRef<Path>>(csv_path: P) -> Result<Vec<GameRecord>, LoadError> {
    let mut reader = Reader::from_path(csv_path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<GameLogRow>() {
        records.push(row?.into());
    }
    Ok(records)
}

/// Lookup from player id to display name
pub fn name_lookup(players: &[Player]) -> HashMap<PlayerId, String> {
    players.iter().map(|p| (p.id, p.name.clone())).collect()
}

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::error::RecordError;
use crate::schedule::{Pair, PlayerId};

/// A finished game as reported after play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub score_a: u32,
    pub score_b: u32,
    #[serde(default)]
    pub amount_bet: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinningTeam {
    A,
    B,
}

impl GameRecord {
    /// Derived from the scores; `None` on a tie
    pub fn winning_team(&self) -> Option<WinningTeam> {
        if self.score_a > self.score_b {
            Some(WinningTeam::A)
        } else if self.score_b > self.score_a {
            Some(WinningTeam::B)
        } else {
            None
        }
    }

    fn team_pair(team: &[PlayerId]) -> Option<Pair> {
        match team {
            [a, b] => Pair::new(*a, *b),
            _ => None,
        }
    }

    /// Both teams as pairs, checked for size and overlap
    pub fn teams(&self, index: usize) -> Result<(Pair, Pair), RecordError> {
        let invalid = |reason: &str| RecordError::InvalidTeams {
            index,
            reason: reason.to_string(),
        };
        let team_a = Self::team_pair(&self.team_a).ok_or_else(|| invalid("team A needs two different players"))?;
        let team_b = Self::team_pair(&self.team_b).ok_or_else(|| invalid("team B needs two different players"))?;
        if team_a.overlaps(&team_b) {
            return Err(invalid("a player cannot be on both teams"));
        }
        Ok((team_a, team_b))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PairRecord {
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingStat {
    pub pair: Pair,
    pub wins: u32,
    pub losses: u32,
}

/// Money and results per player and per pair over one session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub games_counted: usize,
    pub player_earnings: BTreeMap<PlayerId, f64>,
    pub player_wins: BTreeMap<PlayerId, u32>,
    pub player_losses: BTreeMap<PlayerId, u32>,
    pub pairing_stats: Vec<PairingStat>,
}

impl SessionStats {
    /// Players appearing in any counted game, ascending
    pub fn players(&self) -> Vec<PlayerId> {
        self.player_earnings.keys().copied().collect()
    }
}

/// Aggregates earnings, wins and losses over every recorded game
///
/// Winners each gain the bet, losers each lose it. Any malformed or tied game
/// fails the whole computation.
pub fn session_stats(records: &[GameRecord]) -> Result<SessionStats, RecordError> {
    let mut stats = SessionStats::default();
    let mut pairs: BTreeMap<Pair, PairRecord> = BTreeMap::new();

    for (index, record) in records.iter().enumerate() {
        let (team_a, team_b) = record.teams(index)?;
        let (winners, losers) = match record.winning_team() {
            Some(WinningTeam::A) => (team_a, team_b),
            Some(WinningTeam::B) => (team_b, team_a),
            None => return Err(RecordError::Tie { index }),
        };

        pairs.entry(winners).or_default().wins += 1;
        pairs.entry(losers).or_default().losses += 1;

        for player in winners.players() {
            *stats.player_earnings.entry(player).or_insert(0.0) += record.amount_bet;
            *stats.player_wins.entry(player).or_insert(0) += 1;
            stats.player_losses.entry(player).or_insert(0);
        }
        for player in losers.players() {
            *stats.player_earnings.entry(player).or_insert(0.0) -= record.amount_bet;
            *stats.player_losses.entry(player).or_insert(0) += 1;
            stats.player_wins.entry(player).or_insert(0);
        }
        stats.games_counted += 1;
    }

    stats.pairing_stats = pairs
        .into_iter()
        .map(|(pair, record)| PairingStat {
            pair,
            wins: record.wins,
            losses: record.losses,
        })
        .collect();
    Ok(stats)
}

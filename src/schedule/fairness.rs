use std::collections::{HashMap, HashSet};
use serde::Serialize;
use super::catalog::PairCatalog;
use super::types::{Game, Pair, PlayerId};

/// Round index recorded for a player who has not played yet
pub const NEVER_PLAYED: i64 = -1;

/// Per-player participation counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFairness {
    pub play_count: u32,
    pub last_played_round: i64,
    pub breaks: u32,
    pub rounds_sat_out: u32,
}

impl Default for PlayerFairness {
    fn default() -> Self {
        PlayerFairness {
            play_count: 0,
            last_played_round: NEVER_PLAYED,
            breaks: 0,
            rounds_sat_out: 0,
        }
    }
}

/// Mutable fairness bookkeeping for one scheduling call
#[derive(Debug, Clone)]
pub struct FairnessState {
    players: Vec<PlayerId>,
    per_player: HashMap<PlayerId, PlayerFairness>,
    pair_count: HashMap<Pair, u32>,
    previous_round: HashSet<PlayerId>,
    rounds_played: usize,
}

impl FairnessState {
    pub fn new(players: &[PlayerId], pairs: &PairCatalog) -> Self {
        FairnessState {
            players: players.to_vec(),
            per_player: players.iter().map(|&p| (p, PlayerFairness::default())).collect(),
            pair_count: pairs.pairs().iter().map(|&pair| (pair, 0)).collect(),
            previous_round: HashSet::new(),
            rounds_played: 0,
        }
    }

    /// Players in the order they were supplied
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn player(&self, player: PlayerId) -> PlayerFairness {
        self.per_player.get(&player).copied().unwrap_or_default()
    }

    pub fn play_count(&self, player: PlayerId) -> u32 {
        self.player(player).play_count
    }

    pub fn last_played_round(&self, player: PlayerId) -> i64 {
        self.player(player).last_played_round
    }

    pub fn breaks(&self, player: PlayerId) -> u32 {
        self.player(player).breaks
    }

    pub fn pair_count(&self, pair: &Pair) -> u32 {
        self.pair_count.get(pair).copied().unwrap_or(0)
    }

    pub fn pair_counts(&self) -> &HashMap<Pair, u32> {
        &self.pair_count
    }

    pub fn total_pair_count(&self) -> u32 {
        self.pair_count.values().sum()
    }

    pub fn previous_round_players(&self) -> &HashSet<PlayerId> {
        &self.previous_round
    }

    /// How many of `players` also played in the preceding round
    pub fn previous_round_overlap(&self, players: &[PlayerId]) -> usize {
        players.iter().filter(|p| self.previous_round.contains(*p)).count()
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// Applies the outcome of round `round` to every counter
    pub fn record_round(&mut self, round: usize, game: &Game) {
        for pair in game.pairs() {
            *self.pair_count.entry(pair).or_insert(0) += 1;
        }
        for player in &self.players {
            let entry = self.per_player.entry(*player).or_default();
            if game.contains(*player) {
                entry.play_count += 1;
                entry.last_played_round = round as i64;
                entry.breaks = 0;
            } else {
                entry.breaks += 1;
                entry.rounds_sat_out += 1;
            }
        }
        self.previous_round = game.players().into_iter().collect();
        self.rounds_played = round + 1;
    }
}

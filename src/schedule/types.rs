use std::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// Caller-supplied player identifier
pub type PlayerId = u32;

/// Two distinct players teamed together, stored lowest id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair(PlayerId, PlayerId);

impl Pair {
    /// Canonical pair of two players, or `None` if they are the same player
    pub fn new(a: PlayerId, b: PlayerId) -> Option<Self> {
        match a.cmp(&b) {
            Ordering::Less => Some(Pair(a, b)),
            Ordering::Greater => Some(Pair(b, a)),
            Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> PlayerId {
        self.0
    }

    pub fn second(&self) -> PlayerId {
        self.1
    }

    pub fn players(&self) -> [PlayerId; 2] {
        [self.0, self.1]
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.0 == player || self.1 == player
    }

    /// True if the two pairs have at least one player in common
    pub fn overlaps(&self, other: &Pair) -> bool {
        other.contains(self.0) || other.contains(self.1)
    }
}

/// One doubles match: two disjoint pairs
///
/// Always canonical: `team_a` holds the pair with the lower first player, so
/// two games with the same teams compare equal regardless of construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub team_a: Pair,
    pub team_b: Pair,
}

impl Game {
    /// Builds the canonical game for two teams, or `None` if they share a player
    pub fn new(first: Pair, second: Pair) -> Option<Self> {
        if first.overlaps(&second) {
            return None;
        }
        let (team_a, team_b) = if first.first() <= second.first() {
            (first, second)
        } else {
            (second, first)
        };
        Some(Game { team_a, team_b })
    }

    pub fn pairs(&self) -> [Pair; 2] {
        [self.team_a, self.team_b]
    }

    pub fn players(&self) -> [PlayerId; 4] {
        [
            self.team_a.first(),
            self.team_a.second(),
            self.team_b.first(),
            self.team_b.second(),
        ]
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.team_a.contains(player) || self.team_b.contains(player)
    }
}

/// Ordered list of games, index = round number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub games: Vec<Game>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

use std::collections::HashSet;
use super::types::{Game, Pair, PlayerId};

/// Every unordered pair of players, in input order (i < j)
#[derive(Debug, Clone)]
pub struct PairCatalog {
    pairs: Vec<Pair>,
}

impl PairCatalog {
    pub fn new(players: &[PlayerId]) -> Self {
        let mut pairs = Vec::with_capacity(players.len() * players.len().saturating_sub(1) / 2);
        for i in 0..players.len() {
            for j in (i + 1)..players.len() {
                if let Some(pair) = Pair::new(players[i], players[j]) {
                    pairs.push(pair);
                }
            }
        }
        PairCatalog { pairs }
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

/// Every valid game: two disjoint pairs, canonical, in pair enumeration order
#[derive(Debug, Clone)]
pub struct GameCatalog {
    games: Vec<Game>,
    index: HashSet<Game>,
}

impl GameCatalog {
    pub fn new(pairs: &PairCatalog) -> Self {
        let pairs = pairs.pairs();
        let mut games = Vec::new();
        let mut index = HashSet::new();
        for i in 0..pairs.len() {
            for j in (i + 1)..pairs.len() {
                if let Some(game) = Game::new(pairs[i], pairs[j]) {
                    if index.insert(game) {
                        games.push(game);
                    }
                }
            }
        }
        GameCatalog { games, index }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn first(&self) -> Option<&Game> {
        self.games.first()
    }

    /// Membership ignores team order since games are canonical
    pub fn contains(&self, game: &Game) -> bool {
        self.index.contains(game)
    }
}

use std::collections::HashSet;
use tracing::{debug, info};
use crate::config::{SchedulerConfig, Strategy};
use crate::error::ScheduleError;
use super::catalog::{GameCatalog, PairCatalog};
use super::fairness::FairnessState;
use super::selector::{least_repeated_index, RoundSelector};
use super::types::{Game, PlayerId, Schedule};

/// Minimum number of distinct players for a doubles game
pub const PLAYERS_PER_GAME: usize = 4;

/// Drives round selection and owns the fairness state of one scheduling call
pub struct ScheduleBuilder {
    catalog: GameCatalog,
    state: FairnessState,
    config: SchedulerConfig,
    /// Games not yet used in the current pair-balance cycle
    remaining: Vec<Game>,
    games: Vec<Game>,
}

impl ScheduleBuilder {
    pub fn new(players: &[PlayerId], config: SchedulerConfig) -> Result<Self, ScheduleError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = players.iter().find(|&&p| !seen.insert(p)) {
            return Err(ScheduleError::InvalidRequest(format!(
                "player {} is listed more than once",
                duplicate
            )));
        }
        if players.len() < PLAYERS_PER_GAME {
            return Err(ScheduleError::NotEnoughPlayers { found: players.len() });
        }

        let pairs = PairCatalog::new(players);
        let catalog = GameCatalog::new(&pairs);
        let state = FairnessState::new(players, &pairs);
        debug!(
            players = players.len(),
            pairs = pairs.len(),
            games = catalog.len(),
            "built catalogs"
        );

        Ok(ScheduleBuilder {
            remaining: catalog.games().to_vec(),
            catalog,
            state,
            config,
            games: Vec::new(),
        })
    }

    pub fn state(&self) -> &FairnessState {
        &self.state
    }

    pub fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }

    /// Selects the next round's game and records it
    pub fn next_round(&mut self) -> Result<Game, ScheduleError> {
        let round = self.games.len();
        let game = match self.config.strategy {
            Strategy::RestAware => {
                RoundSelector::new(&self.catalog, self.config.weights).select(&self.state, round)?
            }
            Strategy::PairBalance => self.next_pair_balance_game()?,
        };
        self.state.record_round(round, &game);
        self.games.push(game);
        Ok(game)
    }

    fn next_pair_balance_game(&mut self) -> Result<Game, ScheduleError> {
        if self.remaining.is_empty() {
            debug!(round = self.games.len(), "every game used once, starting a new cycle");
            self.remaining = self.catalog.games().to_vec();
        }
        let idx = least_repeated_index(&self.state, &self.remaining).ok_or(
            ScheduleError::NotEnoughPlayers {
                found: self.state.players().len(),
            },
        )?;
        Ok(self.remaining.remove(idx))
    }

    /// Runs `num_games` more rounds and returns the schedule with the final state
    pub fn build(mut self, num_games: usize) -> Result<(Schedule, FairnessState), ScheduleError> {
        for _ in 0..num_games {
            self.next_round()?;
        }
        info!(
            games = self.games.len(),
            players = self.state.players().len(),
            strategy = ?self.config.strategy,
            "schedule generated"
        );
        Ok((Schedule { games: self.games }, self.state))
    }
}

/// Produces `num_games` fair doubles games for the given players
pub fn generate_schedule(
    players: &[PlayerId],
    num_games: usize,
    config: &SchedulerConfig,
) -> Result<Schedule, ScheduleError> {
    generate_schedule_with_state(players, num_games, config).map(|(schedule, _)| schedule)
}

/// Like [`generate_schedule`], also handing back the final fairness counters
pub fn generate_schedule_with_state(
    players: &[PlayerId],
    num_games: usize,
    config: &SchedulerConfig,
) -> Result<(Schedule, FairnessState), ScheduleError> {
    if num_games == 0 {
        return Err(ScheduleError::InvalidRequest(
            "number of games must be positive".to_string(),
        ));
    }
    ScheduleBuilder::new(players, *config)?.build(num_games)
}


#[cfg(test)]
mod proptests {
    use std::collections::HashSet;
    use proptest::prelude::*;
    use crate::config::SchedulerConfig;
    use crate::schedule::types::PlayerId;
    use super::{generate_schedule, ScheduleBuilder};

    fn distinct_players() -> impl Strategy<Value = Vec<PlayerId>> {
        prop::collection::hash_set(1u32..500, 4..12).prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_schedule_has_requested_length(players in distinct_players(), num_games in 1usize..30) {
            let schedule = generate_schedule(&players, num_games, &SchedulerConfig::default()).unwrap();
            prop_assert_eq!(schedule.len(), num_games);
        }

        #[test]
        fn prop_games_use_four_distinct_players(players in distinct_players(), num_games in 1usize..30) {
            let schedule = generate_schedule(&players, num_games, &SchedulerConfig::default()).unwrap();
            for game in &schedule.games {
                let unique: HashSet<PlayerId> = game.players().into_iter().collect();
                prop_assert_eq!(unique.len(), 4);
                for player in game.players() {
                    prop_assert!(players.contains(&player));
                }
            }
        }

        #[test]
        fn prop_pair_counts_sum_to_two_per_game(players in distinct_players(), num_games in 1usize..30) {
            let mut builder = ScheduleBuilder::new(&players, SchedulerConfig::default()).unwrap();
            let mut previous = builder.state().pair_counts().clone();
            for _ in 0..num_games {
                builder.next_round().unwrap();
                for (pair, count) in builder.state().pair_counts() {
                    prop_assert!(*count >= previous.get(pair).copied().unwrap_or(0));
                }
                previous = builder.state().pair_counts().clone();
            }
            prop_assert_eq!(builder.state().total_pair_count() as usize, 2 * num_games);
        }

        #[test]
        fn prop_schedule_is_deterministic(players in distinct_players(), num_games in 1usize..30) {
            let config = SchedulerConfig::default();
            let first = generate_schedule(&players, num_games, &config).unwrap();
            let second = generate_schedule(&players, num_games, &config).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

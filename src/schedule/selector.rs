use tracing::{debug, warn};
use crate::config::ScoringWeights;
use crate::error::ScheduleError;
use super::catalog::GameCatalog;
use super::fairness::FairnessState;
use super::types::{Game, Pair, PlayerId};

/// Picks one game per round from a fixed catalog
pub struct RoundSelector<'a> {
    catalog: &'a GameCatalog,
    weights: ScoringWeights,
}

impl<'a> RoundSelector<'a> {
    pub fn new(catalog: &'a GameCatalog, weights: ScoringWeights) -> Self {
        RoundSelector { catalog, weights }
    }

    /// Most rested first: longest current break, then longest since last game.
    /// Remaining ties keep input order.
    ///
    /// Within one call equal breaks imply equal last rounds, so the second key
    /// never decides an order on its own.
    pub fn rank_players(state: &FairnessState) -> Vec<PlayerId> {
        let mut ranked = state.players().to_vec();
        ranked.sort_by(|&a, &b| {
            state
                .breaks(b)
                .cmp(&state.breaks(a))
                .then_with(|| state.last_played_round(a).cmp(&state.last_played_round(b)))
        });
        ranked
    }

    /// Score of playing `team_a` against `team_b` in `round`; higher is better
    pub fn score(&self, state: &FairnessState, round: usize, team_a: Pair, team_b: Pair) -> i64 {
        let pair_penalty = state.pair_count(&team_a) as i64 + state.pair_count(&team_b) as i64;

        let gap = |player: PlayerId| round as i64 - state.last_played_round(player);
        let rest_bonus = gap(team_a.first()).min(gap(team_a.second()))
            + gap(team_b.first()).min(gap(team_b.second()));

        let players = [team_a.first(), team_a.second(), team_b.first(), team_b.second()];
        let prev_penalty =
            state.previous_round_overlap(&players) as i64 * self.weights.previous_round_penalty;

        -self.weights.pair_repeat_penalty * pair_penalty + rest_bonus - prev_penalty
    }

    /// Best game for `round` among the most rested players
    pub fn select(&self, state: &FairnessState, round: usize) -> Result<Game, ScheduleError> {
        if self.catalog.is_empty() {
            return Err(ScheduleError::NotEnoughPlayers {
                found: state.players().len(),
            });
        }

        let ranked = Self::rank_players(state);
        let pool = &ranked[..ranked.len().min(self.weights.candidate_pool_size)];

        let mut best: Option<(i64, Game)> = None;
        for i in 0..pool.len() {
            for j in (i + 1)..pool.len() {
                for m in 0..pool.len() {
                    if m == i || m == j {
                        continue;
                    }
                    for n in (m + 1)..pool.len() {
                        if n == i || n == j {
                            continue;
                        }
                        let (Some(team_a), Some(team_b)) =
                            (Pair::new(pool[i], pool[j]), Pair::new(pool[m], pool[n]))
                        else {
                            continue;
                        };
                        let game = match Game::new(team_a, team_b) {
                            Some(game) if self.catalog.contains(&game) => game,
                            _ => continue,
                        };
                        let score = self.score(state, round, team_a, team_b);
                        // Strict comparison: the first split reaching the top score keeps it
                        if best.map_or(true, |(top, _)| score > top) {
                            best = Some((score, game));
                        }
                    }
                }
            }
        }

        if let Some((score, game)) = best {
            debug!(round, score, ?game, "selected game");
            return Ok(game);
        }

        self.fallback(&ranked, round)
    }

    /// First catalog game holding the four most rested players, else the first game
    fn fallback(&self, ranked: &[PlayerId], round: usize) -> Result<Game, ScheduleError> {
        let top = &ranked[..ranked.len().min(4)];
        let game = self
            .catalog
            .games()
            .iter()
            .find(|game| top.iter().all(|&p| game.contains(p)))
            .or_else(|| self.catalog.first())
            .copied()
            .ok_or(ScheduleError::NotEnoughPlayers { found: ranked.len() })?;
        warn!(round, ?game, "no candidate split matched, using catalog fallback");
        Ok(game)
    }
}

/// Index of the game whose two pairs have been teamed least, first one on ties
pub fn least_repeated_index(state: &FairnessState, remaining: &[Game]) -> Option<usize> {
    let mut best: Option<(u32, usize)> = None;
    for (idx, game) in remaining.iter().enumerate() {
        let score = state.pair_count(&game.team_a) + state.pair_count(&game.team_b);
        if best.map_or(true, |(top, _)| score < top) {
            best = Some((score, idx));
        }
    }
    best.map(|(_, idx)| idx)
}

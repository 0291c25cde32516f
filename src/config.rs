use std::path::Path;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// Smallest candidate pool that can still field a full game
pub const MIN_CANDIDATE_POOL: usize = 4;

/// Which selection routine drives each round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Rest-aware scoring over a bounded candidate pool
    #[default]
    RestAware,
    /// Least-repeated pairs first, each game used once per cycle
    PairBalance,
}

/// Scoring weights for the rest-aware strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringWeights {
    /// Subtracted once per earlier time either team was already paired
    pub pair_repeat_penalty: i64,
    /// Subtracted once per player who also played the previous round
    pub previous_round_penalty: i64,
    /// Number of most-rested players considered each round
    pub candidate_pool_size: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            pair_repeat_penalty: 100,
            previous_round_penalty: 1000,
            candidate_pool_size: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub strategy: Strategy,
    pub weights: ScoringWeights,
}

impl SchedulerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: SchedulerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weights.candidate_pool_size < MIN_CANDIDATE_POOL {
            return Err(ConfigError::Invalid(format!(
                "candidatePoolSize must be at least {}, got {}",
                MIN_CANDIDATE_POOL, self.weights.candidate_pool_size
            )));
        }
        if self.weights.pair_repeat_penalty < 0 || self.weights.previous_round_penalty < 0 {
            return Err(ConfigError::Invalid("penalties must not be negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_canonical_weights() {
        let config = SchedulerConfig::default();
        assert_eq!(config.strategy, Strategy::RestAware);
        assert_eq!(config.weights.pair_repeat_penalty, 100);
        assert_eq!(config.weights.previous_round_penalty, 1000);
        assert_eq!(config.weights.candidate_pool_size, 6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SchedulerConfig =
            serde_json::from_str(r#"{"weights": {"pairRepeatPenalty": 50}}"#).unwrap();
        assert_eq!(config.weights.pair_repeat_penalty, 50);
        assert_eq!(config.weights.previous_round_penalty, 1000);
        assert_eq!(config.strategy, Strategy::RestAware);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scheduler.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"strategy": "pair-balance"}}"#).unwrap();

        let config = SchedulerConfig::load(&path).unwrap();
        assert_eq!(config.strategy, Strategy::PairBalance);
    }

    #[test]
    fn test_rejects_small_candidate_pool() {
        let mut config = SchedulerConfig::default();
        config.weights.candidate_pool_size = 3;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_negative_penalty() {
        let mut config = SchedulerConfig::default();
        config.weights.previous_round_penalty = -1;
        assert!(config.validate().is_err());
    }
}

use thiserror::Error;

/// Failures of a single scheduling call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("not enough players: need at least 4 distinct players, got {found}")]
    NotEnoughPlayers { found: usize },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// A recorded game that cannot be counted towards session statistics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("game {index}: {reason}")]
    InvalidTeams { index: usize, reason: String },

    #[error("game {index}: ties are not supported")]
    Tie { index: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Duplicate player id {id} in roster")]
    DuplicateId { id: u32 },
}

use thiserror::Error;

/// A configuration value that cannot be used.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be a finite, non-negative distance (got {value})")]
    InvalidDistance { field: &'static str, value: f64 },
    #[error("`{field}` must be a finite, positive time (got {value})")]
    InvalidTime { field: &'static str, value: f64 },
    #[error("`clear_threshold` must be at least 1")]
    ZeroThreshold,
    #[error("`{field}` must not be empty")]
    EmptyIdentifier { field: &'static str },
    #[error("malformed configuration: {0}")]
    Parse(String),
}

/// A failure while making a creep decision.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeciderError {
    #[error("failed to create obstacle [{id}] at s = {s}: outside reference line of length {length}")]
    ObstacleCreation { id: String, s: f64, length: f64 },
    #[error("failed to register obstacle [{id}]: an obstacle with that id already exists")]
    ObstacleRegistration { id: String },
    #[error("no obstacle with the given key")]
    UnknownObstacle,
}

use thiserror::Error;

/// Reasons a single planning request cannot be served
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid start time '{0}', expected HH:MM")]
    InvalidStartTime(String),
    #[error("Unknown travel mode '{0}'")]
    UnknownMode(String),
    #[error("A trip needs at least two stops, got {0}")]
    TooFewStops(usize),
    #[error("Cannot resolve stop '{0}'")]
    UnresolvableStop(String),
    #[error("No path found")]
    NoPath,
    #[error("Planning deadline exceeded")]
    DeadlineExceeded,
}

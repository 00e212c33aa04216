//! Engine errors.
//!

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlightError {
    #[error("a flight needs at least one record")]
    EmptyEpisode,
    #[error("csv output error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sink error: {0}")]
    Sink(String),
}

use crate::keypad::{DistanceClass, Key};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PindropError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unrecognized transition {prev} -> {next}: not covered by any distance class")]
    UnrecognizedTransition { prev: Key, next: Key },

    #[error("Class '{class}' has {samples} training sample(s), fewer than the {required} required to score")]
    InsufficientTrainingData {
        class: DistanceClass,
        samples: usize,
        required: usize,
    },

    #[error("Invalid attempt: expected 4 delays, got {0}")]
    InvalidAttemptLength(usize),

    #[error("Invalid attempt: delay #{index} is negative ({delay_ms} ms)")]
    InvalidAttemptDelay { index: usize, delay_ms: i64 },

    #[error("Candidate '{0}' is not in the 0000..9999 PIN space")]
    CandidateNotFound(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type PdResult<T> = Result<T, PindropError>;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KnapsackError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("table of {required} entries exceeds the limit of {limit}")]
    CapacityExceeded { required: usize, limit: usize },

    #[error("parse error on line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("invalid solution: {0}")]
    InvalidSolution(String),
}

pub type Result<T, E = KnapsackError> = std::result::Result<T, E>;

//! Error types shared by both optimizers.
//!
//! [`ConfigError`] covers everything that is rejected before a search loop
//! starts: parameter-domain errors and problem-shape errors. [`InputError`]
//! wraps it for the console entry point, which can also fail on I/O or on
//! unparsable tokens.

use thiserror::Error;

/// Invalid parameters or problem data, detected before any search begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive")]
    NonPositive { name: &'static str },

    #[error("{name} must be in ({min}, {max}), got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{name} has {actual} entries, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{name}[{index}] is not a finite number")]
    NotFinite { name: &'static str, index: usize },

    #[error("objective expects {expected} dimensions, config has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid bounds for {name}: [{lo}, {hi})")]
    InvalidBounds { name: &'static str, lo: f64, hi: f64 },
}

/// Failures while collecting a knapsack instance from a console session.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input ended while waiting for {prompt}")]
    UnexpectedEof { prompt: &'static str },

    #[error("could not parse {field} from {token:?}")]
    Parse { field: &'static str, token: String },

    #[error("validation error: {0}")]
    Config(#[from] ConfigError),
}

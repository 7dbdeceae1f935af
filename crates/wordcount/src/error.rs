use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigurationError;

#[derive(Debug, Error)]
pub enum CountError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("input has {got} tokens but at least {needed} are needed to fill the context window")]
    InputTooShort { needed: usize, got: usize },
    #[error(
        "occurrence count changed during phase `{phase}`: expected {expected}, found {actual} across {entries} entries"
    )]
    InvariantViolation {
        phase: String,
        expected: u64,
        actual: u64,
        entries: usize,
    },
}

/// An empty token reached the counting stage. The occurrence is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenizationAnomaly {
    /// Zero-based position of the offending token in the input.
    pub position: usize,
    /// Concatenated text of the window around it.
    pub window: String,
}

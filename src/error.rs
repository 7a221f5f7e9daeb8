//! Error types for ptcg_deck_stats

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for deck statistics operations.
///
/// Only startup/input problems are errors. Malformed lines inside a deck's
/// print text are skipped by the parser and never surface here.
#[derive(Debug, Error)]
pub enum DeckStatsError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Input was not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Input JSON had the wrong shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// No decks to aggregate
    #[error("Deck sample is empty")]
    EmptySample,
}

impl DeckStatsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeckStatsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for ptcg_deck_stats operations
pub type Result<T> = std::result::Result<T, DeckStatsError>;

//! Error types for the Ultimate Tic-Tac-Toe crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("board size {size} is too small (minimum is 2)")]
    InvalidBoardSize { size: usize },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("player '{name}' is human-controlled and has no move policy")]
    HumanControlled { name: String },

    #[error("legal move from valid_moves() failed unexpectedly: board {board}, tile {tile}")]
    LegalMoveFailed { board: usize, tile: usize },

    #[error("invalid difficulty '{input}'. Expected one of: {expected}")]
    ParseDifficulty { input: String, expected: String },

    #[error("invalid player spec '{input}': {reason}")]
    ParsePlayerSpec { input: String, reason: String },

    #[error("corrupt save data: {reason}")]
    CorruptSave { reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an IO error with context about the operation that failed.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Build a `CorruptSave` error from a reason string.
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptSave {
            reason: reason.into(),
        }
    }
}

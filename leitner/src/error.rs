use thiserror::Error;

/// Stable classification of a [`LeitnerError`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidState,
    EmptyHistory,
    UnknownCard,
    UnorderedHistory,
    InvalidDifficulty,
    Settings,
}

#[derive(Error, Debug)]
pub enum LeitnerError {
    #[error("Invalid bucket state: {0}")]
    InvalidState(String),

    #[error("History cannot be empty")]
    EmptyHistory,

    #[error("Card in history does not exist in buckets: {prompt}")]
    UnknownCard { prompt: String },

    #[error("History must be ordered by date (entry {index} is out of order)")]
    UnorderedHistory { index: usize },

    #[error("Invalid difficulty value: {0}")]
    InvalidDifficulty(u8),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LeitnerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeitnerError::InvalidState(_) => ErrorKind::InvalidState,
            LeitnerError::EmptyHistory => ErrorKind::EmptyHistory,
            LeitnerError::UnknownCard { .. } => ErrorKind::UnknownCard,
            LeitnerError::UnorderedHistory { .. } => ErrorKind::UnorderedHistory,
            LeitnerError::InvalidDifficulty(_) => ErrorKind::InvalidDifficulty,
            LeitnerError::Io(_) | LeitnerError::Json(_) => ErrorKind::Settings,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeitnerError>;

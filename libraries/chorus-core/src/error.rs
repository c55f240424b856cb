/// Core error types for Chorus
use crate::types::{PlaylistId, SongId, UserId};
use thiserror::Error;

/// Result type alias using `ChorusError`
pub type Result<T> = std::result::Result<T, ChorusError>;

/// Core error type for Chorus
#[derive(Error, Debug)]
pub enum ChorusError {
    /// Referenced playlist does not exist
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Referenced song is not in the catalog
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Referenced user does not exist
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Acting user may not access the playlist
    #[error("Access denied to playlist {0}")]
    AccessDenied(PlaylistId),

    /// A write that should have produced a row or id produced none
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

/// Payload-free classification of a [`ChorusError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    InvariantViolation,
    InvalidInput,
    Fault,
}

impl ChorusError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invariant violation
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PlaylistNotFound(_) | Self::SongNotFound(_) | Self::UserNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::AccessDenied(_) => ErrorKind::AccessDenied,
            Self::InvariantViolation(_) => ErrorKind::InvariantViolation,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Storage(_) | Self::Database(_) => ErrorKind::Fault,
        }
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ChorusError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

//! Error types shared by every core operation.
//!
//! All operations validate before mutating, so an `Err` return always means
//! the in-memory collections are unchanged. The one exception is a failed
//! save: the in-memory state keeps the edit and the caller must treat disk
//! and memory as diverged until the next successful write.

use thiserror::Error;

/// Failure kinds surfaced by the core.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad, empty, duplicate, or out-of-range input.
    #[error("{0}")]
    Validation(String),

    /// The operation targeted a title or name that does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Attempt to rename or delete a protected registry value.
    #[error("'{0}' is protected and cannot be renamed or deleted")]
    Protected(String),

    /// Persistence read/write failure.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A collection file exists but does not parse.
    #[error("malformed collection file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a [`Error::Validation`] with a formatted message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

//! Error types for gemipy

use thiserror::Error;

/// The main error type for gemipy operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Read or write failure on a persisted document
    #[error("Storage error: {0}")]
    Storage(String),

    /// A configuration key outside the recognized set
    #[error("Invalid key: {0}")]
    UnknownConfigKey(String),

    /// A raw value that cannot be coerced or fails validation
    #[error("Invalid value for {key}: {value} ({reason})")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: String,
    },

    /// A conversation id that is not a number
    #[error("Invalid conversation id: {0}")]
    InvalidConversationId(String),

    /// No archived conversation carries this id
    #[error("Conversation {0} not found")]
    ConversationNotFound(u64),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A specialized Result type for gemipy operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

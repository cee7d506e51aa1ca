//! Error types for CostAlert

use thiserror::Error;

/// Result type alias using CostAlert's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors: loading input or reading settings
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Layered settings could not be built or deserialized
    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// A malformed cost entry. Recoverable: the entry is skipped and the
/// evaluation carries on with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordError {
    /// A key on the path to the amount or the start date is absent
    #[error("Error processing data: Missing key '{key}'")]
    MissingField {
        /// Position of the entry in `ResultsByTime`
        index: usize,
        /// The first absent key
        key: &'static str,
    },

    /// The amount is present but is not a number
    #[error("Error converting cost: could not convert string to float: '{value}'")]
    InvalidNumber {
        /// Position of the entry in `ResultsByTime`
        index: usize,
        /// The amount text as it appeared in the input
        value: String,
    },

    /// A key holds a value of the wrong shape (e.g. `"Total": "12.00"`)
    #[error("Error processing data: Unexpected value for key '{key}': {found}")]
    WrongType {
        /// Position of the entry in `ResultsByTime`
        index: usize,
        /// The offending key
        key: &'static str,
        /// The value found, as JSON text
        found: String,
    },
}

impl RecordError {
    /// Create a missing field error
    pub fn missing(index: usize, key: &'static str) -> Self {
        Self::MissingField { index, key }
    }

    /// Create an invalid number error
    pub fn invalid_number(index: usize, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            index,
            value: value.into(),
        }
    }

    /// Create a wrong type error
    pub fn wrong_type(index: usize, key: &'static str, found: &serde_json::Value) -> Self {
        Self::WrongType {
            index,
            key,
            found: found.to_string(),
        }
    }

    /// Position of the offending entry
    pub fn index(&self) -> usize {
        match self {
            Self::MissingField { index, .. }
            | Self::InvalidNumber { index, .. }
            | Self::WrongType { index, .. } => *index,
        }
    }
}

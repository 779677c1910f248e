//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main cleanframe error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Configuration-related errors (bad strategy parameters, invalid
    /// generator selector, malformed config file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The named column does not exist in the table
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A string could not be parsed back into its recorded type
    #[error("Type conversion error: {0}")]
    TypeConversion(String),

    /// Authentication or key mismatch during decryption
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// An external generator or detection engine failed on a specific row
    #[error("Delegate error in column '{column}' at row {row}: {message}")]
    Delegate {
        column: String,
        row: usize,
        message: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for CleanError {
    fn from(err: std::io::Error) -> Self {
        CleanError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CleanError {
    fn from(err: serde_json::Error) -> Self {
        CleanError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CleanError {
    fn from(err: toml::de::Error) -> Self {
        CleanError::Configuration(format!("TOML parse error: {err}"))
    }
}

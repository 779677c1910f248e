//! Result type alias for cleanframe operations

use crate::domain::CleanError;

/// Standard result type used throughout the library
pub type Result<T> = std::result::Result<T, CleanError>;

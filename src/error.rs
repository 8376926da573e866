//! Error types for the habit coach

use thiserror::Error;

/// Result type alias for coach operations
pub type Result<T> = std::result::Result<T, CoachError>;

#[derive(Error, Debug)]
pub enum CoachError {

    // =============================
    // Core Errors
    // =============================

    /// Out-of-order or contradictory streak update. Fatal to that single
    /// update; the streak is returned untouched.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Text generator error: {0}")]
    Generator(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

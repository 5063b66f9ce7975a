//! Error types for the planner
//!
//! The calculator itself never fails: malformed numbers are coerced.
//! These errors cover the edges around it (names, config files, I/O).

use thiserror::Error;

/// Result type for planner operations
pub type VuplanResult<T> = Result<T, VuplanError>;

/// Errors that can occur outside the pure calculation
#[derive(Debug, Error)]
pub enum VuplanError {
    /// Scenario name not recognised
    #[error("Unknown scenario: {name} (expected smoke, load, stress or spike)")]
    UnknownScenario {
        /// The name that was given
        name: String,
    },

    /// Time unit name not recognised
    #[error("Unknown time unit: {name} (expected second, hour or day)")]
    UnknownTimeUnit {
        /// The name that was given
        name: String,
    },

    /// Plan configuration could not be parsed
    #[error("Invalid plan configuration: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VuplanError {
    /// Create an unknown scenario error
    #[must_use]
    pub fn unknown_scenario(name: impl Into<String>) -> Self {
        Self::UnknownScenario { name: name.into() }
    }

    /// Create an unknown time unit error
    #[must_use]
    pub fn unknown_time_unit(name: impl Into<String>) -> Self {
        Self::UnknownTimeUnit { name: name.into() }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

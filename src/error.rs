//! Error types for schemagen.

use thiserror::Error;

/// The main error type for schemagen operations.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The migration name did not resolve to create, add or remove.
    ///
    /// Carries the verb that was found so callers can report it.
    #[error("Could not determine what you are trying to do. Sorry! Check your migration name.")]
    UnknownIntent(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeneratorError {
    /// Create an unknown-intent error for the given verb.
    pub fn unknown_intent(verb: impl Into<String>) -> Self {
        Self::UnknownIntent(verb.into())
    }
}

/// Result type alias for schemagen operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

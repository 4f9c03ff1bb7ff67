//! Pagination error types

use thiserror::Error;

/// Errors raised while loading or validating pagination settings.
///
/// The trigger engine and the fetch state machine never fail; only
/// configuration input can be rejected.
#[derive(Error, Debug)]
pub enum PaginationError {
    /// Configuration could not be parsed
    #[error("Invalid pagination config: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize pagination config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Leading screens must be finite and non-negative
    #[error("Leading screens must be a finite, non-negative number (got {0})")]
    InvalidLeadingScreens(f32),

    /// Unrecognized scroll direction name
    #[error("Unknown scroll direction: {0}")]
    UnknownDirection(String),
}

/// Result type for pagination operations
pub type Result<T> = std::result::Result<T, PaginationError>;

//! Error types for the candidate-admin crate.
//!
//! This module defines the crate-level error type [`AdminError`] and a type alias
//! [`Result`]. Remote failures do not flow through this type: operation wrappers
//! reduce them to a message string (see [`crate::operations::OperationError`]).
//! `AdminError` covers everything around them: configuration, local I/O, payload
//! parsing, and invalid values supplied by the view layer.

use thiserror::Error;

/// The main error type for candidate-admin operations outside the remote call path.
///
/// Most variants wrap underlying errors from external crates using `#[from]`
/// for automatic conversion.
///
/// # Examples
///
/// ```
/// use candidate_admin::AdminError;
///
/// fn validate_base_url(url: &str) -> Result<(), AdminError> {
///     if url.is_empty() {
///         return Err(AdminError::Config("api_base_url must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_base_url("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file cannot be parsed or a required value
    /// is malformed. The string describes the specific problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON payload could not be parsed or produced.
    ///
    /// Raised when reading create/update payload files or serializing
    /// request messages.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A value supplied by the caller is outside its allowed set.
    ///
    /// Used for enumerations parsed from text, such as an application status.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// The HTTP client could not be constructed.
    #[error("Client error: {0}")]
    Client(String),
}

/// A specialized `Result` type for candidate-admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;

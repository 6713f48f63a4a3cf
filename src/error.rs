//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use ometria_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building or validating client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Ometria API key.")]
    EmptyApiKey,

    /// API secret cannot be empty.
    #[error("API secret cannot be empty. Please provide a valid Ometria API secret.")]
    EmptyApiSecret,

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected a numeric version such as '1'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Base URL override is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with a scheme (e.g. 'https://api.ometria.com/v1/').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

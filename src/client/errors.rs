//! Error types for Ometria API requests.
//!
//! # Error Handling
//!
//! Every request returns `Result<ApiResponse, ApiError>`. Failures are never
//! retried at this level; they propagate directly to the caller:
//!
//! - [`ApiError::Server`]: the API answered with a 5xx status
//! - [`ApiError::Client`]: the API answered with a 3xx/4xx status
//! - [`ApiError::Network`]: the request never produced a usable response
//! - [`ApiError::InvalidJson`]: a body that was expected to be JSON was not
//!
//! # Example
//!
//! ```rust,ignore
//! use ometria_api::ApiError;
//!
//! match client.resource("products").get(None, None).await {
//!     Ok(response) => println!("Products: {}", response.data),
//!     Err(ApiError::Client { status, message }) => {
//!         println!("API rejected the request ({status}): {message}");
//!     }
//!     Err(ApiError::Server { status, message }) => {
//!         println!("API failure ({status}): {message}");
//!     }
//!     Err(other) => println!("Transport failure: {other}"),
//! }
//! ```

use thiserror::Error;

/// Errors returned by [`Resource`](crate::Resource) request methods.
///
/// # Error-body asymmetry
///
/// A 5xx response keeps its body as **raw text** in [`ApiError::Server`],
/// while a 3xx/4xx response is assumed to carry a JSON error document and
/// is parsed into [`ApiError::Client`]. A client-error response whose body
/// is not valid JSON therefore surfaces as [`ApiError::InvalidJson`]. This
/// asymmetry is documented behavior of the Ometria API wrapper, not an
/// accident of this implementation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API responded with a status of 500 or above.
    ///
    /// Server error bodies are frequently not JSON (gateway pages, plain
    /// text), so the message is the raw response body.
    #[error("server error (status {status}): {message}")]
    Server {
        /// The HTTP status code of the response.
        status: u16,
        /// The raw response body text.
        message: String,
    },

    /// The API responded with a status in the 300..=499 range.
    ///
    /// These indicate a mistake by the caller (unknown resource, invalid
    /// payload, bad credentials). The message is the JSON document the API
    /// returned describing the error.
    #[error("client error (status {status}): {message}")]
    Client {
        /// The HTTP status code of the response.
        status: u16,
        /// The parsed JSON error body.
        message: serde_json::Value,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body expected to be JSON could not be parsed.
    #[error("invalid JSON in response body: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns the HTTP status code, if this error carries one.
    ///
    /// [`ApiError::Network`] and [`ApiError::InvalidJson`] return `None`.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::Client { status, .. } => Some(*status),
            Self::Network(_) | Self::InvalidJson(_) => None,
        }
    }
}

//! Configuration types for the Ometria API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`OmetriaConfig`]: The configuration struct holding API credentials and version
//! - [`OmetriaConfigBuilder`]: A builder for constructing [`OmetriaConfig`] instances
//! - [`ApiKey`]: A validated API key newtype
//! - [`ApiSecret`]: A validated API secret newtype with masked debug output
//! - [`ApiVersion`]: The Ometria API version to use
//!
//! # Example
//!
//! ```rust
//! use ometria_api::{OmetriaConfig, ApiKey, ApiSecret, ApiVersion};
//!
//! let config = OmetriaConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_secret(ApiSecret::new("my-secret").unwrap())
//!     .api_version(ApiVersion::default())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api.ometria.com/v1/");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ApiSecret, ApiVersion};

use crate::error::ConfigError;

/// Configuration for the Ometria API client.
///
/// Holds the API credentials, the API version, and an optional base URL
/// override. The effective base URL is derived from the version unless an
/// override is supplied.
///
/// # Thread Safety
///
/// `OmetriaConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use ometria_api::{OmetriaConfig, ApiKey, ApiSecret};
///
/// let config = OmetriaConfig::builder()
///     .api_key(ApiKey::new("my-api-key").unwrap())
///     .api_secret(ApiSecret::new("my-secret").unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct OmetriaConfig {
    api_key: ApiKey,
    api_secret: ApiSecret,
    api_version: ApiVersion,
    base_url: Option<String>,
}

impl OmetriaConfig {
    /// Creates a new builder for constructing an `OmetriaConfig`.
    #[must_use]
    pub fn builder() -> OmetriaConfigBuilder {
        OmetriaConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API secret.
    #[must_use]
    pub const fn api_secret(&self) -> &ApiSecret {
        &self.api_secret
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the effective base URL, always ending in a trailing slash.
    ///
    /// This is the override if one was configured, otherwise
    /// `https://api.ometria.com/v{version}/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            format!("https://api.ometria.com/v{}/", self.api_version)
        })
    }
}

// Verify OmetriaConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OmetriaConfig>();
};

/// Builder for constructing [`OmetriaConfig`] instances.
///
/// Required fields are `api_key` and `api_secret`. All other fields have
/// sensible defaults.
///
/// # Defaults
///
/// - `api_version`: version `1`
/// - `base_url`: derived from the API version
///
/// # Example
///
/// ```rust
/// use ometria_api::{OmetriaConfig, ApiKey, ApiSecret, ApiVersion};
///
/// let config = OmetriaConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .api_version(ApiVersion::new("2").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url(), "https://api.ometria.com/v2/");
/// ```
#[derive(Debug, Default)]
pub struct OmetriaConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret: Option<ApiSecret>,
    api_version: Option<ApiVersion>,
    base_url: Option<String>,
}

impl OmetriaConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the API secret (required).
    #[must_use]
    pub fn api_secret(mut self, api_secret: ApiSecret) -> Self {
        self.api_secret = Some(api_secret);
        self
    }

    /// Sets the API version. Defaults to version `1`.
    #[must_use]
    pub fn api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = Some(api_version);
        self
    }

    /// Overrides the base URL for all requests.
    ///
    /// Intended for tests and proxy setups. A trailing slash is appended if
    /// missing, so resource paths concatenate cleanly.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the [`OmetriaConfig`], validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `api_secret` is not set, or [`ConfigError::InvalidBaseUrl`] if a
    /// base URL override has no scheme.
    pub fn build(self) -> Result<OmetriaConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret = self
            .api_secret
            .ok_or(ConfigError::MissingRequiredField { field: "api_secret" })?;

        let base_url = self.base_url.map(normalize_base_url).transpose()?;

        Ok(OmetriaConfig {
            api_key,
            api_secret,
            api_version: self.api_version.unwrap_or_default(),
            base_url,
        })
    }
}

/// Validates a base URL override and guarantees a trailing slash.
fn normalize_base_url(url: String) -> Result<String, ConfigError> {
    let url = url.trim().to_string();

    let scheme_end = url
        .find("://")
        .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

    let scheme = &url[..scheme_end];
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidBaseUrl { url });
    }

    if scheme_end + 3 >= url.len() {
        return Err(ConfigError::InvalidBaseUrl { url });
    }

    if url.ends_with('/') {
        Ok(url)
    } else {
        Ok(format!("{url}/"))
    }
}

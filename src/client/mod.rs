//! The Ometria API client and its supporting types.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Client`]: the composition root holding credentials, the HTTP
//!   transport, and the memoized resource cache
//! - [`Resource`]: a fluent handle to one REST resource path
//! - [`ApiResponse`]: a successful response with its parsed JSON body
//! - [`ApiError`]: typed failures (server error, client error, transport)
//! - [`HttpMethod`] / [`Params`]: request building blocks
//! - [`signing`]: the HMAC signature scheme
//!
//! # Example
//!
//! ```rust,ignore
//! use ometria_api::{Client, OmetriaConfig, ApiKey, ApiSecret};
//!
//! let config = OmetriaConfig::builder()
//!     .api_key(ApiKey::new("key").unwrap())
//!     .api_secret(ApiSecret::new("secret").unwrap())
//!     .build()?;
//! let client = Client::new(config);
//!
//! // GET https://api.ometria.com/v1/customers/1234/orders?nonce=<ts>
//! let response = client.resource("customers").id(1234).child("orders")
//!     .get(None, None)
//!     .await?;
//! println!("{}", response.data);
//! ```

mod errors;
mod request;
mod resource;
mod response;
pub mod signing;

pub use errors::ApiError;
pub use request::{HttpMethod, Params};
pub use resource::Resource;
pub use response::ApiResponse;

use resource::ResourceNode;

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use crate::config::{ApiKey, ApiSecret, OmetriaConfig};

/// The Ometria API client.
///
/// Holds the API credentials, the effective base URL, a shared HTTP
/// transport, and the per-client resource cache. The client is the root of
/// all path building: [`Client::resource`] yields memoized top-level
/// [`Resource`] handles.
///
/// # Thread Safety
///
/// `Client` is `Send + Sync` and cheap to clone; clones share the transport,
/// the resource cache, and the nonce source. The cache is guarded by a
/// mutex, so concurrent use from multiple tasks is safe.
///
/// # Example
///
/// ```rust
/// use ometria_api::{Client, OmetriaConfig, ApiKey, ApiSecret};
///
/// let config = OmetriaConfig::builder()
///     .api_key(ApiKey::new("my-api-key").unwrap())
///     .api_secret(ApiSecret::new("my-secret").unwrap())
///     .build()
///     .unwrap();
///
/// let client = Client::new(config);
/// assert_eq!(client.base_url(), "https://api.ometria.com/v1/");
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

/// State shared by a client and every resource handle it creates.
pub(crate) struct ClientInner {
    pub(crate) key: ApiKey,
    pub(crate) secret: ApiSecret,
    pub(crate) base_url: String,
    pub(crate) http: reqwest::Client,
    /// Last issued nonce; guarantees strict monotonicity within a client.
    last_nonce: AtomicI64,
    /// Memoized resource nodes, keyed by exact path string.
    ///
    /// Nodes hold no reference back to `ClientInner`, so the cache does not
    /// keep the client alive once every handle is dropped.
    resources: Mutex<HashMap<String, Arc<ResourceNode>>>,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a new client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g. TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: OmetriaConfig) -> Self {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ClientInner {
                key: config.api_key().clone(),
                secret: config.api_secret().clone(),
                base_url: config.base_url(),
                http,
                last_nonce: AtomicI64::new(0),
                resources: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Returns the top-level resource with the given name.
    ///
    /// The node is rooted at the empty path, so its path equals `name`.
    /// Repeated calls with the same name return the same cached node.
    ///
    /// ```rust
    /// # use ometria_api::{Client, OmetriaConfig, ApiKey, ApiSecret};
    /// # let config = OmetriaConfig::builder()
    /// #     .api_key(ApiKey::new("k").unwrap())
    /// #     .api_secret(ApiSecret::new("s").unwrap())
    /// #     .build()
    /// #     .unwrap();
    /// # let client = Client::new(config);
    /// let products = client.resource("products");
    /// assert_eq!(products.path(), "products");
    /// ```
    #[must_use]
    pub fn resource(&self, name: impl AsRef<str>) -> Resource {
        ClientInner::node(&self.inner, name.as_ref().to_string())
    }

    /// Returns the effective base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &ApiKey {
        &self.inner.key
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("api_key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

impl ClientInner {
    /// Returns the cached node for `path`, creating and registering it on
    /// first access.
    pub(crate) fn node(inner: &Arc<Self>, path: String) -> Resource {
        let node = {
            let mut cache = inner
                .resources
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cache.entry(path).or_insert_with_key(|path| {
                Arc::new(ResourceNode { path: path.clone() })
            }))
        };
        Resource::from_node(Arc::clone(inner), node)
    }

    /// Issues the next nonce: current milliseconds since the Unix epoch,
    /// bumped past the previously issued value so nonces are strictly
    /// increasing even when two requests land in the same millisecond.
    pub(crate) fn next_nonce(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let prev = self
            .last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(now.max(prev + 1))
            })
            .unwrap_or_else(|prev| prev);
        now.max(prev + 1)
    }
}

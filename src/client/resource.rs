//! REST resource handles.
//!
//! A [`Resource`] names one slash-separated path below the API base URL
//! (e.g. `customers/1234/orders`). Handles are built fluently from a
//! [`Client`](crate::Client) and are memoized per client instance: asking
//! for the same path twice returns the same underlying node.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::client::errors::ApiError;
use crate::client::request::{HttpMethod, Params, SignedRequest};
use crate::client::response::ApiResponse;
use crate::client::ClientInner;

/// A handle to one REST resource path.
///
/// Cloning a `Resource` is cheap and preserves node identity; clones of the
/// same cached node compare equal under [`Resource::same_node`].
///
/// # Path building
///
/// ```rust
/// use ometria_api::{Client, OmetriaConfig, ApiKey, ApiSecret};
///
/// let config = OmetriaConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .build()
///     .unwrap();
/// let client = Client::new(config);
///
/// // customers/1234/orders
/// let orders = client.resource("customers").id(1234).child("orders");
/// assert_eq!(orders.path(), "customers/1234/orders");
/// ```
///
/// # Requests
///
/// ```rust,ignore
/// // GET /products?offset=10&limit=10&nonce=<ts>
/// let mut params = ometria_api::Params::new();
/// params.insert("offset".to_string(), "10".to_string());
/// params.insert("limit".to_string(), "10".to_string());
/// let response = client.resource("products").get(Some(params), None).await?;
/// ```
#[derive(Clone)]
pub struct Resource {
    client: Arc<ClientInner>,
    node: Arc<ResourceNode>,
}

/// The shared, cached state of one resource path.
///
/// Nodes are what the client cache holds. They carry no back-reference to
/// the client, so dropping every `Client` and `Resource` handle frees the
/// client state even though the cache is reachable from each handle.
#[derive(Debug)]
pub(crate) struct ResourceNode {
    pub(crate) path: String,
}

impl Resource {
    pub(crate) fn from_node(client: Arc<ClientInner>, node: Arc<ResourceNode>) -> Self {
        Self { client, node }
    }

    /// Returns the resource path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.node.path
    }

    /// Returns a child resource whose path is `{self}/{name}`.
    ///
    /// Segment names are not validated: any name becomes a path segment,
    /// including reserved-looking ones such as `_bulk`. Malformed segments
    /// are the caller's responsibility. Differently-cased names produce
    /// distinct nodes.
    #[must_use]
    pub fn child(&self, name: impl AsRef<str>) -> Self {
        ClientInner::node(&self.client, format!("{}/{}", self.node.path, name.as_ref()))
    }

    /// Captures a resource identifier, appending it as a path segment.
    ///
    /// The identifier is stringified via [`fmt::Display`], so numeric and
    /// string identifiers both work:
    ///
    /// ```rust,ignore
    /// client.resource("products").id(1234)           // products/1234
    /// client.resource("products").id("blue-tshirt")  // products/blue-tshirt
    /// ```
    #[must_use]
    pub fn id<T: fmt::Display>(&self, id: T) -> Self {
        ClientInner::node(&self.client, format!("{}/{id}", self.node.path))
    }

    /// Captures an optional resource identifier.
    ///
    /// `maybe_id(Some(v))` behaves like [`id`](Self::id); `maybe_id(None)`
    /// is a no-op returning this node unchanged. Useful when an identifier
    /// is threaded through as an `Option`.
    ///
    /// ```rust,ignore
    /// client.resource("products").maybe_id(Some(1234))  // products/1234
    /// client.resource("products").maybe_id(None::<u64>) // products
    /// ```
    #[must_use]
    pub fn maybe_id<T: fmt::Display>(&self, id: Option<T>) -> Self {
        match id {
            None => self.clone(),
            Some(id) => self.id(id),
        }
    }

    /// Returns `true` if `self` and `other` are the same cached node.
    ///
    /// This is reference identity, the memoization invariant: within one
    /// client, every access to a given path string yields the same node.
    #[must_use]
    pub fn same_node(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Sends a GET request for this resource.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn get(
        &self,
        params: Option<Params>,
        data: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(HttpMethod::Get, params, data).await
    }

    /// Sends a PUT request for this resource.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn put(
        &self,
        params: Option<Params>,
        data: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(HttpMethod::Put, params, data).await
    }

    /// Sends a POST request for this resource.
    ///
    /// `data` may be a JSON array for bulk endpoints such as
    /// `products/_bulk`.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn post(
        &self,
        params: Option<Params>,
        data: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(HttpMethod::Post, params, data).await
    }

    /// Signs and dispatches a request for this resource.
    ///
    /// A fresh nonce is injected into `params`, the URL and JSON body are
    /// signed with the client secret, and the request is sent with the
    /// `Auth-Signature` and `Auth-API-Key` headers attached. The call is
    /// awaited to completion; there are no retries and no timeout beyond
    /// the transport defaults.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Server`] for responses with status >= 500 (raw body)
    /// - [`ApiError::Client`] for responses with status 300..=499 (JSON body)
    /// - [`ApiError::Network`] for transport failures
    /// - [`ApiError::InvalidJson`] when a body expected to be JSON is not
    pub async fn send(
        &self,
        method: HttpMethod,
        params: Option<Params>,
        data: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = SignedRequest::build(
            &self.client.base_url,
            self.client.secret.as_ref(),
            method,
            &self.node.path,
            params.unwrap_or_default(),
            data.as_ref(),
            self.client.next_nonce(),
        )?;

        tracing::debug!(method = %request.method, url = %request.url, "dispatching signed request");

        let builder = match request.method {
            HttpMethod::Get => self.client.http.get(&request.url),
            HttpMethod::Put => self.client.http.put(&request.url),
            HttpMethod::Post => self.client.http.post(&request.url),
        };

        let response = builder
            .header("Auth-Signature", &request.signature)
            .header("Auth-API-Key", self.client.key.as_ref())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .body(request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = parse_response_headers(response.headers());
        let body_text = response.text().await?;

        if status >= 500 {
            tracing::warn!(status, path = %self.node.path, "server error response");
            return Err(ApiError::Server {
                status,
                message: body_text,
            });
        }

        if status >= 300 {
            tracing::warn!(status, path = %self.node.path, "client error response");
            // Client errors are assumed to carry a JSON document; a non-JSON
            // body surfaces as InvalidJson (see the ApiError docs).
            let message: Value = serde_json::from_str(&body_text)?;
            return Err(ApiError::Client { status, message });
        }

        let data = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text)?
        };

        Ok(ApiResponse::new(status, headers, data))
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.node.path)
            .finish()
    }
}

/// Flattens reqwest's header map into lowercased, multi-valued entries.
fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

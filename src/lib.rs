//! # Ometria API Client
//!
//! A Rust client for the [Ometria](https://ometria.com) REST API, providing
//! fluent resource-path building and HMAC-signed request dispatch.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`OmetriaConfig`] and [`OmetriaConfigBuilder`]
//! - Validated newtypes for API credentials ([`ApiKey`], [`ApiSecret`])
//! - A memoized, fluent resource-path builder ([`Client::resource`], [`Resource`])
//! - HMAC-SHA256 request signing with per-request nonces ([`client::signing`])
//! - Typed error classification for server and client failures ([`ApiError`])
//!
//! ## Quick Start
//!
//! ```rust
//! use ometria_api::{Client, OmetriaConfig, ApiKey, ApiSecret};
//!
//! let config = OmetriaConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_secret(ApiSecret::new("your-api-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = Client::new(config);
//! let orders = client.resource("customers").id(1234).child("orders");
//! assert_eq!(orders.path(), "customers/1234/orders");
//! ```
//!
//! ## Making API Requests
//!
//! Each resource handle exposes `get`, `put`, and `post`, all of which take
//! optional query parameters and an optional JSON body:
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! // GET /products?offset=10&limit=10
//! let mut params = ometria_api::Params::new();
//! params.insert("offset".to_string(), "10".to_string());
//! params.insert("limit".to_string(), "10".to_string());
//! let products = client.resource("products").get(Some(params), None).await?;
//!
//! // PUT /products/1234
//! client.resource("products").id(1234)
//!     .put(None, Some(json!({"title": "T-shirt", "price": 5.99})))
//!     .await?;
//!
//! // POST /products/_bulk with a list payload
//! client.resource("products").child("_bulk")
//!     .post(None, Some(json!([{"id": "a"}, {"id": "b"}])))
//!     .await?;
//! ```
//!
//! ## Request Signing
//!
//! Every request carries a `nonce` query parameter (milliseconds since the
//! Unix epoch, strictly increasing per client) and an `Auth-Signature`
//! header: the base64 encoding of the hex HMAC-SHA256 digest of
//! `url + body`, keyed by the API secret. The API key travels in the
//! `Auth-API-Key` header. See [`client::signing`] for the exact scheme.
//!
//! ## Error Handling
//!
//! Responses with status >= 500 fail with [`ApiError::Server`] carrying the
//! raw body text; statuses 300..=499 fail with [`ApiError::Client`] carrying
//! the parsed JSON error document. Transport failures and malformed JSON
//! propagate as [`ApiError::Network`] and [`ApiError::InvalidJson`]. No
//! failure is retried.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: credential newtypes validate on construction
//! - **Thread-safe**: [`Client`] is `Send + Sync`; the resource cache is mutex-guarded
//! - **Async-first**: designed for use with the Tokio runtime; one awaited
//!   call per request, no retries, no added concurrency

pub mod client;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use client::{ApiError, ApiResponse, Client, HttpMethod, Params, Resource};
pub use config::{ApiKey, ApiSecret, ApiVersion, OmetriaConfig, OmetriaConfigBuilder};
pub use error::ConfigError;

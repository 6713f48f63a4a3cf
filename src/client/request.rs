//! Signed request construction.
//!
//! This module turns a resource path, query parameters, and an optional JSON
//! payload into a [`SignedRequest`]: the exact URL, body, and signature that
//! go on the wire. Construction is a pure function of its inputs — the nonce
//! is passed in explicitly — so signatures are deterministic and testable.

use std::collections::BTreeMap;
use std::fmt;

use crate::client::errors::ApiError;
use crate::client::signing;

/// HTTP methods exposed by the Ometria API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP POST method for creating resources.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Put => write!(f, "put"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// Query parameters for a request.
///
/// A `BTreeMap` so the encoded query string — and therefore the signature —
/// is deterministic for a given set of parameters. The server verifies the
/// signature against the URL exactly as sent, so the specific ordering is
/// the client's to choose.
pub type Params = BTreeMap<String, String>;

/// Percent-encodes `params` into a `key=value&key=value` query string.
pub(crate) fn encode_query(params: &Params) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// An ephemeral, fully signed request — built per call, discarded after dispatch.
#[derive(Clone, Debug)]
pub(crate) struct SignedRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The full request URL, query string (with nonce) included.
    pub url: String,
    /// The JSON-serialized body (`{}` when the request carries no data).
    pub body: String,
    /// The `Auth-Signature` header value.
    pub signature: String,
}

impl SignedRequest {
    /// Builds a signed request for `path` relative to `base_url`.
    ///
    /// The nonce is inserted into `params` before encoding, the URL and body
    /// are concatenated without a separator, and the result is signed with
    /// `secret`. `data` may be any JSON value — objects for ordinary
    /// endpoints, arrays for bulk endpoints.
    pub(crate) fn build(
        base_url: &str,
        secret: &str,
        method: HttpMethod,
        path: &str,
        mut params: Params,
        data: Option<&serde_json::Value>,
        nonce: i64,
    ) -> Result<Self, ApiError> {
        params.insert("nonce".to_string(), nonce.to_string());

        let url = format!("{base_url}{path}?{}", encode_query(&params));
        let body = match data {
            Some(value) => serde_json::to_string(value)?,
            None => "{}".to_string(),
        };
        let signature = signing::compute_signature(&signing::signing_message(&url, &body), secret);

        Ok(Self {
            method,
            url,
            body,
            signature,
        })
    }
}

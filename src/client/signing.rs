//! HMAC request signing for the Ometria API.
//!
//! Every outbound request carries an `Auth-Signature` header computed from
//! the full request URL and the JSON body. The scheme is HMAC-SHA256 keyed
//! by the API secret, hex-digested, then base64-encoded — the layering the
//! Ometria servers verify, so it must be reproduced exactly.
//!
//! # Wire contract
//!
//! The signed message is `url + body` with **no separator** between them.
//! The URL already contains the query string (including the per-request
//! nonce), and the body is the JSON-serialized payload (`{}` when the
//! request has no data).
//!
//! # Example
//!
//! ```rust
//! use ometria_api::client::signing::{compute_signature, signing_message};
//!
//! let message = signing_message("https://api.ometria.com/v1/products?nonce=1", "{}");
//! let signature = compute_signature(&message, "my-secret");
//! assert_eq!(signature.len(), 88); // base64 of a 64-char hex digest
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Builds the message to be signed for a request.
///
/// Concatenates the full request URL (query string included) and the
/// serialized JSON body with no separator. The ordering and the absence of
/// a separator are part of the wire contract.
#[must_use]
pub fn signing_message(url: &str, body: &str) -> String {
    format!("{url}{body}")
}

/// Computes the `Auth-Signature` value for the given message.
///
/// The message is HMAC-SHA256 signed with `secret`, the digest rendered as
/// lowercase hex, and the hex string base64-encoded (RFC 4648 standard
/// alphabet). Signing the hex rendering rather than the raw digest bytes is
/// deliberate: it matches what the Ometria servers expect.
///
/// # Example
///
/// ```rust
/// use ometria_api::client::signing::compute_signature;
///
/// let a = compute_signature("message", "secret");
/// let b = compute_signature("message", "secret");
/// assert_eq!(a, b); // deterministic for fixed inputs
/// ```
#[must_use]
pub fn compute_signature(message: &str, secret: &str) -> String {
    STANDARD.encode(hex_digest(message, secret).as_bytes())
}

/// Computes the lowercase hex HMAC-SHA256 digest of `message` keyed by `secret`.
fn hex_digest(message: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

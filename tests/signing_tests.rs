//! Integration tests for the request-signing scheme.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ometria_api::client::signing::{compute_signature, signing_message};

#[test]
fn test_signature_is_base64_of_hex_hmac_digest() {
    // Known HMAC-SHA256 test vector:
    // HMAC-SHA256("message", "key") = 6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a
    let signature = compute_signature("message", "key");

    let decoded = STANDARD.decode(&signature).unwrap();
    assert_eq!(
        String::from_utf8(decoded).unwrap(),
        "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
    );
}

#[test]
fn test_signature_has_fixed_length() {
    // 32-byte digest -> 64 hex chars -> 88 base64 chars
    assert_eq!(compute_signature("any message", "any secret").len(), 88);
}

#[test]
fn test_signature_is_deterministic_for_fixed_inputs() {
    let url = "https://api.ometria.com/v1/products?limit=10&nonce=1234";
    let body = r#"{"title":"T-shirt"}"#;

    let first = compute_signature(&signing_message(url, body), "secret");
    let second = compute_signature(&signing_message(url, body), "secret");
    assert_eq!(first, second);
}

#[test]
fn test_signature_changes_when_any_input_changes() {
    let url = "https://api.ometria.com/v1/products?nonce=1234";
    let body = "{}";
    let base = compute_signature(&signing_message(url, body), "secret");

    let other_url = "https://api.ometria.com/v1/customers?nonce=1234";
    assert_ne!(base, compute_signature(&signing_message(other_url, body), "secret"));

    let other_body = r#"{"a":1}"#;
    assert_ne!(base, compute_signature(&signing_message(url, other_body), "secret"));

    assert_ne!(base, compute_signature(&signing_message(url, body), "other-secret"));
}

#[test]
fn test_signing_message_concatenates_without_separator() {
    assert_eq!(
        signing_message("https://api.ometria.com/v1/products?nonce=1", "{}"),
        "https://api.ometria.com/v1/products?nonce=1{}"
    );
}

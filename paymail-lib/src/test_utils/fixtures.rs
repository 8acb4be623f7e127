//! Canned payloads and bodies.

use serde_json::json;

use crate::protocol::DEFAULT_BSVALIAS_VERSION;

/// Authentication URL used by [`authentication_body`].
pub const AUTHENTICATION_URL: &str = "https://auth.example.com/login";

/// Keyfile used by [`keyfile_body`].
pub const KEYFILE: &str = "U2FsdGVkX1+vupppZksvRf5pq5g5XjFRlipRkwB0K1Y=";

/// Success body of the authentication capability for `handle`.
pub fn authentication_body(handle: &str) -> Vec<u8> {
    json!({
        "bsvalias": DEFAULT_BSVALIAS_VERSION,
        "handle": handle,
        "authenticationURL": AUTHENTICATION_URL,
    })
    .to_string()
    .into_bytes()
}

/// Success body of the keyfile capability for `handle`.
pub fn keyfile_body(handle: &str) -> Vec<u8> {
    json!({
        "bsvalias": DEFAULT_BSVALIAS_VERSION,
        "handle": handle,
        "keyfile": KEYFILE,
    })
    .to_string()
    .into_bytes()
}

/// Error envelope body.
pub fn error_body(message: &str) -> Vec<u8> {
    json!({ "message": message }).to_string().into_bytes()
}

//! Paymail library.
//!
//! Client and server sides of the paymail (bsvalias) capability protocol. A
//! domain advertises one HTTPS URL template per capability; this crate
//! substitutes an address into the template, issues one request through an
//! injected transport, and validates the response before exposing a typed
//! payload.
//!
//! # Features
//!
//! - **Generic capability engine**: one request/validate path shared by every
//!   capability; new capabilities only supply a payload type
//! - **Transport abstraction**: trait-based [`RequestExecutor`] with an
//!   optional `reqwest` implementation (`http-executor` feature)
//! - **Server mirror**: framework-agnostic handlers serving the same payloads
//!   from a pluggable data layer
//!
//! # Example
//!
//! ```
//! use paymail_lib::{PaymailAddress, CapabilityUrl};
//!
//! let template = CapabilityUrl::new("https://example.com/bsvalias/id/{alias}@{domain.tld}")?;
//! let address = PaymailAddress::parse("alice@example.com")?;
//! assert_eq!(
//!     template.resolve(&address),
//!     "https://example.com/bsvalias/id/alice@example.com"
//! );
//! # Ok::<(), paymail_lib::PaymailError>(())
//! ```

pub mod address;
pub mod client;
pub mod errors;
pub mod prelude;
pub mod protocol;
pub mod server;
pub mod template;
pub mod transport;

/// Test utilities for paymail clients and servers.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use address::{sanitize_paymail, PaymailAddress};
pub use client::{CapabilityResponse, PaymailClient};
pub use errors::{PaymailError, PaymailErrorCode};
pub use protocol::{AuthenticationPayload, CapabilityPayload, KeyfilePayload, ServerErrorPayload};
pub use template::CapabilityUrl;
pub use transport::{RawResponse, RequestExecutor};

#[cfg(feature = "http-executor")]
pub use transport::{HttpExecutor, HttpExecutorConfig};

/// Common result alias for paymail operations.
pub type Result<T> = std::result::Result<T, PaymailError>;

/// Fetches the authentication URL for `alias@domain` with the injected executor.
///
/// Convenience wrapper over [`PaymailClient::get_authentication_url`] for
/// one-off calls.
pub async fn get_authentication_url<E>(
    executor: &E,
    auth_url: &str,
    alias: &str,
    domain: &str,
) -> Result<AuthenticationPayload>
where
    E: RequestExecutor + Sync,
{
    PaymailClient::new(executor)
        .get_authentication_url(auth_url, alias, domain)
        .await
        .map(CapabilityResponse::into_payload)
}

/// Fetches the encrypted keyfile for `alias@domain` with the injected executor.
pub async fn get_keyfile<E>(
    executor: &E,
    keyfile_url: &str,
    alias: &str,
    domain: &str,
) -> Result<KeyfilePayload>
where
    E: RequestExecutor + Sync,
{
    PaymailClient::new(executor)
        .get_keyfile(keyfile_url, alias, domain)
        .await
        .map(CapabilityResponse::into_payload)
}

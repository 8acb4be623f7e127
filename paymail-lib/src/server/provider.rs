//! Data layer seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Stored paymail record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymailRecord {
    /// Alias part of the address.
    pub alias: String,
    /// Domain part of the address.
    pub domain: String,
    /// Encrypted keyfile served by the keyfile capability.
    pub keyfile: String,
}

/// Authentication information for an address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationInfo {
    /// URL the holder authenticates against.
    pub authentication_url: String,
}

/// Request context handed to the provider with every lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// Sanitised alias being looked up.
    pub alias: String,
    /// Sanitised domain being looked up.
    pub domain: String,
    /// Client IP address, if the router knows it.
    pub ip_address: Option<String>,
    /// Client `User-Agent`, if present.
    pub user_agent: Option<String>,
    /// Request identifier for log correlation.
    pub request_id: Option<String>,
}

impl RequestMetadata {
    /// Metadata carrying only transport-level details; alias and domain are
    /// filled in by the handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client IP address.
    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    /// Set the client user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the request identifier.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// Lookups a paymail server delegates to its storage.
///
/// `Ok(None)` means the address is unknown; `Err` is a data layer failure.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PaymailServiceProvider {
    /// Fetch the stored record for `alias@domain`.
    async fn get_paymail_by_alias(
        &self,
        alias: &str,
        domain: &str,
        metadata: &RequestMetadata,
    ) -> Result<Option<PaymailRecord>>;

    /// Fetch the authentication information for `alias@domain`.
    async fn get_authentication_url(
        &self,
        alias: &str,
        domain: &str,
        metadata: &RequestMetadata,
    ) -> Result<Option<AuthenticationInfo>>;
}

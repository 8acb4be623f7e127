//! Capability handlers.

use serde::Serialize;

use super::config::ServerConfig;
use super::provider::{PaymailServiceProvider, RequestMetadata};
use super::response::ServerResponse;
use crate::address::{sanitize_paymail, PaymailAddress};
use crate::protocol::{AuthenticationPayload, KeyfilePayload};
use crate::{PaymailError, Result};

/// Serves paymail capabilities from a configured provider.
///
/// # Example
///
/// ```
/// # use paymail_lib::server::{PaymailServer, PaymailServiceProvider, RequestMetadata, ServerConfig};
/// # async fn demo(provider: impl PaymailServiceProvider) {
/// let server = PaymailServer::new(ServerConfig::new(["example.com"]), provider);
/// let response = server
///     .get_encrypted_keyfile("alice@example.com", RequestMetadata::new())
///     .await;
/// println!("{} {}", response.status, response.body);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PaymailServer<P> {
    config: ServerConfig,
    provider: P,
}

impl<P> PaymailServer<P>
where
    P: PaymailServiceProvider,
{
    /// Create a server from explicit configuration and a data layer.
    pub fn new(config: ServerConfig, provider: P) -> Self {
        Self { config, provider }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Access the data layer.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Answer the authentication capability for the raw `paymailAddress` parameter.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, metadata)))]
    pub async fn get_authentication_endpoint(
        &self,
        paymail_address: &str,
        metadata: RequestMetadata,
    ) -> ServerResponse {
        let result = self.authentication_payload(paymail_address, metadata).await;
        respond(result)
    }

    /// Answer the keyfile capability for the raw `paymailAddress` parameter.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, metadata)))]
    pub async fn get_encrypted_keyfile(
        &self,
        paymail_address: &str,
        metadata: RequestMetadata,
    ) -> ServerResponse {
        let result = self.keyfile_payload(paymail_address, metadata).await;
        respond(result)
    }

    async fn authentication_payload(
        &self,
        paymail_address: &str,
        metadata: RequestMetadata,
    ) -> Result<AuthenticationPayload> {
        let (address, metadata) = self.admit(paymail_address, metadata)?;

        let info = self
            .provider
            .get_authentication_url(address.alias(), address.domain(), &metadata)
            .await
            .map_err(authentication_lookup_error)?
            .ok_or_else(|| PaymailError::PaymailNotFound {
                handle: address.handle(),
            })?;

        Ok(AuthenticationPayload {
            bsvalias: self.config.bsvalias_version.clone(),
            handle: address.handle(),
            authentication_url: info.authentication_url,
        })
    }

    async fn keyfile_payload(
        &self,
        paymail_address: &str,
        metadata: RequestMetadata,
    ) -> Result<KeyfilePayload> {
        let (address, metadata) = self.admit(paymail_address, metadata)?;

        let record = self
            .provider
            .get_paymail_by_alias(address.alias(), address.domain(), &metadata)
            .await
            .map_err(|err| provider_error("get paymail by alias", err))?
            .ok_or_else(|| PaymailError::PaymailNotFound {
                handle: address.handle(),
            })?;

        Ok(KeyfilePayload {
            bsvalias: self.config.bsvalias_version.clone(),
            handle: address.handle(),
            keyfile: record.keyfile,
        })
    }

    /// Sanitise the address, enforce the allow-list, and complete the metadata.
    fn admit(
        &self,
        paymail_address: &str,
        mut metadata: RequestMetadata,
    ) -> Result<(PaymailAddress, RequestMetadata)> {
        let address = sanitize_paymail(paymail_address)?;

        if !self.config.is_allowed_domain(address.domain()) {
            return Err(PaymailError::UnknownDomain {
                domain: address.domain().to_string(),
            });
        }

        metadata.alias = address.alias().to_string();
        metadata.domain = address.domain().to_string();
        Ok((address, metadata))
    }
}

/// Data layer errors are reported as such, whatever the provider returned.
fn provider_error(operation: &str, err: PaymailError) -> PaymailError {
    match err {
        PaymailError::Provider { .. } => err,
        other => PaymailError::provider(operation, other.to_string()),
    }
}

/// Authentication lookups report their own code, whatever the provider returned.
fn authentication_lookup_error(err: PaymailError) -> PaymailError {
    match err {
        PaymailError::AuthenticationLookup { .. } => err,
        PaymailError::Provider { reason, .. } => PaymailError::AuthenticationLookup { reason },
        other => PaymailError::AuthenticationLookup {
            reason: other.to_string(),
        },
    }
}

fn respond<T: Serialize>(result: Result<T>) -> ServerResponse {
    match result {
        Ok(payload) => ServerResponse::ok(&payload),
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(code = %err.code(), status = err.http_status(), error = %err, "paymail request rejected");
            ServerResponse::error(&err)
        }
    }
}

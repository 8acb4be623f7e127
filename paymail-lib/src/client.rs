//! Capability client.
//!
//! [`PaymailClient::fetch`] is the one request/validate engine behind every
//! capability: check inputs, resolve the template, execute one request, and
//! run the response through [`validate`](crate::protocol::validate). The
//! per-capability methods only pick the payload type.

use crate::address::PaymailAddress;
use crate::protocol::{validate, AuthenticationPayload, CapabilityPayload, KeyfilePayload};
use crate::template::CapabilityUrl;
use crate::transport::RequestExecutor;
use crate::{PaymailError, Result};

/// A validated capability response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilityResponse<P> {
    /// HTTP status the provider answered with (200 or 304).
    pub status_code: u16,
    /// The validated payload.
    pub payload: P,
}

impl<P> CapabilityResponse<P> {
    /// Discard the status and keep the payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// True when the provider answered 304 Not Modified.
    pub fn is_not_modified(&self) -> bool {
        self.status_code == 304
    }
}

/// Client for paymail capability endpoints.
///
/// Stateless apart from the injected executor: no caching, no retries, one
/// outbound request per successful call.
///
/// # Example
///
/// ```
/// # use paymail_lib::{PaymailClient, RequestExecutor};
/// # async fn demo(executor: impl RequestExecutor) -> paymail_lib::Result<()> {
/// let client = PaymailClient::new(executor);
/// let auth = client
///     .get_authentication_url(
///         "https://example.com/api/v1/bsvalias/auth/{alias}@{domain.tld}",
///         "alice",
///         "example.com",
///     )
///     .await?;
/// println!("authenticate at {}", auth.payload.authentication_url);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct PaymailClient<E> {
    executor: E,
}

impl<E> PaymailClient<E>
where
    E: RequestExecutor,
{
    /// Wrap an executor.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Access the wrapped executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fetch and validate capability `P` for `alias@domain`.
    ///
    /// Fails with `InvalidEndpoint` or `MalformedAddress` before any network
    /// call when the inputs are unusable.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, capability_url), fields(capability = P::CAPABILITY))
    )]
    pub async fn fetch<P>(
        &self,
        capability_url: &str,
        alias: &str,
        domain: &str,
    ) -> Result<CapabilityResponse<P>>
    where
        P: CapabilityPayload,
    {
        let template = CapabilityUrl::new(capability_url)?;
        let address = PaymailAddress::new(alias, domain)?;
        self.fetch_address(&template, &address).await
    }

    /// Same as [`fetch`](Self::fetch) with pre-validated inputs.
    pub async fn fetch_address<P>(
        &self,
        template: &CapabilityUrl,
        address: &PaymailAddress,
    ) -> Result<CapabilityResponse<P>>
    where
        P: CapabilityPayload,
    {
        let url = template.resolve(address);

        #[cfg(feature = "tracing")]
        tracing::debug!(%url, capability = P::CAPABILITY, "requesting capability");

        let raw = self
            .executor
            .execute(&url)
            .await
            .map_err(|err| map_transport_error(P::CAPABILITY, err))?;

        let payload = validate::<P>(&raw, address)?;

        Ok(CapabilityResponse {
            status_code: raw.status_code,
            payload,
        })
    }

    /// Return the authentication endpoint for `alias@domain`.
    ///
    /// `auth_url` is the template advertised under the authentication
    /// capability, e.g. `https://<host>/{alias}@{domain.tld}/id`.
    pub async fn get_authentication_url(
        &self,
        auth_url: &str,
        alias: &str,
        domain: &str,
    ) -> Result<CapabilityResponse<AuthenticationPayload>> {
        self.fetch(auth_url, alias, domain).await
    }

    /// Return the encrypted keyfile for `alias@domain`.
    pub async fn get_keyfile(
        &self,
        keyfile_url: &str,
        alias: &str,
        domain: &str,
    ) -> Result<CapabilityResponse<KeyfilePayload>> {
        self.fetch(keyfile_url, alias, domain).await
    }
}

fn map_transport_error(label: &'static str, err: PaymailError) -> PaymailError {
    match err {
        PaymailError::Transport(msg) => PaymailError::Transport(format!("{label}: {msg}")),
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixtures, MockExecutor};
    use crate::transport::RawResponse;
    use crate::PaymailErrorCode;

    const AUTH_TEMPLATE: &str = "https://example.com/api/v1/bsvalias/auth/{alias}@{domain.tld}";
    const KEYFILE_TEMPLATE: &str = "https://example.com/api/v1/bsvalias/keyfile/{alias}@{domain.tld}";

    #[tokio::test]
    async fn test_get_authentication_url() {
        let executor = MockExecutor::new();
        executor.respond(
            "https://example.com/api/v1/bsvalias/auth/alice@example.com",
            RawResponse::new(200, fixtures::authentication_body("alice@example.com")),
        );
        let client = PaymailClient::new(executor);

        let response = client
            .get_authentication_url(AUTH_TEMPLATE, "alice", "example.com")
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.payload.handle, "alice@example.com");
        assert_eq!(response.payload.authentication_url, fixtures::AUTHENTICATION_URL);
        assert_eq!(
            client.executor().calls(),
            vec!["https://example.com/api/v1/bsvalias/auth/alice@example.com".to_string()]
        );
    }

    #[tokio::test]
    async fn test_get_keyfile_not_modified() {
        let executor = MockExecutor::new();
        executor.respond(
            "https://example.com/api/v1/bsvalias/keyfile/alice@example.com",
            RawResponse::new(304, fixtures::keyfile_body("alice@example.com")),
        );
        let client = PaymailClient::new(executor);

        let response = client
            .get_keyfile(KEYFILE_TEMPLATE, "alice", "example.com")
            .await
            .unwrap();

        assert!(response.is_not_modified());
        assert_eq!(response.into_payload().keyfile, fixtures::KEYFILE);
    }

    #[tokio::test]
    async fn test_rejects_inputs_before_network() {
        let client = PaymailClient::new(MockExecutor::new());

        let cases = [
            ("", "alice", "example.com", PaymailErrorCode::InvalidEndpoint),
            ("http://example.com/{alias}", "alice", "example.com", PaymailErrorCode::InvalidEndpoint),
            (AUTH_TEMPLATE, "", "example.com", PaymailErrorCode::MalformedAddress),
            (AUTH_TEMPLATE, "alice", "", PaymailErrorCode::MalformedAddress),
        ];

        for (url, alias, domain, code) in cases {
            let err = client
                .get_authentication_url(url, alias, domain)
                .await
                .unwrap_err();
            assert_eq!(err.code(), code, "case {url:?} {alias:?} {domain:?}");
        }

        assert!(client.executor().calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_terminal() {
        let executor = MockExecutor::new();
        executor.fail_with(PaymailError::Transport("connection refused".into()));
        let client = PaymailClient::new(executor);

        let err = client
            .get_keyfile(KEYFILE_TEMPLATE, "alice", "example.com")
            .await
            .unwrap_err();

        assert_eq!(err.code(), PaymailErrorCode::Transport);
        assert!(err.to_string().contains("keyfile: connection refused"));
        assert_eq!(client.executor().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_propagates() {
        let executor = MockExecutor::new();
        executor.respond_default(RawResponse::new(404, r#"{"message":"not found"}"#));
        let client = PaymailClient::new(executor);

        let err = client
            .get_authentication_url(AUTH_TEMPLATE, "alice", "example.com")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            PaymailError::ServerError {
                code: 404,
                message: "not found".into()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_is_repeatable() {
        let executor = MockExecutor::new();
        executor.respond_default(RawResponse::new(200, fixtures::keyfile_body("alice@example.com")));
        let client = PaymailClient::new(executor);

        let first = client
            .get_keyfile(KEYFILE_TEMPLATE, "alice", "example.com")
            .await
            .unwrap();
        let second = client
            .get_keyfile(KEYFILE_TEMPLATE, "alice", "example.com")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(client.executor().calls().len(), 2);
    }
}

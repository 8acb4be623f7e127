use std::collections::HashMap;

use async_trait::async_trait;

use crate::Result;

/// Unopinionated result of one GET request.
///
/// Any status code is a valid `RawResponse`; interpreting it is the
/// validator's job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Raw response body.
    pub body: Vec<u8>,
    /// Response headers, lowercased names.
    pub headers: HashMap<String, String>,
}

impl RawResponse {
    /// Build a response from a status code and body.
    pub fn new(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            body: body.into(),
            headers: HashMap::new(),
        }
    }

    /// Attach a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Trait describing the outbound transport used by the client engine.
///
/// Implementations issue exactly one GET per call. Network failures (DNS,
/// refused connection, timeout) are reported as `PaymailError::Transport`;
/// every HTTP status, including 4xx/5xx, is returned as `Ok`.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait RequestExecutor {
    /// Issue a GET request to `url`.
    async fn execute(&self, url: &str) -> Result<RawResponse>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<T> RequestExecutor for std::sync::Arc<T>
where
    T: RequestExecutor + Send + Sync + ?Sized,
{
    async fn execute(&self, url: &str) -> Result<RawResponse> {
        (**self).execute(url).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<'a, T> RequestExecutor for &'a T
where
    T: RequestExecutor + Sync + ?Sized,
{
    async fn execute(&self, url: &str) -> Result<RawResponse> {
        (**self).execute(url).await
    }
}

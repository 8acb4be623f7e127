//! `reqwest`-backed request executor.
//!
//! Requires the `http-executor` feature:
//!
//! ```toml
//! [dependencies]
//! paymail-lib = { version = "0.1", features = ["http-executor"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use paymail_lib::transport::{HttpExecutor, HttpExecutorConfig};
//! use paymail_lib::PaymailClient;
//!
//! let executor = HttpExecutor::new(HttpExecutorConfig::default().with_timeout(10))?;
//! let client = PaymailClient::new(executor);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::traits::{RawResponse, RequestExecutor};
use crate::{PaymailError, Result};

/// Configuration for [`HttpExecutor`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpExecutorConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    20
}

fn default_user_agent() -> String {
    concat!("paymail-lib/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpExecutorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpExecutorConfig {
    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Request executor issuing real HTTP GETs.
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    config: HttpExecutorConfig,
    client: reqwest::Client,
}

impl HttpExecutor {
    /// Create a new executor with the given configuration.
    pub fn new(config: HttpExecutorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PaymailError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Get the configuration.
    pub fn config(&self) -> &HttpExecutorConfig {
        &self.config
    }

    fn map_reqwest_error(&self, url: &str, e: reqwest::Error) -> PaymailError {
        if e.is_timeout() {
            PaymailError::Transport(format!(
                "request to {} timed out after {}s",
                url, self.config.timeout_secs
            ))
        } else if e.is_connect() {
            PaymailError::Transport(format!("connection to {} failed: {}", url, e))
        } else {
            PaymailError::Transport(format!("request to {} failed: {}", url, e))
        }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    async fn execute(&self, url: &str) -> Result<RawResponse> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(url, e))?;

        let status_code = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(url, e))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(status_code, body_len = body.len(), "paymail provider responded");

        Ok(RawResponse {
            status_code,
            body: body.to_vec(),
            headers,
        })
    }
}

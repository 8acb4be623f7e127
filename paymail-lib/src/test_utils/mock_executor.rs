//! Scripted request executor.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::transport::{RawResponse, RequestExecutor};
use crate::{PaymailError, Result};

#[derive(Default)]
struct Script {
    by_url: HashMap<String, RawResponse>,
    fallback: Option<RawResponse>,
    failure: Option<PaymailError>,
    calls: Vec<String>,
}

/// In-memory executor returning scripted responses.
///
/// Lookup order: a configured failure, then an exact URL match, then the
/// default response. Unmatched URLs produce a transport error. Clones share
/// the same script and call log.
#[derive(Clone, Default)]
pub struct MockExecutor {
    script: Arc<Mutex<Script>>,
}

impl MockExecutor {
    /// Create an executor with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for exactly `url` with `response`.
    pub fn respond(&self, url: impl Into<String>, response: RawResponse) {
        self.script
            .lock()
            .unwrap()
            .by_url
            .insert(url.into(), response);
    }

    /// Answer any unmatched request with `response`.
    pub fn respond_default(&self, response: RawResponse) {
        self.script.lock().unwrap().fallback = Some(response);
    }

    /// Fail every request with `err`.
    pub fn fail_with(&self, err: PaymailError) {
        self.script.lock().unwrap().failure = Some(err);
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.script.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl RequestExecutor for MockExecutor {
    async fn execute(&self, url: &str) -> Result<RawResponse> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(url.to_string());

        if let Some(err) = &script.failure {
            return Err(err.clone());
        }

        script
            .by_url
            .get(url)
            .or(script.fallback.as_ref())
            .cloned()
            .ok_or_else(|| PaymailError::Transport(format!("no scripted response for {url}")))
    }
}

//! In-memory data layer.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::server::{AuthenticationInfo, PaymailRecord, PaymailServiceProvider, RequestMetadata};
use crate::{PaymailError, Result};

type Key = (String, String);

#[derive(Default)]
struct State {
    records: HashMap<Key, PaymailRecord>,
    auth: HashMap<Key, AuthenticationInfo>,
    failure: Option<String>,
    last_metadata: Option<RequestMetadata>,
}

/// Provider storing records in memory, keyed by `(alias, domain)`.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryProvider {
    state: Arc<RwLock<State>>,
}

impl InMemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a keyfile record.
    pub fn insert_keyfile(&self, alias: &str, domain: &str, keyfile: &str) {
        self.state.write().unwrap().records.insert(
            key(alias, domain),
            PaymailRecord {
                alias: alias.to_string(),
                domain: domain.to_string(),
                keyfile: keyfile.to_string(),
            },
        );
    }

    /// Store an authentication URL.
    pub fn insert_authentication_url(&self, alias: &str, domain: &str, url: &str) {
        self.state.write().unwrap().auth.insert(
            key(alias, domain),
            AuthenticationInfo {
                authentication_url: url.to_string(),
            },
        );
    }

    /// Fail every subsequent lookup with `reason`.
    pub fn fail_with(&self, reason: &str) {
        self.state.write().unwrap().failure = Some(reason.to_string());
    }

    /// Metadata passed with the most recent lookup.
    pub fn last_metadata(&self) -> Option<RequestMetadata> {
        self.state.read().unwrap().last_metadata.clone()
    }

    fn begin(&self, operation: &str, metadata: &RequestMetadata) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.last_metadata = Some(metadata.clone());
        match &state.failure {
            Some(reason) => Err(PaymailError::provider(operation, reason.clone())),
            None => Ok(()),
        }
    }
}

fn key(alias: &str, domain: &str) -> Key {
    (alias.to_string(), domain.to_string())
}

#[async_trait]
impl PaymailServiceProvider for InMemoryProvider {
    async fn get_paymail_by_alias(
        &self,
        alias: &str,
        domain: &str,
        metadata: &RequestMetadata,
    ) -> Result<Option<PaymailRecord>> {
        self.begin("get paymail by alias", metadata)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .records
            .get(&key(alias, domain))
            .cloned())
    }

    async fn get_authentication_url(
        &self,
        alias: &str,
        domain: &str,
        metadata: &RequestMetadata,
    ) -> Result<Option<AuthenticationInfo>> {
        self.begin("get authentication url", metadata)?;
        Ok(self
            .state
            .read()
            .unwrap()
            .auth
            .get(&key(alias, domain))
            .cloned())
    }
}

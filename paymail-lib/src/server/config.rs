//! Server configuration.

use serde::{Deserialize, Serialize};

use crate::address::sanitize_domain;
use crate::protocol::DEFAULT_BSVALIAS_VERSION;

/// Configuration handed to [`PaymailServer`](super::PaymailServer) at
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Domains this server answers for, stored sanitised.
    #[serde(default)]
    pub allowed_domains: Vec<String>,

    /// Value written to the `bsvalias` field of every payload.
    #[serde(default = "default_bsvalias_version")]
    pub bsvalias_version: String,
}

fn default_bsvalias_version() -> String {
    DEFAULT_BSVALIAS_VERSION.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_domains: Vec::new(),
            bsvalias_version: default_bsvalias_version(),
        }
    }
}

impl ServerConfig {
    /// Create a configuration serving `domains`.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::default().with_domains(domains)
    }

    /// Add domains to the allow-list.
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for domain in domains {
            let domain = sanitize_domain(domain.as_ref());
            if !domain.is_empty() && !self.allowed_domains.contains(&domain) {
                self.allowed_domains.push(domain);
            }
        }
        self
    }

    /// Set the served protocol version.
    pub fn with_bsvalias_version(mut self, version: impl Into<String>) -> Self {
        self.bsvalias_version = version.into();
        self
    }

    /// True when `domain` is served by this server.
    ///
    /// `domain` is compared after sanitisation, so callers may pass raw input.
    pub fn is_allowed_domain(&self, domain: &str) -> bool {
        let domain = sanitize_domain(domain);
        self.allowed_domains.iter().any(|allowed| *allowed == domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_domains_are_sanitised() {
        let config = ServerConfig::new(["WWW.Example.com", "example.com", "", "other.io"]);
        assert_eq!(config.allowed_domains, vec!["example.com", "other.io"]);
        assert!(config.is_allowed_domain("example.com"));
        assert!(config.is_allowed_domain("EXAMPLE.com"));
        assert!(!config.is_allowed_domain("evil.com"));
    }

    #[test]
    fn test_default_version() {
        let config = ServerConfig::default();
        assert_eq!(config.bsvalias_version, "1.0");
        assert!(!config.is_allowed_domain("example.com"));

        let config = config.with_bsvalias_version("2.0");
        assert_eq!(config.bsvalias_version, "2.0");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"allowed_domains":["example.com"]}"#).unwrap();
        assert_eq!(config.bsvalias_version, "1.0");
        assert!(config.is_allowed_domain("example.com"));
    }
}

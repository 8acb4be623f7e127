//! Paymail address parsing.
//!
//! Two entry points:
//! - [`PaymailAddress::parse`] is the strict, case-preserving split used on
//!   the client path, where the provider must echo the exact handle back.
//! - [`sanitize_paymail`] is the lenient form used by servers on inbound path
//!   parameters: it normalises case and strips common decorations before
//!   parsing.
//!
//! Neither performs DNS validation; the checks are syntactic only.
//!
//! # Example
//!
//! ```
//! use paymail_lib::address::{sanitize_paymail, PaymailAddress};
//!
//! let addr = PaymailAddress::parse("alice@example.com")?;
//! assert_eq!(addr.alias(), "alice");
//! assert_eq!(addr.handle(), "alice@example.com");
//!
//! let served = sanitize_paymail("  Alice@WWW.Example.com ")?;
//! assert_eq!(served.handle(), "alice@example.com");
//! # Ok::<(), paymail_lib::PaymailError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{PaymailError, Result};

/// Reasons a raw address fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// No `@` separator in the input.
    #[error("missing '@' separator")]
    MissingSeparator,
    /// Nothing before the `@`.
    #[error("missing alias")]
    EmptyAlias,
    /// Nothing after the `@`.
    #[error("missing domain")]
    EmptyDomain,
}

/// A paymail address split into its alias and domain parts.
///
/// Both parts are guaranteed non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaymailAddress {
    alias: String,
    domain: String,
}

impl PaymailAddress {
    /// Build an address from already separated parts.
    pub fn new(alias: impl Into<String>, domain: impl Into<String>) -> Result<Self> {
        let alias = alias.into();
        let domain = domain.into();
        Self::from_parts(alias, domain).map_err(|(input, err)| {
            PaymailError::malformed_address(input, err.to_string())
        })
    }

    /// Split `raw` on the first `@`.
    ///
    /// Case and surrounding characters are preserved exactly.
    pub fn parse(raw: &str) -> Result<Self> {
        split_address(raw)
            .and_then(|(alias, domain)| {
                Self::from_parts(alias.to_string(), domain.to_string()).map_err(|(_, err)| err)
            })
            .map_err(|err| PaymailError::malformed_address(raw, err.to_string()))
    }

    fn from_parts(
        alias: String,
        domain: String,
    ) -> std::result::Result<Self, (String, AddressError)> {
        if alias.is_empty() {
            return Err((format!("{alias}@{domain}"), AddressError::EmptyAlias));
        }
        if domain.is_empty() {
            return Err((format!("{alias}@{domain}"), AddressError::EmptyDomain));
        }
        Ok(Self { alias, domain })
    }

    /// The part before the `@`.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The part after the `@`.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Canonical `alias@domain` string a provider must echo back.
    pub fn handle(&self) -> String {
        format!("{}@{}", self.alias, self.domain)
    }
}

impl FromStr for PaymailAddress {
    type Err = PaymailError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PaymailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.alias, self.domain)
    }
}

fn split_address(raw: &str) -> std::result::Result<(&str, &str), AddressError> {
    let (alias, domain) = raw.split_once('@').ok_or(AddressError::MissingSeparator)?;
    if alias.is_empty() {
        return Err(AddressError::EmptyAlias);
    }
    if domain.is_empty() {
        return Err(AddressError::EmptyDomain);
    }
    Ok((alias, domain))
}

/// Normalise an inbound paymail before serving it.
///
/// Trims whitespace, drops a `mailto:` prefix, lowercases both parts, and
/// reduces the domain to a bare host (no scheme, `www.`, path, or trailing
/// dot).
pub fn sanitize_paymail(raw: &str) -> Result<PaymailAddress> {
    let trimmed = raw.trim();
    let trimmed = strip_prefix_ignore_case(trimmed, "mailto:").unwrap_or(trimmed);

    let (alias, domain) = split_address(trimmed)
        .map_err(|err| PaymailError::malformed_address(raw, err.to_string()))?;

    let alias = alias.trim().to_lowercase();
    let domain = sanitize_domain(domain);

    PaymailAddress::from_parts(alias, domain)
        .map_err(|(_, err)| PaymailError::malformed_address(raw, err.to_string()))
}

/// Reduce a domain string to a lowercase bare host.
pub fn sanitize_domain(domain: &str) -> String {
    let mut host = domain.trim();
    for prefix in ["https://", "http://"] {
        if let Some(rest) = strip_prefix_ignore_case(host, prefix) {
            host = rest;
        }
    }
    host = host.split(['/', '?', '#']).next().unwrap_or(host);
    if let Some(rest) = strip_prefix_ignore_case(host, "www.") {
        host = rest;
    }
    host.trim_end_matches('.').to_lowercase()
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaymailErrorCode;

    #[test]
    fn test_parse_valid() {
        let addr = PaymailAddress::parse("alice@example.com").unwrap();
        assert_eq!(addr.alias(), "alice");
        assert_eq!(addr.domain(), "example.com");
        assert_eq!(addr.handle(), "alice@example.com");
        assert_eq!(addr.to_string(), "alice@example.com");
    }

    #[test]
    fn test_parse_splits_on_first_at() {
        let addr = PaymailAddress::parse("a@b@c.com").unwrap();
        assert_eq!(addr.alias(), "a");
        assert_eq!(addr.domain(), "b@c.com");
    }

    #[test]
    fn test_parse_preserves_case() {
        let addr: PaymailAddress = "Alice@Example.COM".parse().unwrap();
        assert_eq!(addr.handle(), "Alice@Example.COM");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "alice", "@example.com", "alice@", "@"] {
            let err = PaymailAddress::parse(raw).unwrap_err();
            assert_eq!(err.code(), PaymailErrorCode::MalformedAddress, "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_reason() {
        let err = PaymailAddress::parse("alice").unwrap_err();
        assert!(err.to_string().contains("missing '@' separator"));
        let err = PaymailAddress::parse("alice@").unwrap_err();
        assert!(err.to_string().contains("missing domain"));
    }

    #[test]
    fn test_new_from_parts() {
        assert!(PaymailAddress::new("alice", "example.com").is_ok());
        let err = PaymailAddress::new("", "example.com").unwrap_err();
        assert!(err.to_string().contains("missing alias"));
        let err = PaymailAddress::new("alice", "").unwrap_err();
        assert!(err.to_string().contains("missing domain"));
    }

    #[test]
    fn test_sanitize_normalises() {
        let addr = sanitize_paymail("  MrZ@MoneyButton.COM ").unwrap();
        assert_eq!(addr.handle(), "mrz@moneybutton.com");

        let addr = sanitize_paymail("mailto:bob@https://www.example.com/").unwrap();
        assert_eq!(addr.handle(), "bob@example.com");
    }

    #[test]
    fn test_sanitize_rejects_empty_parts() {
        assert!(sanitize_paymail("").is_err());
        assert!(sanitize_paymail("bob@").is_err());
        assert!(sanitize_paymail("bob@https://").is_err());
        assert!(sanitize_paymail(" @example.com").is_err());
    }

    #[test]
    fn test_sanitize_domain() {
        assert_eq!(sanitize_domain("WWW.Example.com."), "example.com");
        assert_eq!(sanitize_domain("http://example.com/path?q=1"), "example.com");
        assert_eq!(sanitize_domain("example.com"), "example.com");
    }
}

//! Capability URL templates.
//!
//! A domain's capability discovery document advertises one URL template per
//! operation, e.g. `https://example.com/api/v1/bsvalias/id/{alias}@{domain.tld}`.
//! This module validates such templates and substitutes an address into them.

use std::fmt;

use crate::address::PaymailAddress;
use crate::{PaymailError, Result};

/// Placeholder replaced by the address alias.
pub const ALIAS_PLACEHOLDER: &str = "{alias}";

/// Placeholder replaced by the address domain.
pub const DOMAIN_PLACEHOLDER: &str = "{domain.tld}";

const HTTPS_SCHEME: &str = "https://";

/// Reasons a capability URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    /// Template is empty or whitespace.
    #[error("capability url is empty")]
    Empty,
    /// Template does not start with `https://`.
    #[error("capability url must use https")]
    NotHttps,
}

/// A validated capability URL template.
///
/// Construction guarantees the template is non-empty and uses the `https`
/// scheme.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CapabilityUrl(String);

impl CapabilityUrl {
    /// Validate a template string.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if let Err(err) = check_template(&template) {
            return Err(PaymailError::InvalidEndpoint {
                url: template,
                reason: err.to_string(),
            });
        }
        Ok(Self(template))
    }

    /// Get the template as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute `address` into this template.
    pub fn resolve(&self, address: &PaymailAddress) -> String {
        resolve(self, address)
    }
}

impl AsRef<str> for CapabilityUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn check_template(template: &str) -> std::result::Result<(), EndpointError> {
    if template.trim().is_empty() {
        return Err(EndpointError::Empty);
    }
    let has_scheme = template
        .get(..HTTPS_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(HTTPS_SCHEME));
    if !has_scheme {
        return Err(EndpointError::NotHttps);
    }
    Ok(())
}

/// Replace every alias and domain placeholder in `template`.
///
/// The scan is a single left-to-right pass over the template, so text coming
/// from the address is never itself scanned for placeholders. Values are
/// inserted verbatim, without percent-encoding.
pub fn resolve(template: &CapabilityUrl, address: &PaymailAddress) -> String {
    substitute(template.as_str(), address.alias(), address.domain())
}

fn substitute(template: &str, alias: &str, domain: &str) -> String {
    let mut out = String::with_capacity(template.len() + alias.len() + domain.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix(ALIAS_PLACEHOLDER) {
            out.push_str(alias);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(DOMAIN_PLACEHOLDER) {
            out.push_str(domain);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

//! Parse command - show how an address is split and sanitised

use anyhow::{Context, Result};
use paymail_lib::{sanitize_paymail, PaymailAddress};
use serde::Serialize;

use super::OutputFormat;
use crate::ui;

/// Client and server views of one raw address.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ParsedAddress {
    /// Alias as the client sends it
    pub alias: String,
    /// Domain as the client sends it
    pub domain: String,
    /// Handle the provider must echo back
    pub handle: String,
    /// Handle a server would serve for this input
    pub sanitized: String,
}

/// Parse `raw` into its client and server forms.
pub fn parse_address(raw: &str) -> Result<ParsedAddress> {
    let address = PaymailAddress::parse(raw).context("Invalid paymail address")?;
    let sanitized = sanitize_paymail(raw).context("Address cannot be sanitised")?;

    Ok(ParsedAddress {
        alias: address.alias().to_string(),
        domain: address.domain().to_string(),
        handle: address.handle(),
        sanitized: sanitized.handle(),
    })
}

#[tracing::instrument]
pub fn run(raw: &str, format: OutputFormat) -> Result<()> {
    let parsed = parse_address(raw)?;

    match format {
        OutputFormat::Json => ui::json(&parsed)?,
        OutputFormat::Text => {
            ui::header("Paymail Address");
            ui::key_value("Alias", &parsed.alias);
            ui::key_value("Domain", &parsed.domain);
            ui::key_value("Handle", &parsed.handle);
            ui::key_value("Sanitised", &parsed.sanitized);
            if parsed.handle != parsed.sanitized {
                ui::warning("Providers echo the sanitised handle; requests for this exact form will fail the handle check");
            }
        }
    }

    Ok(())
}

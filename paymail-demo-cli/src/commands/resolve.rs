//! Resolve command - substitute an address into a capability template

use anyhow::{Context, Result};
use paymail_lib::{CapabilityUrl, PaymailAddress};

use super::OutputFormat;
use crate::ui;

/// Resolve `template` for `raw_address`.
pub fn resolve_url(template: &str, raw_address: &str) -> Result<String> {
    let template = CapabilityUrl::new(template).context("Invalid capability URL")?;
    let address = PaymailAddress::parse(raw_address).context("Invalid paymail address")?;
    Ok(template.resolve(&address))
}

#[tracing::instrument]
pub fn run(template: &str, raw_address: &str, format: OutputFormat) -> Result<()> {
    let url = resolve_url(template, raw_address)?;
    tracing::debug!("Resolved {} to {}", template, url);

    match format {
        OutputFormat::Json => ui::json(&serde_json::json!({ "url": url }))?,
        OutputFormat::Text => ui::key_value("URL", &url),
    }

    Ok(())
}

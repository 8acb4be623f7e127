//! Fetch commands - query authentication and keyfile capabilities

use anyhow::{Context, Result};
use paymail_lib::{
    AuthenticationPayload, CapabilityPayload, CapabilityResponse, HttpExecutor,
    HttpExecutorConfig, KeyfilePayload, PaymailAddress, PaymailClient, RequestExecutor,
};

use super::OutputFormat;
use crate::ui;

/// Fetch capability `P` for `raw_address` through `client`.
pub async fn fetch_capability<P, E>(
    client: &PaymailClient<E>,
    template: &str,
    raw_address: &str,
) -> Result<CapabilityResponse<P>>
where
    P: CapabilityPayload,
    E: RequestExecutor,
{
    let address = PaymailAddress::parse(raw_address).context("Invalid paymail address")?;

    match client
        .fetch::<P>(template, address.alias(), address.domain())
        .await
    {
        Ok(response) => Ok(response),
        Err(err) => {
            tracing::debug!("{} request failed: {:?}", P::CAPABILITY, err);
            let code = err.code();
            Err(anyhow::Error::new(err).context(format!("{} request failed [{}]", P::CAPABILITY, code)))
        }
    }
}

fn client(config: HttpExecutorConfig) -> Result<PaymailClient<HttpExecutor>> {
    let executor = HttpExecutor::new(config).context("Failed to create HTTP client")?;
    Ok(PaymailClient::new(executor))
}

#[tracing::instrument(skip(config))]
pub async fn auth(
    config: HttpExecutorConfig,
    template: &str,
    raw_address: &str,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let client = client(config)?;
    if verbose {
        ui::info(&format!("Querying authentication capability for {}", raw_address));
    }

    let spinner = ui::spinner("Requesting authentication URL...");
    let result = fetch_capability::<AuthenticationPayload, _>(&client, template, raw_address).await;
    spinner.finish_and_clear();

    let response = report_failure(result)?;
    match format {
        OutputFormat::Json => ui::json(&response.payload)?,
        OutputFormat::Text => {
            ui::success(&format!("Provider answered {}", response.status_code));
            ui::key_value("bsvalias", &response.payload.bsvalias);
            ui::key_value("Handle", &response.payload.handle);
            ui::key_value("Authentication URL", &response.payload.authentication_url);
        }
    }
    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn keyfile(
    config: HttpExecutorConfig,
    template: &str,
    raw_address: &str,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let client = client(config)?;
    if verbose {
        ui::info(&format!("Querying keyfile capability for {}", raw_address));
    }

    let spinner = ui::spinner("Requesting keyfile...");
    let result = fetch_capability::<KeyfilePayload, _>(&client, template, raw_address).await;
    spinner.finish_and_clear();

    let response = report_failure(result)?;
    match format {
        OutputFormat::Json => ui::json(&response.payload)?,
        OutputFormat::Text => {
            ui::success(&format!("Provider answered {}", response.status_code));
            ui::key_value("bsvalias", &response.payload.bsvalias);
            ui::key_value("Handle", &response.payload.handle);
            ui::key_value("Keyfile", &response.payload.keyfile);
        }
    }
    Ok(())
}

fn report_failure<T>(result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        ui::error(&format!("{:#}", err));
    }
    result
}

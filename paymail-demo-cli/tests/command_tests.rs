//! Command-level tests using the library's scripted executor.

use paymail_demo_cli::commands::fetch::fetch_capability;
use paymail_demo_cli::commands::parse::parse_address;
use paymail_demo_cli::commands::resolve::resolve_url;
use paymail_lib::test_utils::{fixtures, MockExecutor};
use paymail_lib::{KeyfilePayload, PaymailClient, PaymailError, PaymailErrorCode, RawResponse};
use proptest::prelude::*;

const KEYFILE_TEMPLATE: &str = "https://example.com/keyfile/{alias}@{domain.tld}";

#[tokio::test]
async fn test_fetch_keyfile() {
    let executor = MockExecutor::new();
    executor.respond(
        "https://example.com/keyfile/alice@example.com",
        RawResponse::new(200, fixtures::keyfile_body("alice@example.com")),
    );
    let client = PaymailClient::new(executor);

    let response = fetch_capability::<KeyfilePayload, _>(&client, KEYFILE_TEMPLATE, "alice@example.com")
        .await
        .unwrap();

    assert_eq!(response.payload.keyfile, fixtures::KEYFILE);
}

#[tokio::test]
async fn test_fetch_error_keeps_classification() {
    let executor = MockExecutor::new();
    executor.respond_default(RawResponse::new(200, fixtures::keyfile_body("mallory@example.com")));
    let client = PaymailClient::new(executor);

    let err = fetch_capability::<KeyfilePayload, _>(&client, KEYFILE_TEMPLATE, "alice@example.com")
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("handle-mismatch"));
    let source = err.downcast_ref::<PaymailError>().unwrap();
    assert_eq!(source.code(), PaymailErrorCode::HandleMismatch);
}

#[tokio::test]
async fn test_fetch_rejects_malformed_address_without_request() {
    let executor = MockExecutor::new();
    let client = PaymailClient::new(executor.clone());

    assert!(fetch_capability::<KeyfilePayload, _>(&client, KEYFILE_TEMPLATE, "alice")
        .await
        .is_err());
    assert!(executor.calls().is_empty());
}

#[test]
fn test_parse_address_forms() {
    let parsed = parse_address("Bob@WWW.Example.com").unwrap();
    assert_eq!(parsed.alias, "Bob");
    assert_eq!(parsed.domain, "WWW.Example.com");
    assert_eq!(parsed.sanitized, "bob@example.com");
}

proptest! {
    /// Resolving never leaves placeholders for well-formed addresses
    #[test]
    fn test_resolve_url_substitutes(
        alias in "[a-z0-9]{1,16}",
        domain in "[a-z]{1,16}\\.(com|io|net)"
    ) {
        let url = resolve_url(KEYFILE_TEMPLATE, &format!("{alias}@{domain}")).unwrap();
        let expected = format!("https://example.com/keyfile/{alias}@{domain}");
        prop_assert_eq!(url, expected);
    }

    /// Addresses without a separator are always rejected
    #[test]
    fn test_resolve_url_rejects_missing_separator(raw in "[a-z.]{0,20}") {
        prop_assert!(resolve_url(KEYFILE_TEMPLATE, &raw).is_err());
    }
}

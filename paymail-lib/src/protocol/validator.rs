//! Response validation gate.
//!
//! Every capability response goes through the same steps, in order, each one
//! short-circuiting on failure:
//!
//! 1. status gate: only 200 and 304 are success envelopes; anything else is
//!    decoded as `{"message": ...}` and reported as `ServerError`. The
//!    message may be absent, but a body that is not a JSON object is
//!    `MalformedErrorBody`
//! 2. payload decode (`MalformedPayload`)
//! 3. non-empty `bsvalias` (`MissingProtocolVersion`)
//! 4. `handle == alias@domain`, exact and case-sensitive (`HandleMismatch`)
//! 5. the payload's own [`CapabilityPayload::check`]

use super::payload::{CapabilityPayload, ServerErrorPayload};
use super::SUCCESS_STATUS_CODES;
use crate::address::PaymailAddress;
use crate::transport::RawResponse;
use crate::{PaymailError, Result};

/// Validate `raw` as a response of capability `P` for `expected`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(raw, expected), fields(capability = P::CAPABILITY, status = raw.status_code, expected = %expected))
)]
pub fn validate<P>(raw: &RawResponse, expected: &PaymailAddress) -> Result<P>
where
    P: CapabilityPayload,
{
    check_status(raw)?;

    let payload: P = serde_json::from_slice(&raw.body).map_err(|err| {
        PaymailError::MalformedPayload(format!("{} response: {}", P::CAPABILITY, err))
    })?;

    if payload.bsvalias().is_empty() {
        return Err(PaymailError::MissingProtocolVersion);
    }

    check_handle(payload.handle(), expected)?;

    payload.check()?;

    Ok(payload)
}

fn check_status(raw: &RawResponse) -> Result<()> {
    if SUCCESS_STATUS_CODES.contains(&raw.status_code) {
        return Ok(());
    }

    match decode_error_body(&raw.body) {
        Ok(body) => Err(PaymailError::ServerError {
            code: raw.status_code,
            message: body.message,
        }),
        Err(reason) => Err(PaymailError::MalformedErrorBody {
            code: raw.status_code,
            reason,
        }),
    }
}

fn decode_error_body(body: &[u8]) -> std::result::Result<ServerErrorPayload, String> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|err| err.to_string())?;
    if !value.is_object() {
        return Err("error body is not a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|err| err.to_string())
}

/// Require `observed` to be exactly `expected.alias() + "@" + expected.domain()`.
pub fn check_handle(observed: &str, expected: &PaymailAddress) -> Result<()> {
    let handle = expected.handle();
    if observed != handle {
        return Err(PaymailError::HandleMismatch {
            expected: handle,
            observed: observed.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{AuthenticationPayload, KeyfilePayload};
    use crate::PaymailErrorCode;
    use serde_json::json;

    fn alice() -> PaymailAddress {
        PaymailAddress::new("alice", "example.com").unwrap()
    }

    fn auth_body(bsvalias: &str, handle: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "bsvalias": bsvalias,
            "handle": handle,
            "authenticationURL": "https://auth.example.com/alice"
        }))
        .unwrap()
    }

    #[test]
    fn test_success() {
        let raw = RawResponse::new(200, auth_body("1.0", "alice@example.com"));
        let payload: AuthenticationPayload = validate(&raw, &alice()).unwrap();
        assert_eq!(payload.authentication_url, "https://auth.example.com/alice");
        assert_eq!(payload.bsvalias, "1.0");
    }

    #[test]
    fn test_not_modified_is_success() {
        let raw = RawResponse::new(304, auth_body("1.0", "alice@example.com"));
        assert!(validate::<AuthenticationPayload>(&raw, &alice()).is_ok());
    }

    #[test]
    fn test_server_error() {
        let raw = RawResponse::new(404, r#"{"message":"not found"}"#);
        let err = validate::<AuthenticationPayload>(&raw, &alice()).unwrap_err();
        assert_eq!(
            err,
            PaymailError::ServerError {
                code: 404,
                message: "not found".into()
            }
        );
    }

    #[test]
    fn test_other_2xx_is_not_success() {
        let raw = RawResponse::new(201, auth_body("1.0", "alice@example.com"));
        let err = validate::<AuthenticationPayload>(&raw, &alice()).unwrap_err();
        assert_eq!(
            err,
            PaymailError::ServerError {
                code: 201,
                message: String::new()
            }
        );
    }

    #[test]
    fn test_error_body_without_message() {
        for body in ["{}", r#"{"error":"not found"}"#, r#"{"code":"not-found"}"#] {
            let raw = RawResponse::new(404, body);
            let err = validate::<AuthenticationPayload>(&raw, &alice()).unwrap_err();
            assert_eq!(
                err,
                PaymailError::ServerError {
                    code: 404,
                    message: String::new()
                },
                "body {body}"
            );
        }
    }

    #[test]
    fn test_malformed_error_body() {
        for body in ["<html>oops</html>", "", "[]", r#""down""#] {
            let raw = RawResponse::new(500, body);
            let err = validate::<KeyfilePayload>(&raw, &alice()).unwrap_err();
            assert!(
                matches!(err, PaymailError::MalformedErrorBody { code: 500, .. }),
                "body {body:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_payload() {
        let raw = RawResponse::new(200, "not json");
        let err = validate::<KeyfilePayload>(&raw, &alice()).unwrap_err();
        assert_eq!(err.code(), PaymailErrorCode::MalformedPayload);
        assert!(err.to_string().contains("keyfile"));
    }

    #[test]
    fn test_missing_version() {
        let raw = RawResponse::new(200, auth_body("", "alice@example.com"));
        let err = validate::<AuthenticationPayload>(&raw, &alice()).unwrap_err();
        assert_eq!(err, PaymailError::MissingProtocolVersion);
    }

    #[test]
    fn test_null_version_is_missing() {
        let body = json!({"bsvalias": null, "handle": "alice@example.com", "keyfile": "ZW5j"});
        let raw = RawResponse::new(200, serde_json::to_vec(&body).unwrap());
        let err = validate::<KeyfilePayload>(&raw, &alice()).unwrap_err();
        assert_eq!(err, PaymailError::MissingProtocolVersion);
    }

    #[test]
    fn test_version_checked_before_handle() {
        let raw = RawResponse::new(200, auth_body("", "x@y"));
        let err = validate::<AuthenticationPayload>(&raw, &alice()).unwrap_err();
        assert_eq!(err, PaymailError::MissingProtocolVersion);
    }

    #[test]
    fn test_handle_mismatch() {
        let raw = RawResponse::new(200, auth_body("1.0", "x@y"));
        let err = validate::<AuthenticationPayload>(&raw, &alice()).unwrap_err();
        assert_eq!(
            err,
            PaymailError::HandleMismatch {
                expected: "alice@example.com".into(),
                observed: "x@y".into()
            }
        );
    }

    #[test]
    fn test_handle_is_case_sensitive() {
        let raw = RawResponse::new(200, auth_body("1.0", "Alice@example.com"));
        let err = validate::<AuthenticationPayload>(&raw, &alice()).unwrap_err();
        assert_eq!(err.code(), PaymailErrorCode::HandleMismatch);
    }

    #[test]
    fn test_keyfile_success() {
        let body = json!({"bsvalias": "1.0", "handle": "alice@example.com", "keyfile": "deadbeef"});
        let raw = RawResponse::new(200, serde_json::to_vec(&body).unwrap());
        let payload: KeyfilePayload = validate(&raw, &alice()).unwrap();
        assert_eq!(payload.keyfile, "deadbeef");
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct PubKeyPayload {
        bsvalias: String,
        handle: String,
        #[serde(rename = "pubkey")]
        pub_key: String,
    }

    impl CapabilityPayload for PubKeyPayload {
        const CAPABILITY: &'static str = "pki";

        fn bsvalias(&self) -> &str {
            &self.bsvalias
        }

        fn handle(&self) -> &str {
            &self.handle
        }

        fn check(&self) -> Result<()> {
            if self.pub_key.len() != 66 {
                return Err(PaymailError::InvalidPayload {
                    field: "pubkey".into(),
                    reason: format!("expected 66 characters, got {}", self.pub_key.len()),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_post_check_runs_after_gate() {
        let body = json!({"bsvalias": "1.0", "handle": "alice@example.com", "pubkey": "02ab"});
        let raw = RawResponse::new(200, serde_json::to_vec(&body).unwrap());
        let err = validate::<PubKeyPayload>(&raw, &alice()).unwrap_err();
        assert_eq!(err.code(), PaymailErrorCode::InvalidPayload);

        let body = json!({"bsvalias": "1.0", "handle": "bob@example.com", "pubkey": "02ab"});
        let raw = RawResponse::new(200, serde_json::to_vec(&body).unwrap());
        let err = validate::<PubKeyPayload>(&raw, &alice()).unwrap_err();
        assert_eq!(err.code(), PaymailErrorCode::HandleMismatch);
    }
}

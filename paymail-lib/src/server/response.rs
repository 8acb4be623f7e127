//! Handler output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::PaymailError;

/// Error envelope written for failed requests.
///
/// `message` keeps the shape clients decode as a server error; `code` is the
/// machine-readable classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl From<&PaymailError> for ErrorResponse {
    fn from(err: &PaymailError) -> Self {
        Self {
            code: err.code().as_str().to_string(),
            message: err.to_string(),
        }
    }
}

/// Status and JSON body for the router to write back.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body.
    pub body: Value,
}

impl ServerResponse {
    /// 200 response with `payload` as body.
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self { status: 200, body },
            Err(err) => Self::error(&PaymailError::MalformedPayload(err.to_string())),
        }
    }

    /// Error response classified from `err`.
    pub fn error(err: &PaymailError) -> Self {
        let envelope = ErrorResponse::from(err);
        Self {
            status: err.http_status(),
            body: serde_json::to_value(&envelope).unwrap_or_default(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Serialise the body for writing.
    pub fn body_bytes(&self) -> Vec<u8> {
        self.body.to_string().into_bytes()
    }
}

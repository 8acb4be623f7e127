//! Error types for paymail operations.
//!
//! Every failure produced by the client engine or the server mirror is one
//! member of [`PaymailError`]. The taxonomy is closed: callers match on it to
//! pick user-facing messages, and the server maps it onto HTTP statuses via
//! [`PaymailError::http_status`].

use std::fmt;

/// Stable error codes for FFI, logs, and machine-readable server responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PaymailErrorCode {
    /// Raw address is not `alias@domain`
    MalformedAddress = 1000,
    /// Capability URL is empty or not https
    InvalidEndpoint = 1001,
    /// Network failure before a response was received
    Transport = 2000,
    /// Provider answered with a non-success status and an error body
    ServerError = 3000,
    /// Provider answered with a non-success status and an undecodable body
    MalformedErrorBody = 3001,
    /// Success body did not match the payload shape
    MalformedPayload = 4000,
    /// Payload carried an empty `bsvalias` version
    MissingProtocolVersion = 4001,
    /// Payload handle does not echo the requested address
    HandleMismatch = 4002,
    /// Payload failed an operation-specific check
    InvalidPayload = 4003,
    /// Domain is not served by this server
    UnknownDomain = 5000,
    /// No record stored for the address
    PaymailNotFound = 5001,
    /// Data layer failure while looking up a paymail record
    Provider = 5002,
    /// Data layer failure while looking up an authentication URL
    AuthenticationLookup = 5003,
}

impl PaymailErrorCode {
    /// Machine-readable code used in server error envelopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedAddress => "invalid-parameter",
            Self::InvalidEndpoint => "invalid-endpoint",
            Self::Transport => "transport-error",
            Self::ServerError => "server-error",
            Self::MalformedErrorBody => "malformed-error-body",
            Self::MalformedPayload => "malformed-payload",
            Self::MissingProtocolVersion => "missing-bsvalias-version",
            Self::HandleMismatch => "handle-mismatch",
            Self::InvalidPayload => "invalid-payload",
            Self::UnknownDomain => "unknown-domain",
            Self::PaymailNotFound => "not-found",
            Self::Provider => "error-finding-paymail",
            Self::AuthenticationLookup => "error-getting-authentication-url",
        }
    }
}

impl fmt::Display for PaymailErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comprehensive error type for paymail operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymailError {
    /// The address could not be split into a non-empty alias and domain.
    MalformedAddress {
        /// The input as received
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// The capability URL is empty or does not use https.
    InvalidEndpoint {
        /// The URL as received
        url: String,
        /// What was wrong with it
        reason: String,
    },

    /// Transport/network layer error.
    Transport(String),

    /// Provider returned a non-200/304 status with a decodable error body.
    ServerError {
        /// HTTP status code
        code: u16,
        /// Message from the `{"message": ...}` body
        message: String,
    },

    /// Provider returned a non-200/304 status and the body was not an error envelope.
    MalformedErrorBody {
        /// HTTP status code
        code: u16,
        /// Decoder failure
        reason: String,
    },

    /// The success body could not be decoded into the expected payload.
    MalformedPayload(String),

    /// The payload `bsvalias` field was empty.
    MissingProtocolVersion,

    /// The payload handle does not match the requested `alias@domain`.
    HandleMismatch {
        /// Handle that was requested
        expected: String,
        /// Handle the provider echoed back
        observed: String,
    },

    /// The payload passed the common checks but failed an operation-specific one.
    InvalidPayload {
        /// Payload field at fault
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Server side: the requested domain is not in the allow-list.
    UnknownDomain {
        /// Sanitised domain
        domain: String,
    },

    /// Server side: no record exists for the address.
    PaymailNotFound {
        /// Canonical handle that was looked up
        handle: String,
    },

    /// Server side: the data layer failed.
    Provider {
        /// Lookup that failed
        operation: String,
        /// Underlying error message
        reason: String,
    },

    /// Server side: the data layer failed to produce an authentication URL.
    AuthenticationLookup {
        /// Underlying error message
        reason: String,
    },
}

impl PaymailError {
    /// Get the stable error code.
    pub fn code(&self) -> PaymailErrorCode {
        match self {
            Self::MalformedAddress { .. } => PaymailErrorCode::MalformedAddress,
            Self::InvalidEndpoint { .. } => PaymailErrorCode::InvalidEndpoint,
            Self::Transport(_) => PaymailErrorCode::Transport,
            Self::ServerError { .. } => PaymailErrorCode::ServerError,
            Self::MalformedErrorBody { .. } => PaymailErrorCode::MalformedErrorBody,
            Self::MalformedPayload(_) => PaymailErrorCode::MalformedPayload,
            Self::MissingProtocolVersion => PaymailErrorCode::MissingProtocolVersion,
            Self::HandleMismatch { .. } => PaymailErrorCode::HandleMismatch,
            Self::InvalidPayload { .. } => PaymailErrorCode::InvalidPayload,
            Self::UnknownDomain { .. } => PaymailErrorCode::UnknownDomain,
            Self::PaymailNotFound { .. } => PaymailErrorCode::PaymailNotFound,
            Self::Provider { .. } => PaymailErrorCode::Provider,
            Self::AuthenticationLookup { .. } => PaymailErrorCode::AuthenticationLookup,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status a server answers with when this error ends a request.
    ///
    /// Input validation is a client fault (400), a missing record is 404,
    /// data layer failures are 417, and anything raised while talking to an
    /// upstream provider is 502.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MalformedAddress { .. }
            | Self::InvalidEndpoint { .. }
            | Self::UnknownDomain { .. } => 400,
            Self::PaymailNotFound { .. } => 404,
            Self::Provider { .. } | Self::AuthenticationLookup { .. } => 417,
            Self::Transport(_)
            | Self::ServerError { .. }
            | Self::MalformedErrorBody { .. }
            | Self::MalformedPayload(_)
            | Self::MissingProtocolVersion
            | Self::HandleMismatch { .. }
            | Self::InvalidPayload { .. } => 502,
        }
    }

    /// Returns true if the failure happened before any network call was made.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedAddress { .. } | Self::InvalidEndpoint { .. }
        )
    }

    /// Create a transport error from any error type.
    pub fn transport<E: std::error::Error>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create a malformed address error.
    pub fn malformed_address(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAddress {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a data layer error.
    pub fn provider(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Provider {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PaymailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedAddress { input, reason } => {
                write!(f, "invalid paymail {:?}: {}", input, reason)
            }
            Self::InvalidEndpoint { url, reason } => {
                write!(f, "invalid url {:?}: {}", url, reason)
            }
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::ServerError { code, message } => write!(
                f,
                "bad response from paymail provider: code {}, message: {}",
                code, message
            ),
            Self::MalformedErrorBody { code, reason } => write!(
                f,
                "bad response from paymail provider: code {}, unreadable error body: {}",
                code, reason
            ),
            Self::MalformedPayload(msg) => write!(f, "malformed payload: {}", msg),
            Self::MissingProtocolVersion => write!(f, "missing bsvalias version"),
            Self::HandleMismatch { expected, observed } => write!(
                f,
                "response handle {} does not match paymail address: {}",
                observed, expected
            ),
            Self::InvalidPayload { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            Self::UnknownDomain { domain } => write!(f, "domain unknown: {}", domain),
            Self::PaymailNotFound { handle } => write!(f, "paymail not found: {}", handle),
            Self::Provider { operation, reason } => {
                write!(f, "{} failed: {}", operation, reason)
            }
            Self::AuthenticationLookup { reason } => {
                write!(f, "error getting authentication url: {}", reason)
            }
        }
    }
}

impl std::error::Error for PaymailError {}

//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use paymail_lib::prelude::*;
//! ```

// Core types
pub use crate::address::{sanitize_paymail, PaymailAddress};
pub use crate::template::CapabilityUrl;

// Error handling
pub use crate::errors::{PaymailError, PaymailErrorCode};
pub use crate::Result;

// Client engine
pub use crate::client::{CapabilityResponse, PaymailClient};
pub use crate::protocol::{AuthenticationPayload, CapabilityPayload, KeyfilePayload};

// Transport
pub use crate::transport::{RawResponse, RequestExecutor};

#[cfg(feature = "http-executor")]
pub use crate::transport::{HttpExecutor, HttpExecutorConfig};

// Server mirror
pub use crate::server::{PaymailServer, PaymailServiceProvider, RequestMetadata, ServerConfig};

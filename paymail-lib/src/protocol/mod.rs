//! bsvalias protocol definitions.
//!
//! - [`payload`]: wire shapes for each capability and the error envelope
//! - [`validator`]: the status/decode/version/handle gate every response passes

pub mod payload;
pub mod validator;

pub use payload::{AuthenticationPayload, CapabilityPayload, KeyfilePayload, ServerErrorPayload};
pub use validator::validate;

/// Protocol version served when none is configured.
pub const DEFAULT_BSVALIAS_VERSION: &str = "1.0";

/// HTTP status codes accepted as a success envelope.
pub const SUCCESS_STATUS_CODES: [u16; 2] = [200, 304];

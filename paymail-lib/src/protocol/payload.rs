//! Wire payloads for capability responses.
//!
//! Every capability response carries `bsvalias` and `handle`; operations add
//! their own fields. A new capability is supported by defining its payload
//! struct and implementing [`CapabilityPayload`] for it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Result;

/// Behaviour shared by every capability response payload.
pub trait CapabilityPayload: DeserializeOwned + Serialize + Send {
    /// Capability name, used in logs and error context.
    const CAPABILITY: &'static str;

    /// Protocol version carried in the `bsvalias` field.
    fn bsvalias(&self) -> &str;

    /// Handle the provider echoed back.
    fn handle(&self) -> &str;

    /// Operation-specific checks run after the common gate passes.
    fn check(&self) -> Result<()> {
        Ok(())
    }
}

/// Response of the authentication-URL capability.
///
/// ```json
/// {
///   "bsvalias": "1.0",
///   "handle": "<alias>@<domain>.<tld>",
///   "authenticationURL": "..."
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationPayload {
    /// Version of paymail.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bsvalias: String,
    /// The `<alias>@<domain>.<tld>`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub handle: String,
    /// URL of the authentication endpoint.
    #[serde(rename = "authenticationURL")]
    pub authentication_url: String,
}

impl CapabilityPayload for AuthenticationPayload {
    const CAPABILITY: &'static str = "authentication";

    fn bsvalias(&self) -> &str {
        &self.bsvalias
    }

    fn handle(&self) -> &str {
        &self.handle
    }
}

/// Response of the encrypted-keyfile capability.
///
/// The keyfile is an opaque encrypted blob; its encoding (base64 or hex) is
/// chosen by the server and not interpreted here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyfilePayload {
    /// Version of paymail.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bsvalias: String,
    /// The `<alias>@<domain>.<tld>`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub handle: String,
    /// The encrypted keyfile.
    pub keyfile: String,
}

impl CapabilityPayload for KeyfilePayload {
    const CAPABILITY: &'static str = "keyfile";

    fn bsvalias(&self) -> &str {
        &self.bsvalias
    }

    fn handle(&self) -> &str {
        &self.handle
    }
}

/// Body of a non-success response.
///
/// Any JSON object decodes; a missing or null `message` is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerErrorPayload {
    /// Human-readable failure description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

/// Absent and `null` string fields both decode as `""`.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

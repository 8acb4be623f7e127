//! CLI command implementations

pub mod fetch;
pub mod parse;
pub mod resolve;

/// How command results are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable key/value lines
    Text,
    /// One JSON document on stdout
    Json,
}

//! Server-side capability handlers.
//!
//! Framework-agnostic mirror of the client engine: a handler receives the raw
//! `paymailAddress` path parameter, sanitises it, checks the domain against
//! [`ServerConfig`], looks the record up through a
//! [`PaymailServiceProvider`], and answers with a [`ServerResponse`] carrying
//! the same payload shapes the client validates. Mounting the handlers on an
//! HTTP router is left to the embedding application.

mod config;
mod handlers;
mod provider;
mod response;

pub use config::ServerConfig;
pub use handlers::PaymailServer;
pub use provider::{AuthenticationInfo, PaymailRecord, PaymailServiceProvider, RequestMetadata};
pub use response::{ErrorResponse, ServerResponse};

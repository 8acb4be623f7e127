//! Test utilities for paymail.
//!
//! This module provides in-memory doubles for the external collaborators:
//! - [`MockExecutor`]: scripted [`RequestExecutor`](crate::RequestExecutor)
//!   that records every URL it is asked to fetch
//! - [`InMemoryProvider`]: [`PaymailServiceProvider`](crate::server::PaymailServiceProvider)
//!   backed by a map of records
//! - [`fixtures`]: canned payload bodies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paymail_lib::test_utils::{fixtures, MockExecutor};
//! use paymail_lib::{PaymailClient, RawResponse};
//!
//! let executor = MockExecutor::new();
//! executor.respond_default(RawResponse::new(200, fixtures::keyfile_body("alice@example.com")));
//! let client = PaymailClient::new(executor);
//! ```

pub mod fixtures;
mod mock_executor;
mod mock_provider;

pub use mock_executor::MockExecutor;
pub use mock_provider::InMemoryProvider;

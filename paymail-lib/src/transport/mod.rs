//! Request execution.
//!
//! The engine never talks to the network directly: it hands a resolved URL to
//! a [`RequestExecutor`] and receives a [`RawResponse`]. Callers inject the
//! executor, which keeps the engine usable with any HTTP stack and trivially
//! mockable in tests.

#[cfg(feature = "http-executor")]
mod http;
mod traits;

#[cfg(feature = "http-executor")]
pub use http::{HttpExecutor, HttpExecutorConfig};
pub use traits::{RawResponse, RequestExecutor};

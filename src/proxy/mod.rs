//! Client for the remote completion endpoint.

mod client;
mod errors;
mod types;

pub use client::ProxyClient;
pub use errors::{ProxyError, ProxyErrorKind};

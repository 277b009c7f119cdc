//! restcall - a small, opinionated JSON REST calling convention
//!
//! This crate wraps an HTTP transport with path-segment URL construction,
//! JSON default headers and a per-request hook for cross-cutting options such
//! as credentials or CSRF headers.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod utils;

pub use config::{HttpMethod, RestConfig, TransportConfig};
pub use error::{RestError, Result};
pub use http::{PathSpec, QueryParams, RequestOptions, RestClient, Transport, TransportResponse};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

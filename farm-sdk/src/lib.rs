//! # Farm SDK
//!
//! Resilient data access for the Farm-Guru backend.
//!
//! This crate provides:
//!
//! - A request gateway whose operations always return usable data
//! - A precomputed fallback table served when the backend cannot be used
//! - The HTTP transport and the `Transport` seam for tests
//! - Error types, configuration providers and logging setup
//!
//! ## Architecture
//!
//! - `Gateway`: one method per backend capability, returning `Envelope<T>`
//! - `Envelope`: either `Live(T)` or `Fallback { data, cause }`
//! - `FallbackTable`: static substitute data, built once per gateway
//! - `Transport`: sends an `ApiRequest` once; `HttpTransport` is the reqwest implementation
//! - `ServiceError`: transport and decoding failures, classified into `FallbackCause`

pub mod core;
pub use self::core::{ApiRequest, ClientBuilder, HttpTransport, Transport};

pub mod error;
pub use error::{ErrorContext, Result, ServiceError};

pub mod config;
pub use config::{ConfigProvider, GatewayConfig, ServiceConfig};

pub mod envelope;
pub use envelope::{Envelope, FallbackCause, HasMeta, Meta};

pub mod models;

pub mod fallback;
pub use fallback::FallbackTable;

pub mod gateway;
pub use gateway::Gateway;

pub mod logging;
pub use logging::{init_logging, LoggingConfig};

pub mod util;

#[cfg(test)]
mod tests;

/// Create a new default client builder
pub fn client() -> self::core::ClientBuilder {
    self::core::ClientBuilder::new()
}

/// Gateway configured from the environment, loading `.env` first
pub fn gateway_from_env() -> Result<Gateway> {
    config::load_dotenv();
    Gateway::from_env()
}

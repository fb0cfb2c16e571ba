//! # Structured Logging
//!
//! Installs a global `tracing` subscriber for applications embedding the SDK.
//! The gateway itself only emits events; it never installs a subscriber.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::config::{ConfigProvider, ConfigProviderExt};
use crate::error::{Result, ServiceError};

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Configuration for the logging system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
    /// Reported once at startup
    pub service_name: String,
    pub json_format: bool,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            service_name: "farm-guru".to_string(),
            json_format: false,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Read `log_level` and `log_json` from a provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Self {
        let defaults = Self::default();
        Self {
            level: provider.get_string("log_level").unwrap_or(defaults.level),
            json_format: provider.get_bool_or("log_json", defaults.json_format),
            ..defaults
        }
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    if LOGGING_INITIALIZED.load(Ordering::SeqCst) {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},hyper=warn,reqwest=warn", config.level)));

    let registry = Registry::default().with(filter);

    // JSON and text layers have different types, so each branch installs its own
    let installed = if config.json_format {
        let layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_target(config.with_target);
        tracing::subscriber::set_global_default(registry.with(layer))
    } else {
        let layer = fmt::layer().with_target(config.with_target);
        tracing::subscriber::set_global_default(registry.with(layer))
    };

    installed.map_err(|e| {
        ServiceError::configuration(format!("Failed to set global subscriber: {}", e))
    })?;

    LOGGING_INITIALIZED.store(true, Ordering::SeqCst);

    tracing::info!(
        service = %config.service_name,
        level = %config.level,
        json = config.json_format,
        "Structured logging initialized"
    );

    Ok(())
}

pub fn is_initialized() -> bool {
    LOGGING_INITIALIZED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigProvider;

    #[test]
    fn test_config_from_provider() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("log_level", "debug");
        provider.set("log_json", "true");

        let config = LoggingConfig::from_provider(&provider);
        assert_eq!(config.level, "debug");
        assert!(config.json_format);
        assert_eq!(config.service_name, "farm-guru");
    }

    #[test]
    fn test_init_is_idempotent() {
        // Another test binary may already own the global subscriber
        let first = init_logging(LoggingConfig::default());
        if first.is_ok() {
            assert!(is_initialized());
            assert!(init_logging(LoggingConfig::default()).is_ok());
        }
    }
}

//! Configuration management for the Farm SDK
//!
//! Values come from environment variables (optionally seeded from a `.env`
//! file) or from an in-memory provider in tests.

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::util::parse_duration;

/// Development backend address used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default timeout for gateway requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a boolean configuration value
    fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self.get_string(key)?;
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => Err(ServiceError::configuration(format!(
                "Invalid boolean value for key {}: {}",
                key, value
            ))),
        }
    }

    /// Get a duration such as `10s`, `500ms` or `2m` (plain numbers are seconds)
    fn get_duration(&self, key: &str) -> Result<Duration> {
        let value = self.get_string(key)?;
        parse_duration(&value)
            .ok_or_else(|| ServiceError::configuration(format!("Invalid duration for key {}: {}", key, value)))
    }

    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    fn get_duration_or(&self, key: &str, default: Duration) -> Duration {
        self.get_duration(key).unwrap_or(default)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,

    /// Optional namespace for variables (e.g., "ANALYTICS")
    namespace: Option<String>,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Format a configuration key as an environment variable
    pub(crate) fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        if let Some(ref namespace) = self.namespace {
            env_key.push_str(namespace);
            env_key.push('_');
        }

        env_key.push_str(&key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_"));

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key).map_err(|e| match e {
            env::VarError::NotPresent => {
                ServiceError::configuration(format!("Environment variable not set: {}", env_key))
            }
            env::VarError::NotUnicode(_) => ServiceError::configuration(format!(
                "Environment variable is not valid unicode: {}",
                env_key
            )),
        })
    }
}

/// In-memory config provider for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// Global default configuration provider (`FARMGURU_*` variables)
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> =
    Lazy::new(|| Arc::new(EnvConfigProvider::new().with_prefix("FARMGURU")));

/// Load a `.env` file from the working directory if one exists.
///
/// Returns true when a file was found. Existing environment variables win.
pub fn load_dotenv() -> bool {
    match dotenv::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            true
        }
        Err(_) => false,
    }
}

/// Trait for component configuration
pub trait ServiceConfig: Debug + Send + Sync {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;
}

/// Configuration for the request gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("Farm-Guru-SDK/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GatewayConfig {
    /// Config pointing at an explicit backend
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            ..Self::default()
        }
    }

    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let defaults = Self::default();
        let base_url = normalize_base_url(&provider.get_string_or("api_url", DEFAULT_API_URL));
        let timeout = provider.get_duration_or("api_timeout", defaults.timeout);
        let user_agent = provider.get_string_or("user_agent", &defaults.user_agent);

        let config = Self {
            base_url,
            timeout,
            user_agent,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `FARMGURU_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_provider(&**DEFAULT_PROVIDER)
    }
}

impl ServiceConfig for GatewayConfig {
    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ServiceError::configuration("Backend base URL is required"));
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ServiceError::configuration(format!("Invalid backend URL {}: {}", self.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ServiceError::configuration(format!(
                "Backend URL must use http or https: {}",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(ServiceError::configuration("Request timeout must be greater than zero"));
        }

        Ok(())
    }
}

/// Trim whitespace and trailing slashes so paths can be appended safely
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_formatting() {
        let provider = EnvConfigProvider::new()
            .with_prefix("FARMGURU")
            .with_namespace("ANALYTICS");

        assert_eq!(provider.format_key("enabled"), "FARMGURU_ANALYTICS_ENABLED");
        assert_eq!(provider.format_key("api-url"), "FARMGURU_ANALYTICS_API_URL");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(" http://localhost:8000/ "), "http://localhost:8000");
        assert_eq!(normalize_base_url("https://api.farm.guru//"), "https://api.farm.guru");
    }
}

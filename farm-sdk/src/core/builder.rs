//! Client builder implementation
//!
//! Builds the reqwest client shared by the gateway transport and the
//! analytics sink.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client as ReqwestClient;

use crate::config::{normalize_base_url, GatewayConfig, ServiceConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::core::http::HttpTransport;
use crate::error::{Result, ServiceError};

/// Builder for HTTP clients and transports
pub struct ClientBuilder {
    /// Base URL for the backend
    base_url: String,

    /// Custom headers to include with all requests
    custom_headers: HashMap<String, String>,

    /// Request timeout
    timeout: Duration,

    /// User agent
    user_agent: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            custom_headers: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: Some(GatewayConfig::default().user_agent),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded gateway configuration
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            user_agent: Some(config.user_agent.clone()),
            ..Self::default()
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&url.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an HTTP client with the configured settings
    pub fn build_http_client(&self) -> Result<ReqwestClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(ref user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let mut headers = HeaderMap::new();
        for (key, value) in &self.custom_headers {
            let header_name = HeaderName::from_str(key)
                .map_err(|e| ServiceError::configuration(format!("Invalid header name: {}", e)))?;

            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ServiceError::configuration(format!("Invalid header value: {}", e)))?;

            headers.insert(header_name, header_value);
        }

        builder
            .default_headers(headers)
            .build()
            .map_err(|e| ServiceError::configuration(format!("Failed to build HTTP client: {}", e)))
    }

    /// Build the reqwest-backed transport
    pub fn build(self) -> Result<HttpTransport> {
        let config = GatewayConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            user_agent: self.user_agent.clone().unwrap_or_default(),
        };
        config.validate()?;

        let client = self.build_http_client()?;
        Ok(HttpTransport::new(client, self.base_url))
    }
}

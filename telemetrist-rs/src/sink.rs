//! Fire-and-forget event delivery

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use farm_sdk::config::{
    normalize_base_url, ConfigProvider, ConfigProviderExt, DEFAULT_API_URL, DEFAULT_PROVIDER,
};
use farm_sdk::ClientBuilder;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sanitize::sanitize_payload;
use crate::TelemetristError;

pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(3);

pub const ANALYTICS_PATH: &str = "/api/analytics";

/// Configuration for the event sink
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Initial value of the runtime switch
    pub enabled: bool,
    pub endpoint: String,
    /// Upper bound on one send, connection included
    pub timeout: Duration,
}

impl SinkConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            enabled: true,
            endpoint: endpoint.into(),
            timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    /// Sink for the analytics route of a backend base URL
    pub fn for_backend(base_url: &str) -> Self {
        Self::new(format!("{}{}", normalize_base_url(base_url), ANALYTICS_PATH))
    }

    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Self {
        let base_url = provider.get_string_or("api_url", DEFAULT_API_URL);
        Self {
            enabled: provider.get_bool_or("analytics_enabled", true),
            timeout: provider.get_duration_or("analytics_timeout", DEFAULT_SEND_TIMEOUT),
            ..Self::for_backend(&base_url)
        }
    }

    /// Load from `FARMGURU_*` environment variables
    pub fn from_env() -> Self {
        Self::from_provider(&**DEFAULT_PROVIDER)
    }
}

/// One tracked action, already sanitized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_name: String,
    pub payload: Map<String, Value>,
}

impl EventRecord {
    pub fn new(event_name: &str, payload: &Value) -> Result<Self, TelemetristError> {
        let event_name = event_name.trim();
        if event_name.is_empty() {
            return Err(TelemetristError::InvalidEvent("event name is empty".to_string()));
        }

        let payload = match payload {
            Value::Object(map) => sanitize_payload(map),
            Value::Null => Map::new(),
            other => {
                return Err(TelemetristError::InvalidEvent(format!(
                    "payload must be an object, got {}",
                    kind(other)
                )))
            }
        };

        Ok(Self {
            event_name: event_name.to_string(),
            payload,
        })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// What happened to one event. Only ever inspected for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    Disabled,
    Rejected,
    TimedOut,
    Failed(String),
}

/// Best-effort analytics sink. Clones share the enable switch.
#[derive(Debug, Clone)]
pub struct EventSink {
    config: Arc<SinkConfig>,
    enabled: Arc<AtomicBool>,
    http_client: reqwest::Client,
}

impl EventSink {
    pub fn new(config: SinkConfig) -> Result<Self, TelemetristError> {
        let http_client = ClientBuilder::new()
            .timeout(config.timeout)
            .build_http_client()
            .map_err(|e| TelemetristError::Http(e.to_string()))?;

        Ok(Self::with_client(config, http_client))
    }

    pub fn with_client(config: SinkConfig, http_client: reqwest::Client) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(config.enabled)),
            config: Arc::new(config),
            http_client,
        }
    }

    pub fn from_env() -> Result<Self, TelemetristError> {
        Self::new(SinkConfig::from_env())
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Queue the event on the current runtime and return immediately.
    ///
    /// Without a tokio runtime the event is dropped.
    pub fn track(&self, event_name: impl Into<String>, payload: Value) {
        if !self.is_enabled() {
            return;
        }

        let event_name = event_name.into();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let sink = self.clone();
                handle.spawn(async move {
                    sink.send(&event_name, &payload).await;
                });
            }
            Err(_) => debug!("No async runtime, dropping analytics event {}", event_name),
        }
    }

    /// Sanitize and send one event, waiting at most the configured timeout
    pub async fn send(&self, event_name: &str, payload: &Value) -> SendOutcome {
        if !self.is_enabled() {
            return SendOutcome::Disabled;
        }

        let record = match EventRecord::new(event_name, payload) {
            Ok(record) => record,
            Err(e) => {
                debug!("Analytics event rejected: {}", e);
                return SendOutcome::Rejected;
            }
        };

        match tokio::time::timeout(self.config.timeout, self.deliver(&record)).await {
            Ok(Ok(())) => SendOutcome::Delivered,
            Ok(Err(TelemetristError::Timeout(e))) => {
                trace!("Analytics event {} timed out: {}", record.event_name, e);
                SendOutcome::TimedOut
            }
            Ok(Err(e)) => {
                debug!("Analytics event {} not delivered: {}", record.event_name, e);
                SendOutcome::Failed(e.to_string())
            }
            Err(_) => {
                trace!("Analytics event {} timed out after {:?}", record.event_name, self.config.timeout);
                SendOutcome::TimedOut
            }
        }
    }

    async fn deliver(&self, record: &EventRecord) -> Result<(), TelemetristError> {
        let body = serde_json::to_vec(record).map_err(|e| TelemetristError::Serialization(e.to_string()))?;

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TelemetristError::Timeout(e.to_string())
                } else {
                    TelemetristError::Http(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(TelemetristError::Http(format!(
                "Analytics endpoint returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

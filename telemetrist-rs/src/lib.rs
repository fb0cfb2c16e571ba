//! # Telemetrist - Analytics Event Sink
//!
//! Best-effort usage analytics for Farm-Guru clients. Payloads are stripped of
//! personal fields before they leave the process, each event is sent once
//! with a bounded timeout, and every failure is swallowed.
//!
//! ```no_run
//! use serde_json::json;
//! use telemetrist::{EventSink, SinkConfig};
//!
//! # async fn demo() -> Result<(), telemetrist::TelemetristError> {
//! let sink = EventSink::new(SinkConfig::for_backend("http://localhost:8000"))?;
//! sink.track("image_uploaded", json!({"feature": "upload", "crop": "tomato"}));
//! # Ok(())
//! # }
//! ```

pub mod sanitize;
pub mod sink;

pub use sanitize::{is_pii_key, sanitize_payload};
pub use sink::{EventRecord, EventSink, SendOutcome, SinkConfig};

#[derive(Debug, thiserror::Error)]
pub enum TelemetristError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

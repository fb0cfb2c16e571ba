//! Live-or-fallback result of a gateway operation
//!
//! On the wire both variants look the same: a live result serializes as the
//! exact body the backend sent, a fallback as the table entry with its `meta`
//! object. In Rust the variant says where the data came from and, for
//! fallbacks, why.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ServiceError;

/// Free-form metadata attached to every response
pub type Meta = Map<String, Value>;

/// Key marking a response as static substitute data
pub const FALLBACK_REASON_KEY: &str = "fallback_reason";

/// Responses that carry a `meta` object
pub trait HasMeta {
    fn meta(&self) -> &Meta;

    /// `meta.fallback_reason`, if the backend or the fallback table set one
    fn fallback_reason(&self) -> Option<&str> {
        self.meta().get(FALLBACK_REASON_KEY).and_then(Value::as_str)
    }
}

/// Why the gateway substituted fallback data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackCause {
    /// DNS failure, connection refused or reset
    Unreachable(String),
    /// The request exceeded its timeout
    Timeout,
    /// The backend answered with a non-success status
    Status(u16),
    /// The body could not be decoded into the expected shape
    Malformed(String),
    /// The request could not be built locally
    InvalidRequest(String),
}

impl From<&ServiceError> for FallbackCause {
    fn from(err: &ServiceError) -> Self {
        match err.root() {
            ServiceError::Timeout(_) => FallbackCause::Timeout,
            ServiceError::Network(msg) => FallbackCause::Unreachable(msg.clone()),
            ServiceError::Http { status, .. } => FallbackCause::Status(*status),
            ServiceError::Parsing(msg) => FallbackCause::Malformed(msg.clone()),
            ServiceError::Validation(msg) | ServiceError::Configuration(msg) => {
                FallbackCause::InvalidRequest(msg.clone())
            }
            other => FallbackCause::Unreachable(other.to_string()),
        }
    }
}

impl fmt::Display for FallbackCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackCause::Unreachable(msg) => write!(f, "backend unreachable: {}", msg),
            FallbackCause::Timeout => write!(f, "backend timed out"),
            FallbackCause::Status(status) => write!(f, "backend returned HTTP {}", status),
            FallbackCause::Malformed(msg) => write!(f, "malformed response: {}", msg),
            FallbackCause::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
        }
    }
}

/// Result of a gateway operation. Always holds usable data.
///
/// `Live` keeps the decoded view next to the body it was decoded from, so
/// numbers, nulls and unknown fields reach the caller untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Live { data: T, body: Value },
    Fallback { data: T, cause: FallbackCause },
}

impl<T> Envelope<T> {
    pub fn data(&self) -> &T {
        match self {
            Envelope::Live { data, .. } | Envelope::Fallback { data, .. } => data,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Envelope::Live { data, .. } | Envelope::Fallback { data, .. } => data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Envelope::Fallback { .. })
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Envelope::Live { .. })
    }

    pub fn cause(&self) -> Option<&FallbackCause> {
        match self {
            Envelope::Live { .. } => None,
            Envelope::Fallback { cause, .. } => Some(cause),
        }
    }

    /// The backend body, unmodified, for live results
    pub fn body(&self) -> Option<&Value> {
        match self {
            Envelope::Live { body, .. } => Some(body),
            Envelope::Fallback { .. } => None,
        }
    }
}

impl<T: HasMeta> Envelope<T> {
    /// The banner text for degraded responses
    pub fn fallback_reason(&self) -> Option<&str> {
        self.data().fallback_reason()
    }
}

/// Live results serialize as the backend body, fallbacks as the table entry
impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Live { body, .. } => body.serialize(serializer),
            Envelope::Fallback { data, .. } => data.serialize(serializer),
        }
    }
}

/// Build a `meta` object marking fallback data
pub(crate) fn fallback_meta(reason: &str) -> Meta {
    let mut meta = Meta::new();
    meta.insert("mode".to_string(), Value::from("fallback"));
    meta.insert(FALLBACK_REASON_KEY.to_string(), Value::from(reason));
    meta
}

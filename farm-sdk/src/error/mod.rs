//! Error handling for the Farm SDK
//!
//! Errors never escape a gateway operation. They exist so the transport can
//! report what went wrong and the gateway can log it and classify the
//! fallback cause.

use thiserror::Error;

pub mod mapping;

/// Result type for Farm SDK internals
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the Farm SDK
#[derive(Error, Debug)]
pub enum ServiceError {
    /// DNS, connection refused, reset, too many redirects
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// The backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// The outbound request could not be built
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors with additional context
    #[error("{inner}")]
    WithContext {
        inner: Box<ServiceError>,
        context: ErrorContext,
    },
}

impl ServiceError {
    pub fn network(message: impl Into<String>) -> Self {
        ServiceError::Network(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        ServiceError::Timeout(message.into())
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ServiceError::Http {
            status,
            message: message.into(),
        }
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        ServiceError::Parsing(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ServiceError::Configuration(message.into())
    }

    /// Add context to an existing error
    pub fn with_context(self, context: ErrorContext) -> Self {
        ServiceError::WithContext {
            inner: Box::new(self),
            context,
        }
    }

    /// The innermost error, with every context layer removed
    pub fn root(&self) -> &ServiceError {
        match self {
            ServiceError::WithContext { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// Get the operation name if one was attached
    pub fn operation(&self) -> Option<&str> {
        match self {
            ServiceError::WithContext { context, inner } => {
                context.operation.as_deref().or_else(|| inner.operation())
            }
            _ => None,
        }
    }

    /// HTTP status code if the backend answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::Http { status, .. } => Some(*status),
            ServiceError::WithContext { inner, context } => {
                context.status_code.or_else(|| inner.status_code())
            }
            _ => None,
        }
    }

    /// Request id attached by the transport, if any
    pub fn request_id(&self) -> Option<&str> {
        match self {
            ServiceError::WithContext { context, inner } => {
                context.request_id.as_deref().or_else(|| inner.request_id())
            }
            _ => None,
        }
    }

    /// Backend path the failed request was sent to
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ServiceError::WithContext { context, inner } => {
                context.endpoint.as_deref().or_else(|| inner.endpoint())
            }
            _ => None,
        }
    }
}

/// Error context information
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Gateway operation that produced the error
    pub operation: Option<String>,

    /// HTTP status code if applicable
    pub status_code: Option<u16>,

    /// Request ID for log correlation
    pub request_id: Option<String>,

    /// Endpoint that was called
    pub endpoint: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new error context for a gateway operation
    pub fn for_operation(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Self::default()
        }
    }

    pub fn status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Convert reqwest errors to ServiceError
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::timeout(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ServiceError::network(format!("Connection error: {}", err))
        } else if err.is_redirect() {
            ServiceError::network(format!("Too many redirects: {}", err))
        } else if err.is_decode() || err.is_body() {
            ServiceError::parsing(format!("Response decode error: {}", err))
        } else if err.is_builder() {
            ServiceError::validation(format!("Invalid request: {}", err))
        } else if let Some(status) = err.status() {
            ServiceError::http(status.as_u16(), err.to_string())
        } else {
            ServiceError::network(format!("HTTP client error: {}", err))
        }
    }
}

/// Convert serde_json errors to ServiceError
impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::parsing(format!("JSON error: {}", err))
    }
}

//! Error mapping for backend responses
//!
//! Converts a non-success HTTP response into a normalized `ServiceError`.
//! The backend (FastAPI) reports failures as `{"detail": "..."}`.

use reqwest::StatusCode;
use serde_json::Value;

use super::ServiceError;

const MAX_BODY_IN_MESSAGE: usize = 100;

/// Map a non-success status and its body to a ServiceError
pub fn map_http_error(status: StatusCode, body: &str) -> ServiceError {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let message = json
            .get("detail")
            .or_else(|| json.get("message"))
            .or_else(|| json.get("error"))
            .and_then(|m| m.as_str());

        if let Some(message) = message {
            return ServiceError::http(status.as_u16(), message);
        }
    }

    let message = if body.is_empty() {
        status.to_string()
    } else {
        let snippet: String = body.chars().take(MAX_BODY_IN_MESSAGE).collect();
        if snippet.len() < body.len() {
            format!("{}: {}...", status, snippet)
        } else {
            format!("{}: {}", status, snippet)
        }
    };

    ServiceError::http(status.as_u16(), message)
}

/// Classify an HTTP status for logging
pub fn classify_http_error(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 | 422 => "validation",
        401 => "authentication",
        403 => "authorization",
        404 => "not_found",
        408 => "timeout",
        429 => "rate_limit",
        500..=599 => "server",
        _ => "unknown",
    }
}

/// True for statuses caused by the request itself rather than the backend
pub fn is_client_error(status: StatusCode) -> bool {
    status.is_client_error()
}

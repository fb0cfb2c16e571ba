//! Core transport abstractions
//!
//! - `ApiRequest`: one outbound call, already sanitized
//! - `Transport`: executes an `ApiRequest` and yields the decoded JSON body
//! - `HttpTransport`: the reqwest-backed implementation
//! - `ClientBuilder`: builds the reqwest client and transport

pub mod builder;
pub mod http;

pub use builder::ClientBuilder;
pub use http::HttpTransport;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, ServiceError};

/// HTTP methods used by the backend contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A file attached to a multipart request
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Request body encodings
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart {
        fields: Vec<(String, String)>,
        file: FilePart,
    },
}

/// A single outbound call to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub request_id: String,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            request_id: crate::util::generate_request_id(),
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(path)
        }
    }

    /// Append a query parameter; absent values are never sent
    pub fn query_opt(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Attach a JSON body with every absent field removed
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ServiceError::validation(format!("Failed to serialize request: {}", e)))?;
        self.body = RequestBody::Json(prune_absent(value));
        Ok(self)
    }

    /// Attach a multipart body; absent text fields are never sent
    pub fn multipart(mut self, fields: Vec<(String, Option<String>)>, file: FilePart) -> Self {
        let fields = fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect();
        self.body = RequestBody::Multipart { fields, file };
        self
    }
}

/// Remove every object key whose value is null, at every nesting level
pub fn prune_absent(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let pruned: Map<String, Value> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, prune_absent(v)))
                .collect();
            Value::Object(pruned)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| if item.is_object() { prune_absent(item) } else { item })
                .collect(),
        ),
        other => other,
    }
}

/// Executes requests against the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request once and decode the success body as JSON.
    ///
    /// Non-success statuses, transport failures and undecodable bodies are
    /// all reported as errors.
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

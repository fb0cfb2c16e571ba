//! reqwest-backed transport

use std::time::Instant;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{ApiRequest, FilePart, Method, RequestBody, Transport};
use crate::error::{mapping, ErrorContext, Result, ServiceError};

/// Header carrying the per-call correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Sends `ApiRequest`s over HTTP with a single attempt
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, request: &ApiRequest) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| ServiceError::validation(format!("Invalid URL {}: {}", raw, e)))?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let url = self.build_url(&request)?;
        debug!(method = %request.method, url = %url, request_id = %request.request_id, "Sending backend request");

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        }
        .header(REQUEST_ID_HEADER, &request.request_id);

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart { fields, file } => builder.multipart(multipart_form(fields, file)?),
        };

        let start = Instant::now();
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(mapping::map_http_error(status, &body));
        }

        let bytes = response.bytes().await?;
        let value = serde_json::from_slice::<Value>(&bytes)?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Backend request succeeded"
        );
        Ok(value)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let context = ErrorContext::new()
            .endpoint(request.path.clone())
            .request_id(request.request_id.clone());

        self.execute(request).await.map_err(|e| {
            let context = match e.status_code() {
                Some(status) => context.status_code(status),
                None => context,
            };
            e.with_context(context)
        })
    }
}

fn multipart_form(fields: Vec<(String, String)>, file: FilePart) -> Result<Form> {
    let part = Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.mime_type)
        .map_err(|e| ServiceError::validation(format!("Invalid MIME type {}: {}", file.mime_type, e)))?;

    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    Ok(form.part(file.field, part))
}

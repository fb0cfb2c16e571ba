//! Request gateway
//!
//! One method per backend capability. Each sends a single request and returns
//! an [`Envelope`]: the live body, unmodified, when the backend answered with a
//! parseable success response, otherwise the matching [`FallbackTable`] entry.
//! Operations never return errors and never panic.

use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::core::{ApiRequest, ClientBuilder, FilePart, Transport};
use crate::envelope::{Envelope, FallbackCause};
use crate::error::{mapping, ErrorContext, Result, ServiceError};
use crate::fallback::FallbackTable;
use crate::models::{
    ChemRecoRequest, ChemRecoResponse, HealthStatus, ImageUpload, ImageUploadResponse,
    MarketRequest, MarketResponse, PolicyMatchRequest, PolicyMatchResponse, QueryHistory,
    QueryRequest, QueryResponse, SchemeCatalog, SchemeFilter, StatesResponse, WeatherRequest,
    WeatherResponse,
};

/// Resilient client for the Farm-Guru backend
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
    fallbacks: Arc<FallbackTable>,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("fallbacks_built_on", &self.fallbacks.built_on())
            .finish()
    }
}

impl Gateway {
    /// Gateway over HTTP using `config`
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let transport = ClientBuilder::from_config(&config).build()?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Gateway configured from `FARMGURU_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env()?)
    }

    /// Gateway over any transport, with a fallback table built for today
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::with_parts(transport, FallbackTable::for_today())
    }

    pub fn with_parts(transport: Arc<dyn Transport>, fallbacks: FallbackTable) -> Self {
        Self {
            transport,
            fallbacks: Arc::new(fallbacks),
        }
    }

    pub fn fallbacks(&self) -> &FallbackTable {
        &self.fallbacks
    }

    /// Ask the assistant a question
    pub async fn submit_query(&self, request: QueryRequest) -> Envelope<QueryResponse> {
        let api = ApiRequest::post("/api/query").json(&request);
        self.call("submit_query", api, || self.fallbacks.query()).await
    }

    /// Recent questions, optionally for one user
    pub async fn query_history(&self, user_id: Option<&str>, limit: Option<u32>) -> Envelope<QueryHistory> {
        let api = ApiRequest::get("/api/query/history")
            .query_opt("user_id", user_id)
            .query_opt("limit", limit);
        self.call("query_history", Ok(api), || self.fallbacks.query_history()).await
    }

    /// Forecast and advisories for a state or district
    pub async fn get_weather(&self, request: WeatherRequest) -> Envelope<WeatherResponse> {
        let api = ApiRequest::get("/api/weather")
            .query_opt("state", request.state)
            .query_opt("district", request.district);
        self.call("get_weather", Ok(api), || self.fallbacks.weather()).await
    }

    /// Mandi prices and a buy/sell/hold signal for one commodity
    pub async fn get_market_data(&self, request: MarketRequest) -> Envelope<MarketResponse> {
        let api = ApiRequest::get("/api/market")
            .query_opt("commodity", Some(&request.commodity))
            .query_opt("mandi", request.mandi.as_deref());
        let commodity = request.commodity;
        self.call("get_market_data", Ok(api), || self.fallbacks.market(&commodity)).await
    }

    /// Upload a crop photo as multipart form data
    pub async fn upload_image(&self, upload: ImageUpload) -> Envelope<ImageUploadResponse> {
        let api = if upload.bytes.is_empty() {
            Err(ServiceError::validation("Image upload has no content"))
        } else {
            let file = FilePart {
                field: "file".to_string(),
                file_name: upload.file_name,
                mime_type: upload.mime_type,
                bytes: upload.bytes,
            };
            let fields = vec![
                ("user_id".to_string(), upload.user_id),
                ("crop".to_string(), upload.crop),
            ];
            Ok(ApiRequest::post("/api/upload-image").multipart(fields, file))
        };
        self.call("upload_image", api, || self.fallbacks.image_upload()).await
    }

    /// Government schemes matching a farmer profile
    pub async fn match_policies(&self, request: PolicyMatchRequest) -> Envelope<PolicyMatchResponse> {
        let api = ApiRequest::post("/api/policy-match").json(&request);
        self.call("match_policies", api, || self.fallbacks.policy_match()).await
    }

    /// Scheme catalogue, optionally filtered by state and crop
    pub async fn list_schemes(&self, filter: SchemeFilter) -> Envelope<SchemeCatalog> {
        let api = ApiRequest::get("/api/policy/schemes")
            .query_opt("state", filter.state)
            .query_opt("crop", filter.crop)
            .query_opt("limit", filter.limit);
        self.call("list_schemes", Ok(api), || self.fallbacks.schemes()).await
    }

    /// States and union territories the backend knows
    pub async fn list_states(&self) -> Envelope<StatesResponse> {
        let api = ApiRequest::get("/api/policy/states");
        self.call("list_states", Ok(api), || self.fallbacks.states()).await
    }

    /// Diagnosis and treatment advice for crop symptoms
    pub async fn recommend_treatment(&self, request: ChemRecoRequest) -> Envelope<ChemRecoResponse> {
        let api = ApiRequest::post("/api/chem-reco").json(&request);
        self.call("recommend_treatment", api, || self.fallbacks.chem_reco()).await
    }

    /// Backend liveness report
    pub async fn health_check(&self) -> Envelope<HealthStatus> {
        let api = ApiRequest::get("/api/health");
        self.call("health_check", Ok(api), || self.fallbacks.health()).await
    }

    /// True when the health endpoint answered with a parseable body
    pub async fn is_backend_available(&self) -> bool {
        self.health_check().await.is_live()
    }

    async fn call<T, F>(&self, operation: &'static str, request: Result<ApiRequest>, fallback: F) -> Envelope<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                let err = err.with_context(ErrorContext::for_operation(operation));
                return degrade(&err, fallback());
            }
        };

        let context = ErrorContext::for_operation(operation).request_id(request.request_id.clone());
        let request_id = request.request_id.clone();

        // Decode a copy; the body itself is what the caller sees on the wire
        let outcome = self.transport.send(request).await.and_then(|body| -> Result<(T, Value)> {
            let data = serde_json::from_value::<T>(body.clone())?;
            Ok((data, body))
        });

        match outcome {
            Ok((data, body)) => {
                debug!(operation, request_id = %request_id, "Backend responded");
                Envelope::Live { data, body }
            }
            Err(err) => degrade(&err.with_context(context), fallback()),
        }
    }
}

/// Log the failure and wrap `data` as a fallback
fn degrade<T>(err: &ServiceError, data: T) -> Envelope<T> {
    let cause = FallbackCause::from(err);
    let status = err.status_code().and_then(|code| StatusCode::from_u16(code).ok());
    let kind = status.map(mapping::classify_http_error).unwrap_or("transport");
    let summary = if status.map(mapping::is_client_error).unwrap_or(false) {
        "Backend rejected the request; serving fallback data"
    } else {
        "Backend call failed; serving fallback data"
    };

    warn!(
        operation = err.operation().unwrap_or("-"),
        request_id = err.request_id().unwrap_or("-"),
        endpoint = err.endpoint().unwrap_or("-"),
        kind,
        cause = %cause,
        error = %err,
        "{}",
        summary
    );

    Envelope::Fallback { data, cause }
}

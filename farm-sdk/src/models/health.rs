use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::Meta;

/// Backend liveness report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `healthy` when live, `offline` in the fallback
    pub status: String,
    #[serde(default)]
    pub demo_mode: Option<bool>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

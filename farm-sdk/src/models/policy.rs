use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::Meta;

/// Farmer profile used to match government schemes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyMatchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    pub state: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,

    /// Hectares
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_size: Option<f64>,

    /// `small`, `marginal` or `large`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer_type: Option<String>,
}

impl PolicyMatchRequest {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            user_id: None,
            state: state.into(),
            crop: None,
            land_size: None,
            farmer_type: None,
        }
    }

    pub fn crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = Some(crop.into());
        self
    }

    pub fn land_size(mut self, hectares: f64) -> Self {
        self.land_size = Some(hectares);
        self
    }

    pub fn farmer_type(mut self, farmer_type: impl Into<String>) -> Self {
        self.farmer_type = Some(farmer_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeInfo {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default)]
    pub required_docs: Vec<String>,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyMatchResponse {
    pub matched_schemes: Vec<SchemeInfo>,
    pub total_matches: u32,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional filters for the scheme catalogue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeFilter {
    pub state: Option<String>,
    pub crop: Option<String>,
    pub limit: Option<u32>,
}

/// Catalogue entry as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default)]
    pub required_docs: Vec<String>,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Empty means pan-India
    #[serde(default)]
    pub applicable_states: Vec<String>,
    /// Empty means all crops
    #[serde(default)]
    pub applicable_crops: Vec<String>,
    #[serde(default)]
    pub max_land_size: Option<f64>,
    #[serde(default)]
    pub eligible_farmer_types: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeCatalog {
    pub schemes: Vec<SchemeRecord>,
    pub total: u32,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub filters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatesResponse {
    pub states: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

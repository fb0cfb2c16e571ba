use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::Meta;

/// Symptoms to diagnose and treat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemRecoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    pub crop: String,

    pub symptom: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,

    /// Growth stage, e.g. `flowering`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_stage: Option<String>,
}

impl ChemRecoRequest {
    pub fn new(crop: impl Into<String>, symptom: impl Into<String>) -> Self {
        Self {
            user_id: None,
            crop: crop.into(),
            symptom: symptom.into(),
            image_id: None,
            crop_stage: None,
        }
    }

    pub fn image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = Some(image_id.into());
        self
    }

    pub fn crop_stage(mut self, stage: impl Into<String>) -> Self {
        self.crop_stage = Some(stage.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalRecommendation {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub application_method: String,
    #[serde(default)]
    pub precautions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemRecoResponse {
    pub diagnosis: String,
    pub confidence: f64,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
    #[serde(default)]
    pub chemical_recommendations: Vec<ChemicalRecommendation>,
    #[serde(default)]
    pub organic_alternatives: Vec<String>,
    #[serde(default)]
    pub safety_warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

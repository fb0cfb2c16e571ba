use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::Meta;

/// Crop photo to upload for diagnosis. The caller supplies the bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
    pub user_id: Option<String>,
    pub crop: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            user_id: None,
            crop: None,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = Some(crop.into());
        self
    }
}

/// Stored image metadata plus the backend's first-pass diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub image_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::Meta;

/// Free-text question for the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    pub text: String,

    /// Answer language code (`en`, `hi`)
    pub lang: String,

    /// Previously uploaded image to use as context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
}

impl QueryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            user_id: None,
            text: text.into(),
            lang: "en".to_string(),
            image_id: None,
        }
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = Some(image_id.into());
        self
    }
}

/// Reference backing an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub confidence: f64,
    #[serde(default, deserialize_with = "crate::models::lenient_list")]
    pub actions: Vec<String>,
    /// Only entries shaped like [`Source`]; the raw list stays in the live body
    #[serde(default, deserialize_with = "crate::models::lenient_list")]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Past questions for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryHistory {
    #[serde(default)]
    pub queries: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

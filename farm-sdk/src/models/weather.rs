use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::Meta;

/// Location filter for the forecast; both parts optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub state: Option<String>,
    pub district: Option<String>,
}

impl WeatherRequest {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            district: None,
        }
    }

    pub fn district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub rainfall_mm: f64,
    pub condition: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub location: String,
    pub forecast: Vec<DailyForecast>,
    #[serde(default)]
    pub advisory: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::Meta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRequest {
    pub commodity: String,
    pub mandi: Option<String>,
}

impl MarketRequest {
    pub fn new(commodity: impl Into<String>) -> Self {
        Self {
            commodity: commodity.into(),
            mandi: None,
        }
    }

    pub fn mandi(mut self, mandi: impl Into<String>) -> Self {
        self.mandi = Some(mandi.into());
        self
    }
}

/// Modal price for one day, rupees per quintal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketResponse {
    pub commodity: String,
    #[serde(default)]
    pub mandi: String,
    pub latest_price: f64,
    /// Oldest first
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
    #[serde(default)]
    pub trend: String,
    /// `BUY`, `SELL` or `HOLD`
    pub signal: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//! Static substitute data served when the backend cannot be used
//!
//! The table is computed once, when the gateway is built, and never changes
//! afterwards. Lookups hand out clones.

pub mod market;
mod schemes;

use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDate};
use rand::Rng;
use serde_json::{json, Map};

use crate::envelope::fallback_meta;
use crate::models::{
    ChemRecoResponse, DailyForecast, HealthStatus, ImageUploadResponse, MarketResponse,
    PolicyMatchResponse, QueryHistory, QueryResponse, SchemeCatalog, Source, StatesResponse,
    WeatherResponse,
};

pub use schemes::STATES;

const QUERY_REASON: &str = "Farm-Guru is offline. Showing general guidance.";
const HISTORY_REASON: &str = "Query history is unavailable offline.";
const WEATHER_REASON: &str = "Live weather unavailable. Showing a generic seasonal forecast.";
const IMAGE_REASON: &str = "Image upload is unavailable offline.";
const POLICY_REASON: &str = "Scheme matching unavailable. Showing nationwide schemes.";
const CATALOG_REASON: &str = "Scheme catalogue unavailable. Showing nationwide schemes.";
const STATES_REASON: &str = "State list served from offline copy.";
const CHEM_REASON: &str = "Diagnosis unavailable offline. Showing general crop protection guidance.";
const HEALTH_REASON: &str = "Backend unreachable.";

/// Days in the fallback forecast, starting on the build date
pub const FORECAST_DAYS: i64 = 5;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// One substitute response per operation
#[derive(Debug, Clone)]
pub struct FallbackTable {
    built_on: NaiveDate,
    query: QueryResponse,
    query_history: QueryHistory,
    weather: WeatherResponse,
    markets: HashMap<String, MarketResponse>,
    unknown_market: MarketResponse,
    image_upload: ImageUploadResponse,
    policy_match: PolicyMatchResponse,
    schemes: SchemeCatalog,
    states: StatesResponse,
    chem_reco: ChemRecoResponse,
    health: HealthStatus,
}

impl FallbackTable {
    /// Build the table for the local calendar date
    pub fn for_today() -> Self {
        Self::build(Local::now().date_naive())
    }

    pub fn build(today: NaiveDate) -> Self {
        Self::build_with_rng(today, &mut rand::thread_rng())
    }

    /// Build with an explicit random source for the market price jitter
    pub fn build_with_rng<R: Rng>(today: NaiveDate, rng: &mut R) -> Self {
        let markets = market::BASE_PRICES
            .iter()
            .map(|(name, base)| (name.to_string(), market::market_entry(name, *base, today, rng)))
            .collect();
        let unknown_market = market::market_entry("unknown", market::DEFAULT_BASE_PRICE, today, rng);

        Self {
            built_on: today,
            query: query_entry(),
            query_history: QueryHistory {
                queries: Vec::new(),
                message: Some("History will be available once Farm-Guru is back online.".to_string()),
                meta: fallback_meta(HISTORY_REASON),
                extra: Map::new(),
            },
            weather: weather_entry(today),
            markets,
            unknown_market,
            image_upload: ImageUploadResponse {
                image_id: "offline".to_string(),
                image_url: None,
                label: Some("unavailable".to_string()),
                confidence: Some(0.0),
                diagnosis: Some("Image analysis is unavailable. Describe the symptoms in a text query instead.".to_string()),
                meta: fallback_meta(IMAGE_REASON),
                extra: Map::new(),
            },
            policy_match: PolicyMatchResponse {
                matched_schemes: schemes::matched_schemes(),
                total_matches: 2,
                recommendations: strings(&[
                    "Check eligibility for general farmer welfare schemes like PM-KISAN.",
                    "Keep Aadhaar, land records and bank details ready before applying.",
                    "Visit your nearest Common Service Centre for application help.",
                ]),
                meta: fallback_meta(POLICY_REASON),
                extra: Map::new(),
            },
            schemes: SchemeCatalog {
                schemes: schemes::scheme_records(),
                total: 2,
                filters: Map::new(),
                meta: fallback_meta(CATALOG_REASON),
                extra: Map::new(),
            },
            states: StatesResponse {
                states: strings(STATES),
                meta: fallback_meta(STATES_REASON),
                extra: Map::new(),
            },
            chem_reco: chem_entry(),
            health: HealthStatus {
                status: "offline".to_string(),
                demo_mode: None,
                database: None,
                meta: fallback_meta(HEALTH_REASON),
                extra: Map::new(),
            },
        }
    }

    pub fn built_on(&self) -> NaiveDate {
        self.built_on
    }

    pub fn query(&self) -> QueryResponse {
        self.query.clone()
    }

    pub fn query_history(&self) -> QueryHistory {
        self.query_history.clone()
    }

    pub fn weather(&self) -> WeatherResponse {
        self.weather.clone()
    }

    /// Indicative prices for `commodity`. Unknown commodities get the default
    /// base price under the requested name.
    pub fn market(&self, commodity: &str) -> MarketResponse {
        let key = market::normalize_commodity(commodity);
        match self.markets.get(&key) {
            Some(entry) => entry.clone(),
            None => {
                let mut entry = self.unknown_market.clone();
                entry.commodity = commodity.trim().to_string();
                entry
            }
        }
    }

    pub fn image_upload(&self) -> ImageUploadResponse {
        self.image_upload.clone()
    }

    pub fn policy_match(&self) -> PolicyMatchResponse {
        self.policy_match.clone()
    }

    pub fn schemes(&self) -> SchemeCatalog {
        self.schemes.clone()
    }

    pub fn states(&self) -> StatesResponse {
        self.states.clone()
    }

    pub fn chem_reco(&self) -> ChemRecoResponse {
        self.chem_reco.clone()
    }

    pub fn health(&self) -> HealthStatus {
        self.health.clone()
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::for_today()
    }
}

fn query_entry() -> QueryResponse {
    let mut meta = fallback_meta(QUERY_REASON);
    meta.insert("language".to_string(), json!("en"));

    QueryResponse {
        answer: "Farm-Guru cannot process your query right now. Here are some safe general suggestions:"
            .to_string(),
        confidence: 0.4,
        actions: strings(&[
            "Check soil moisture regularly",
            "Avoid overuse of chemical fertilizers",
            "Use mulching to retain soil moisture",
        ]),
        sources: vec![Source {
            title: "General Agricultural Knowledge".to_string(),
            url: String::new(),
            snippet: "Basic farming principles and safety guidelines".to_string(),
            extra: Map::new(),
        }],
        meta,
        extra: Map::new(),
    }
}

fn weather_entry(today: NaiveDate) -> WeatherResponse {
    let forecast = (0..FORECAST_DAYS)
        .map(|offset| DailyForecast {
            date: (today + Duration::days(offset)).format("%Y-%m-%d").to_string(),
            temp_min: 22.0,
            temp_max: 32.0,
            humidity: 60.0,
            rainfall_mm: 0.0,
            condition: "Partly cloudy".to_string(),
            extra: Map::new(),
        })
        .collect();

    WeatherResponse {
        location: "Unavailable".to_string(),
        forecast,
        advisory: strings(&[
            "Check local forecasts before irrigating or spraying.",
            "Avoid spraying if rain is expected within 24 hours.",
        ]),
        meta: fallback_meta(WEATHER_REASON),
        extra: Map::new(),
    }
}

fn chem_entry() -> ChemRecoResponse {
    ChemRecoResponse {
        diagnosis: "Unable to diagnose offline".to_string(),
        confidence: 0.0,
        recommended_actions: strings(&[
            "Remove and destroy visibly infected plant parts",
            "Monitor the field every two to three days",
            "Use yellow sticky traps and pheromone traps to track pests",
            "Encourage natural predators by avoiding broad-spectrum sprays",
        ]),
        chemical_recommendations: Vec::new(),
        organic_alternatives: strings(&[
            "Neem oil spray (5 ml per litre of water)",
            "Trichoderma seed or soil treatment",
        ]),
        safety_warnings: strings(&[
            "Do not apply any chemical without a confirmed diagnosis.",
            "Consult your local KVK or agriculture officer before spraying.",
        ]),
        meta: fallback_meta(CHEM_REASON),
        extra: Map::new(),
    }
}

//! Indicative commodity prices for offline use

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde_json::Map;

use crate::envelope::fallback_meta;
use crate::models::{MarketResponse, PricePoint};

/// Days of price history in a fallback entry, ending on the build date
pub const HISTORY_DAYS: i64 = 7;

/// Maximum relative deviation from the base price
pub const PRICE_JITTER: f64 = 0.05;

/// Base price for commodities missing from [`BASE_PRICES`]
pub const DEFAULT_BASE_PRICE: f64 = 2000.0;

/// Rupees per quintal
pub const BASE_PRICES: &[(&str, f64)] = &[
    ("wheat", 2300.0),
    ("rice", 3100.0),
    ("maize", 1950.0),
    ("cotton", 6600.0),
    ("soybean", 4300.0),
    ("mustard", 5400.0),
    ("onion", 1800.0),
    ("tomato", 1500.0),
    ("potato", 1200.0),
    ("sugarcane", 340.0),
];

pub const MARKET_REASON: &str = "Live market data unavailable. Showing indicative prices.";

const FALLBACK_MANDI: &str = "Indicative (offline)";

pub fn base_price(commodity: &str) -> Option<f64> {
    let key = normalize_commodity(commodity);
    BASE_PRICES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, price)| *price)
}

pub fn normalize_commodity(commodity: &str) -> String {
    commodity.trim().to_lowercase()
}

/// Build one market entry: `HISTORY_DAYS` prices ending on `today`, oldest
/// first, each within `PRICE_JITTER` of `base` and rounded to whole rupees.
pub fn market_entry<R: Rng>(
    commodity: &str,
    base: f64,
    today: NaiveDate,
    rng: &mut R,
) -> MarketResponse {
    let price_history: Vec<PricePoint> = (0..HISTORY_DAYS)
        .rev()
        .map(|days_ago| {
            let u: f64 = rng.gen_range(-PRICE_JITTER..=PRICE_JITTER);
            PricePoint {
                date: (today - Duration::days(days_ago)).format("%Y-%m-%d").to_string(),
                price: (base * (1.0 + u)).round(),
                extra: Map::new(),
            }
        })
        .collect();

    let latest_price = price_history.last().map(|p| p.price).unwrap_or(base);

    MarketResponse {
        commodity: commodity.to_string(),
        mandi: FALLBACK_MANDI.to_string(),
        latest_price,
        price_history,
        trend: "stable".to_string(),
        signal: "HOLD".to_string(),
        meta: fallback_meta(MARKET_REASON),
        extra: Map::new(),
    }
}

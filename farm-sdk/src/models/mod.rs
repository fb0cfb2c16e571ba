//! Request and response types for the Farm-Guru backend
//!
//! Requests skip absent optional fields. Responses are a typed view of the
//! backend body; unknown fields land in a flattened `extra` map. The gateway
//! hands back the body itself for live results, so the view may be lossy.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

mod chem;
mod health;
mod image;
mod market;
mod policy;
mod query;
mod weather;

pub use chem::*;
pub use health::*;
pub use image::*;
pub use market::*;
pub use policy::*;
pub use query::*;
pub use weather::*;

pub use crate::envelope::Meta;

/// Decode a list, keeping only the elements that fit `T`. `null` reads as empty.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Wire the `meta` field of each response into `HasMeta`
macro_rules! impl_has_meta {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::envelope::HasMeta for $ty {
                fn meta(&self) -> &$crate::envelope::Meta {
                    &self.meta
                }
            }
        )+
    };
}

impl_has_meta!(
    QueryResponse,
    QueryHistory,
    WeatherResponse,
    MarketResponse,
    ImageUploadResponse,
    PolicyMatchResponse,
    SchemeCatalog,
    StatesResponse,
    ChemRecoResponse,
    HealthStatus,
);

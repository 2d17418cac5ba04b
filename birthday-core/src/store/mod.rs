//! Where month documents live.
//!
//! A store holds one whole document per month, keyed by the canonical month
//! name. Reads return the raw document so callers can validate it; writes
//! replace the whole month.

pub mod local;
pub mod protocol;
pub mod provider;

use std::collections::HashMap;

use chrono::Month;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::BirthdayResult;

pub use local::LocalStore;
pub use provider::{Provider, ProviderStore};

/// Month-document storage.
#[allow(async_fn_in_trait)]
pub trait MonthStore {
    /// The stored document for `month`, or `None` if the store has none.
    async fn read(&self, month: Month) -> BirthdayResult<Option<Value>>;

    /// Replace the stored document for `month`.
    async fn write(&self, month: Month, document: &Value) -> BirthdayResult<()>;
}

/// Provider-specific parameters passed through from config
/// (e.g. `cosmos_endpoint`, `cosmos_container`).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct StoreParams(pub HashMap<String, toml::Value>);

impl From<&StoreParams> for serde_json::Map<String, Value> {
    fn from(params: &StoreParams) -> Self {
        params
            .0
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect()
    }
}

/// The store selected in config.
pub enum ConfiguredStore {
    Local(LocalStore),
    Provider(ProviderStore),
}

impl ConfiguredStore {
    pub fn from_config(config: &StoreConfig) -> Self {
        match config {
            StoreConfig::Local { .. } => {
                ConfiguredStore::Local(LocalStore::new(config.local_path()))
            }
            StoreConfig::Provider { provider, params } => ConfiguredStore::Provider(
                ProviderStore::new(Provider::from_name(provider), params.clone()),
            ),
        }
    }
}

impl MonthStore for ConfiguredStore {
    async fn read(&self, month: Month) -> BirthdayResult<Option<Value>> {
        match self {
            ConfiguredStore::Local(store) => store.read(month).await,
            ConfiguredStore::Provider(store) => store.read(month).await,
        }
    }

    async fn write(&self, month: Month, document: &Value) -> BirthdayResult<()> {
        match self {
            ConfiguredStore::Local(store) => store.write(month, document).await,
            ConfiguredStore::Provider(store) => store.write(month, document).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_params_convert_to_json() {
        let mut params = StoreParams::default();
        params
            .0
            .insert("cosmos_container".into(), toml::Value::String("birthdays".into()));
        params.0.insert("max_items".into(), toml::Value::Integer(12));

        let map = serde_json::Map::from(&params);
        assert_eq!(map["cosmos_container"], "birthdays");
        assert_eq!(map["max_items"], 12);
    }
}

//! Configuration loading and management

use super::schema::{ChatConfig, ConfigKey, ConfigValue};
use super::validate::validate_config;
use crate::store::JsonStore;
use serde_json::Value;
use tracing::{info, warn};

/// Owns the chat configuration and its backing document
#[derive(Debug)]
pub struct ConfigManager {
    store: JsonStore,
    config: ChatConfig,
}

impl ConfigManager {
    /// Load the configuration, merging persisted overrides into the defaults
    pub fn load(store: JsonStore) -> Self {
        let overrides = store.load_or_default::<Option<Value>>();
        let config = merge_with_defaults(overrides);
        Self { store, config }
    }

    /// Current configuration
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Value of a single option
    pub fn get(&self, key: &str) -> crate::Result<ConfigValue> {
        let key: ConfigKey = key.parse()?;
        Ok(self.config.get(key))
    }

    /// All options in display order
    pub fn entries(&self) -> Vec<(ConfigKey, ConfigValue)> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| (key, self.config.get(key)))
            .collect()
    }

    /// Coerce and store a raw value, then persist the document.
    ///
    /// Unknown keys, uncoercible values and values failing validation leave
    /// the configuration untouched.
    pub fn set(&mut self, key: &str, raw: &str) -> crate::Result<ConfigValue> {
        let key: ConfigKey = key.parse()?;
        let value = key.coerce(raw)?;

        let mut candidate = self.config.clone();
        candidate.apply(value.clone());
        validate_config(&candidate).map_err(|e| crate::Error::InvalidConfigValue {
            key: key.as_str().to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })?;

        self.config = candidate;
        info!("Config updated: {} = {}", key, value);
        if let Err(e) = self.save() {
            warn!("Failed to persist configuration: {}", e);
        }
        Ok(value)
    }

    /// Write the configuration document
    pub fn save(&self) -> crate::Result<()> {
        self.store.save(&self.config)
    }

}

/// Defaults decide the key set. Each persisted value is checked on its own
/// and replaces the default only when it has the right type and validates.
fn merge_with_defaults(overrides: Option<Value>) -> ChatConfig {
    let mut config = ChatConfig::default();
    let Some(Value::Object(overrides)) = overrides else {
        return config;
    };

    for key in ConfigKey::ALL {
        let Some(raw) = overrides.get(key.as_str()) else {
            continue;
        };
        let Some(value) = value_from_json(key, raw) else {
            warn!("Ignoring persisted {}: unexpected value {}", key, raw);
            continue;
        };

        let mut candidate = config.clone();
        candidate.apply(value);
        match validate_config(&candidate) {
            Ok(()) => config = candidate,
            Err(e) => warn!("Ignoring persisted {}: {}", key, e),
        }
    }
    config
}

fn value_from_json(key: ConfigKey, raw: &Value) -> Option<ConfigValue> {
    match key {
        ConfigKey::MaxHistory => raw
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .map(ConfigValue::Integer),
        ConfigKey::UseContext => raw.as_bool().map(ConfigValue::Bool),
        ConfigKey::Temperature => raw.as_f64().map(ConfigValue::Float),
        ConfigKey::Model => raw.as_str().map(|v| ConfigValue::Text(v.to_string())),
    }
}

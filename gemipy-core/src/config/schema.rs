//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Tokens accepted as `true` for boolean options (compared case-insensitively)
pub const TRUTHY_TOKENS: [&str; 4] = ["true", "1", "yes", "si"];

/// Chat options persisted in the configuration document
///
/// Field names on disk are the ones older gemipy releases wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Archive retention cap
    #[serde(rename = "max_historial")]
    pub max_history: usize,
    /// Inject previous turns into new prompts
    #[serde(rename = "usar_contexto")]
    pub use_context: bool,
    /// Sampling temperature passed to the model
    #[serde(rename = "temperatura")]
    pub temperature: f64,
    /// Remote model identifier
    #[serde(rename = "modelo")]
    pub model: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_history: 10,
            use_context: true,
            temperature: 0.7,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ChatConfig {
    /// Current value of an option
    pub fn get(&self, key: ConfigKey) -> ConfigValue {
        match key {
            ConfigKey::MaxHistory => ConfigValue::Integer(self.max_history),
            ConfigKey::UseContext => ConfigValue::Bool(self.use_context),
            ConfigKey::Temperature => ConfigValue::Float(self.temperature),
            ConfigKey::Model => ConfigValue::Text(self.model.clone()),
        }
    }

    /// Store a value that was produced by [`ConfigKey::coerce`] for the same key
    pub(crate) fn apply(&mut self, value: ConfigValue) {
        match value {
            ConfigValue::Integer(v) => self.max_history = v,
            ConfigValue::Bool(v) => self.use_context = v,
            ConfigValue::Float(v) => self.temperature = v,
            ConfigValue::Text(v) => self.model = v,
        }
    }
}

/// Recognized configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    MaxHistory,
    UseContext,
    Temperature,
    Model,
}

impl ConfigKey {
    /// All keys in display order
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::MaxHistory,
        ConfigKey::UseContext,
        ConfigKey::Temperature,
        ConfigKey::Model,
    ];

    /// Name used on disk and in `/config`
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::MaxHistory => "max_historial",
            ConfigKey::UseContext => "usar_contexto",
            ConfigKey::Temperature => "temperatura",
            ConfigKey::Model => "modelo",
        }
    }

    /// English alias accepted by `/config`
    pub fn alias(&self) -> &'static str {
        match self {
            ConfigKey::MaxHistory => "max_history",
            ConfigKey::UseContext => "use_context",
            ConfigKey::Temperature => "temperature",
            ConfigKey::Model => "model",
        }
    }

    /// Convert a raw string into the key's declared type
    pub fn coerce(&self, raw: &str) -> Result<ConfigValue> {
        let invalid = |reason: String| Error::InvalidConfigValue {
            key: self.as_str().to_string(),
            value: raw.to_string(),
            reason,
        };

        match self {
            ConfigKey::MaxHistory => raw
                .trim()
                .parse::<usize>()
                .map(ConfigValue::Integer)
                .map_err(|e| invalid(e.to_string())),
            ConfigKey::Temperature => raw
                .trim()
                .parse::<f64>()
                .map(ConfigValue::Float)
                .map_err(|e| invalid(e.to_string())),
            ConfigKey::UseContext => {
                let lowered = raw.to_lowercase();
                Ok(ConfigValue::Bool(TRUTHY_TOKENS.contains(&lowered.as_str())))
            }
            ConfigKey::Model => Ok(ConfigValue::Text(raw.to_string())),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s || key.alias() == s)
            .ok_or_else(|| Error::UnknownConfigKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Integer(usize),
    Bool(bool),
    Float(f64),
    Text(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Integer(v) => write!(f, "{}", v),
            ConfigValue::Bool(v) => write!(f, "{}", v),
            ConfigValue::Float(v) => write!(f, "{}", v),
            ConfigValue::Text(v) => f.write_str(v),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.max_history, 10);
        assert!(config.use_context);
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_serializes_with_persisted_names() {
        let value = serde_json::to_value(ChatConfig::default()).unwrap();
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in ConfigKey::ALL {
            assert!(object.contains_key(key.as_str()), "missing {}", key);
        }
    }

    #[test]
    fn test_key_parsing_accepts_aliases() {
        assert_eq!(
            "max_historial".parse::<ConfigKey>().unwrap(),
            ConfigKey::MaxHistory
        );
        assert_eq!("model".parse::<ConfigKey>().unwrap(), ConfigKey::Model);
        assert!(matches!(
            "colour".parse::<ConfigKey>(),
            Err(Error::UnknownConfigKey(k)) if k == "colour"
        ));
    }

    #[test]
    fn test_bool_coercion() {
        for raw in ["true", "SI", "Yes", "1"] {
            assert_eq!(
                ConfigKey::UseContext.coerce(raw).unwrap(),
                ConfigValue::Bool(true),
                "{}",
                raw
            );
        }
        for raw in ["false", "no", "sí", "2", ""] {
            assert_eq!(
                ConfigKey::UseContext.coerce(raw).unwrap(),
                ConfigValue::Bool(false),
                "{}",
                raw
            );
        }
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(
            ConfigKey::MaxHistory.coerce(" 5 ").unwrap(),
            ConfigValue::Integer(5)
        );
        assert!(ConfigKey::MaxHistory.coerce("abc").is_err());
        assert!(ConfigKey::MaxHistory.coerce("-1").is_err());
        assert_eq!(
            ConfigKey::Temperature.coerce("0.25").unwrap(),
            ConfigValue::Float(0.25)
        );
        assert!(ConfigKey::Temperature.coerce("warm").is_err());
    }
}

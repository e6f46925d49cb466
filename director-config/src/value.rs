use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single charm setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Int(i) => write!(f, "{i}"),
            ConfigValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Str(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

/// The charm configuration as observed by one hook invocation.
///
/// Settings the runtime reports as `null` are treated as unset and dropped on
/// load, so a missing key and an explicit null read the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<ConfigValue>>",
    into = "BTreeMap<String, ConfigValue>"
)]
pub struct ConfigSnapshot {
    values: BTreeMap<String, ConfigValue>,
}

impl From<BTreeMap<String, Option<ConfigValue>>> for ConfigSnapshot {
    fn from(raw: BTreeMap<String, Option<ConfigValue>>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect();
        Self { values }
    }
}

impl From<ConfigSnapshot> for BTreeMap<String, ConfigValue> {
    fn from(snapshot: ConfigSnapshot) -> Self {
        snapshot.values
    }
}

impl ConfigSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful when assembling fixtures.
    pub fn with(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// String view of a setting. Empty strings read as unset.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ConfigValue::Str(s)) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }

    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(ConfigValue::Bool(b)) => Some(*b),
            Some(ConfigValue::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Integer view of a setting; numeric strings are accepted.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(ConfigValue::Int(i)) => Some(*i),
            Some(ConfigValue::Str(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

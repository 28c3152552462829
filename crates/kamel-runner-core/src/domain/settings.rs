//! Runtime flags and traits, and how caller overrides merge into them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::DomainError;

const FLAG_PREFIX: &str = "--";

/// Flags and traits passed to the integration runtime.
///
/// Deserialises from `{"configs": [...], "traits": {...}}`. Traits keep
/// insertion order so the assembled command is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub configs: Vec<String>,
    #[serde(default)]
    pub traits: IndexMap<String, String>,
}

impl Settings {
    pub fn new(configs: Vec<String>, traits: IndexMap<String, String>) -> Self {
        Self { configs, traits }
    }

    /// Merge caller overrides in place.
    ///
    /// Flags are appended after normalisation, never deduplicated. Traits
    /// overwrite by key; new keys go to the end.
    pub fn merge(&mut self, overrides: &SettingsOverrides) {
        self.configs
            .extend(overrides.configs.iter().map(|c| normalize_flag(c)));
        for (key, value) in &overrides.traits {
            self.traits.insert(key.clone(), value.clone());
        }
    }

    /// Consuming form of [`Settings::merge`].
    pub fn merged(mut self, overrides: &SettingsOverrides) -> Self {
        self.merge(overrides);
        self
    }
}

/// Caller-supplied flags and traits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverrides {
    #[serde(default)]
    pub configs: Vec<String>,
    #[serde(default)]
    pub traits: IndexMap<String, String>,
}

impl SettingsOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, flag: impl Into<String>) -> Self {
        self.configs.push(flag.into());
        self
    }

    pub fn trait_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.traits.insert(key.into(), value.into());
        self
    }

    /// Parse a `KEY=VALUE` trait. Only the first `=` splits.
    pub fn parse_trait(input: &str) -> Result<(String, String), DomainError> {
        match input.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(DomainError::InvalidTrait {
                input: input.to_string(),
            }),
        }
    }

    /// Append another layer: its flags follow ours, its traits win.
    pub fn layer(mut self, other: SettingsOverrides) -> Self {
        self.configs.extend(other.configs);
        self.traits.extend(other.traits);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty() && self.traits.is_empty()
    }
}

/// Give `flag` a leading `--` unless it already has one.
pub fn normalize_flag(flag: &str) -> String {
    if flag.starts_with(FLAG_PREFIX) {
        flag.to_string()
    } else {
        format!("{FLAG_PREFIX}{flag}")
    }
}

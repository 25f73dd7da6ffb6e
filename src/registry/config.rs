use super::parameters::{ParamRange, ParamValue, ParameterRegistry};
use crate::core::{ConfigError, ElementType};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Key to typed-value store a node reads its parameters from
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<ParamValue>;
}

/// In-memory configuration values keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDictionary {
    values: HashMap<String, ParamValue>,
}

impl ConfigDictionary {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Every declared parameter set to its default
    pub fn with_defaults(registry: &ParameterRegistry) -> Self {
        let values = registry
            .iter()
            .map(|spec| (spec.name.clone(), spec.default))
            .collect();
        Self { values }
    }

    /// Defaults overridden by the JSON file at `path`
    pub fn load(registry: &ParameterRegistry, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let json: Value = serde_json::from_str(&contents)?;
        let mut dictionary = Self::with_defaults(registry);
        dictionary.apply_json(registry, &json)?;
        Ok(dictionary)
    }

    /// Stores a value without checking it. The caller is responsible for
    /// keeping values inside their declared range.
    pub fn set(&mut self, key: impl Into<String>, value: ParamValue) {
        self.values.insert(key.into(), value);
    }

    pub fn set_checked(
        &mut self,
        registry: &ParameterRegistry,
        key: &str,
        value: ParamValue,
    ) -> Result<(), ConfigError> {
        if registry.get(key).is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }
        if !registry.contains(key, &value) {
            return Err(ConfigError::OutOfRange {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.values.remove(key)
    }

    /// Applies every entry of a JSON object, parsed according to the
    /// declared range of the parameter it names. Keys the registry does not
    /// know are skipped. Nothing is stored unless every known entry is valid.
    pub fn apply_json(&mut self, registry: &ParameterRegistry, json: &Value) -> Result<(), ConfigError> {
        let Some(entries) = json.as_object() else {
            if json.is_null() {
                return Ok(());
            }
            return Err(ConfigError::TypeMismatch {
                key: "<root>".to_string(),
                expected: "JSON object",
            });
        };

        let mut parsed = Vec::with_capacity(entries.len());
        for (key, raw) in entries {
            let Some(spec) = registry.get(key) else {
                log::warn!("Ignoring unknown parameter '{}'", key);
                continue;
            };
            let value = parse_value(key, &spec.range, raw)?;
            if !spec.range.contains(&value) {
                return Err(ConfigError::OutOfRange {
                    key: key.clone(),
                    value: raw.to_string(),
                });
            }
            parsed.push((key.clone(), value));
        }

        self.values.extend(parsed);
        Ok(())
    }
}

impl ConfigSource for ConfigDictionary {
    fn get(&self, key: &str) -> Option<ParamValue> {
        self.values.get(key).copied()
    }
}

fn parse_value(key: &str, range: &ParamRange, raw: &Value) -> Result<ParamValue, ConfigError> {
    let mismatch = || ConfigError::TypeMismatch {
        key: key.to_string(),
        expected: range.kind(),
    };

    match range {
        ParamRange::Integer { .. } => raw
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(ParamValue::Integer)
            .ok_or_else(mismatch),
        ParamRange::Float { .. } => raw.as_f64().map(ParamValue::Float).ok_or_else(mismatch),
        ParamRange::Choice { .. } => serde_json::from_value::<ElementType>(raw.clone())
            .map(ParamValue::Element)
            .map_err(|_| mismatch()),
    }
}

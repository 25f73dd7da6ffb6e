use super::transform::{FilterParams, SRAD_EPSILON};
use crate::core::{ConfigError, ElementType};
use crate::registry::{ConfigSource, ParamValue, ParameterRegistry, ParameterSpec};
use serde::Serialize;

pub const KEY_ITERATIONS: &str = "numberIterations";
pub const KEY_LAMBDA: &str = "lambda";
pub const KEY_SPECKLE_SCALE: &str = "speckleScale";
pub const KEY_SPECKLE_SCALE_DECAY: &str = "speckleScaleDecay";
pub const KEY_OUTPUT_TYPE: &str = "outputType";

/// Parameters the filter stage exposes
pub fn parameter_registry() -> ParameterRegistry {
    let mut registry = ParameterRegistry::new();
    registry
        .declare(ParameterSpec::integer(KEY_ITERATIONS, 0, 1000, 300, "Number of Iterations"))
        .declare(ParameterSpec::float(KEY_LAMBDA, 0.0, 2.0, 1.0, "Step Size Lambda"))
        .declare(ParameterSpec::float(KEY_SPECKLE_SCALE, 0.0, 2.0, 1.0, "Speckle Scale"))
        .declare(ParameterSpec::float(
            KEY_SPECKLE_SCALE_DECAY,
            0.0,
            2.0,
            1.0 / 6.0,
            "Speckle Scale Decay (rho)",
        ))
        .declare(ParameterSpec::choice(
            KEY_OUTPUT_TYPE,
            vec![ElementType::Float32, ElementType::Uint8, ElementType::Int16],
            ElementType::Float32,
            "Output type",
        ));
    registry
}

/// Current parameter values of a filter stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SradConfig {
    pub iterations: u32,
    pub lambda: f64,
    pub speckle_scale: f64,
    pub speckle_scale_decay: f64,
    pub output_type: ElementType,
}

impl SradConfig {
    /// Reads every parameter; fails on the first missing or mistyped one
    pub fn load(source: &dyn ConfigSource) -> Result<Self, ConfigError> {
        Ok(Self {
            iterations: read_u32(source, KEY_ITERATIONS)?,
            lambda: read_f64(source, KEY_LAMBDA)?,
            speckle_scale: read_f64(source, KEY_SPECKLE_SCALE)?,
            speckle_scale_decay: read_f64(source, KEY_SPECKLE_SCALE_DECAY)?,
            output_type: read_element(source, KEY_OUTPUT_TYPE)?,
        })
    }

    /// Overwrites the field named by `key`. Returns `Ok(false)` for keys this
    /// stage does not consume.
    pub fn apply_key(&mut self, key: &str, source: &dyn ConfigSource) -> Result<bool, ConfigError> {
        match key {
            KEY_ITERATIONS => self.iterations = read_u32(source, key)?,
            KEY_LAMBDA => self.lambda = read_f64(source, key)?,
            KEY_SPECKLE_SCALE => self.speckle_scale = read_f64(source, key)?,
            KEY_SPECKLE_SCALE_DECAY => self.speckle_scale_decay = read_f64(source, key)?,
            KEY_OUTPUT_TYPE => self.output_type = read_element(source, key)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn filter_params(&self) -> FilterParams {
        FilterParams {
            eps: SRAD_EPSILON,
            iterations: self.iterations,
            lambda: self.lambda,
            speckle_scale: self.speckle_scale,
            speckle_scale_decay: self.speckle_scale_decay,
        }
    }
}

fn read(source: &dyn ConfigSource, key: &str) -> Result<ParamValue, ConfigError> {
    source
        .get(key)
        .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
}

fn read_u32(source: &dyn ConfigSource, key: &str) -> Result<u32, ConfigError> {
    read(source, key)?.as_u32().ok_or(ConfigError::TypeMismatch {
        key: key.to_string(),
        expected: "integer",
    })
}

fn read_f64(source: &dyn ConfigSource, key: &str) -> Result<f64, ConfigError> {
    read(source, key)?.as_f64().ok_or(ConfigError::TypeMismatch {
        key: key.to_string(),
        expected: "float",
    })
}

fn read_element(source: &dyn ConfigSource, key: &str) -> Result<ElementType, ConfigError> {
    read(source, key)?.as_element().ok_or(ConfigError::TypeMismatch {
        key: key.to_string(),
        expected: "element type",
    })
}

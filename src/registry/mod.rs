pub mod config;
pub mod parameters;

pub use config::{ConfigDictionary, ConfigSource};
pub use parameters::{ParamRange, ParamValue, ParameterRegistry, ParameterSpec};

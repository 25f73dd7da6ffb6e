use crate::core::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single node parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(u32),
    Float(f64),
    Element(ElementType),
}

impl ParamValue {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<ElementType> {
        match self {
            Self::Element(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Element(v) => write!(f, "{}", v),
        }
    }
}

/// Legal domain of a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamRange {
    Integer { min: u32, max: u32 },
    Float { min: f64, max: f64 },
    Choice { options: Vec<ElementType> },
}

impl ParamRange {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer { .. } => "integer",
            Self::Float { .. } => "float",
            Self::Choice { .. } => "element type",
        }
    }

    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (Self::Integer { min, max }, ParamValue::Integer(v)) => (*min..=*max).contains(v),
            (Self::Float { min, max }, ParamValue::Float(v)) => (*min..=*max).contains(v),
            (Self::Choice { options }, ParamValue::Element(v)) => options.contains(v),
            _ => false,
        }
    }
}

/// Declaration of one tunable parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub label: String,
    pub range: ParamRange,
    pub default: ParamValue,
}

impl ParameterSpec {
    pub fn integer(name: impl Into<String>, min: u32, max: u32, default: u32, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            range: ParamRange::Integer { min, max },
            default: ParamValue::Integer(default),
        }
    }

    pub fn float(name: impl Into<String>, min: f64, max: f64, default: f64, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            range: ParamRange::Float { min, max },
            default: ParamValue::Float(default),
        }
    }

    pub fn choice(
        name: impl Into<String>,
        options: Vec<ElementType>,
        default: ElementType,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            range: ParamRange::Choice { options },
            default: ParamValue::Element(default),
        }
    }
}

/// Ordered set of parameters a node exposes.
///
/// Filled in while the node is built; nodes only hand out shared references
/// afterwards, so the declarations cannot change under a running node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterRegistry {
    specs: Vec<ParameterSpec>,
}

impl ParameterRegistry {
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Adds a declaration, replacing an earlier one with the same name
    pub fn declare(&mut self, spec: ParameterSpec) -> &mut Self {
        match self.specs.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// False for unknown names as well as out-of-range values
    pub fn contains(&self, name: &str, value: &ParamValue) -> bool {
        self.get(name).is_some_and(|spec| spec.range.contains(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_replaces_same_name() {
        let mut registry = ParameterRegistry::new();
        registry
            .declare(ParameterSpec::float("gain", 0.0, 1.0, 0.5, "Gain"))
            .declare(ParameterSpec::float("gain", 0.0, 2.0, 1.0, "Gain"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("gain").unwrap().default, ParamValue::Float(1.0));
    }

    #[test]
    fn test_range_rejects_wrong_kind() {
        let range = ParamRange::Integer { min: 0, max: 10 };
        assert!(range.contains(&ParamValue::Integer(10)));
        assert!(!range.contains(&ParamValue::Integer(11)));
        assert!(!range.contains(&ParamValue::Float(5.0)));
    }
}

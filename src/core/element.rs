use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar storage kind of an image buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Uint8,
    Int8,
    Uint16,
    Int16,
    Uint32,
    Int32,
    Float32,
    Float64,
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Int8 => "int8",
            Self::Uint16 => "uint16",
            Self::Int16 => "int16",
            Self::Uint32 => "uint32",
            Self::Int32 => "int32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The element kinds the filter stage has typed code paths for.
///
/// Obtained from an [`ElementType`] with `try_from`; every dispatch site
/// matches on this enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedType {
    Uint8,
    Int16,
    Float32,
}

impl SupportedType {
    pub const ALL: [SupportedType; 3] = [Self::Uint8, Self::Int16, Self::Float32];

    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Uint8 => ElementType::Uint8,
            Self::Int16 => ElementType::Int16,
            Self::Float32 => ElementType::Float32,
        }
    }
}

impl TryFrom<ElementType> for SupportedType {
    type Error = ElementType;

    fn try_from(value: ElementType) -> Result<Self, Self::Error> {
        match value {
            ElementType::Uint8 => Ok(Self::Uint8),
            ElementType::Int16 => Ok(Self::Int16),
            ElementType::Float32 => Ok(Self::Float32),
            other => Err(other),
        }
    }
}

/// Rust scalar type backing an [`ElementType`]
pub trait Element: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    const TYPE: ElementType;

    fn to_f64(self) -> f64;

    /// Saturates at the type bounds; NaN maps to zero for integer types.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const TYPE: ElementType = ElementType::$tag;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_element! {
    u8 => Uint8,
    i8 => Int8,
    u16 => Uint16,
    i16 => Int16,
    u32 => Uint32,
    i32 => Int32,
    f32 => Float32,
    f64 => Float64,
}

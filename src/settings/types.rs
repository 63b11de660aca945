//! Setting value types
//!
//! A setting is one raw text plus at most one committed typed view:
//! - `SettingType` is the type tag
//! - `TypedValue` is the tagged payload; its tag cannot drift from its data
//! - `SettingValue` links a Rust type to its tag, parser and canonical text

use std::fmt;

use serde::{Deserialize, Serialize};

use super::convert::{self, VectorFormat};

/// Type tag committed for a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    Int,
    Float,
    String,
    IntVec,
    FloatVec,
    StringVec,
}

impl SettingType {
    /// Check if this is one of the vector types
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::IntVec | Self::FloatVec | Self::StringVec)
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::IntVec => write!(f, "vector of ints"),
            Self::FloatVec => write!(f, "vector of floats"),
            Self::StringVec => write!(f, "vector of strings"),
        }
    }
}

/// Committed typed value of a setting
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Int(i64),
    Float(f64),
    String(String),
    IntVec(Vec<i64>),
    FloatVec(Vec<f64>),
    StringVec(Vec<String>),
}

impl TypedValue {
    /// The tag of this value
    pub fn setting_type(&self) -> SettingType {
        match self {
            Self::Int(_) => SettingType::Int,
            Self::Float(_) => SettingType::Float,
            Self::String(_) => SettingType::String,
            Self::IntVec(_) => SettingType::IntVec,
            Self::FloatVec(_) => SettingType::FloatVec,
            Self::StringVec(_) => SettingType::StringVec,
        }
    }

    /// Convert raw text into a value of the given type
    pub fn parse(ty: SettingType, raw: &str) -> Self {
        match ty {
            SettingType::Int => Self::Int(convert::parse_int(raw)),
            SettingType::Float => Self::Float(convert::parse_float(raw)),
            SettingType::String => Self::String(raw.to_string()),
            SettingType::IntVec => Self::IntVec(convert::parse_int_vec(raw)),
            SettingType::FloatVec => Self::FloatVec(convert::parse_float_vec(raw)),
            SettingType::StringVec => Self::StringVec(convert::parse_string_vec(raw)),
        }
    }

    /// Canonical raw text of this value
    pub fn to_raw(&self, format: VectorFormat) -> String {
        match self {
            Self::Int(v) => convert::format_int(*v),
            Self::Float(v) => convert::format_float(*v),
            Self::String(v) => v.clone(),
            Self::IntVec(v) => convert::format_int_vec(v, format),
            Self::FloatVec(v) => convert::format_float_vec(v, format),
            Self::StringVec(v) => convert::format_string_vec(v, format),
        }
    }
}

/// A Rust type that can be stored as a typed setting.
///
/// `Default` supplies the zero value returned on a type mismatch.
pub trait SettingValue: Clone + Default + Sized {
    /// Tag committed when this type is read or written
    const TYPE: SettingType;

    /// Borrow the payload if `value` holds this type
    fn from_typed(value: &TypedValue) -> Option<&Self>;

    /// Wrap into the tagged payload
    fn into_typed(self) -> TypedValue;
}

macro_rules! impl_setting_value {
    ($ty:ty, $variant:ident) => {
        impl SettingValue for $ty {
            const TYPE: SettingType = SettingType::$variant;

            fn from_typed(value: &TypedValue) -> Option<&Self> {
                match value {
                    TypedValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_typed(self) -> TypedValue {
                TypedValue::$variant(self)
            }
        }
    };
}

impl_setting_value!(i64, Int);
impl_setting_value!(f64, Float);
impl_setting_value!(String, String);
impl_setting_value!(Vec<i64>, IntVec);
impl_setting_value!(Vec<f64>, FloatVec);
impl_setting_value!(Vec<String>, StringVec);

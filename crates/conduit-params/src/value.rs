//! Parameter value model.
//!
//! A parameter value is exactly one of a string, an ordered array of
//! strings, or a string-to-string object. The enum variant is the type tag.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// ParamType
// ─────────────────────────────────────────────────────────────────────────────

/// Declared or observed type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Array,
    Object,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ParamValue
// ─────────────────────────────────────────────────────────────────────────────

/// A parameter payload.
///
/// Wire encoding lives in [`crate::codec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A single text scalar.
    String(String),
    /// Ordered text scalars. May be empty.
    Array(Vec<String>),
    /// Field name to text scalar.
    Object(BTreeMap<String, String>),
}

impl ParamValue {
    /// Build a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Build an array value from any sequence of strings.
    pub fn array<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Array(values.into_iter().map(Into::into).collect())
    }

    /// Build an object value from `(field, value)` pairs.
    pub fn object<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The type tag of this value.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::String(_) => ParamType::String,
            Self::Array(_) => ParamType::Array,
            Self::Object(_) => ParamType::Object,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Element count for arrays; `None` for strings and objects.
    pub fn array_len(&self) -> Option<usize> {
        self.as_array().map(<[String]>::len)
    }
}

impl Default for ParamValue {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Array(values)
    }
}

impl From<BTreeMap<String, String>> for ParamValue {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self::Object(fields)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Param
// ─────────────────────────────────────────────────────────────────────────────

/// A named runtime value bound to a task or pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name, unique within its owning list.
    pub name: String,

    /// Bound value.
    #[serde(default)]
    pub value: ParamValue,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

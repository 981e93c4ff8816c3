//! Declared task and step results.
//!
//! Results share the parameter type vocabulary, but a result has no default
//! value, so its type is inferred from declared properties alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::spec::{PropertySpec, default_property_types};
use crate::value::ParamType;

/// A result a task or step promises to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSpec {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<ParamType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, PropertySpec>>,
}

impl ResultSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Unset type becomes `Object` when properties are declared, else `String`.
    pub fn set_defaults(&mut self) {
        if self.result_type.is_none() {
            self.result_type = Some(if self.properties.is_some() {
                ParamType::Object
            } else {
                ParamType::String
            });
        }
        default_property_types(self.properties.as_mut());
    }
}

//! Parameter declarations and load-time type inference.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{ParamType, ParamValue};

/// Declared type of a single object field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,
}

impl PropertySpec {
    pub fn new(param_type: ParamType) -> Self {
        Self {
            param_type: Some(param_type),
        }
    }
}

/// The declared contract of a parameter: name, type, default and schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name, unique within its owning list.
    pub name: String,

    /// Declared type. Unset until [`ParamSpec::set_defaults`] runs.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Per-field schema, only meaningful for object parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, PropertySpec>>,

    /// Value used when the caller supplies none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = Some(param_type);
        self
    }

    pub fn with_default(mut self, default: impl Into<ParamValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, field: impl Into<String>, spec: PropertySpec) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), spec);
        self
    }

    /// Declared type, treating an unset type as `String`.
    pub fn effective_type(&self) -> ParamType {
        self.param_type.unwrap_or(ParamType::String)
    }

    /// Fill in an unset type and unset property types.
    ///
    /// Precedence for the declaration's own type: declared type, then the default
    /// value's variant, then `Object` if properties are declared, then
    /// `String`. Running this twice changes nothing.
    pub fn set_defaults(&mut self) {
        if self.param_type.is_none() {
            self.param_type = Some(match (&self.default, &self.properties) {
                (Some(default), _) => default.param_type(),
                (None, Some(_)) => ParamType::Object,
                (None, None) => ParamType::String,
            });
        }
        default_property_types(self.properties.as_mut());
    }
}

/// Default every spec in a collection.
pub fn set_defaults_all(specs: &mut [ParamSpec]) {
    for spec in specs {
        spec.set_defaults();
    }
}

pub(crate) fn default_property_types(properties: Option<&mut BTreeMap<String, PropertySpec>>) {
    if let Some(properties) = properties {
        for property in properties.values_mut() {
            property.param_type.get_or_insert(ParamType::String);
        }
    }
}

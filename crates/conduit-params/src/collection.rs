//! Helpers over whole parameter lists.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::reference::{parse_matrix_context, parse_references};
use crate::spec::ParamSpec;
use crate::validation::FieldError;
use crate::value::{Param, ParamType, ParamValue};

/// Names of the given params.
pub fn extract_names(params: &[Param]) -> BTreeSet<String> {
    params.iter().map(|p| p.name.clone()).collect()
}

/// Names of the given specs, in declaration order.
pub fn spec_names(specs: &[ParamSpec]) -> Vec<String> {
    specs.iter().map(|s| s.name.clone()).collect()
}

/// Report every spec name that is declared more than once.
pub fn validate_no_duplicate_names(specs: &[ParamSpec]) -> Option<FieldError> {
    let mut seen = HashSet::new();
    let duplicates: BTreeSet<&str> = specs
        .iter()
        .filter(|s| !seen.insert(s.name.as_str()))
        .map(|s| s.name.as_str())
        .collect();

    if duplicates.is_empty() {
        return None;
    }

    Some(FieldError::new(
        "parameter appears more than once",
        duplicates.iter().map(|name| format!("params[{name}]")),
    ))
}

/// Partition specs into `(strings, arrays, objects)`, keeping relative order.
pub fn sort_by_type(specs: &[ParamSpec]) -> (Vec<ParamSpec>, Vec<ParamSpec>, Vec<ParamSpec>) {
    let mut strings = Vec::new();
    let mut arrays = Vec::new();
    let mut objects = Vec::new();

    for spec in specs {
        match spec.effective_type() {
            ParamType::String => strings.push(spec.clone()),
            ParamType::Array => arrays.push(spec.clone()),
            ParamType::Object => objects.push(spec.clone()),
        }
    }

    (strings, arrays, objects)
}

/// Length of every array-valued param.
pub fn extract_param_array_lengths(params: &[Param]) -> HashMap<String, usize> {
    params
        .iter()
        .filter_map(|p| p.value.array_len().map(|len| (p.name.clone(), len)))
        .collect()
}

/// Length of every array-valued spec default. Specs without a default are skipped.
pub fn extract_default_param_array_lengths(specs: &[ParamSpec]) -> HashMap<String, usize> {
    specs
        .iter()
        .filter_map(|s| {
            let len = s.default.as_ref()?.array_len()?;
            Some((s.name.clone(), len))
        })
        .collect()
}

impl Param {
    /// `(task, result)` of the first matrix context reference in a string value.
    ///
    /// Returns `("", "")` for non-string values or when nothing matches.
    pub fn parse_task_and_result_name(&self) -> (String, String) {
        let ParamValue::String(text) = &self.value else {
            return (String::new(), String::new());
        };

        parse_references(text)
            .iter()
            .find_map(|r| parse_matrix_context(r.expression))
            .map(|ctx| {
                (
                    ctx.task.to_string(),
                    ctx.result.unwrap_or_default().to_string(),
                )
            })
            .unwrap_or_default()
    }
}

//! Variable substitution over parameter values.
//!
//! Three replacement maps drive resolution:
//!
//! - `strings`: `$(key)` inside text is replaced by a string
//! - `arrays`: a value or element that is exactly `$(key)` / `$(key[*])`
//!   becomes (or is spliced into) an array
//! - `objects`: a value that is exactly `$(key)` / `$(key[*])` becomes an object
//!
//! Resolution is total. References with no entry in any map are left in the
//! output untouched, so a partially known context still produces a
//! displayable, partially resolved value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::reference::{Reference, whole_reference};
use crate::value::{Param, ParamValue};

const OPEN: &str = "$(";

/// The replacement maps a resolution pass runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplacementContext {
    /// Scalar replacements, e.g. `params.revision` → `main`.
    pub strings: BTreeMap<String, String>,
    /// Array replacements, e.g. `params.platforms` → `[amd64, arm64]`.
    pub arrays: BTreeMap<String, Vec<String>>,
    /// Object replacements, e.g. `params.repo` → `{url: ...}`.
    pub objects: BTreeMap<String, BTreeMap<String, String>>,
}

impl ReplacementContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    pub fn with_array<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arrays
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_object<I, K, V>(mut self, key: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.objects.insert(
            key.into(),
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Merge another context on top of this one (other takes priority per key).
    pub fn merge(&mut self, other: ReplacementContext) {
        self.strings.extend(other.strings);
        self.arrays.extend(other.arrays);
        self.objects.extend(other.objects);
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.arrays.is_empty() && self.objects.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text substitution
// ─────────────────────────────────────────────────────────────────────────────

/// Replace every `$(key)` whose key is in `strings`.
///
/// One left-to-right pass: substituted text is never rescanned, and tokens
/// without an entry are copied through byte for byte. If two keys could
/// match at the same position (one key containing `)`), the shorter wins.
pub fn apply_replacements(text: &str, strings: &BTreeMap<String, String>) -> String {
    if strings.is_empty() || !text.contains(OPEN) {
        return text.to_string();
    }

    let longest = strings.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(OPEN) {
        let start = cursor + found;
        let body = start + OPEN.len();
        out.push_str(&text[cursor..start]);

        match match_key(text, body, longest, strings) {
            Some((close, value)) => {
                out.push_str(value);
                cursor = close + 1;
            }
            None => {
                out.push_str(OPEN);
                cursor = body;
            }
        }
    }

    out.push_str(&text[cursor..]);
    out
}

/// Find the first `)` after `body` that closes a known key.
fn match_key<'m>(
    text: &str,
    body: usize,
    longest: usize,
    strings: &'m BTreeMap<String, String>,
) -> Option<(usize, &'m str)> {
    for (offset, _) in text[body..].match_indices(')') {
        if offset > longest {
            break;
        }
        if let Some(value) = strings.get(&text[body..body + offset]) {
            return Some((body + offset, value.as_str()));
        }
    }
    None
}

/// The array an element expands to when it is exactly `$(key)` or `$(key[*])`.
fn exact_array_match<'m>(
    element: &str,
    arrays: &'m BTreeMap<String, Vec<String>>,
) -> Option<&'m Vec<String>> {
    let inner = element.strip_prefix(OPEN)?.strip_suffix(')')?;
    arrays
        .get(inner)
        .or_else(|| inner.strip_suffix("[*]").and_then(|key| arrays.get(key)))
}

/// Expand one array element.
///
/// An element that is exactly an array reference is replaced by the whole
/// array (possibly empty). Anything else yields a single element with
/// string replacements applied.
pub fn apply_array_replacements(
    element: &str,
    strings: &BTreeMap<String, String>,
    arrays: &BTreeMap<String, Vec<String>>,
) -> Vec<String> {
    match exact_array_match(element, arrays) {
        Some(values) => {
            trace!(element, len = values.len(), "splicing array reference");
            values.clone()
        }
        None => vec![apply_replacements(element, strings)],
    }
}

fn lookup<'m, V>(map: &'m BTreeMap<String, V>, reference: &Reference<'_>) -> Option<&'m V> {
    map.get(reference.key())
        .or_else(|| map.get(reference.expression))
}

// ─────────────────────────────────────────────────────────────────────────────
// Values and params
// ─────────────────────────────────────────────────────────────────────────────

impl ParamValue {
    /// Resolve references in this value, returning a new value.
    ///
    /// A string that is exactly one array or object reference is promoted to
    /// that array or object; arrays splice whole-element array references;
    /// object fields only get string replacement.
    pub fn apply_replacements(&self, ctx: &ReplacementContext) -> ParamValue {
        match self {
            ParamValue::String(text) => {
                if let Some(reference) = whole_reference(text) {
                    if let Some(values) = lookup(&ctx.arrays, &reference) {
                        debug!(reference = reference.raw, "promoting string to array");
                        return ParamValue::Array(values.clone());
                    }
                    if let Some(fields) = lookup(&ctx.objects, &reference) {
                        debug!(reference = reference.raw, "promoting string to object");
                        return ParamValue::Object(fields.clone());
                    }
                }
                ParamValue::String(apply_replacements(text, &ctx.strings))
            }
            ParamValue::Array(elements) => ParamValue::Array(
                elements
                    .iter()
                    .flat_map(|e| apply_array_replacements(e, &ctx.strings, &ctx.arrays))
                    .collect(),
            ),
            ParamValue::Object(fields) => ParamValue::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), apply_replacements(v, &ctx.strings)))
                    .collect(),
            ),
        }
    }
}

impl Param {
    /// Resolve this param's value. The name is kept as is.
    pub fn replace_variables(&self, ctx: &ReplacementContext) -> Param {
        Param {
            name: self.name.clone(),
            value: self.value.apply_replacements(ctx),
        }
    }
}

/// Resolve every param in a collection, preserving order.
pub fn replace_variables(params: &[Param], ctx: &ReplacementContext) -> Vec<Param> {
    params.iter().map(|p| p.replace_variables(ctx)).collect()
}

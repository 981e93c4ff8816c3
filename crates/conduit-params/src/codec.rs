//! Wire codec for parameter values.
//!
//! Persisted task and pipeline definitions carry parameter values as plain
//! JSON: a string, an array of strings, or an object of strings. Decoding is
//! lenient about everything else: `null` becomes an empty string, and
//! numbers, booleans and nested or mixed structures become a string holding
//! their literal text, byte for byte.
//!
//! Deserialization captures the token with [`serde_json::value::RawValue`],
//! so [`ParamValue`] is decoded from JSON documents only.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{ParamsError, Result};
use crate::spec::ParamSpec;
use crate::value::{Param, ParamValue};

// ─────────────────────────────────────────────────────────────────────────────
// serde
// ─────────────────────────────────────────────────────────────────────────────

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ParamValue::String(s) => serializer.serialize_str(s),
            ParamValue::Array(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for v in values {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            ParamValue::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    /// The token is captured as raw JSON text and classified by [`decode_raw`],
    /// so numbers and mixed fragments keep their exact spelling.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(decode_raw(raw.get()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Decode one JSON document into a value.
///
/// Fails only when the payload is not well-formed JSON.
pub fn decode(payload: &str) -> Result<ParamValue> {
    serde_json::from_str(payload).map_err(ParamsError::Decode)
}

/// Decode a raw value token that may not be valid JSON at all.
///
/// This is the path for values captured from task output, where the text is
/// whatever the step wrote. It never fails: anything that is not a JSON
/// string, string array or string object is kept verbatim as a string.
pub fn decode_raw(raw: &str) -> ParamValue {
    let head = raw.trim_start();
    if head.is_empty() {
        return ParamValue::String(String::new());
    }

    if head.starts_with('[')
        && let Ok(values) = serde_json::from_str::<Vec<String>>(raw)
    {
        return ParamValue::Array(values);
    }

    if head.starts_with('{')
        && let Ok(fields) = serde_json::from_str::<BTreeMap<String, String>>(raw)
    {
        return ParamValue::Object(fields);
    }

    match serde_json::from_str::<Option<String>>(raw) {
        Ok(s) => ParamValue::String(s.unwrap_or_default()),
        Err(_) => ParamValue::String(raw.to_string()),
    }
}

/// Encode a value as compact JSON.
pub fn encode(value: &ParamValue) -> Result<String> {
    serde_json::to_string(value).map_err(ParamsError::Encode)
}

/// Decode a JSON array of `{"name": ..., "value": ...}` bindings.
pub fn decode_params(payload: &str) -> Result<Vec<Param>> {
    serde_json::from_str(payload).map_err(ParamsError::Decode)
}

/// Decode a JSON array of parameter declarations.
pub fn decode_param_specs(payload: &str) -> Result<Vec<ParamSpec>> {
    serde_json::from_str(payload).map_err(ParamsError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize)]
    struct Holder {
        val: ParamValue,
    }

    fn holder(input: serde_json::Value) -> ParamValue {
        let compact = serde_json::to_string(&input).unwrap();
        let pretty = serde_json::to_string_pretty(&input).unwrap();
        let a: Holder = serde_json::from_str(&compact).unwrap();
        let b: Holder = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a.val, b.val, "compact and multiline encodings disagree");
        a.val
    }

    #[test]
    fn test_decode_number_becomes_string() {
        assert_eq!(holder(json!({"val": 123})), ParamValue::string("123"));
    }

    #[test]
    fn test_decode_string() {
        assert_eq!(holder(json!({"val": "123"})), ParamValue::string("123"));
        assert_eq!(holder(json!({"val": ""})), ParamValue::string(""));
    }

    #[test]
    fn test_decode_null_is_empty_string() {
        assert_eq!(holder(json!({"val": null})), ParamValue::string(""));
    }

    #[test]
    fn test_decode_bool_and_float() {
        assert_eq!(holder(json!({"val": true})), ParamValue::string("true"));
        assert_eq!(holder(json!({"val": 1.5})), ParamValue::string("1.5"));
    }

    #[test]
    fn test_decode_arrays() {
        assert_eq!(
            holder(json!({"val": []})),
            ParamValue::Array(Vec::new())
        );
        assert_eq!(
            holder(json!({"val": ["oneelement"]})),
            ParamValue::array(["oneelement"])
        );
        assert_eq!(
            holder(json!({"val": ["multiple", "elements"]})),
            ParamValue::array(["multiple", "elements"])
        );
    }

    #[test]
    fn test_decode_object() {
        assert_eq!(
            holder(json!({"val": {"key1": "val1", "key2": "val2"}})),
            ParamValue::object([("key1", "val1"), ("key2", "val2")])
        );
    }

    fn literal(document: &str) -> ParamValue {
        serde_json::from_str::<Holder>(document).unwrap().val
    }

    #[test]
    fn test_decode_mixed_array_kept_as_text() {
        assert_eq!(literal(r#"{"val": [1,"2",3]}"#), ParamValue::string(r#"[1,"2",3]"#));
        assert_eq!(
            literal(r#"{"val": [1, "2", 3]}"#),
            ParamValue::string(r#"[1, "2", 3]"#)
        );
    }

    #[test]
    fn test_decode_nested_object_kept_as_text() {
        assert_eq!(
            literal(r#"{"val": {"a": {"b": "c"}}}"#),
            ParamValue::string(r#"{"a": {"b": "c"}}"#)
        );
    }

    #[test]
    fn test_decode_number_spelling_preserved() {
        assert_eq!(decode("1e3").unwrap(), ParamValue::string("1e3"));
        assert_eq!(decode("1.50").unwrap(), ParamValue::string("1.50"));
        assert_eq!(decode("-0").unwrap(), ParamValue::string("-0"));
        assert_eq!(
            decode("12345678901234567890123").unwrap(),
            ParamValue::string("12345678901234567890123")
        );
        assert_eq!(literal(r#"{"val": 1.50}"#), ParamValue::string("1.50"));
    }

    #[test]
    fn test_decode_whitespace_inside_fragment_preserved() {
        assert_eq!(decode("[1, 2, 3]").unwrap(), ParamValue::string("[1, 2, 3]"));
        assert_eq!(
            literal("{\"val\": [\n  1,\n  \"x\"\n]}"),
            ParamValue::string("[\n  1,\n  \"x\"\n]")
        );
    }

    #[test]
    fn test_decode_string_arrays_ignore_whitespace() {
        assert_eq!(
            literal(r#"{"val": [ "a" , "b" ]}"#),
            ParamValue::array(["a", "b"])
        );
        assert_eq!(
            literal(r#"{"val": { "k" : "v" }}"#),
            ParamValue::object([("k", "v")])
        );
    }

    #[test]
    fn test_decode_escaped_string() {
        assert_eq!(
            literal(r#"{"val": "line\nnext \"q\""}"#),
            ParamValue::string("line\nnext \"q\"")
        );
    }

    #[test]
    fn test_decode_spec_default_keeps_literal() {
        let specs = decode_param_specs(r#"[{"name": "n", "default": 1.50}, {"name": "e"}]"#).unwrap();
        assert_eq!(specs[0].default, Some(ParamValue::string("1.50")));
        assert_eq!(specs[1].default, None);
    }

    #[test]
    fn test_decode_raw() {
        assert_eq!(decode_raw(""), ParamValue::string(""));
        assert_eq!(decode_raw("1"), ParamValue::string("1"));
        assert_eq!(decode_raw("[1,2,3]"), ParamValue::string("[1,2,3]"));
        assert_eq!(
            decode_raw(r#"[1,\"2\",3]"#),
            ParamValue::string(r#"[1,\"2\",3]"#)
        );
        assert_eq!(decode_raw("hello"), ParamValue::string("hello"));
        assert_eq!(decode_raw("\"quoted\""), ParamValue::string("quoted"));
        assert_eq!(decode_raw("null"), ParamValue::string(""));
        assert_eq!(
            decode_raw(r#"["hello","world"]"#),
            ParamValue::array(["hello", "world"])
        );
        assert_eq!(
            decode_raw(r#"{"hello":"world"}"#),
            ParamValue::object([("hello", "world")])
        );
    }

    #[test]
    fn test_encode() {
        let cases = [
            (ParamValue::string("123"), r#"{"val":"123"}"#),
            (ParamValue::array(["123", "1234"]), r#"{"val":["123","1234"]}"#),
            (ParamValue::array(["a", "a", "a"]), r#"{"val":["a","a","a"]}"#),
            (
                ParamValue::object([("key2", "var2"), ("key1", "var1")]),
                r#"{"val":{"key1":"var1","key2":"var2"}}"#,
            ),
        ];
        for (value, expected) in cases {
            let out = serde_json::to_string(&Holder { val: value }).unwrap();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_encode_empty_array() {
        assert_eq!(encode(&ParamValue::Array(Vec::new())).unwrap(), "[]");
    }

    #[test]
    fn test_decode_params_document() {
        let params = decode_params(
            r#"[{"name": "image", "value": "alpine"},
                {"name": "platforms", "value": ["amd64", "arm64"]},
                {"name": "bare"}]"#,
        )
        .unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0], Param::new("image", "alpine"));
        assert_eq!(params[1].value, ParamValue::array(["amd64", "arm64"]));
        assert_eq!(params[2].value, ParamValue::string(""));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn value_strategy() -> impl Strategy<Value = ParamValue> {
        prop_oneof![
            any::<String>().prop_map(ParamValue::String),
            prop::collection::vec(any::<String>(), 0..6).prop_map(ParamValue::Array),
            prop::collection::btree_map(any::<String>(), any::<String>(), 0..6)
                .prop_map(ParamValue::Object),
        ]
    }

    proptest! {
        /// Property: encoding then decoding yields the original value.
        #[test]
        fn encode_decode_roundtrip(value in value_strategy()) {
            let encoded = encode(&value).unwrap();
            prop_assert_eq!(decode(&encoded).unwrap(), value);
        }

        /// Property: the raw-token path agrees with the document path on encoded values.
        #[test]
        fn raw_decode_matches_document_decode(value in value_strategy()) {
            let encoded = encode(&value).unwrap();
            prop_assert_eq!(decode_raw(&encoded), value);
        }
    }
}

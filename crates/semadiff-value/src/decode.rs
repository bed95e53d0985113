//! Format decoders: parse JSON/YAML/TOML bytes into [`DecodedValue`] trees.
//!
//! Normalization happens here, at the parse boundary, so the comparison
//! logic downstream never has to reason about decoder-specific types.

use std::collections::BTreeMap;

use crate::error::DecodeError;
use crate::value::DecodedValue;

/// Decode a JSON document.
///
/// Integers larger than 2^53 may lose precision in the f64 normalization.
pub fn decode_json(bytes: &[u8]) -> Result<DecodedValue, DecodeError> {
    let raw: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(from_json(&raw))
}

/// Decode a YAML document. Non-string mapping keys are stringified.
pub fn decode_yaml(bytes: &[u8]) -> Result<DecodedValue, DecodeError> {
    let raw: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
    Ok(from_yaml(&raw))
}

/// Decode a TOML document. The top level must be a table; datetimes
/// decode as their string representation.
pub fn decode_toml(bytes: &[u8]) -> Result<DecodedValue, DecodeError> {
    let text = std::str::from_utf8(bytes)?;
    let raw: toml::Table = toml::from_str(text)?;
    Ok(from_toml_table(&raw))
}

fn from_json(raw: &serde_json::Value) -> DecodedValue {
    match raw {
        serde_json::Value::Null => DecodedValue::Null,
        serde_json::Value::Bool(b) => DecodedValue::Bool(*b),
        serde_json::Value::Number(n) => DecodedValue::Number(json_number(n)),
        serde_json::Value::String(s) => DecodedValue::String(s.clone()),
        serde_json::Value::Array(items) => {
            DecodedValue::Array(items.iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => DecodedValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), from_json(v)))
                .collect(),
        ),
    }
}

fn json_number(n: &serde_json::Number) -> f64 {
    if let Some(i) = n.as_i64() {
        i as f64
    } else if let Some(u) = n.as_u64() {
        u as f64
    } else {
        n.as_f64().unwrap_or(f64::NAN)
    }
}

fn from_yaml(raw: &serde_yaml::Value) -> DecodedValue {
    match raw {
        serde_yaml::Value::Null => DecodedValue::Null,
        serde_yaml::Value::Bool(b) => DecodedValue::Bool(*b),
        serde_yaml::Value::Number(n) => DecodedValue::Number(yaml_number(n)),
        serde_yaml::Value::String(s) => DecodedValue::String(s.clone()),
        serde_yaml::Value::Sequence(items) => {
            DecodedValue::Array(items.iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut out = BTreeMap::new();
            for (k, v) in map {
                out.insert(yaml_key(k), from_yaml(v));
            }
            DecodedValue::Object(out)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(&tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> f64 {
    if let Some(i) = n.as_i64() {
        i as f64
    } else if let Some(u) = n.as_u64() {
        u as f64
    } else {
        n.as_f64().unwrap_or(f64::NAN)
    }
}

/// Stringify a YAML mapping key. String keys pass through unquoted;
/// everything else renders the way it would appear in a change line.
fn yaml_key(key: &serde_yaml::Value) -> String {
    match from_yaml(key) {
        DecodedValue::String(s) => s,
        other => other.to_string(),
    }
}

fn from_toml_table(table: &toml::Table) -> DecodedValue {
    DecodedValue::Object(
        table
            .iter()
            .map(|(k, v)| (k.clone(), from_toml(v)))
            .collect(),
    )
}

fn from_toml(raw: &toml::Value) -> DecodedValue {
    match raw {
        toml::Value::String(s) => DecodedValue::String(s.clone()),
        toml::Value::Integer(i) => DecodedValue::Number(*i as f64),
        toml::Value::Float(f) => DecodedValue::Number(*f),
        toml::Value::Boolean(b) => DecodedValue::Bool(*b),
        toml::Value::Datetime(dt) => DecodedValue::String(dt.to_string()),
        toml::Value::Array(items) => DecodedValue::Array(items.iter().map(from_toml).collect()),
        toml::Value::Table(table) => from_toml_table(table),
    }
}

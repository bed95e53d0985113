//! The normalized in-memory shape of decoded structured content.

use std::collections::BTreeMap;
use std::fmt;

/// A decoded structured value with decoder differences normalized away.
///
/// Every numeric value is an `f64` regardless of how the source format
/// spelled it, so a YAML integer `30` and a JSON number `30.0` compare
/// equal. Object keys are always strings and iterate in sorted order,
/// which keeps diff output deterministic.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedValue {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// Any numeric value, normalized to `f64`.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<DecodedValue>),
    /// A string-keyed mapping with unique keys.
    Object(BTreeMap<String, DecodedValue>),
}

impl DecodedValue {
    /// Returns `true` for [`DecodedValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, DecodedValue::Null)
    }

    /// Returns `true` for the container variants (Array, Object).
    pub fn is_container(&self) -> bool {
        matches!(self, DecodedValue::Array(_) | DecodedValue::Object(_))
    }

    /// Convert back to a `serde_json::Value` for compact rendering.
    ///
    /// Integral numbers become JSON integers so that nested containers
    /// render `30` rather than `30.0`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DecodedValue::Null => serde_json::Value::Null,
            DecodedValue::Bool(b) => serde_json::Value::Bool(*b),
            DecodedValue::Number(n) => {
                if let Some(i) = as_integral(*n) {
                    serde_json::Value::from(i)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            DecodedValue::String(s) => serde_json::Value::String(s.clone()),
            DecodedValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(DecodedValue::to_json).collect())
            }
            DecodedValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Returns `Some(i)` when `n` is a finite integral value representable as i64.
fn as_integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Display renders a value the way it appears inside a change line:
/// strings quoted, `null` for Null, integral numbers without a decimal
/// point, and containers as compact JSON.
impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Null => write!(f, "null"),
            DecodedValue::Bool(b) => write!(f, "{b}"),
            DecodedValue::Number(n) => match as_integral(*n) {
                Some(i) => write!(f, "{i}"),
                None => write!(f, "{n}"),
            },
            DecodedValue::String(s) => write!(f, "{s:?}"),
            DecodedValue::Array(_) | DecodedValue::Object(_) => {
                let compact = serde_json::to_string(&self.to_json())
                    .unwrap_or_else(|_| "<unrenderable>".to_string());
                write!(f, "{compact}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_displays_as_null() {
        assert_eq!(DecodedValue::Null.to_string(), "null");
    }

    #[test]
    fn strings_are_quoted() {
        let v = DecodedValue::String("hello".into());
        assert_eq!(v.to_string(), "\"hello\"");
    }

    #[test]
    fn integral_numbers_drop_decimal_point() {
        assert_eq!(DecodedValue::Number(30.0).to_string(), "30");
        assert_eq!(DecodedValue::Number(-7.0).to_string(), "-7");
    }

    #[test]
    fn fractional_numbers_keep_fraction() {
        assert_eq!(DecodedValue::Number(1.5).to_string(), "1.5");
    }

    #[test]
    fn booleans_render_bare() {
        assert_eq!(DecodedValue::Bool(true).to_string(), "true");
        assert_eq!(DecodedValue::Bool(false).to_string(), "false");
    }

    #[test]
    fn arrays_render_as_compact_json() {
        let v = DecodedValue::Array(vec![
            DecodedValue::Number(1.0),
            DecodedValue::String("x".into()),
        ]);
        assert_eq!(v.to_string(), r#"[1,"x"]"#);
    }

    #[test]
    fn objects_render_as_compact_json_with_sorted_keys() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), DecodedValue::Number(2.0));
        map.insert("a".to_string(), DecodedValue::Number(1.0));
        let v = DecodedValue::Object(map);
        assert_eq!(v.to_string(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn equal_numbers_from_different_spellings() {
        assert_eq!(DecodedValue::Number(30.0), DecodedValue::Number(30.0));
        assert_ne!(DecodedValue::Number(30.0), DecodedValue::Number(30.5));
    }

    #[test]
    fn nested_container_numbers_render_integrally() {
        let mut map = BTreeMap::new();
        map.insert("age".to_string(), DecodedValue::Number(30.0));
        let v = DecodedValue::Object(map);
        assert_eq!(v.to_string(), r#"{"age":30}"#);
    }
}

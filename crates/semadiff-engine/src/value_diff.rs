//! Structured-value differ: recursive path-based comparison of decoded
//! JSON/YAML/TOML trees.

use std::collections::BTreeSet;

use semadiff_value::{decode_json, decode_toml, decode_yaml, DecodeError, DecodedValue};
use tracing::debug;

use crate::change::Change;
use crate::{fallback_result, DiffFormat, SemanticDiffResult, NO_CHANGES};

/// Which structured format is being compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Structured {
    Json,
    Yaml,
    Toml,
}

impl Structured {
    fn decode(self, bytes: &[u8]) -> Result<DecodedValue, DecodeError> {
        match self {
            Structured::Json => decode_json(bytes),
            Structured::Yaml => decode_yaml(bytes),
            Structured::Toml => decode_toml(bytes),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Structured::Json => "JSON",
            Structured::Yaml => "YAML",
            Structured::Toml => "TOML",
        }
    }

    fn format(self) -> DiffFormat {
        match self {
            Structured::Json => DiffFormat::Json,
            Structured::Yaml => DiffFormat::Yaml,
            Structured::Toml => DiffFormat::Toml,
        }
    }
}

/// Parse both sides and produce a path-based diff. Parse failure on
/// either side degrades to the unified differ with a message naming the
/// failing side.
pub(crate) fn diff_structured(
    path: &str,
    base: &[u8],
    head: &[u8],
    format: Structured,
) -> SemanticDiffResult {
    let base_val = match format.decode(base) {
        Ok(v) => v,
        Err(err) => {
            debug!(path, error = %err, "base side failed structured decode");
            return fallback_result(
                path,
                base,
                head,
                &format!("failed to parse base as {}", format.label()),
            );
        }
    };
    let head_val = match format.decode(head) {
        Ok(v) => v,
        Err(err) => {
            debug!(path, error = %err, "head side failed structured decode");
            return fallback_result(
                path,
                base,
                head,
                &format!("failed to parse head as {}", format.label()),
            );
        }
    };

    let changes = compare_values("", &base_val, &head_val);
    if changes.is_empty() {
        return SemanticDiffResult {
            format: format.format(),
            diff: NO_CHANGES.to_string(),
            message: None,
        };
    }

    SemanticDiffResult {
        format: format.format(),
        diff: crate::change::render_changes(&changes),
        message: None,
    }
}

/// Recursively compare two decoded values at `path`.
///
/// A `null` on exactly one side is reported as a modification showing
/// `null`, not as added/removed. Only missing map keys and missing
/// array indices get true added/removed treatment.
pub(crate) fn compare_values(path: &str, base: &DecodedValue, head: &DecodedValue) -> Vec<Change> {
    if base.is_null() && head.is_null() {
        return Vec::new();
    }
    if base.is_null() || head.is_null() {
        return vec![Change::modified(
            path,
            Some(base.to_string()),
            Some(head.to_string()),
        )];
    }

    match (base, head) {
        (DecodedValue::Object(b), DecodedValue::Object(h)) => compare_objects(path, b, h),
        (DecodedValue::Array(b), DecodedValue::Array(h)) => compare_arrays(path, b, h),
        _ if base.is_container() || head.is_container() => {
            vec![Change::type_changed(path, base.to_string(), head.to_string())]
        }
        _ => {
            if base == head {
                Vec::new()
            } else {
                vec![Change::modified(
                    path,
                    Some(base.to_string()),
                    Some(head.to_string()),
                )]
            }
        }
    }
}

/// Union of keys from both sides, visited in sorted order.
fn compare_objects(
    path: &str,
    base: &std::collections::BTreeMap<String, DecodedValue>,
    head: &std::collections::BTreeMap<String, DecodedValue>,
) -> Vec<Change> {
    let keys: BTreeSet<&String> = base.keys().chain(head.keys()).collect();

    let mut changes = Vec::new();
    for key in keys {
        let child_path = join_path(path, key);
        match (base.get(key), head.get(key)) {
            (Some(base_val), None) => {
                changes.push(Change::removed(child_path, Some(base_val.to_string())));
            }
            (None, Some(head_val)) => {
                changes.push(Change::added(child_path, Some(head_val.to_string())));
            }
            (Some(base_val), Some(head_val)) => {
                changes.extend(compare_values(&child_path, base_val, head_val));
            }
            (None, None) => unreachable!("key came from one of the two maps"),
        }
    }

    changes
}

/// Index-by-index comparison; reordering is not detected.
fn compare_arrays(path: &str, base: &[DecodedValue], head: &[DecodedValue]) -> Vec<Change> {
    let mut changes = Vec::new();
    for i in 0..base.len().max(head.len()) {
        let child_path = format!("{path}[{i}]");
        match (base.get(i), head.get(i)) {
            (None, Some(head_val)) => {
                changes.push(Change::added(child_path, Some(head_val.to_string())));
            }
            (Some(base_val), None) => {
                changes.push(Change::removed(child_path, Some(base_val.to_string())));
            }
            (Some(base_val), Some(head_val)) => {
                changes.extend(compare_values(&child_path, base_val, head_val));
            }
            (None, None) => unreachable!("index is below one of the two lengths"),
        }
    }
    changes
}

fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_json(base: &str, head: &str) -> Vec<String> {
        let base = decode_json(base.as_bytes()).unwrap();
        let head = decode_json(head.as_bytes()).unwrap();
        compare_values("", &base, &head)
            .iter()
            .map(Change::to_string)
            .collect()
    }

    #[test]
    fn identical_values_no_changes() {
        assert!(compare_json(r#"{"key": "value"}"#, r#"{"key": "value"}"#).is_empty());
    }

    #[test]
    fn scalar_change_is_modified() {
        let lines = compare_json(r#"{"theme": "light"}"#, r#"{"theme": "dark"}"#);
        assert_eq!(lines, [r#"theme: "light" → "dark""#]);
    }

    #[test]
    fn added_key() {
        let lines = compare_json(r#"{"a": 1}"#, r#"{"a": 1, "b": 2}"#);
        assert_eq!(lines, ["b: added 2"]);
    }

    #[test]
    fn removed_key() {
        let lines = compare_json(r#"{"a": 1, "b": 2}"#, r#"{"a": 1}"#);
        assert_eq!(lines, ["b: removed (was 2)"]);
    }

    #[test]
    fn nested_path_uses_dots_and_brackets() {
        let lines = compare_json(
            r#"{"users": [{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]}"#,
            r#"{"users": [{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bobby"}]}"#,
        );
        assert_eq!(lines, [r#"users[1].name: "Bob" → "Bobby""#]);
    }

    #[test]
    fn array_element_added() {
        let lines = compare_json("[1, 2, 3]", "[1, 2, 3, 4]");
        assert_eq!(lines, ["[3]: added 4"]);
    }

    #[test]
    fn array_element_removed() {
        let lines = compare_json("[1, 2, 3]", "[1, 2]");
        assert_eq!(lines, ["[2]: removed (was 3)"]);
    }

    #[test]
    fn array_reordering_is_positional() {
        let lines = compare_json("[1, 2]", "[2, 1]");
        assert_eq!(lines, ["[0]: 1 → 2", "[1]: 2 → 1"]);
    }

    #[test]
    fn scalar_type_switch_renders_both_values() {
        let lines = compare_json(r#"{"val": "string"}"#, r#"{"val": 123}"#);
        assert_eq!(lines, [r#"val: "string" → 123"#]);
    }

    #[test]
    fn container_type_switch_is_type_changed() {
        let base = decode_json(br#"{"val": {"a": 1}}"#).unwrap();
        let head = decode_json(br#"{"val": [1]}"#).unwrap();
        let changes = compare_values("", &base, &head);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, crate::change::ChangeKind::TypeChanged);
        assert_eq!(changes[0].to_string(), r#"val: {"a":1} → [1]"#);
    }

    #[test]
    fn null_to_value_is_modified_not_added() {
        let lines = compare_json(r#"{"val": null}"#, r#"{"val": "something"}"#);
        assert_eq!(lines, [r#"val: null → "something""#]);
    }

    #[test]
    fn boolean_change() {
        let lines = compare_json(r#"{"enabled": true}"#, r#"{"enabled": false}"#);
        assert_eq!(lines, ["enabled: true → false"]);
    }

    #[test]
    fn keys_are_visited_in_sorted_order() {
        let lines = compare_json(r#"{"b": 1, "a": 1}"#, r#"{"b": 2, "a": 2}"#);
        assert_eq!(lines, ["a: 1 → 2", "b: 1 → 2"]);
    }

    #[test]
    fn deep_nesting_builds_full_path() {
        let lines = compare_json(
            r#"{"level1": {"level2": {"level3": {"value": "old"}}}}"#,
            r#"{"level1": {"level2": {"level3": {"value": "new"}}}}"#,
        );
        assert_eq!(lines, [r#"level1.level2.level3.value: "old" → "new""#]);
    }

    #[test]
    fn add_remove_symmetry() {
        let forward = compare_json(r#"{"a": 1, "b": 2}"#, r#"{"a": 1}"#);
        let backward = compare_json(r#"{"a": 1}"#, r#"{"a": 1, "b": 2}"#);
        assert_eq!(forward, ["b: removed (was 2)"]);
        assert_eq!(backward, ["b: added 2"]);
    }

    #[test]
    fn yaml_integer_matches_json_float() {
        let base = decode_yaml(b"age: 30\n").unwrap();
        let head = decode_json(br#"{"age": 30.0}"#).unwrap();
        assert!(compare_values("", &base, &head).is_empty());
    }
}

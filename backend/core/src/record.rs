//! Path-addressed access into student record trees.
//!
//! Records are `serde_json::Value` documents. A path is a dot-separated
//! address (`family.guardianName`, `education.grades.0.GPA`); a segment
//! made entirely of ASCII digits addresses an array index, anything else
//! a map key. Writers materialize intermediate containers on demand,
//! readers never fail on absence.

use serde_json::{Map, Value};

use crate::messages;

/// Parse a path segment as an array index.
///
/// This is the one deliberately clever rule in the record model: when
/// descending through `set_path`, the container created (or reused) for a
/// segment is an array exactly when the segment following it parses here.
/// Only a non-empty run of ASCII digits counts; `"01"` is index 1, while
/// `"1a"`, `"-1"`, and `""` are map keys. The first segment of a path is
/// always a map key at the record root, so a field literally named `"0"`
/// is still addressable at top level.
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Resolve a dotted path to a node, or `None` if the node or any ancestor
/// is absent. `Null` leaves count as absent.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for segment in path.split('.') {
        node = match node {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(parse_index(segment)?)?,
            _ => return None,
        };
    }
    if node.is_null() {
        None
    } else {
        Some(node)
    }
}

/// Resolve a dotted path to display text, substituting the placeholder
/// for anything absent, empty, or not a scalar.
pub fn display_path(root: &Value, path: &str) -> String {
    match get_path(root, path) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => messages::PLACEHOLDER.to_string(),
    }
}

/// Write `value` at a dotted path, materializing intermediate containers.
///
/// The root is coerced to an object if it is not one already; the first
/// segment is always a map key. Deeper segments create an array when the
/// segment addressing into them is numeric (see [`parse_index`]), a map
/// otherwise. An existing node of the wrong container kind is replaced,
/// so repeated writes stay last-write-wins.
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    let mut segments = path.split('.');
    let first = match segments.next() {
        Some(s) if !s.is_empty() => s,
        _ => return,
    };
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let mut node = match root {
        Value::Object(map) => map.entry(first.to_string()).or_insert(Value::Null),
        _ => return,
    };
    for segment in segments {
        node = slot(node, segment);
    }
    *node = value;
}

/// Descend one segment, coercing `node` to the container kind the segment
/// addresses and returning the child slot (extending arrays with nulls).
fn slot<'a>(node: &'a mut Value, segment: &str) -> &'a mut Value {
    if let Some(index) = parse_index(segment) {
        if !node.is_array() {
            *node = Value::Array(Vec::new());
        }
        if let Value::Array(items) = node {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            return &mut items[index];
        }
        unreachable!("node was just coerced to an array")
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        return map.entry(segment.to_string()).or_insert(Value::Null);
    }
    unreachable!("node was just coerced to an object")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn index_segments_are_digit_runs_only() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("12"), Some(12));
        assert_eq!(parse_index("01"), Some(1));
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("1a"), None);
        assert_eq!(parse_index("a"), None);
    }

    #[test]
    fn set_path_builds_nested_maps() {
        let mut record = json!({});
        set_path(&mut record, "family.guardianName", json!("สมชาย"));
        assert_eq!(record, json!({"family": {"guardianName": "สมชาย"}}));
    }

    #[test]
    fn set_path_builds_arrays_for_numeric_segments() {
        let mut record = json!({});
        set_path(&mut record, "education.grades.1.GPA", json!("3.50"));
        assert_eq!(
            record,
            json!({"education": {"grades": [null, {"GPA": "3.50"}]}})
        );
    }

    #[test]
    fn set_path_reuses_existing_containers() {
        let mut record = json!({});
        set_path(&mut record, "education.grades.0.year", json!("2566"));
        set_path(&mut record, "education.grades.0.GPA", json!("3.75"));
        set_path(&mut record, "education.class", json!("ม.1"));
        assert_eq!(
            record,
            json!({"education": {
                "class": "ม.1",
                "grades": [{"year": "2566", "GPA": "3.75"}]
            }})
        );
    }

    #[test]
    fn set_path_is_last_write_wins_on_kind_conflicts() {
        let mut record = json!({});
        set_path(&mut record, "education.class", json!("ม.1"));
        set_path(&mut record, "education.class.extra", json!("x"));
        assert_eq!(record, json!({"education": {"class": {"extra": "x"}}}));
    }

    #[test]
    fn first_segment_is_a_map_key_even_when_numeric() {
        let mut record = json!({});
        set_path(&mut record, "0.name", json!("v"));
        assert_eq!(record, json!({"0": {"name": "v"}}));
    }

    #[test]
    fn get_path_walks_maps_and_arrays() {
        let record = json!({"education": {"grades": [{"year": "2566"}]}});
        assert_eq!(
            get_path(&record, "education.grades.0.year"),
            Some(&json!("2566"))
        );
        assert_eq!(get_path(&record, "education.grades.1.year"), None);
        assert_eq!(get_path(&record, "family.guardianName"), None);
    }

    #[test]
    fn get_path_treats_null_as_absent() {
        let record = json!({"name": null});
        assert_eq!(get_path(&record, "name"), None);
    }

    #[test]
    fn display_path_substitutes_placeholder() {
        let record = json!({"name": "Anna", "behavior": {"goodnessScore": 95}});
        assert_eq!(display_path(&record, "name"), "Anna");
        assert_eq!(display_path(&record, "behavior.goodnessScore"), "95");
        assert_eq!(display_path(&record, "address"), messages::PLACEHOLDER);
        assert_eq!(
            display_path(&record, "family.guardianPhone"),
            messages::PLACEHOLDER
        );
    }

    #[test]
    fn display_path_treats_empty_string_as_absent() {
        let record = json!({"name": ""});
        assert_eq!(display_path(&record, "name"), messages::PLACEHOLDER);
    }
}

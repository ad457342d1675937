//! Record shaper: flat `key=value, key=value` text into a nested record.

use serde_json::{Map, Value};

use schoolbot_core::record::set_path;

use crate::fields::field_path;

/// Shape free-form save-command input into a partial student record.
///
/// The input is split on `,`; each segment is split on its first `=` into
/// a field name and a string value, both trimmed. Segments missing either
/// part are dropped silently. Field names go through the translation
/// table; a resolved path without a `.` lands directly at the root, a
/// dotted path materializes nested containers. Duplicate paths are
/// last-write-wins. This never fails; callers decide whether an empty
/// result is worth rejecting.
pub fn shape_record(input: &str) -> Value {
    let mut record = Value::Object(Map::new());
    for segment in input.split(',') {
        let (key, value) = match segment.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => continue,
        };
        if key.is_empty() || value.is_empty() {
            continue;
        }
        let path = field_path(key);
        if path.contains('.') {
            set_path(&mut record, path, Value::String(value.to_string()));
        } else if let Value::Object(map) = &mut record {
            map.insert(path.to_string(), Value::String(value.to_string()));
        }
    }
    record
}

//! Dot-path access into arbitrary JSON records.
//!
//! Price records arrive with a per-category shape, so table columns address
//! their cells with keys like `price` or `machine.title`. Reads never fail:
//! a missing segment yields an empty string. Writes create the intermediate
//! objects they need.

use serde_json::{Map, Value};

/// Follows `path` through nested objects. `None` when any segment is missing
/// or when an intermediate value is not an object.
pub fn get_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| current.as_object()?.get(segment))
}

/// Reads the value at `path`, substituting an empty string for anything missing.
pub fn read_path(record: &Value, path: &str) -> Value {
    get_path(record, path)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Sets `value` at `path`, replacing non-object intermediates with empty objects.
pub fn write_path(record: &mut Value, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(leaf) = segments.pop() else {
        return;
    };

    let mut current = record;
    for segment in segments {
        let object = ensure_object(current);
        current = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    ensure_object(current).insert(leaf.to_string(), value);
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

/// Text shown for a cell value: strings unquoted, null as empty.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Numeric reading of a cell. Inputs hand back strings, so numeric text
/// counts. `NaN` and infinities are not numbers here.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_existing_nested_value() {
        let record = json!({ "id": 1, "machine": { "title": "GTO 52" } });
        assert_eq!(read_path(&record, "machine.title"), json!("GTO 52"));
        assert_eq!(read_path(&record, "id"), json!(1));
    }

    #[test]
    fn test_read_missing_segment_is_empty_string() {
        let record = json!({ "id": 1, "machine": null });
        assert_eq!(read_path(&record, "machine.title"), json!(""));
        assert_eq!(read_path(&record, "type.title"), json!(""));
        assert_eq!(read_path(&record, "price"), json!(""));
        assert_eq!(read_path(&json!(42), "anything"), json!(""));
    }

    #[test]
    fn test_write_creates_intermediate_object() {
        let mut record = json!({ "id": 7 });
        write_path(&mut record, "machine.title", json!("Heidelberg"));
        assert_eq!(record, json!({ "id": 7, "machine": { "title": "Heidelberg" } }));
    }

    #[test]
    fn test_write_replaces_scalar_intermediate() {
        let mut record = json!({ "type": 3 });
        write_path(&mut record, "type.title", json!("گلاسه"));
        assert_eq!(record["type"]["title"], json!("گلاسه"));
    }

    #[test]
    fn test_write_top_level_keeps_siblings() {
        let mut record = json!({ "id": 1, "price": 100 });
        write_path(&mut record, "price", json!("250"));
        assert_eq!(record, json!({ "id": 1, "price": "250" }));
    }

    #[test]
    fn test_display_and_number_helpers() {
        assert_eq!(display_text(&Value::Null), "");
        assert_eq!(display_text(&json!("abc")), "abc");
        assert_eq!(display_text(&json!(12.5)), "12.5");
        assert_eq!(as_number(&json!(" 40 ")), Some(40.0));
        assert_eq!(as_number(&json!("x")), None);
        assert_eq!(as_number(&json!("NaN")), None);
        assert_eq!(as_number(&json!("inf")), None);
        assert_eq!(as_number(&json!("-infinity")), None);
    }
}

use serde_json::Value;

/// Truthiness of a flag value: `false`, `null`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// A Mapping is disabled when it carries `enable_key` with a falsy value.
/// Everything else is always enabled.
pub fn is_enabled(node: &Value, enable_key: &str) -> bool {
    match node {
        Value::Object(map) => map.get(enable_key).is_none_or(is_truthy),
        _ => true,
    }
}

/// Drop every disabled Mapping from `node`, recursively.
///
/// Entries are removed before their children are visited, so nothing under
/// a disabled entry is ever looked at.
pub fn filter_enabled(node: &mut Value, enable_key: &str) {
    match node {
        Value::Object(map) => {
            map.retain(|_, value| is_enabled(value, enable_key));
            for value in map.values_mut() {
                filter_enabled(value, enable_key);
            }
        }
        Value::Array(items) => {
            items.retain(|item| is_enabled(item, enable_key));
            for item in items.iter_mut() {
                filter_enabled(item, enable_key);
            }
        }
        _ => {}
    }
}

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Read a boolean flag from loosely typed request parameters.
///
/// Strings are compared case-insensitively with `"true"`; any other string is
/// false. JSON booleans are taken as-is. Missing or `null` values yield `default`.
pub fn flag(params: &Map<String, Value>, key: &str, default: bool) -> bool {
    match params.get(key) {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        Some(_) => false,
    }
}

/// Read a string parameter, falling back to `default` when absent or not a string.
pub fn text(params: &Map<String, Value>, key: &str, default: &str) -> String {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or(default)
        .to_string()
}

/// Lift query-string pairs into the same shape as a JSON body.
pub fn from_query(query: HashMap<String, String>) -> Map<String, Value> {
    query.into_iter().map(|(k, v)| (k, Value::String(v))).collect()
}

/// Parse a POST body into a parameter map; anything that isn't a JSON object is empty.
pub fn from_body(body: &[u8]) -> Map<String, Value> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Map::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::debug!(body = %other, "Ignoring non-object request body");
            Map::new()
        }
        Err(e) => {
            tracing::debug!("Ignoring unparseable request body: {}", e);
            Map::new()
        }
    }
}

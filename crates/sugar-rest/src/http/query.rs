//! Query string encoding for read parameters.
//!
//! The API expects PHP-style bracketed keys for nested parameters, e.g.
//! `filter[0][name][$starts]=Acme`.

use serde_json::Value;

/// Flatten a JSON object into query pairs.
///
/// Arrays and objects nest as `key[index]` / `key[field]`, booleans encode as
/// `1`/`0` and nulls are omitted. Anything other than an object yields no
/// pairs.
pub(crate) fn to_query_pairs(params: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = params {
        for (key, value) in map {
            push_value(&mut pairs, key.clone(), value);
        }
    }
    pairs
}

fn push_value(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_value(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(map) => {
            for (field, item) in map {
                push_value(pairs, format!("{key}[{field}]"), item);
            }
        }
    }
}

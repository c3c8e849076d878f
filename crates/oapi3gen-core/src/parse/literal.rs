//! Coercion of scalar YAML/JSON values into literal text.
//!
//! `default: 10`, `default: "10"` and `enum: [asc, desc]` all end up as the
//! text that is pasted verbatim into generated annotations.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

fn to_literal<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(E::custom(format!(
            "expected a scalar literal, found {other}"
        ))),
    }
}

pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => to_literal(value).map(Some),
    }
}

pub fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(to_literal)
        .collect()
}

//! Captured value representation
//!
//! A dump stores each binding as whatever the capturing process could serialise.
//! Values are never re-executed here: each one is reduced to a [`Value`] record holding
//! the textual representation produced at capture time and a short type tag.
//!
//! # Decoding
//!
//! - `{"repr": "...", "type": "..."}`: taken as-is (`type` defaults to `object`)
//! - strings: quoted, tagged `str`
//! - integers / other numbers: tagged `int` / `float`
//! - booleans: tagged `bool`
//! - `null`: tagged `null`
//! - arrays and other objects: compact JSON text, tagged `list` / `dict`

use serde_json::Value as Json;
use std::fmt;

/// A read-only captured value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    repr: String,
    type_name: String,
}

impl Value {
    pub fn new(repr: impl Into<String>, type_name: impl Into<String>) -> Self {
        Value {
            repr: repr.into(),
            type_name: type_name.into(),
        }
    }

    /// Decode a binding value from its JSON form
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Object(map) => match map.get("repr") {
                Some(Json::String(repr)) => {
                    let type_name = map
                        .get("type")
                        .and_then(Json::as_str)
                        .unwrap_or("object");
                    Value::new(repr.as_str(), type_name)
                }
                _ => Value::new(json.to_string(), "dict"),
            },
            Json::String(s) => Value::new(format!("{:?}", s), "str"),
            Json::Number(n) => {
                let type_name = if n.is_f64() { "float" } else { "int" };
                Value::new(n.to_string(), type_name)
            }
            Json::Bool(b) => Value::new(b.to_string(), "bool"),
            Json::Null => Value::new("null", "null"),
            Json::Array(_) => Value::new(json.to_string(), "list"),
        }
    }

    /// Textual representation captured with the value
    pub fn repr(&self) -> &str {
        &self.repr
    }

    /// Type tag of the value
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

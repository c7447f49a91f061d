//! # Document Model
//!
//! A [`Document`] is the unit the poller hands to the ingestion pipeline: a
//! record `name`, the `host` it was collected from and a mapping of fields.
//!
//! In memory the field keys are plain names (`meshname`, `switch`, ...). When a
//! document is serialized, every typed key gets the type tag the downstream
//! consumer expects:
//!
//! | Variant                | Wire key        |
//! |------------------------|-----------------|
//! | [`FieldValue::Text`]      | `s_<key>`    |
//! | [`FieldValue::Integer`]   | `i_<key>`    |
//! | [`FieldValue::TextList`]  | `as_<key>`   |
//! | [`FieldValue::Timestamp`] | `t_<key>`    |
//! | [`FieldValue::Json`]      | `<key>`      |

use serde::{
    ser::SerializeMap,
    Serialize,
    Serializer,
};
use std::collections::BTreeMap;

pub type Fields = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    TextList(Vec<String>),
    /// Raw timestamp string as reported upstream.
    Timestamp(String),
    /// Untyped value passed through verbatim.
    Json(serde_json::Value),
}

impl FieldValue {
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            FieldValue::Text(_) => Some("s"),
            FieldValue::Integer(_) => Some("i"),
            FieldValue::TextList(_) => Some("as"),
            FieldValue::Timestamp(_) => Some("t"),
            FieldValue::Json(_) => None,
        }
    }

    /// The key under which this value is written for the consumer.
    pub fn wire_key(&self, key: &str) -> String {
        match self.type_tag() {
            Some(tag) => format!("{tag}_{key}"),
            None => key.to_string(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(value) | FieldValue::Timestamp(value) => serializer.serialize_str(value),
            FieldValue::Integer(value) => serializer.serialize_i64(*value),
            FieldValue::TextList(values) => values.serialize(serializer),
            FieldValue::Json(value) => value.serialize(serializer),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::TextList(values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(serialize_with = "serialize_fields")]
    pub fields: Fields,
    pub host: String,
    pub name: String,
}

impl Document {
    pub fn new(name: &str, host: &str, fields: Fields) -> Self {
        Self {
            fields,
            host: host.to_string(),
            name: name.to_string(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

fn serialize_fields<S: Serializer>(fields: &Fields, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (key, value) in fields {
        map.serialize_entry(&value.wire_key(key), value)?;
    }
    map.end()
}

/// Renders a JSON mapping as `key:value` strings, keeping upstream order.
///
/// String values are written without quotes, anything else uses its compact
/// JSON form. Booleans and null are therefore lowercase (`sw:true`,
/// `sw:null`), never `True`/`None`.
pub fn key_value_pairs(map: &serde_json::Map<String, serde_json::Value>) -> Vec<String> {
    map.iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(value) => format!("{key}:{value}"),
            other => format!("{key}:{other}"),
        })
        .collect()
}

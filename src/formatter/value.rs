//! Firestore value to JSON conversion
//!
//! Firestore stores a typed value per field. Exports are plain JSON, so every
//! value is mapped to the closest JSON shape:
//! - Timestamps become RFC 3339 strings
//! - Bytes become Base64 strings
//! - Geo points become `{"latitude", "longitude"}` objects
//! - References keep their full resource name

use std::collections::HashMap;

use gcloud_sdk::google::firestore::v1::{Value, value::ValueType};
use serde_json::{Map, Value as JsonValue, json};

use super::helpers::{bytes_to_base64, double_to_json, timestamp_to_rfc3339};

/// Converter from Firestore wire values to `serde_json` values
#[derive(Debug, Clone, Copy, Default)]
pub struct FirestoreJsonConverter;

impl FirestoreJsonConverter {
    /// Create a new converter
    pub fn new() -> Self {
        Self
    }

    /// Convert a single Firestore value
    ///
    /// # Arguments
    /// * `value` - Firestore value to convert
    ///
    /// # Returns
    /// Equivalent JSON value; unset values become `null`
    pub fn convert(&self, value: &Value) -> JsonValue {
        let Some(value_type) = &value.value_type else {
            return JsonValue::Null;
        };

        match value_type {
            ValueType::NullValue(_) => JsonValue::Null,
            ValueType::BooleanValue(b) => JsonValue::Bool(*b),
            ValueType::IntegerValue(n) => JsonValue::Number((*n).into()),
            ValueType::DoubleValue(f) => double_to_json(*f),
            ValueType::TimestampValue(ts) => {
                JsonValue::String(timestamp_to_rfc3339(ts.seconds, ts.nanos))
            }
            ValueType::StringValue(s) => JsonValue::String(s.clone()),
            ValueType::BytesValue(bytes) => JsonValue::String(bytes_to_base64(bytes)),
            ValueType::ReferenceValue(reference) => JsonValue::String(reference.clone()),
            ValueType::GeoPointValue(point) => json!({
                "latitude": point.latitude,
                "longitude": point.longitude,
            }),
            ValueType::ArrayValue(array) => {
                JsonValue::Array(array.values.iter().map(|v| self.convert(v)).collect())
            }
            ValueType::MapValue(map) => JsonValue::Object(self.convert_fields(&map.fields)),
            #[allow(unreachable_patterns)]
            _ => JsonValue::Null,
        }
    }

    /// Convert a document's field map
    ///
    /// # Arguments
    /// * `fields` - Firestore field map
    ///
    /// # Returns
    /// JSON object map with sorted keys
    pub fn convert_fields(&self, fields: &HashMap<String, Value>) -> Map<String, JsonValue> {
        fields
            .iter()
            .map(|(key, value)| (key.clone(), self.convert(value)))
            .collect()
    }
}

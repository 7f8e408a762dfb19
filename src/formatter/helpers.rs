//! Helper functions for Firestore value conversion

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;

/// Convert a protobuf timestamp to an RFC 3339 string in UTC
///
/// # Arguments
/// * `seconds` - Seconds since the Unix epoch
/// * `nanos` - Non-negative fraction of a second in nanoseconds
///
/// # Returns
/// RFC 3339 string with only the fractional digits needed, or the raw
/// seconds when out of range
pub fn timestamp_to_rfc3339(seconds: i64, nanos: i32) -> String {
    let nanos = u32::try_from(nanos).unwrap_or(0);
    DateTime::<Utc>::from_timestamp(seconds, nanos)
        .map(|dt| trim_fraction(&dt.to_rfc3339_opts(SecondsFormat::Nanos, true)))
        .unwrap_or_else(|| seconds.to_string())
}

/// Strip trailing zeros from the fraction of a `...SS.fffffffffZ` timestamp
fn trim_fraction(formatted: &str) -> String {
    let Some(body) = formatted.strip_suffix('Z') else {
        return formatted.to_string();
    };
    match body.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}Z")
            } else {
                format!("{whole}.{fraction}Z")
            }
        }
        None => formatted.to_string(),
    }
}

/// Convert raw bytes to a standard Base64 string
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Convert a double to JSON
///
/// JSON has no representation for NaN or infinities, so those become strings.
pub fn double_to_json(value: f64) -> JsonValue {
    match serde_json::Number::from_f64(value) {
        Some(n) => JsonValue::Number(n),
        None if value.is_nan() => JsonValue::String("NaN".to_string()),
        None if value.is_sign_positive() => JsonValue::String("Infinity".to_string()),
        None => JsonValue::String("-Infinity".to_string()),
    }
}

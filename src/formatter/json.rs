//! JSON serialization for export files
//!
//! Export files are pretty-printed with a configurable number of spaces per
//! indentation level (one by default) and no trailing newline. Object keys
//! come out in sorted order because `serde_json::Map` is ordered by key.

use serde::Serialize;

use crate::error::Result;

/// Pretty-printing JSON formatter
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    /// Spaces per indentation level
    indent: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    ///
    /// # Arguments
    /// * `indent` - Spaces per indentation level
    ///
    /// # Returns
    /// * `Self` - New formatter
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    /// Serialize a value to JSON bytes
    ///
    /// # Arguments
    /// * `value` - The value to serialize
    ///
    /// # Returns
    /// * `Result<Vec<u8>>` - UTF-8 encoded JSON
    pub fn to_vec<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(formatter: &JsonFormatter, value: &serde_json::Value) -> String {
        String::from_utf8(formatter.to_vec(value).unwrap()).unwrap()
    }

    #[test]
    fn test_one_space_indent() {
        let formatter = JsonFormatter::default();
        let value = json!([{ "alice": { "age": 30 } }]);

        assert_eq!(
            render(&formatter, &value),
            "[\n {\n  \"alice\": {\n   \"age\": 30\n  }\n }\n]"
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        let result = render(&JsonFormatter::default(), &json!({ "a": 1 }));
        assert!(!result.ends_with('\n'));
    }

    #[test]
    fn test_empty_object_stays_inline() {
        let result = render(&JsonFormatter::default(), &json!([{ "x": {} }]));
        assert!(result.contains("\"x\": {}"));
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(render(&JsonFormatter::default(), &json!([])), "[]");
    }

    #[test]
    fn test_custom_indent_width() {
        let result = render(&JsonFormatter::new(4), &json!({ "a": 1 }));
        assert_eq!(result, "{\n    \"a\": 1\n}");
    }
}

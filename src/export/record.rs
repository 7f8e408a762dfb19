//! Export record types
//!
//! A collection export is an ordered list of single-key objects:
//!
//! ```json
//! [
//!  { "alice": { "age": 30 } },
//!  { "bob": { "age": 25 } }
//! ]
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::utils::path::document_id;

/// A document as read from the remote store
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// Document path or full resource name
    pub path: String,

    /// Field map converted to JSON
    pub fields: Map<String, JsonValue>,
}

impl SourceDocument {
    /// Create a new source document
    pub fn new(path: impl Into<String>, fields: Map<String, JsonValue>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    /// Document identifier (final path segment)
    pub fn id(&self) -> &str {
        document_id(&self.path)
    }
}

/// One exported document: `{ id: fields }`
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub id: String,
    pub fields: Map<String, JsonValue>,
}

impl From<SourceDocument> for DocumentRecord {
    fn from(doc: SourceDocument) -> Self {
        let id = doc.id().to_string();
        Self {
            id,
            fields: doc.fields,
        }
    }
}

impl Serialize for DocumentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.id, &self.fields)?;
        map.end()
    }
}

/// All records of one collection, in the order the store returned them
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ExportRecord {
    records: Vec<DocumentRecord>,
}

impl ExportRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document
    pub fn push(&mut self, doc: SourceDocument) {
        self.records.push(doc.into());
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no documents were collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in store order
    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }
}

impl Extend<SourceDocument> for ExportRecord {
    fn extend<I: IntoIterator<Item = SourceDocument>>(&mut self, iter: I) {
        self.records.extend(iter.into_iter().map(DocumentRecord::from));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(path: &str, fields: JsonValue) -> SourceDocument {
        match fields {
            JsonValue::Object(map) => SourceDocument::new(path, map),
            _ => panic!("fields must be an object"),
        }
    }

    #[test]
    fn test_record_key_is_last_path_segment() {
        let record = DocumentRecord::from(doc(
            "projects/p/databases/(default)/documents/users/alice",
            json!({ "age": 30 }),
        ));
        assert_eq!(record.id, "alice");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "alice": { "age": 30 } })
        );
    }

    #[test]
    fn test_export_record_keeps_store_order() {
        let mut export = ExportRecord::new();
        export.push(doc("users/zed", json!({})));
        export.extend([
            doc("users/alice", json!({ "age": 30 })),
            doc("users/bob", json!({ "age": 25 })),
        ]);

        assert_eq!(export.len(), 3);
        let ids: Vec<_> = export.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["zed", "alice", "bob"]);
        assert_eq!(
            serde_json::to_value(&export).unwrap(),
            json!([{ "zed": {} }, { "alice": { "age": 30 } }, { "bob": { "age": 25 } }])
        );
    }

    #[test]
    fn test_empty_export_record() {
        let export = ExportRecord::new();
        assert!(export.is_empty());
        assert_eq!(serde_json::to_string(&export).unwrap(), "[]");
    }
}

//! Parsed record: text content plus metadata

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Metadata attached to a record
pub type Metadata = HashMap<String, serde_json::Value>;

/// Metadata key holding the path a record was parsed from
pub const SOURCE_KEY: &str = "source";

/// One parsed unit of a document.
///
/// Built once by a parser through the consuming `with_*` methods and read
/// through accessors afterwards; the loader hands records to the caller by
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Extracted text content
    content: String,
    /// Key/value metadata produced by the parser
    #[serde(default)]
    metadata: Metadata,
}

impl Record {
    /// Create a record with no metadata
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Record the path the content came from under the `source` key
    pub fn with_source(self, path: &Path) -> Self {
        let source = path.display().to_string();
        self.with_metadata(SOURCE_KEY, source)
    }

    /// Replace the whole metadata map
    pub fn with_metadata_map(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Look up a single metadata value
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// The `source` metadata entry, if the parser set one
    pub fn source(&self) -> Option<&str> {
        self.get(SOURCE_KEY).and_then(|v| v.as_str())
    }

    pub fn into_parts(self) -> (String, Metadata) {
        (self.content, self.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_builder() {
        let record = Record::new("hello")
            .with_source(Path::new("/docs/a.txt"))
            .with_metadata("slides", 3);

        assert_eq!(record.content(), "hello");
        assert_eq!(record.source(), Some("/docs/a.txt"));
        assert_eq!(record.get("slides"), Some(&json!(3)));
    }

    #[test]
    fn test_structural_equality() {
        let a = Record::new("x").with_metadata("k", "v");
        let b = Record::new("x").with_metadata("k", "v");
        assert_eq!(a, b);
        assert_ne!(a, Record::new("x"));
    }

    #[test]
    fn test_serialization_shape() {
        let record = Record::new("body").with_metadata("subject", "Hi");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["content"], json!("body"));
        assert_eq!(value["metadata"]["subject"], json!("Hi"));
    }
}

//! The immutable lookup tables shared by every conversion.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedded;
use crate::error::{LookupError, Result};

/// Population-group code → label and state code → state name.
///
/// Fields are declared in key order so the persisted document is sorted.
///
/// Loaded once before any conversion and only read afterwards, so a single
/// instance can be shared across threads by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTables {
    /// Two-digit state code → state name.
    #[serde(default)]
    pub states: BTreeMap<String, String>,
    /// Population/subject group code → human-readable label.
    #[serde(default)]
    pub topics: BTreeMap<String, String>,
}

impl LookupTables {
    pub fn new(topics: BTreeMap<String, String>, states: BTreeMap<String, String>) -> Self {
        Self { topics, states }
    }

    /// Parses a persisted lookup document.
    ///
    /// `name` identifies the document in error messages.
    pub fn from_json_str(content: &str, name: &str) -> Result<Self> {
        let tables: Self = serde_json::from_str(content).map_err(|source| LookupError::Json {
            name: name.to_string(),
            source,
        })?;
        debug!(
            document = name,
            topic_count = tables.topics.len(),
            state_count = tables.states.len(),
            "loaded lookup tables"
        );
        Ok(tables)
    }

    /// Reads and parses a persisted lookup document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| LookupError::io(path, source))?;
        Self::from_json_str(&content, &path.display().to_string())
    }

    /// Parses the document embedded in the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(embedded::TRANSFORM_DATA, embedded::TRANSFORM_DATA_NAME)
    }

    /// Label for a population-group code.
    pub fn topic(&self, code: &str) -> Option<&str> {
        self.topics.get(code).map(String::as_str)
    }

    /// Name for a two-digit state code.
    pub fn state_name(&self, code: &str) -> Option<&str> {
        self.states.get(code).map(String::as_str)
    }

    /// Serializes the document with sorted keys and four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(LookupError::Serialize)?;
        // serde_json only emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_document_loads() {
        let tables = LookupTables::embedded().expect("embedded document parses");
        assert_eq!(tables.state_name("12"), Some("Florida"));
        assert_eq!(tables.state_name("72"), Some("Puerto Rico"));
        assert_eq!(tables.topic("001"), Some("001 - Total population"));
        assert_eq!(tables.topic("999"), None);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let tables = LookupTables::from_json_str(r#"{"states": {"06": "California"}}"#, "inline")
            .expect("parse document");
        assert!(tables.topics.is_empty());
        assert_eq!(tables.state_name("06"), Some("California"));
    }

    #[test]
    fn malformed_document_reports_name() {
        let err = LookupTables::from_json_str("{\"topics\": [", "broken.json").unwrap_err();
        assert!(matches!(err, LookupError::Json { ref name, .. } if name == "broken.json"));
    }

    #[test]
    fn pretty_output_sorts_keys() {
        let mut states = BTreeMap::new();
        states.insert("06".to_string(), "California".to_string());
        states.insert("01".to_string(), "Alabama".to_string());
        let tables = LookupTables::new(BTreeMap::new(), states);
        let json = tables.to_json_pretty().expect("serialize");
        let alabama = json.find("Alabama").expect("alabama present");
        let california = json.find("California").expect("california present");
        assert!(alabama < california);
        assert!(json.contains("\n    \"states\": {"));
    }
}

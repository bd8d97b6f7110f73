//! Query library documents: the source records read from disk and the
//! UI-dialect document written back out.
//!
//! Loading is lenient at the entry level: a document that is not a list of
//! records fails the whole load, but an individual entry that cannot be
//! deserialized is skipped with a recorded reason so one bad record does not
//! sink the library.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{QshiftError, QshiftResult};

fn default_group() -> String {
    "General".to_string()
}

/// A stored query as it appears in the source library.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawQueryRecord")]
pub struct QueryRecord {
    /// Human-readable label. Libraries key this as `description` or `name`;
    /// `name` wins when both are present so converted documents load back
    /// with their labels intact.
    pub description: String,

    /// Category label, used for filtering and output descriptions.
    pub group: String,

    /// The source-dialect query text. May be blank, which fails conversion.
    pub query: String,
}

#[derive(Deserialize)]
struct RawQueryRecord {
    description: Option<String>,
    name: Option<String>,
    #[serde(default = "default_group")]
    group: String,
    query: String,
}

impl TryFrom<RawQueryRecord> for QueryRecord {
    type Error = String;

    fn try_from(raw: RawQueryRecord) -> Result<Self, Self::Error> {
        let description = raw
            .name
            .or(raw.description)
            .ok_or_else(|| "missing `description`/`name` field".to_string())?;
        Ok(Self {
            description,
            group: raw.group,
            query: raw.query,
        })
    }
}

/// A query rewritten into the UI dialect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConvertedRecord {
    pub name: String,
    pub description: String,
    pub query: String,
}

impl ConvertedRecord {
    /// Assemble the output record for `record` with its rewritten query.
    ///
    /// The name carries the source description verbatim; the description gets
    /// the title-cased group appended so grouped queries stay distinguishable
    /// in a flat UI list.
    pub fn from_record(record: &QueryRecord, query: String) -> Self {
        Self {
            name: record.description.clone(),
            description: format!("{} - {}", record.description, title_case(&record.group)),
            query,
        }
    }
}

/// Title-case a group label: first alphabetic character of each
/// whitespace-separated word uppercased, the rest lowercased.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// An input entry that failed to deserialize and was left out of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Zero-based position in the source list.
    pub index: usize,
    pub reason: String,
}

/// The output document: `{ "queries": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueryDocument {
    pub queries: Vec<ConvertedRecord>,
}

impl QueryDocument {
    pub fn new(queries: Vec<ConvertedRecord>) -> Self {
        Self { queries }
    }

    /// Render the document as JSON with `indent` spaces per nesting level.
    pub fn to_json(&self, indent: usize) -> QshiftResult<String> {
        let pad = vec![b' '; indent];
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(&pad);
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        // serde_json emits valid UTF-8; lossy conversion cannot drop output
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Parse a source library document.
///
/// The top level must be either a list of query records or an object with a
/// `queries` list (the converter's own output loads back in). Entries that
/// fail to deserialize are returned as [`SkippedEntry`] reasons instead of
/// records; deciding whether to surface those is the caller's concern.
pub fn parse_library(text: &str) -> QshiftResult<(Vec<QueryRecord>, Vec<SkippedEntry>)> {
    let doc: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| QshiftError::invalid_format(format!("not valid JSON: {e}")))?;

    let entries = match &doc {
        serde_json::Value::Array(entries) => entries,
        serde_json::Value::Object(map) => map
            .get("queries")
            .and_then(|q| q.as_array())
            .ok_or_else(|| {
                QshiftError::invalid_format("expected a top-level list of query records")
            })?,
        _ => {
            return Err(QshiftError::invalid_format(
                "expected a top-level list of query records",
            ));
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<QueryRecord>(entry.clone()) {
            Ok(record) => records.push(record),
            Err(e) => skipped.push(SkippedEntry {
                index,
                reason: e.to_string(),
            }),
        }
    }

    Ok((records, skipped))
}

/// Load a source library from disk.
pub fn load_library(path: &Path) -> QshiftResult<(Vec<QueryRecord>, Vec<SkippedEntry>)> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            QshiftError::source_not_found(path.display().to_string())
        } else {
            QshiftError::Io(e)
        }
    })?;
    parse_library(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_list() {
        let text = r#"[
            {"description": "All users", "group": "Recon", "query": "MATCH (n) RETURN n.name"}
        ]"#;
        let (records, skipped) = parse_library(text).unwrap();
        assert_eq!(records.len(), 1);
        assert!(skipped.is_empty());
        assert_eq!(records[0].description, "All users");
        assert_eq!(records[0].group, "Recon");
    }

    #[test]
    fn test_parse_queries_object() {
        let text = r#"{"queries": [{"name": "X", "query": "MATCH (n) RETURN n.name"}]}"#;
        let (records, skipped) = parse_library(text).unwrap();
        assert_eq!(records.len(), 1);
        assert!(skipped.is_empty());
        // `name` stands in for `description`; `group` defaults.
        assert_eq!(records[0].description, "X");
        assert_eq!(records[0].group, "General");
    }

    #[test]
    fn test_name_wins_when_both_present() {
        // A converted document carries both fields; `name` holds the
        // original label.
        let text = r#"[{"name": "label", "description": "label - Acls", "query": "MATCH (n) RETURN n.name"}]"#;
        let (records, _) = parse_library(text).unwrap();
        assert_eq!(records[0].description, "label");
    }

    #[test]
    fn test_malformed_entries_skipped_not_fatal() {
        let text = r#"[
            {"description": "ok", "query": "MATCH (n) RETURN n.name"},
            42,
            {"group": "no description or query"}
        ]"#;
        let (records, skipped) = parse_library(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].index, 1);
        assert_eq!(skipped[1].index, 2);
    }

    #[test]
    fn test_load_missing_source() {
        let err = load_library(Path::new("/nonexistent/query_library.json")).unwrap_err();
        assert!(matches!(err, QshiftError::SourceNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Source not found: /nonexistent/query_library.json"
        );
    }

    #[test]
    fn test_missing_list_is_fatal() {
        let err = parse_library(r#"{"not_queries": true}"#).unwrap_err();
        assert!(matches!(err, QshiftError::InvalidSourceFormat(_)));

        let err = parse_library(r#""just a string""#).unwrap_err();
        assert!(matches!(err, QshiftError::InvalidSourceFormat(_)));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("kerberoasting"), "Kerberoasting");
        assert_eq!(title_case("ACLs"), "Acls");
        assert_eq!(title_case("shortest  paths"), "Shortest Paths");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_converted_record_description() {
        let record = QueryRecord {
            description: "Find kerberoastable users".to_string(),
            group: "kerberoasting".to_string(),
            query: String::new(),
        };
        let out = ConvertedRecord::from_record(&record, "MATCH (n)\nRETURN n AS result".to_string());
        assert_eq!(out.name, "Find kerberoastable users");
        assert_eq!(out.description, "Find kerberoastable users - Kerberoasting");
    }

    #[test]
    fn test_to_json_indent() {
        let doc = QueryDocument::new(vec![ConvertedRecord {
            name: "a".to_string(),
            description: "a - General".to_string(),
            query: "RETURN n AS result".to_string(),
        }]);
        let json = doc.to_json(4).unwrap();
        assert!(json.starts_with("{\n    \"queries\""));

        let reparsed: QueryDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed.queries.len(), 1);
    }
}

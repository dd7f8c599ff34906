//! Load a recipe dump from disk into an ordered list of raw records.

use crate::error::LoadError;
use crate::record::RawRecord;
use crate::shape::ShapeClassifier;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Read and classify a dump using the default container strategies.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    load_records_with(path, &ShapeClassifier::default())
}

pub fn load_records_with(
    path: &Path,
    classifier: &ShapeClassifier,
) -> Result<Vec<RawRecord>, LoadError> {
    tracing::info!(path = %path.display(), "Reading JSON file");

    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        // Readable, but the bytes aren't UTF-8 text
        io::ErrorKind::InvalidData => LoadError::InvalidJson(source.to_string()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::info!(
        size_mb = %format!("{:.2}", content.len() as f64 / 1024.0 / 1024.0),
        "Read JSON file"
    );

    parse_records_with(&content, classifier)
}

pub fn parse_records(content: &str) -> Result<Vec<RawRecord>, LoadError> {
    parse_records_with(content, &ShapeClassifier::default())
}

pub fn parse_records_with(
    content: &str,
    classifier: &ShapeClassifier,
) -> Result<Vec<RawRecord>, LoadError> {
    let root: Value =
        serde_json::from_str(content).map_err(|e| LoadError::InvalidJson(e.to_string()))?;
    tracing::debug!("JSON parsed successfully");

    records_from_value(&root, classifier)
}

/// Flatten an already-parsed root value. Entries that are not JSON objects
/// are dropped; an empty result is not an error.
pub fn records_from_value(
    root: &Value,
    classifier: &ShapeClassifier,
) -> Result<Vec<RawRecord>, LoadError> {
    let (shape, entries) = classifier
        .classify(root)
        .ok_or(LoadError::UnrecognizedFormat)?;

    tracing::info!(shape = %shape, entries = entries.len(), "Detected container shape");

    if entries.is_empty() {
        tracing::info!("No recipes found in JSON data");
        return Ok(Vec::new());
    }

    let total = entries.len();
    let records: Vec<RawRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let record = RawRecord::from_value(entry);
            if record.is_none() {
                tracing::debug!(index, "Skipping non-object entry");
            }
            record
        })
        .collect();

    let dropped = total - records.len();
    if dropped > 0 {
        tracing::info!(dropped, "Skipped non-object entries");
    }

    if let Some(first) = records.first() {
        let keys: Vec<&str> = first.keys().take(10).collect();
        tracing::debug!(?keys, "Recipe keys");
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_json_carries_parser_message() {
        let err = parse_records("[{\"title\": ").unwrap_err();
        match err {
            LoadError::InvalidJson(msg) => assert!(msg.contains("EOF"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scalar_root_is_unrecognized() {
        assert!(matches!(
            parse_records("3.14"),
            Err(LoadError::UnrecognizedFormat)
        ));
        assert!(matches!(
            parse_records("null"),
            Err(LoadError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn test_non_objects_are_dropped_in_order() {
        let root = json!([{"title": "A"}, 5, null, "x", {"title": "B"}]);
        let records = records_from_value(&root, &ShapeClassifier::default()).unwrap();
        let titles: Vec<_> = records.iter().map(|r| r.get_str("title")).collect();
        assert_eq!(titles, vec![Some("A"), Some("B")]);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_generic_map_keeps_file_order() {
        let records = parse_records(r#"{"zeta": {"title": "Z"}, "alpha": {"title": "A"}}"#).unwrap();
        let titles: Vec<_> = records.iter().filter_map(|r| r.get_str("title")).collect();
        assert_eq!(titles, vec!["Z", "A"]);
    }
}

use std::collections::HashMap;

use serde_json::Value;
use verbatim_core::{Document, VerbatimError};

#[test]
fn new_starts_with_empty_metadata() {
    let doc = Document::new("doc-1", "hello world");
    assert_eq!(doc.id, "doc-1");
    assert_eq!(doc.content, "hello world");
    assert!(doc.metadata.is_empty());
}

#[test]
fn with_metadata_keeps_entries() {
    let mut metadata = HashMap::new();
    metadata.insert("source".to_string(), Value::String("here".to_string()));
    let doc = Document::with_metadata("doc-1", "body", metadata);
    assert_eq!(
        doc.metadata.get("source"),
        Some(&Value::String("here".to_string()))
    );
}

#[test]
fn empty_metadata_is_not_serialized() {
    let doc = Document::new("doc-1", "body");
    let value = serde_json::to_value(&doc).unwrap();
    assert!(value.get("metadata").is_none());
}

#[test]
fn error_display() {
    let config = VerbatimError::Config("bad loader".to_string());
    assert_eq!(config.to_string(), "config error: bad loader");

    // Loader failures carry their full message through Display untouched.
    let loader = VerbatimError::Loader("something went wrong".to_string());
    assert_eq!(loader.to_string(), "something went wrong");
}

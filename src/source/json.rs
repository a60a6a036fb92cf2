//! JSON and NDJSON sample input

use crate::error::{Error, Result};
use crate::schema::{infer, infer_samples, SchemaNode};
use serde_json::Value;

/// Parse one JSON document
///
/// Tries the SIMD parser first and falls back to `serde_json`, which also
/// produces the error message when the text is not valid JSON.
pub fn parse_document(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput("JSON"));
    }

    let mut bytes = text.as_bytes().to_vec();
    match simd_json::serde::from_slice::<Value>(&mut bytes) {
        Ok(value) => Ok(value),
        Err(_) => Ok(serde_json::from_str(text)?),
    }
}

/// Parse newline-delimited JSON, one sample per non-blank line
pub fn parse_ndjson(text: &str) -> Result<Vec<Value>> {
    let mut samples = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = serde_json::from_str(line).map_err(|source| Error::JsonLine {
            line: idx + 1,
            source,
        })?;
        samples.push(value);
    }

    if samples.is_empty() {
        return Err(Error::EmptyInput("NDJSON"));
    }

    Ok(samples)
}

/// Schema of a single JSON document
pub fn document_schema(text: &str) -> Result<SchemaNode> {
    Ok(infer(&parse_document(text)?))
}

/// Schema of NDJSON samples, merged as repeated records of one entity
pub fn ndjson_schema(text: &str) -> Result<SchemaNode> {
    Ok(infer_samples(&parse_ndjson(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_document() {
        let value = parse_document(r#"{"id": 1, "tags": ["a", "b"]}"#).unwrap();
        assert_eq!(value, json!({"id": 1, "tags": ["a", "b"]}));
    }

    #[test]
    fn test_parse_document_errors() {
        assert!(matches!(parse_document("   "), Err(Error::EmptyInput(_))));
        assert!(matches!(parse_document("{\"a\": "), Err(Error::Json(_))));
    }

    #[test]
    fn test_ndjson_reports_line_number() {
        let text = "{\"a\": 1}\n\n{\"a\": }\n";
        match parse_ndjson(text) {
            Err(Error::JsonLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected line error, got {other:?}"),
        }
    }

    #[test]
    fn test_ndjson_schema_marks_sporadic_fields_optional() {
        let text = "{\"id\": 1, \"name\": \"a\"}\n{\"id\": 2}\n";
        let node = ndjson_schema(text).unwrap();
        let obj = node.as_object().unwrap();
        assert!(obj.is_required("id"));
        assert!(!obj.is_required("name"));
    }

    #[test]
    fn test_document_schema_keeps_top_level_array() {
        let node = document_schema("[1, 2]").unwrap();
        assert_eq!(node, SchemaNode::array(SchemaNode::Integer));
    }
}

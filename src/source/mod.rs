//! Sample sources
//!
//! Turn raw input (JSON text, NDJSON, CSV, column metadata, sampled
//! documents) into the values or nodes the inference core works on. These
//! are the only fallible steps of generation.

pub mod csv;
pub mod documents;
pub mod json;
pub mod sql;

pub use self::csv::{coerce_value, csv_schema};
pub use self::documents::collection_schema;
pub use self::json::{document_schema, ndjson_schema, parse_document, parse_ndjson};
pub use self::sql::{map_sql_type, table_schema, ColumnInfo, Nullability};

use crate::error::Result;
use crate::schema::SchemaNode;
use serde::{Deserialize, Serialize};

/// Shape of the raw input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// A single JSON document
    Json,
    /// One JSON sample per line
    Ndjson,
    /// Header row plus data rows
    Csv,
    /// A JSON array of SQL column metadata rows
    Columns,
    /// A serialized schema tree
    Tree,
}

/// Build the schema tree for raw input text
pub fn read_schema(kind: InputKind, text: &str) -> Result<SchemaNode> {
    match kind {
        InputKind::Json => document_schema(text),
        InputKind::Ndjson => ndjson_schema(text),
        InputKind::Csv => csv_schema(text),
        InputKind::Columns => {
            let columns: Vec<ColumnInfo> = serde_json::from_str(text)?;
            table_schema("input", &columns)
        }
        InputKind::Tree => Ok(serde_json::from_str(text)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_read_schema_dispatch() {
        assert_eq!(
            read_schema(InputKind::Json, "[true]").unwrap(),
            SchemaNode::array(SchemaNode::Boolean)
        );
        assert_eq!(
            read_schema(InputKind::Tree, r#"{"kind": "integer"}"#).unwrap(),
            SchemaNode::Integer
        );

        let node = read_schema(
            InputKind::Columns,
            r#"[{"column_name": "id", "data_type": "int", "is_nullable": "NO"}]"#,
        )
        .unwrap();
        assert!(node.as_object().unwrap().is_required("id"));
    }

    #[test]
    fn test_read_schema_errors() {
        assert!(matches!(read_schema(InputKind::Columns, "[]"), Err(Error::NoColumns { .. })));
        assert!(matches!(read_schema(InputKind::Tree, r#"{"kind": "map"}"#), Err(Error::Json(_))));
        assert!(matches!(read_schema(InputKind::Csv, "a\n"), Err(Error::CsvTooShort)));
    }
}

//! Table schemas from SQL column metadata
//!
//! Columns arrive as `information_schema.columns` rows from PostgreSQL or
//! MySQL introspection. Each column maps to a node by its declared type and
//! the table becomes one object whose non-nullable columns are required.

use crate::error::{Error, Result};
use crate::schema::{ObjectSchema, SchemaNode, StringFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nullability {
    #[serde(rename = "YES", alias = "yes")]
    Yes,
    #[serde(rename = "NO", alias = "no")]
    No,
}

/// One row of column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
    /// PostgreSQL underlying type, `_`-prefixed for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udt_name: Option<String>,
    /// MySQL full column type, e.g. `tinyint(1)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    pub is_nullable: Nullability,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, nullable: bool) -> Self {
        ColumnInfo {
            column_name: name.into(),
            data_type: data_type.into(),
            udt_name: None,
            column_type: None,
            is_nullable: if nullable { Nullability::Yes } else { Nullability::No },
        }
    }

    pub fn with_udt_name(mut self, udt_name: impl Into<String>) -> Self {
        self.udt_name = Some(udt_name.into());
        self
    }

    pub fn with_column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }

    pub fn schema(&self) -> SchemaNode {
        map_sql_type(
            &self.data_type,
            self.udt_name.as_deref(),
            self.column_type.as_deref(),
        )
    }
}

/// Map a declared SQL type to a node, first matching rule wins
pub fn map_sql_type(data_type: &str, udt_name: Option<&str>, column_type: Option<&str>) -> SchemaNode {
    if column_type.is_some_and(|t| t.eq_ignore_ascii_case("tinyint(1)")) {
        return SchemaNode::Boolean;
    }

    if let Some(element) = udt_name.and_then(|udt| udt.strip_prefix('_')) {
        return SchemaNode::array(map_sql_type(element, Some(element), None));
    }

    let declared = udt_name.unwrap_or(data_type).to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|needle| declared.contains(needle));

    if has(&["char", "text", "clob"]) {
        SchemaNode::string()
    } else if has(&["int", "serial", "long"]) {
        SchemaNode::Integer
    } else if has(&["float", "double", "num", "decimal", "real"]) {
        SchemaNode::Number
    } else if has(&["bool"]) {
        SchemaNode::Boolean
    } else if has(&["date", "time"]) {
        SchemaNode::formatted_string(StringFormat::DateTime)
    } else if has(&["uuid"]) {
        SchemaNode::formatted_string(StringFormat::Uuid)
    } else if has(&["json"]) {
        SchemaNode::empty_object()
    } else if has(&["bytea", "blob"]) {
        SchemaNode::formatted_string(StringFormat::Binary)
    } else {
        SchemaNode::string()
    }
}

/// Assemble the object node of a table
pub fn table_schema(table: &str, columns: &[ColumnInfo]) -> Result<SchemaNode> {
    if columns.is_empty() {
        return Err(Error::NoColumns {
            table: table.to_string(),
        });
    }

    let mut schema = ObjectSchema::new();
    for column in columns {
        match column.is_nullable {
            Nullability::No => schema.insert_required(column.column_name.clone(), column.schema()),
            Nullability::Yes => schema.insert_optional(column.column_name.clone(), column.schema()),
        }
    }

    debug!(table, columns = columns.len(), "assembled table schema");
    Ok(SchemaNode::Object(schema))
}

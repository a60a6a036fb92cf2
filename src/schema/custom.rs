//! User-declared fields added to an inferred root object

use super::node::SchemaNode;
use crate::error::{Error, Result};
use std::str::FromStr;
use tracing::warn;

/// Declared type of a custom field: a kind name, or `array_<kind>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Any,
    Null,
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array(ElementType),
}

/// Element kind of an `array_<kind>` custom field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Any,
    Null,
    String,
    Number,
    Integer,
    Boolean,
    Object,
}

impl ElementType {
    fn parse(name: &str) -> Option<Self> {
        let element = match name {
            "any" => ElementType::Any,
            "null" => ElementType::Null,
            "string" => ElementType::String,
            "number" => ElementType::Number,
            "integer" => ElementType::Integer,
            "boolean" => ElementType::Boolean,
            "object" => ElementType::Object,
            _ => return None,
        };
        Some(element)
    }

    fn schema(self) -> SchemaNode {
        match self {
            ElementType::Any => SchemaNode::Any,
            ElementType::Null => SchemaNode::Null,
            ElementType::String => SchemaNode::string(),
            ElementType::Number => SchemaNode::Number,
            ElementType::Integer => SchemaNode::Integer,
            ElementType::Boolean => SchemaNode::Boolean,
            ElementType::Object => SchemaNode::empty_object(),
        }
    }
}

impl FieldType {
    pub fn schema(self) -> SchemaNode {
        match self {
            FieldType::Any => SchemaNode::Any,
            FieldType::Null => SchemaNode::Null,
            FieldType::String => SchemaNode::string(),
            FieldType::Number => SchemaNode::Number,
            FieldType::Integer => SchemaNode::Integer,
            FieldType::Boolean => SchemaNode::Boolean,
            FieldType::Object => SchemaNode::empty_object(),
            FieldType::Array(element) => SchemaNode::array(element.schema()),
        }
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();

        if let Some(element) = name.strip_prefix("array_") {
            return ElementType::parse(element)
                .map(FieldType::Array)
                .ok_or_else(|| Error::UnknownFieldType(s.to_string()));
        }

        match ElementType::parse(&name) {
            Some(ElementType::Any) => Ok(FieldType::Any),
            Some(ElementType::Null) => Ok(FieldType::Null),
            Some(ElementType::String) => Ok(FieldType::String),
            Some(ElementType::Number) => Ok(FieldType::Number),
            Some(ElementType::Integer) => Ok(FieldType::Integer),
            Some(ElementType::Boolean) => Ok(FieldType::Boolean),
            Some(ElementType::Object) => Ok(FieldType::Object),
            None => Err(Error::UnknownFieldType(s.to_string())),
        }
    }
}

/// A field the caller wants present regardless of the samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomField {
    pub name: String,
    pub field_type: FieldType,
}

impl FromStr for CustomField {
    type Err = Error;

    /// Parse `NAME:TYPE`
    fn from_str(s: &str) -> Result<Self> {
        let (name, field_type) = s
            .rsplit_once(':')
            .ok_or_else(|| Error::InvalidCustomField(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidCustomField(s.to_string()));
        }

        Ok(CustomField {
            name: name.to_string(),
            field_type: field_type.parse()?,
        })
    }
}

/// Add custom fields to an object root
///
/// New fields are optional; a custom field that replaces an inferred one
/// keeps that field's requiredness.
///
/// Returns `false` and leaves the tree alone when the root is not an object.
pub fn apply_custom_fields(root: &mut SchemaNode, fields: &[CustomField]) -> bool {
    if fields.is_empty() {
        return true;
    }

    match root.as_object_mut() {
        Some(obj) => {
            for field in fields {
                obj.fields.insert(field.name.clone(), field.field_type.schema());
            }
            true
        }
        None => {
            warn!(
                "Custom fields can only be added to an object-based schema, root is '{}'. Ignoring custom fields.",
                root.kind()
            );
            false
        }
    }
}

//! JSON-Schema draft-07 emitter

use crate::schema::SchemaNode;
use crate::types::GenerateOptions;
use serde_json::{json, Map, Value};

pub const DEFAULT_SCHEMA_TITLE: &str = "GeneratedSchema";

pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Render `root` as a JSON-Schema document
pub fn render_json_schema(root: &SchemaNode, options: &GenerateOptions) -> String {
    to_text(&json_schema_document(root, options), options.prettify)
}

/// Build the document: `$schema` and `title` merged with the root's keys
pub fn json_schema_document(root: &SchemaNode, options: &GenerateOptions) -> Value {
    let mut document = Map::new();
    document.insert("$schema".to_string(), Value::String(DRAFT_07.to_string()));
    document.insert(
        "title".to_string(),
        Value::String(options.name_or(DEFAULT_SCHEMA_TITLE).to_string()),
    );
    document.extend(schema_for(root, options));

    Value::Object(document)
}

/// JSON-Schema keywords for one node
pub fn schema_for(node: &SchemaNode, options: &GenerateOptions) -> Map<String, Value> {
    let mut schema = Map::new();

    match node {
        SchemaNode::Any => {}
        SchemaNode::Null => {
            schema.insert("type".to_string(), json!("null"));
        }
        SchemaNode::Boolean => {
            schema.insert("type".to_string(), json!("boolean"));
        }
        SchemaNode::Integer => {
            schema.insert("type".to_string(), json!("integer"));
        }
        SchemaNode::Number => {
            schema.insert("type".to_string(), json!("number"));
        }
        SchemaNode::String { format } => {
            schema.insert("type".to_string(), json!("string"));
            if let Some(fmt) = format {
                schema.insert("format".to_string(), json!(fmt.as_str()));
            }
        }
        SchemaNode::Array { items } => {
            schema.insert("type".to_string(), json!("array"));
            schema.insert("items".to_string(), Value::Object(schema_for(items, options)));
        }
        SchemaNode::Object(obj) => {
            schema.insert("type".to_string(), json!("object"));

            let properties: Map<String, Value> = obj
                .fields
                .iter()
                .map(|(key, child)| (key.clone(), Value::Object(schema_for(child, options))))
                .collect();
            schema.insert("properties".to_string(), Value::Object(properties));

            // Without optional inference every field is required
            let required: Vec<Value> = if options.infer_optional {
                obj.required
                    .iter()
                    .filter(|name| obj.fields.contains_key(*name))
                    .map(|name| json!(name))
                    .collect()
            } else {
                obj.fields.keys().map(|name| json!(name)).collect()
            };
            if !required.is_empty() {
                schema.insert("required".to_string(), Value::Array(required));
            }
        }
        SchemaNode::Union { variants } => {
            if variants.is_empty() {
                schema.insert(
                    "description".to_string(),
                    json!("Union type with no specific variants, effectively 'any'."),
                );
            } else {
                let any_of = variants
                    .iter()
                    .map(|variant| Value::Object(schema_for(variant, options)))
                    .collect();
                schema.insert("anyOf".to_string(), Value::Array(any_of));
            }
        }
    }

    schema
}

/// Two-space indentation when prettified, compact otherwise
pub(crate) fn to_text(value: &Value, prettify: bool) -> String {
    if prettify {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    } else {
        value.to_string()
    }
}

//! Sampled documents from a document store

use crate::schema::{infer_samples, SchemaNode};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Documents beyond this many are not inferred from
pub const MAX_SAMPLE_SIZE: usize = 100;

/// Replace extended-JSON object ids (`{"$oid": "..."}`) with their hex string
pub fn normalize_object_ids(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(id)) = map.get("$oid") {
                    return Value::String(id.clone());
                }
            }
            let normalized: Map<String, Value> = map
                .into_iter()
                .map(|(key, child)| (key, normalize_object_ids(child)))
                .collect();
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_object_ids).collect()),
        other => other,
    }
}

/// Schema of a collection from its sampled documents
///
/// Only the first [`MAX_SAMPLE_SIZE`] documents are used. An empty collection
/// yields an object with no fields.
pub fn collection_schema(collection: &str, documents: Vec<Value>) -> SchemaNode {
    if documents.is_empty() {
        warn!(
            "Collection '{}' is empty. Returning a generic empty object schema.",
            collection
        );
        return SchemaNode::empty_object();
    }

    if documents.len() > MAX_SAMPLE_SIZE {
        debug!(
            collection,
            total = documents.len(),
            sampled = MAX_SAMPLE_SIZE,
            "truncating document sample"
        );
    }

    let documents: Vec<Value> = documents
        .into_iter()
        .take(MAX_SAMPLE_SIZE)
        .map(normalize_object_ids)
        .collect();
    infer_samples(&documents)
}

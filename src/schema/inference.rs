//! Structural inference over JSON values
//!
//! Walks a value and builds a [`SchemaNode`]. Sequences merge the nodes of
//! their elements; records mark every key they carry as required, so field
//! optionality only appears once several records are merged.

use super::classify::{classify, Scalar};
use super::merge::merge;
use super::node::{ObjectSchema, SchemaNode};
use serde_json::{Map, Value};
use tracing::debug;

/// Infer the schema of a single value
pub fn infer(value: &Value) -> SchemaNode {
    match value {
        Value::Array(arr) => infer_array(arr),
        Value::Object(obj) => SchemaNode::Object(infer_object(obj)),
        scalar => match Scalar::from_value(scalar) {
            Some(s) => classify(s),
            None => SchemaNode::Any,
        },
    }
}

/// Infer one schema from repeated samples of the same entity
///
/// Each sample is inferred on its own and the results are merged, so an
/// object field is required only if every sample carried it. An empty sample
/// set yields the permissive placeholder.
pub fn infer_samples(samples: &[Value]) -> SchemaNode {
    debug!(samples = samples.len(), "inferring schema from samples");

    let nodes: Vec<SchemaNode> = samples.iter().map(infer).collect();
    merge(&nodes)
}

fn infer_array(arr: &[Value]) -> SchemaNode {
    if arr.is_empty() {
        return SchemaNode::array(SchemaNode::Any);
    }

    let item_nodes: Vec<SchemaNode> = arr.iter().map(infer).collect();
    SchemaNode::array(merge(&item_nodes))
}

fn infer_object(obj: &Map<String, Value>) -> ObjectSchema {
    let mut schema = ObjectSchema::new();

    for (key, value) in obj {
        schema.insert_required(key.clone(), infer(value));
    }

    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::node::StringFormat;
    use serde_json::json;

    #[test]
    fn test_simple_object() {
        let node = infer(&json!({"a": 1, "b": "x"}));
        let obj = node.as_object().expect("object");

        assert_eq!(obj.get("a"), Some(&SchemaNode::Integer));
        assert_eq!(obj.get("b"), Some(&SchemaNode::string()));
        assert!(obj.is_required("a"));
        assert!(obj.is_required("b"));
    }

    #[test]
    fn test_null_and_scalars() {
        assert_eq!(infer(&json!(null)), SchemaNode::Null);
        assert_eq!(infer(&json!(true)), SchemaNode::Boolean);
        assert_eq!(infer(&json!(3.5)), SchemaNode::Number);
        assert_eq!(
            infer(&json!("2021-01-01T00:00:00Z")),
            SchemaNode::formatted_string(StringFormat::DateTime)
        );
    }

    #[test]
    fn test_empty_array_has_placeholder_items() {
        assert_eq!(infer(&json!([])), SchemaNode::array(SchemaNode::Any));
    }

    #[test]
    fn test_homogeneous_array() {
        assert_eq!(infer(&json!([1, 2, 3])), SchemaNode::array(SchemaNode::Integer));
    }

    #[test]
    fn test_mixed_array_has_union_items() {
        let node = infer(&json!([1, "two", 3]));
        assert_eq!(
            node,
            SchemaNode::array(SchemaNode::Union {
                variants: vec![SchemaNode::Integer, SchemaNode::string()]
            })
        );
    }

    #[test]
    fn test_array_of_records_tracks_presence() {
        let node = infer(&json!([{"a": 1}, {"a": 1, "b": "x"}]));
        let items = match node {
            SchemaNode::Array { items } => items,
            other => panic!("expected array, got {other:?}"),
        };
        let obj = items.as_object().expect("records fold into one object");

        assert_eq!(obj.len(), 2);
        assert!(obj.is_required("a"));
        assert!(!obj.is_required("b"));
    }

    #[test]
    fn test_infer_samples_merges_records() {
        let samples = vec![
            json!({"name": "Alice", "age": 30}),
            json!({"name": "Bob"}),
        ];
        let node = infer_samples(&samples);
        let obj = node.as_object().unwrap();

        assert_eq!(obj.required.iter().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(obj.get("age"), Some(&SchemaNode::Integer));
    }

    #[test]
    fn test_infer_samples_empty() {
        assert_eq!(infer_samples(&[]), SchemaNode::Any);
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"x": 1, "y": [true]}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": [false], "x": 2}"#).unwrap();
        assert_eq!(infer(&a), infer(&b));
    }
}

//! Reconciliation of several nodes describing the same slot
//!
//! Identical nodes collapse to one. Object nodes whose shared fields agree
//! are folded into a single object whose `required` set is the intersection
//! of the inputs. Everything else that remains distinct becomes a union.

use super::node::{ObjectSchema, SchemaNode};
use tracing::trace;

/// Merge multiple schema nodes into a single node that describes all of them
pub fn merge(nodes: &[SchemaNode]) -> SchemaNode {
    match nodes {
        [] => return SchemaNode::Any,
        [single] => return single.clone(),
        [first, rest @ ..] if rest.iter().all(|node| node == first) => return first.clone(),
        _ => {}
    }

    let mut unique = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            // Nested unions are flattened so variants stay comparable
            SchemaNode::Union { variants } => {
                for variant in variants {
                    push_unique(&mut unique, variant.clone());
                }
            }
            other => push_unique(&mut unique, other.clone()),
        }
    }

    let merged = fold_objects(unique);

    if merged.len() == 1 {
        return merged.into_iter().next().unwrap_or(SchemaNode::Any);
    }

    trace!(variants = merged.len(), "merged divergent nodes into a union");
    SchemaNode::Union { variants: merged }
}

/// Keep the first occurrence of each structurally distinct node
fn push_unique(unique: &mut Vec<SchemaNode>, node: SchemaNode) {
    if !unique.contains(&node) {
        unique.push(node);
    }
}

/// Fold compatible objects into each other, leaving everything else in place
///
/// Objects are visited in canonical order and folding repeats until no two
/// remaining objects are compatible. The result depends only on the set of
/// inputs.
fn fold_objects(nodes: Vec<SchemaNode>) -> Vec<SchemaNode> {
    let (mut objects, mut out): (Vec<SchemaNode>, Vec<SchemaNode>) =
        nodes.into_iter().partition(|node| node.as_object().is_some());
    objects.sort_by_cached_key(canonical_key);

    while let Some((i, j)) = compatible_pair(&objects) {
        let folded = match (&objects[i], &objects[j]) {
            (SchemaNode::Object(left), SchemaNode::Object(right)) => fold_pair(left, right),
            _ => break,
        };
        objects.remove(j);
        objects.remove(i);
        push_unique(&mut objects, SchemaNode::Object(folded));
        objects.sort_by_cached_key(canonical_key);
    }

    out.extend(objects);
    out
}

/// First pair of compatible objects, `i < j`
fn compatible_pair(objects: &[SchemaNode]) -> Option<(usize, usize)> {
    for (i, left) in objects.iter().enumerate() {
        let Some(left) = left.as_object() else { continue };
        for (j, right) in objects.iter().enumerate().skip(i + 1) {
            if right.as_object().is_some_and(|right| objects_compatible(left, right)) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Order key that is equal for structurally equal nodes
fn canonical_key(node: &SchemaNode) -> String {
    match node {
        SchemaNode::Any => "any".to_string(),
        SchemaNode::Null => "null".to_string(),
        SchemaNode::Boolean => "boolean".to_string(),
        SchemaNode::Integer => "integer".to_string(),
        SchemaNode::Number => "number".to_string(),
        SchemaNode::String { format: None } => "string".to_string(),
        SchemaNode::String { format: Some(format) } => format!("string:{}", format),
        SchemaNode::Array { items } => format!("array<{}>", canonical_key(items)),
        SchemaNode::Object(obj) => {
            let fields: Vec<String> = obj
                .fields
                .iter()
                .map(|(name, child)| {
                    let marker = if obj.is_required(name) { '!' } else { '?' };
                    format!("{:?}{}{}", name, marker, canonical_key(child))
                })
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        SchemaNode::Union { variants } => {
            let mut keys: Vec<String> = variants.iter().map(canonical_key).collect();
            keys.sort();
            format!("({})", keys.join("|"))
        }
    }
}

/// Two objects describe the same entity when no shared field needs a new union
fn objects_compatible(a: &ObjectSchema, b: &ObjectSchema) -> bool {
    a.fields.iter().all(|(name, left)| match b.fields.get(name) {
        None => true,
        Some(right) if left == right => true,
        Some(right) => {
            let merged = merge(&[left.clone(), right.clone()]);
            !merged.is_union() || merged == *left || merged == *right
        }
    })
}

/// Union the field sets, merge shared children, intersect requiredness
fn fold_pair(a: &ObjectSchema, b: &ObjectSchema) -> ObjectSchema {
    let mut fields = a.fields.clone();

    for (name, node) in &b.fields {
        let child = match fields.get(name) {
            Some(existing) if existing == node => continue,
            Some(existing) => merge(&[existing.clone(), node.clone()]),
            None => node.clone(),
        };
        fields.insert(name.clone(), child);
    }

    let required = a.required.intersection(&b.required).cloned().collect();

    ObjectSchema { fields, required }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::inference::infer;
    use crate::schema::node::StringFormat;
    use serde_json::json;

    fn union(variants: Vec<SchemaNode>) -> SchemaNode {
        SchemaNode::Union { variants }
    }

    #[test]
    fn test_empty_input_is_placeholder() {
        assert_eq!(merge(&[]), SchemaNode::Any);
    }

    #[test]
    fn test_single_node_is_identity() {
        let node = infer(&json!({"a": [1, "x"], "b": {"c": null}}));
        assert_eq!(merge(&[node.clone()]), node);
    }

    #[test]
    fn test_duplicates_collapse() {
        let node = infer(&json!({"id": 1, "tags": ["a"]}));
        assert_eq!(merge(&[node.clone(), node.clone()]), node);
        assert_eq!(merge(&[SchemaNode::Integer, SchemaNode::Integer]), SchemaNode::Integer);
    }

    #[test]
    fn test_distinct_scalars_become_union() {
        let merged = merge(&[SchemaNode::string(), SchemaNode::Integer]);
        assert_eq!(merged, union(vec![SchemaNode::string(), SchemaNode::Integer]));
        assert_eq!(
            merged.variants().unwrap(),
            &[SchemaNode::string(), SchemaNode::Integer]
        );
    }

    #[test]
    fn test_merge_is_order_insensitive() {
        let a = infer(&json!({"id": 1}));
        let b = infer(&json!({"id": "x", "name": "n"}));
        let c = SchemaNode::formatted_string(StringFormat::Uuid);

        assert_eq!(merge(&[a.clone(), b.clone()]), merge(&[b.clone(), a.clone()]));
        assert_eq!(
            merge(&[a.clone(), c.clone(), SchemaNode::Null]),
            merge(&[SchemaNode::Null, c, a])
        );
    }

    fn permutations(nodes: &[SchemaNode]) -> Vec<Vec<SchemaNode>> {
        if nodes.len() <= 1 {
            return vec![nodes.to_vec()];
        }
        let mut all = Vec::new();
        for i in 0..nodes.len() {
            let mut rest = nodes.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head.clone());
                all.push(tail);
            }
        }
        all
    }

    #[test]
    fn test_object_folding_is_order_insensitive() {
        let inputs = vec![
            infer(&json!({"x": 1})),
            infer(&json!({"x": "s"})),
            infer(&json!({"y": true})),
            SchemaNode::Null,
        ];
        let expected = merge(&inputs);

        let variants = expected.variants().unwrap();
        assert_eq!(variants.len(), 3);

        for ordering in permutations(&inputs) {
            assert_eq!(merge(&ordering), expected);
        }
    }

    #[test]
    fn test_records_with_shared_fields_are_order_insensitive() {
        let records = [json!({"x": 1}), json!({"x": "s"}), json!({"y": true})];
        let forward: Vec<SchemaNode> = records.iter().map(infer).collect();
        let mut swapped = forward.clone();
        swapped.swap(0, 1);

        assert_eq!(merge(&forward), merge(&swapped));
    }

    #[test]
    fn test_folding_repeats_until_stable() {
        let mut wide = ObjectSchema::new();
        wide.insert_required("f", union(vec![SchemaNode::Integer, SchemaNode::string()]));
        let wide = SchemaNode::Object(wide);

        let inputs = vec![
            infer(&json!({"f": 1})),
            infer(&json!({"f": "s"})),
            wide.clone(),
        ];

        for ordering in permutations(&inputs) {
            assert_eq!(merge(&ordering), wide);
        }
    }

    #[test]
    fn test_union_variants_are_pairwise_distinct() {
        let merged = merge(&[
            SchemaNode::Integer,
            SchemaNode::string(),
            SchemaNode::Integer,
            SchemaNode::Null,
            SchemaNode::string(),
        ]);
        let variants = merged.variants().unwrap();
        assert_eq!(variants.len(), 3);
        for (i, left) in variants.iter().enumerate() {
            for right in &variants[i + 1..] {
                assert_ne!(left, right);
            }
        }
    }

    #[test]
    fn test_nested_unions_are_flattened() {
        let inner = merge(&[SchemaNode::Integer, SchemaNode::string()]);
        let merged = merge(&[inner, SchemaNode::Boolean, SchemaNode::Integer]);
        assert_eq!(
            merged,
            union(vec![SchemaNode::Integer, SchemaNode::string(), SchemaNode::Boolean])
        );
    }

    #[test]
    fn test_compatible_objects_fold_with_optional_fields() {
        let merged = merge(&[infer(&json!({"a": 1})), infer(&json!({"a": 1, "b": "x"}))]);
        let obj = merged.as_object().expect("object");

        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get("a"), Some(&SchemaNode::Integer));
        assert_eq!(obj.get("b"), Some(&SchemaNode::string()));
        assert!(obj.is_required("a"));
        assert!(!obj.is_required("b"));
    }

    #[test]
    fn test_conflicting_objects_stay_union_variants() {
        let merged = merge(&[infer(&json!({"a": 1})), infer(&json!({"a": "one"}))]);
        let variants = merged.variants().expect("union");
        assert_eq!(variants.len(), 2);
        assert!(variants.iter().all(|v| v.as_object().is_some()));
    }

    #[test]
    fn test_nested_objects_fold_recursively() {
        let merged = merge(&[
            infer(&json!({"user": {"name": "a"}})),
            infer(&json!({"user": {"name": "b", "age": 3}})),
        ]);
        let user = merged.as_object().unwrap().get("user").unwrap();
        let user = user.as_object().expect("folded nested object");

        assert!(user.is_required("name"));
        assert!(!user.is_required("age"));
        assert!(merged.as_object().unwrap().is_required("user"));
    }

    #[test]
    fn test_field_already_a_union_absorbs_its_variant() {
        let wide = merge(&[
            infer(&json!({"v": 1, "k": true})),
            infer(&json!({"v": 2})),
        ]);
        let mut with_union = ObjectSchema::new();
        with_union.insert_required("v", union(vec![SchemaNode::Integer, SchemaNode::Null]));

        let merged = merge(&[wide, SchemaNode::Object(with_union)]);
        let obj = merged.as_object().expect("folded");
        assert_eq!(
            obj.get("v"),
            Some(&union(vec![SchemaNode::Integer, SchemaNode::Null]))
        );
        assert!(!obj.is_required("k"));
    }
}

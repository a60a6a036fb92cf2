//! The inferred structural type tree
//!
//! A [`SchemaNode`] is built fresh for every generation request and is never
//! mutated once the inferencer and merger hand it over to a renderer.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Refinement of a string leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StringFormat {
    #[serde(rename = "date-time")]
    DateTime,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "uuid")]
    Uuid,
    #[serde(rename = "binary")]
    Binary,
}

impl StringFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            StringFormat::DateTime => "date-time",
            StringFormat::Email => "email",
            StringFormat::Uuid => "uuid",
            StringFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field map and field presence of an object node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Every field name observed across the merged samples
    #[serde(default)]
    pub fields: BTreeMap<String, SchemaNode>,

    /// Fields present in every sample that produced this node
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub required: BTreeSet<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field that every contributing sample carried
    pub fn insert_required(&mut self, name: impl Into<String>, node: SchemaNode) {
        let name = name.into();
        self.required.insert(name.clone());
        self.fields.insert(name, node);
    }

    /// Add a field without claiming it is always present
    pub fn insert_optional(&mut self, name: impl Into<String>, node: SchemaNode) {
        let name = name.into();
        self.required.remove(&name);
        self.fields.insert(name, node);
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One node of the inferred type tree.
///
/// Each kind carries only the data that is meaningful for it. Invariants kept
/// by the merger:
///
/// - `Object::required` is a subset of the keys of `Object::fields`.
/// - `Union::variants` holds at least two pairwise distinct nodes.
///
/// Equality is structural. Union variants compare as an unordered set, so
/// two unions built from the same shapes in a different order are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaNode {
    /// Permissive placeholder (element type of an empty array)
    Any,
    Null,
    Boolean,
    Integer,
    Number,
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<StringFormat>,
    },
    Array {
        items: Box<SchemaNode>,
    },
    Object(ObjectSchema),
    Union {
        variants: Vec<SchemaNode>,
    },
}

impl SchemaNode {
    pub fn string() -> Self {
        SchemaNode::String { format: None }
    }

    pub fn formatted_string(format: StringFormat) -> Self {
        SchemaNode::String {
            format: Some(format),
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array {
            items: Box::new(items),
        }
    }

    pub fn empty_object() -> Self {
        SchemaNode::Object(ObjectSchema::new())
    }

    /// The kind tag, as used in the serialized tree
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaNode::Any => "any",
            SchemaNode::Null => "null",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Integer => "integer",
            SchemaNode::Number => "number",
            SchemaNode::String { .. } => "string",
            SchemaNode::Array { .. } => "array",
            SchemaNode::Object(_) => "object",
            SchemaNode::Union { .. } => "union",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            SchemaNode::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectSchema> {
        match self {
            SchemaNode::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn variants(&self) -> Option<&[SchemaNode]> {
        match self {
            SchemaNode::Union { variants } => Some(variants),
            _ => None,
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, SchemaNode::Union { .. })
    }
}

impl PartialEq for SchemaNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SchemaNode::Any, SchemaNode::Any)
            | (SchemaNode::Null, SchemaNode::Null)
            | (SchemaNode::Boolean, SchemaNode::Boolean)
            | (SchemaNode::Integer, SchemaNode::Integer)
            | (SchemaNode::Number, SchemaNode::Number) => true,
            (SchemaNode::String { format: a }, SchemaNode::String { format: b }) => a == b,
            (SchemaNode::Array { items: a }, SchemaNode::Array { items: b }) => a == b,
            (SchemaNode::Object(a), SchemaNode::Object(b)) => a == b,
            (SchemaNode::Union { variants: a }, SchemaNode::Union { variants: b }) => {
                same_variant_set(a, b)
            }
            _ => false,
        }
    }
}

impl Eq for SchemaNode {}

/// Multiset comparison, independent of variant order
fn same_variant_set(a: &[SchemaNode], b: &[SchemaNode]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut matched = vec![false; b.len()];
    a.iter().all(|left| {
        let hit = b
            .iter()
            .enumerate()
            .find(|(idx, right)| !matched[*idx] && *right == left)
            .map(|(idx, _)| idx);
        match hit {
            Some(idx) => {
                matched[idx] = true;
                true
            }
            None => false,
        }
    })
}

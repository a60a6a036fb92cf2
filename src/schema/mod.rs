//! Schema inference
//!
//! Builds a structural type tree from sample values with string format
//! detection, and reconciles repeated samples into optional fields or unions.

pub mod classify;
pub mod custom;
pub mod inference;
pub mod merge;
pub mod node;

pub use classify::{classify, detect_format, Scalar};
pub use custom::{apply_custom_fields, CustomField, FieldType};
pub use inference::{infer, infer_samples};
pub use merge::merge;
pub use node::{ObjectSchema, SchemaNode, StringFormat};

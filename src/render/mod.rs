//! Renderers for the inferred schema tree
//!
//! Both emitters are pure functions of `(SchemaNode, GenerateOptions)`. The
//! union post-passes run over their output text and are composed by
//! [`generate`].

pub mod dedupe;
pub mod json_schema;
pub mod typescript;

pub use dedupe::{dedupe_json_schema_unions, dedupe_typescript_unions};
pub use json_schema::{json_schema_document, render_json_schema};
pub use typescript::{format_declaration, render_interface, FormatError};

use crate::schema::SchemaNode;
use crate::types::{GenerateOptions, OutputFormat};

/// Render `root` in the requested format and normalize its unions
pub fn generate(root: &SchemaNode, format: OutputFormat, options: &GenerateOptions) -> String {
    match format {
        OutputFormat::TypeScript => dedupe_typescript_unions(&render_interface(root, options)),
        OutputFormat::JsonSchema => {
            dedupe_json_schema_unions(&render_json_schema(root, options), options.prettify)
        }
    }
}

//! # autoinfer - Schema Inference and Type Generation
//!
//! Infers a structural schema from sample data (JSON documents, NDJSON
//! streams, CSV rows, SQL column metadata, sampled documents) and renders it
//! as a TypeScript interface or a JSON-Schema draft-07 document.
//!
//! ## Modules
//!
//! - **schema**: the schema tree, scalar classification, inference and merging
//! - **render**: the interface and JSON-Schema emitters plus union normalization
//! - **source**: turns raw input text and metadata into samples or trees
//!
//! ## Quick Start
//!
//! ### Interface from repeated samples
//!
//! ```rust
//! use autoinfer::{generate, infer_samples, GenerateOptions, OutputFormat};
//! use serde_json::json;
//!
//! let samples = vec![
//!     json!({"id": 1, "email": "alice@example.com"}),
//!     json!({"id": 2, "email": "bob@example.com", "nickname": "bobby"}),
//! ];
//!
//! let schema = infer_samples(&samples);
//! let options = GenerateOptions::default().with_name("User");
//! let output = generate(&schema, OutputFormat::TypeScript, &options);
//!
//! assert!(output.starts_with("interface User {"));
//! assert!(output.contains("nickname?: string;"));
//! ```
//!
//! ### JSON Schema from CSV text
//!
//! ```rust
//! use autoinfer::{generate_from_text, GenerateOptions, InputKind, OutputFormat};
//!
//! # fn main() -> autoinfer::Result<()> {
//! let csv = "id,active\n1,true\n2,false\n";
//! let output = generate_from_text(
//!     csv,
//!     InputKind::Csv,
//!     OutputFormat::JsonSchema,
//!     &GenerateOptions::default(),
//! )?;
//!
//! let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
//! assert_eq!(doc["properties"]["active"]["type"], "boolean");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod render;
pub mod schema;
pub mod source;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use render::{generate, render_interface, render_json_schema};
pub use schema::{infer, infer_samples, merge, CustomField, ObjectSchema, SchemaNode, StringFormat};
pub use source::{read_schema, InputKind};
pub use types::{GenerateOptions, OutputFormat};

/// Main entry point: raw input text to generated output
pub fn generate_from_text(
    text: &str,
    input: InputKind,
    format: OutputFormat,
    options: &GenerateOptions,
) -> Result<String> {
    let schema = read_schema(input, text)?;
    Ok(generate(&schema, format, options))
}

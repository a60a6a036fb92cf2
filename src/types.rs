use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which renderer produces the final text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A named type-interface declaration
    #[serde(alias = "ts")]
    TypeScript,
    /// A JSON-Schema draft-07 document
    #[serde(rename = "jsonschema", alias = "json-schema")]
    JsonSchema,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::TypeScript => f.write_str("typescript"),
            OutputFormat::JsonSchema => f.write_str("jsonschema"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(OutputFormat::TypeScript),
            "jsonschema" | "json-schema" => Ok(OutputFormat::JsonSchema),
            other => Err(crate::Error::UnknownOutputFormat(other.to_string())),
        }
    }
}

/// Options consumed by both renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    /// Name of the generated interface or schema title. Empty falls back to
    /// the renderer's default.
    pub interface_name: Option<String>,

    /// Mark fields that were missing from some samples as optional. When
    /// off, every field is treated as required.
    pub infer_optional: bool,

    /// Pretty-print the output
    pub prettify: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            interface_name: None,
            infer_optional: true,
            prettify: true,
        }
    }
}

impl GenerateOptions {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.interface_name = Some(name.into());
        self
    }

    pub fn with_infer_optional(mut self, enabled: bool) -> Self {
        self.infer_optional = enabled;
        self
    }

    pub fn with_prettify(mut self, enabled: bool) -> Self {
        self.prettify = enabled;
        self
    }

    /// The configured name, or `default` when unset or blank
    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.interface_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => default,
        }
    }
}

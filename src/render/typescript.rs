//! Type-interface emitter
//!
//! Renders a schema tree as a TypeScript declaration. Object roots become an
//! `interface`, anything else a `type` alias. Pretty-printing is cosmetic:
//! when it fails the unformatted text is returned and a warning is logged.

use crate::schema::{SchemaNode, StringFormat};
use crate::types::GenerateOptions;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_INTERFACE_NAME: &str = "GeneratedInterface";

const INDENT: &str = "  ";

static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Render `root` as a named declaration
pub fn render_interface(root: &SchemaNode, options: &GenerateOptions) -> String {
    let name = options.name_or(DEFAULT_INTERFACE_NAME);

    let output = match root {
        SchemaNode::Object(_) => format!("interface {} {}\n", name, render_type(root, options, 0)),
        other => format!("type {} = {};\n", name, render_type(other, options, 0)),
    };

    if options.prettify {
        prettify_or_raw(output)
    } else {
        output
    }
}

fn prettify_or_raw(output: String) -> String {
    match format_declaration(&output) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!("Failed to prettify output: {}", e);
            output
        }
    }
}

/// Render the type expression of a node nested `depth` levels deep
pub fn render_type(node: &SchemaNode, options: &GenerateOptions, depth: usize) -> String {
    match node {
        SchemaNode::Any => "any".to_string(),
        SchemaNode::Null => "null".to_string(),
        SchemaNode::Boolean => "boolean".to_string(),
        SchemaNode::Integer | SchemaNode::Number => "number".to_string(),
        SchemaNode::String {
            format: Some(StringFormat::DateTime),
        } => "Date".to_string(),
        SchemaNode::String { .. } => "string".to_string(),
        SchemaNode::Array { items } => {
            let item_type = render_type(items, options, depth + 1);
            if items.is_union() {
                format!("({})[]", item_type)
            } else {
                format!("{}[]", item_type)
            }
        }
        SchemaNode::Object(obj) => {
            if obj.is_empty() {
                return "{}".to_string();
            }

            let indent = INDENT.repeat(depth + 1);
            let mut output = String::from("{\n");

            for (key, value) in &obj.fields {
                let optional_marker = if options.infer_optional && !obj.is_required(key) {
                    "?"
                } else {
                    ""
                };
                output.push_str(&format!(
                    "{}{}{}: {};\n",
                    indent,
                    property_key(key),
                    optional_marker,
                    render_type(value, options, depth + 1)
                ));
            }

            output.push_str(&INDENT.repeat(depth));
            output.push('}');
            output
        }
        SchemaNode::Union { variants } => {
            if variants.is_empty() {
                return "any".to_string();
            }
            variants
                .iter()
                .map(|variant| render_type(variant, options, depth))
                .collect::<Vec<_>>()
                .join(" | ")
        }
    }
}

/// Field names that are not plain identifiers are quoted
fn property_key(key: &str) -> String {
    if IDENTIFIER_REGEX.is_match(key) {
        key.to_string()
    } else {
        serde_json::Value::String(key.to_string()).to_string()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("unbalanced closing brace on line {0}")]
    UnexpectedClose(usize),

    #[error("{0} unclosed brace(s) at end of input")]
    Unclosed(usize),

    #[error("unterminated string literal on line {0}")]
    UnterminatedString(usize),
}

/// Re-indent a declaration by brace depth
///
/// Lines are trimmed and re-indented two spaces per open brace, runs of
/// blank lines collapse to one and the text ends with exactly one newline.
/// Braces inside quoted keys are ignored.
pub fn format_declaration(text: &str) -> Result<String, FormatError> {
    let mut depth: usize = 0;
    let mut output = String::with_capacity(text.len());
    let mut previous_blank = true;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            if !previous_blank {
                output.push('\n');
            }
            previous_blank = true;
            continue;
        }
        previous_blank = false;

        let (opens, closes_before_content, closes_after) = scan_braces(line, line_no)?;

        let line_depth = depth
            .checked_sub(closes_before_content)
            .ok_or(FormatError::UnexpectedClose(line_no))?;
        output.push_str(&INDENT.repeat(line_depth));
        output.push_str(line);
        output.push('\n');

        depth = (line_depth + opens)
            .checked_sub(closes_after)
            .ok_or(FormatError::UnexpectedClose(line_no))?;
    }

    if depth != 0 {
        return Err(FormatError::Unclosed(depth));
    }

    while output.ends_with("\n\n") {
        output.pop();
    }

    Ok(output)
}

/// Count braces on a line: opens, leading closes, and closes after content
fn scan_braces(line: &str, line_no: usize) -> Result<(usize, usize, usize), FormatError> {
    let mut opens = 0;
    let mut leading_closes = 0;
    let mut trailing_closes = 0;
    let mut seen_content = false;
    let mut in_string = false;
    let mut escaped = false;

    for ch in line.chars() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                seen_content = true;
            }
            '{' => {
                opens += 1;
                seen_content = true;
            }
            '}' if !seen_content => leading_closes += 1,
            '}' => trailing_closes += 1,
            c if c.is_whitespace() => {}
            _ => seen_content = true,
        }
    }

    if in_string {
        return Err(FormatError::UnterminatedString(line_no));
    }

    Ok((opens, leading_closes, trailing_closes))
}

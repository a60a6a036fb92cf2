//! Union normalization over rendered output
//!
//! Rendering can repeat a union member (`integer` and `number` both render
//! as `number`) and keeps variant order from the input. These passes remove
//! repeated members and sort the rest so the output does not depend on the
//! order samples arrived in.

use super::json_schema::to_text;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::warn;

// A quoted key, or a run of simple type names joined by `|`
static UNION_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|\b\w+(?:\[\])*(?:\s*\|\s*\w+(?:\[\])*)+"#).unwrap()
});

/// Collapse and sort union members in a type declaration until stable
pub fn dedupe_typescript_unions(text: &str) -> String {
    let mut current = text.to_string();

    loop {
        let next = UNION_RUN_REGEX
            .replace_all(&current, |caps: &Captures| normalize_run(&caps[0]))
            .into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

fn normalize_run(run: &str) -> String {
    if run.starts_with('"') {
        return run.to_string();
    }

    let mut members: Vec<&str> = run.split('|').map(str::trim).collect();
    members.sort_by(|a, b| lexical(a, b));
    members.dedup();
    members.join(" | ")
}

/// Case-insensitive first, byte order to break ties
fn lexical(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort, deduplicate and splice `anyOf` members throughout a JSON-Schema text
///
/// Text that does not parse is returned unchanged.
pub fn dedupe_json_schema_unions(text: &str, prettify: bool) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(mut document) => {
            dedupe_any_of(&mut document);
            to_text(&document, prettify)
        }
        Err(e) => {
            warn!("Could not deduplicate JSON schema unions due to a parsing error: {}", e);
            text.to_string()
        }
    }
}

/// Normalize every `anyOf` in the tree, in place
pub fn dedupe_any_of(node: &mut Value) {
    match node {
        Value::Object(map) => {
            if let Some(Value::Array(members)) = map.get_mut("anyOf") {
                let mut keyed: Vec<(String, Value)> = members
                    .drain(..)
                    .map(|member| (member.to_string(), member))
                    .collect();
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
                keyed.dedup_by(|a, b| a.0 == b.0);
                members.extend(keyed.into_iter().map(|(_, member)| member));

                match members.len() {
                    0 => {
                        map.remove("anyOf");
                        map.entry("description")
                            .or_insert_with(|| Value::String("Empty union after deduplication".to_string()));
                    }
                    1 => {
                        if let Some(Value::Array(mut only)) = map.remove("anyOf") {
                            match only.pop() {
                                Some(Value::Object(fields)) => map.extend(fields),
                                Some(other) => {
                                    map.insert("anyOf".to_string(), Value::Array(vec![other]));
                                }
                                None => {}
                            }
                        }
                    }
                    _ => {}
                }
            }

            for child in map.values_mut() {
                dedupe_any_of(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                dedupe_any_of(item);
            }
        }
        _ => {}
    }
}

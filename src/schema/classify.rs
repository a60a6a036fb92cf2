//! Scalar classification with string format detection

use super::node::{SchemaNode, StringFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

// Pre-compiled regex patterns, checked in priority order
static ISO_DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$").unwrap()
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

/// A single JSON-compatible leaf value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Number(f64),
    String(&'a str),
}

impl<'a> Scalar<'a> {
    /// Borrow a scalar out of a JSON value, `None` for arrays and objects
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(Scalar::Number(number_as_f64(n))),
            Value::String(s) => Some(Scalar::String(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

fn number_as_f64(n: &Number) -> f64 {
    if let Some(i) = n.as_i64() {
        i as f64
    } else if let Some(u) = n.as_u64() {
        u as f64
    } else {
        n.as_f64().unwrap_or(f64::NAN)
    }
}

/// Classify one scalar into a leaf node
pub fn classify(value: Scalar<'_>) -> SchemaNode {
    match value {
        Scalar::Null => SchemaNode::Null,
        Scalar::Bool(_) => SchemaNode::Boolean,
        Scalar::Number(n) => {
            if is_whole(n) {
                SchemaNode::Integer
            } else {
                SchemaNode::Number
            }
        }
        Scalar::String(s) => SchemaNode::String {
            format: detect_format(s),
        },
    }
}

/// Whole numbers are integers regardless of how they were written (`1.0` included)
pub fn is_whole(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

/// Detect if a string matches a known format, first match wins
pub fn detect_format(value: &str) -> Option<StringFormat> {
    let len = value.len();

    // Cheap length and separator checks before the regexes
    if len >= 20 && value.as_bytes()[10] == b'T' && ISO_DATETIME_REGEX.is_match(value) {
        return Some(StringFormat::DateTime);
    }

    if len > 5 && value.contains('@') && EMAIL_REGEX.is_match(value) {
        return Some(StringFormat::Email);
    }

    if len == 36 && value.as_bytes()[8] == b'-' && UUID_REGEX.is_match(value) {
        return Some(StringFormat::Uuid);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_primitives() {
        assert_eq!(classify(Scalar::Null), SchemaNode::Null);
        assert_eq!(classify(Scalar::Bool(false)), SchemaNode::Boolean);
        assert_eq!(classify(Scalar::Number(42.0)), SchemaNode::Integer);
        assert_eq!(classify(Scalar::Number(-3.0)), SchemaNode::Integer);
        assert_eq!(classify(Scalar::Number(2.5)), SchemaNode::Number);
        assert_eq!(classify(Scalar::String("hello")), SchemaNode::string());
    }

    #[test]
    fn test_whole_float_is_integer() {
        let value = json!(1.0);
        let scalar = Scalar::from_value(&value).unwrap();
        assert_eq!(classify(scalar), SchemaNode::Integer);

        let value = json!(u64::MAX);
        let scalar = Scalar::from_value(&value).unwrap();
        assert_eq!(classify(scalar), SchemaNode::Integer);
    }

    #[test]
    fn test_containers_are_not_scalars() {
        assert!(Scalar::from_value(&json!([])).is_none());
        assert!(Scalar::from_value(&json!({})).is_none());
    }

    #[test]
    fn test_detect_format_datetime() {
        assert_eq!(detect_format("2024-03-01T12:30:00Z"), Some(StringFormat::DateTime));
        assert_eq!(
            detect_format("2024-03-01T12:30:00.123+02:00"),
            Some(StringFormat::DateTime)
        );
        // The zone designator is mandatory
        assert_eq!(detect_format("2024-03-01T12:30:00"), None);
        assert_eq!(detect_format("2024-03-01"), None);
    }

    #[test]
    fn test_detect_format_email() {
        assert_eq!(detect_format("test@example.com"), Some(StringFormat::Email));
        assert_eq!(detect_format("not an @ email"), None);
        assert_eq!(detect_format("user@localhost"), None);
    }

    #[test]
    fn test_detect_format_uuid() {
        assert_eq!(
            detect_format("550e8400-e29b-41d4-a716-446655440000"),
            Some(StringFormat::Uuid)
        );
        assert_eq!(
            detect_format("550E8400-E29B-41D4-A716-446655440000"),
            Some(StringFormat::Uuid)
        );
        assert_eq!(detect_format("550e8400-e29b-41d4-a716-44665544000z"), None);
    }

    #[test]
    fn test_classify_is_stable_under_round_trip() {
        for value in [json!(7), json!(0.25), json!(true), json!(null), json!("a@b.io")] {
            let first = classify(Scalar::from_value(&value).unwrap());
            let reparsed: Value = serde_json::from_str(&value.to_string()).unwrap();
            let second = classify(Scalar::from_value(&reparsed).unwrap());
            assert_eq!(first, second);
        }
    }
}

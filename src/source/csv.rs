//! CSV rows as records
//!
//! Each data row becomes one record keyed by the header row. Cell text is
//! coerced to a number, a boolean, or left as a string before inference.

use crate::error::{Error, Result};
use crate::schema::classify::is_whole;
use crate::schema::{infer_samples, SchemaNode};
use serde_json::{Map, Number, Value};
use tracing::debug;

// Largest magnitude at which every whole f64 is an exact integer
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Coerce one CSV cell into a typed value
pub fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();

    if !trimmed.is_empty() {
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return number_value(n);
            }
        }
    }

    if trimmed.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::String(raw.to_string())
    }
}

fn number_value(n: f64) -> Value {
    if is_whole(n) && n.abs() <= MAX_SAFE_INTEGER {
        return Value::from(n as i64);
    }
    Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(n.to_string()))
}

/// Read CSV text into one record per data row
///
/// Fields are trimmed and short rows are padded with empty strings.
pub fn parse_records(text: &str) -> Result<Vec<Value>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::CsvTooShort);
    }

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    while reader.read_record(&mut row)? {
        let mut record = Map::new();
        for (idx, header) in headers.iter().enumerate() {
            record.insert(header.to_string(), coerce_value(row.get(idx).unwrap_or("")));
        }
        records.push(Value::Object(record));
    }

    if records.is_empty() {
        return Err(Error::CsvTooShort);
    }

    debug!(rows = records.len(), columns = headers.len(), "read CSV records");
    Ok(records)
}

/// Schema of the rows of a CSV document
pub fn csv_schema(text: &str) -> Result<SchemaNode> {
    Ok(infer_samples(&parse_records(text)?))
}

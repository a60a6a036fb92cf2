//! Errors raised while turning raw input into samples
//!
//! Inference and rendering never fail; only the collaborators that parse
//! raw text or metadata do.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON on line {line}: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV must have at least a header row and one data row")]
    CsvTooShort,

    #[error("{0} input is empty")]
    EmptyInput(&'static str),

    #[error("No columns found for table '{table}'")]
    NoColumns { table: String },

    #[error("Invalid custom field '{0}', expected NAME:TYPE")]
    InvalidCustomField(String),

    #[error("Unknown custom field type '{0}'")]
    UnknownFieldType(String),

    #[error("Unknown output format '{0}'")]
    UnknownOutputFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

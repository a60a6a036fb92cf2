//! autoinfer: Generate TypeScript interfaces or JSON Schemas from sample data
//!
//! Usage:
//!   # Interface from a JSON document
//!   autoinfer data.json --name User
//!
//!   # JSON Schema from NDJSON on stdin
//!   cat events.jsonl | autoinfer --source ndjson --output json-schema
//!
//!   # Interface from CSV with an extra declared field
//!   autoinfer users.csv --source csv --field createdBy:string --out types/user.ts

use anyhow::{Context, Result};
use autoinfer::schema::{apply_custom_fields, CustomField};
use autoinfer::{generate, read_schema, GenerateOptions, InputKind, OutputFormat};
use clap::{Parser, ValueEnum};
use mimalloc::MiMalloc;
use std::fs;
use std::io::{stdin, Read};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Source {
    /// A single JSON document
    Json,
    /// Newline-delimited JSON, one sample per line
    Ndjson,
    /// CSV with a header row
    Csv,
    /// JSON array of SQL column metadata
    Columns,
    /// A previously emitted schema tree
    Tree,
}

impl From<Source> for InputKind {
    fn from(source: Source) -> Self {
        match source {
            Source::Json => InputKind::Json,
            Source::Ndjson => InputKind::Ndjson,
            Source::Csv => InputKind::Csv,
            Source::Columns => InputKind::Columns,
            Source::Tree => InputKind::Tree,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Typescript,
    JsonSchema,
}

impl From<Output> for OutputFormat {
    fn from(output: Output) -> Self {
        match output {
            Output::Typescript => OutputFormat::TypeScript,
            Output::JsonSchema => OutputFormat::JsonSchema,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "autoinfer")]
#[command(about = "Generate TypeScript interfaces or JSON Schemas from sample data", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Shape of the input
    #[arg(long, value_enum, default_value = "json")]
    source: Source,

    /// Output format
    #[arg(long, value_enum, default_value = "typescript")]
    output: Output,

    /// Interface name or schema title
    #[arg(long)]
    name: Option<String>,

    /// Mark every field required
    #[arg(long)]
    no_infer_optional: bool,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,

    /// Extra root field as NAME:TYPE (repeatable)
    #[arg(long = "field", value_name = "NAME:TYPE")]
    fields: Vec<String>,

    /// Write output to this path instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the inferred schema tree instead of rendering it
    #[arg(long)]
    emit_tree: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the log filter: `--verbose` forces debug, else `RUST_LOG`, else warn
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut text = String::new();
            stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let fields = args
        .fields
        .iter()
        .map(|field| field.parse::<CustomField>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid --field")?;

    let text = read_input(args.input.as_ref())?;
    let mut schema = read_schema(args.source.into(), &text).context("Failed to infer schema")?;
    apply_custom_fields(&mut schema, &fields);
    debug!("Inferred root kind '{}'", schema.kind());

    let mut output = if args.emit_tree {
        if args.compact {
            serde_json::to_string(&schema)?
        } else {
            serde_json::to_string_pretty(&schema)?
        }
    } else {
        let mut options = GenerateOptions::default()
            .with_infer_optional(!args.no_infer_optional)
            .with_prettify(!args.compact);
        if let Some(name) = &args.name {
            options = options.with_name(name.as_str());
        }
        generate(&schema, args.output.into(), &options)
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

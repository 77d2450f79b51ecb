use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::schema::{
    DEFAULT_MODULE_NAME, DEFAULT_RUNTIME_PATH, DEFAULT_TYPE_NAME, OverrideLists, OverrideTable,
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Generate typed Rust records from the first sheet of a spreadsheet",
    long_about = "Reads the header row and the first data row of a workbook (.xlsx) or \
                  delimited file and generates a struct whose fields mirror the columns. \
                  Column types are guessed from the first data row; the --integers, \
                  --floats, --booleans, --dates and --strings lists force a type instead."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the record module and write it to a file or stdout
    Generate(GenerateArgs),
    /// Show the inferred column schema without generating code
    Probe(ProbeArgs),
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Input workbook (.xlsx, .xlsm) or delimited file; `-` reads CSV from stdin
    pub input: PathBuf,
    /// Delimiter for CSV input (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of CSV input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct OverrideArgs {
    /// Comma-separated header names of columns containing integers
    #[arg(long, action = ArgAction::Append)]
    pub integers: Vec<String>,
    /// Comma-separated header names of columns containing floats
    #[arg(long, action = ArgAction::Append)]
    pub floats: Vec<String>,
    /// Comma-separated header names of columns containing booleans
    #[arg(long, action = ArgAction::Append)]
    pub booleans: Vec<String>,
    /// Comma-separated header names of columns containing dates or timestamps
    #[arg(long, action = ArgAction::Append)]
    pub dates: Vec<String>,
    /// Comma-separated header names of columns to keep as text
    #[arg(long, action = ArgAction::Append)]
    pub strings: Vec<String>,
    /// YAML file with per-kind lists of header names (applied before the flags)
    #[arg(long)]
    pub overrides: Option<PathBuf>,
}

impl OverrideArgs {
    pub fn lists(&self) -> OverrideLists {
        OverrideLists {
            integer: self.integers.clone(),
            datetime: self.dates.clone(),
            float: self.floats.clone(),
            boolean: self.booleans.clone(),
            string: self.strings.clone(),
        }
    }

    /// Combines the optional override file with the command-line lists.
    pub fn table(&self, file: Option<&OverrideLists>) -> OverrideTable {
        let builder = OverrideTable::builder();
        let builder = match file {
            Some(lists) => builder.lists(lists),
            None => builder,
        };
        builder.lists(&self.lists()).build()
    }
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub overrides: OverrideArgs,
    /// Name of the module wrapping the generated items
    #[arg(long = "package", default_value = DEFAULT_MODULE_NAME)]
    pub package: String,
    /// Name of the generated record struct
    #[arg(long = "type", default_value = DEFAULT_TYPE_NAME)]
    pub type_name: String,
    /// Output file, or `-`/`stdout` for standard output
    #[arg(short = 'o', long = "out", default_value = "-")]
    pub out: PathBuf,
    /// Log a warning at runtime when a cell does not match its column type
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub tracing: bool,
    /// Also generate a map from header text to column position
    #[arg(long)]
    pub cols: bool,
    /// Derive serde::Serialize and keep the header text as field names
    #[arg(long)]
    pub serde: bool,
    /// Crate path providing the `convert` module used by generated code
    #[arg(long, default_value = DEFAULT_RUNTIME_PATH)]
    pub runtime: String,
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub overrides: OverrideArgs,
    /// Write the inferred column schema as JSON to this path
    #[arg(long = "emit-schema")]
    pub emit_schema: Option<PathBuf>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

//! I/O utilities for reading delimited input and writing generated source.
//!
//! File access for CSV/TSV sources and for the generated output flows
//! through this module. It provides:
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8.
//! - **stdin/stdout**: the `-` path convention routes through standard streams.
//! - **Output**: the rendered text is written once, in full; a file that could
//!   not be written completely is removed again.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use encoding_rs::{Encoding, UTF_8};
use log::{info, warn};

use crate::error::{Error, Result};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

/// `-` and the literal `stdout` both select standard output.
pub fn is_stdout(path: &Path) -> bool {
    is_dash(path) || path == Path::new("stdout")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| Error::Config(format!("Unknown encoding '{value}'")))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Rows may have differing lengths; the header row is read like any other.
pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(path: &Path, delimiter: u8) -> Result<csv::Reader<Box<dyn Read>>> {
    let reader: Box<dyn Read> = if is_dash(path) {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(path).map_err(|err| {
            Error::source_read(path, format!("Opening input file: {err}"))
        })?))
    };
    Ok(open_csv_reader(reader, delimiter))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String, String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(format!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(
    record: &csv::ByteRecord,
    encoding: &'static Encoding,
) -> Result<Vec<String>, String> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

/// Where generated source ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn from_arg(path: &Path) -> Self {
        if is_stdout(path) {
            Destination::Stdout
        } else {
            Destination::File(path.to_path_buf())
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Destination::Stdout => "stdout".to_string(),
            Destination::File(path) => path.display().to_string(),
        }
    }
}

/// Writes `text` to the destination in one piece and flushes it.
pub fn write_output(destination: &Destination, text: &str) -> Result<()> {
    info!("Writing to {}", destination.describe());
    match destination {
        Destination::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())
                .and_then(|_| out.flush())
                .map_err(|err| Error::io("stdout", err))
        }
        Destination::File(path) => {
            let result = File::create(path).and_then(|file| {
                let mut writer = BufWriter::new(file);
                writer.write_all(text.as_bytes())?;
                writer.flush()
            });
            result.map_err(|err| {
                if path.exists()
                    && let Err(remove_err) = fs::remove_file(path)
                {
                    warn!("Could not remove incomplete output {path:?}: {remove_err}");
                }
                Error::io(path, err)
            })
        }
    }
}

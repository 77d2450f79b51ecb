//! Tabular sources that yield rows of raw text cells.
//!
//! Workbooks (`.xlsx`, `.xlsm`) are read from their first worksheet with
//! `umya-spreadsheet`; everything else is treated as delimited text. Only the
//! header row and the first data row are ever consumed by the generator.

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};

use encoding_rs::Encoding;
use log::{debug, info};
use umya_spreadsheet::{Spreadsheet, reader::xlsx};

use crate::{
    error::{Error, Result},
    io_utils,
};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm"];

pub trait TabularReader {
    /// Returns the next row, or `None` once the source is exhausted.
    fn next_row(&mut self) -> Result<Option<Vec<String>>>;

    /// Human readable origin used in diagnostics.
    fn location(&self) -> &Path;
}

#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    pub delimiter: Option<u8>,
    pub encoding: Option<String>,
}

/// Opens `path` with the reader matching its extension.
pub fn open(path: &Path, options: &SourceOptions) -> Result<Box<dyn TabularReader>> {
    info!("Reading from {}", path.display());
    if is_workbook(path) {
        Ok(Box::new(XlsxReader::open(path)?))
    } else {
        Ok(Box::new(CsvReader::open(path, options)?))
    }
}

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Reads the header row and the first data row. Anything shorter than two
/// rows is a read error.
pub fn read_header_and_sample(
    reader: &mut dyn TabularReader,
) -> Result<(Vec<String>, Vec<String>)> {
    let header = reader
        .next_row()?
        .ok_or_else(|| Error::source_read(reader.location(), "source has no header row"))?;
    let sample = reader.next_row()?.ok_or_else(|| {
        Error::source_read(reader.location(), "source has no data row after the header")
    })?;
    debug!(
        "Header has {} cell(s), sample row has {} cell(s)",
        header.len(),
        sample.len()
    );
    Ok((header, sample))
}

/// Spreadsheet column letters for a 1-based column number (`1` → `A`,
/// `27` → `AA`).
pub fn column_name(column: u32) -> String {
    let mut column = column;
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

/// `A1`-style address of a zero-based column position and a 1-based row.
pub fn cell_address(position: usize, row: u32) -> String {
    let column = u32::try_from(position + 1).unwrap_or(u32::MAX);
    format!("{}{}", column_name(column), row)
}

pub struct CsvReader {
    path: PathBuf,
    reader: csv::Reader<Box<dyn std::io::Read>>,
    encoding: &'static Encoding,
    record: csv::ByteRecord,
    line: usize,
}

impl CsvReader {
    pub fn open(path: &Path, options: &SourceOptions) -> Result<Self> {
        let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
        let encoding = io_utils::resolve_encoding(options.encoding.as_deref())?;
        let reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        Ok(Self {
            path: path.to_path_buf(),
            reader,
            encoding,
            record: csv::ByteRecord::new(),
            line: 0,
        })
    }
}

impl TabularReader for CsvReader {
    fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        let has_record = self.reader.read_byte_record(&mut self.record).map_err(|err| {
            Error::source_read(&self.path, format!("Reading row {}: {err}", self.line + 1))
        })?;
        if !has_record {
            return Ok(None);
        }
        self.line += 1;
        io_utils::decode_record(&self.record, self.encoding)
            .map(Some)
            .map_err(|message| {
                Error::source_read(&self.path, format!("Row {}: {message}", self.line))
            })
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// First worksheet of a workbook, read row by row with formatted values.
pub struct XlsxReader {
    path: PathBuf,
    book: Spreadsheet,
    next_row: u32,
}

impl XlsxReader {
    pub fn open(path: &Path) -> Result<Self> {
        let book = xlsx::read(path)
            .map_err(|err| Error::source_read(path, format!("failed to parse workbook: {err}")))?;
        if book.get_sheet_collection().is_empty() {
            return Err(Error::source_read(path, "workbook has no worksheets"));
        }
        Ok(Self {
            path: path.to_path_buf(),
            book,
            next_row: 1,
        })
    }
}

impl TabularReader for XlsxReader {
    fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        let sheet = self
            .book
            .get_sheet_collection()
            .first()
            .ok_or_else(|| Error::source_read(&self.path, "workbook has no worksheets"))?;
        let (max_col, max_row) = sheet.get_highest_column_and_row();
        if self.next_row > max_row {
            return Ok(None);
        }
        let row = self.next_row;
        self.next_row += 1;
        let mut cells = (1..=max_col)
            .map(|col| {
                let address = format!("{}{}", column_name(col), row);
                sheet
                    .get_cell(address.as_str())
                    .map(|cell| cell.get_formatted_value())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        // The sheet extent is shared by all rows; trailing blanks are not cells of this row.
        while cells.last().is_some_and(|cell| cell.is_empty()) {
            cells.pop();
        }
        Ok(Some(cells))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Rows supplied directly by the caller.
#[derive(Debug, Clone)]
pub struct MemoryReader {
    location: PathBuf,
    rows: VecDeque<Vec<String>>,
}

impl MemoryReader {
    pub fn new<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            location: PathBuf::from("<memory>"),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = location.into();
        self
    }
}

impl TabularReader for MemoryReader {
    fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        Ok(self.rows.pop_front())
    }

    fn location(&self) -> &Path {
        &self.location
    }
}

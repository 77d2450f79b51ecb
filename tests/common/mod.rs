#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use sheetgen::pipeline::{self, GenerateOptions};
use sheetgen::source::MemoryReader;
use tempfile::{TempDir, tempdir};

pub const FIXED_TIMESTAMP: &str = "2023-08-03T14:42:38+02:00";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes a workbook whose first sheet holds `rows`, all as text cells.
    pub fn write_workbook(&self, name: &str, rows: &[&[&str]]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).expect("default sheet");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                let address = sheetgen::source::cell_address(col_idx, row_idx as u32 + 1);
                sheet
                    .get_cell_mut(address.as_str())
                    .set_value_string(*value);
            }
        }
        umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write workbook");
        path
    }
}

/// Options with a fixed timestamp so rendered output is reproducible.
pub fn options(type_name: &str) -> GenerateOptions {
    GenerateOptions {
        type_name: type_name.to_string(),
        module_name: "records".to_string(),
        source_file: "excel_test.xlsx".to_string(),
        generated_at: Some(FIXED_TIMESTAMP.to_string()),
        ..GenerateOptions::default()
    }
}

pub fn generate_from(rows: Vec<Vec<&str>>, options: &GenerateOptions) -> String {
    let mut reader = MemoryReader::new(rows).with_location(&options.source_file);
    pipeline::generate(&mut reader, options).expect("generate")
}

/// Lines of the generated source with indentation stripped.
pub fn trimmed_lines(code: &str) -> Vec<&str> {
    code.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

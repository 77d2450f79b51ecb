//! Column schema model, scalar kinds, override table and generation context.
//!
//! The schema is built in two steps. Reading the header row yields
//! [`HeaderColumn`] values, which carry no type at all. The inference engine
//! turns each of them into exactly one [`ColumnSchema`] with a concrete
//! [`ScalarKind`]. A column can therefore never reach the renderer untyped.
//!
//! ## Responsibilities
//!
//! - The closed [`ScalarKind`] enum, its Rust type and its conversion names
//! - [`OverrideTable`] construction from comma lists or a YAML file
//! - [`GenerationContext`], the immutable input bundle of the renderer
//! - JSON persistence of the inferred column schema

use std::{
    collections::HashMap,
    fmt,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
    str::FromStr,
};

use chrono::{Local, SecondsFormat};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_TYPE_NAME: &str = "Record";
pub const DEFAULT_MODULE_NAME: &str = "records";
pub const DEFAULT_RUNTIME_PATH: &str = "sheetgen";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Integer,
    Float,
    Boolean,
    DateTime,
    String,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "boolean",
            ScalarKind::DateTime => "datetime",
            ScalarKind::String => "string",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["integer", "float", "boolean", "datetime", "string"]
    }

    /// Rust type of a generated field holding this kind.
    pub fn rust_type(&self) -> &'static str {
        match self {
            ScalarKind::Integer => "i64",
            ScalarKind::Float => "f64",
            ScalarKind::Boolean => "bool",
            ScalarKind::DateTime => "NaiveDateTime",
            ScalarKind::String => "String",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScalarKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "integer" | "int" => Ok(ScalarKind::Integer),
            "float" | "double" => Ok(ScalarKind::Float),
            "boolean" | "bool" => Ok(ScalarKind::Boolean),
            "datetime" | "date-time" | "date" | "time" | "timestamp" => Ok(ScalarKind::DateTime),
            "string" | "text" => Ok(ScalarKind::String),
            _ => Err(Error::Config(format!(
                "Unknown column kind '{value}'. Supported kinds: {}",
                ScalarKind::variants().join(", ")
            ))),
        }
    }
}

/// Which runtime conversion materializes a non-string column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversion {
    pub kind: ScalarKind,
    pub tracing: bool,
}

impl Conversion {
    /// String columns pass the raw cell through and have no conversion.
    pub fn for_kind(kind: ScalarKind, tracing: bool) -> Option<Self> {
        match kind {
            ScalarKind::String => None,
            _ => Some(Conversion { kind, tracing }),
        }
    }

    pub fn function_name(&self) -> &'static str {
        match (self.kind, self.tracing) {
            (ScalarKind::Integer, false) => "to_int",
            (ScalarKind::Integer, true) => "trace_to_int",
            (ScalarKind::Float, false) => "to_float",
            (ScalarKind::Float, true) => "trace_to_float",
            (ScalarKind::Boolean, false) => "to_bool",
            (ScalarKind::Boolean, true) => "trace_to_bool",
            (ScalarKind::DateTime, false) => "to_datetime",
            (ScalarKind::DateTime, true) => "trace_to_datetime",
            (ScalarKind::String, _) => "",
        }
    }
}

/// A column as read from the header row, before any type is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderColumn {
    pub source_name: String,
    pub identifier: String,
    pub position: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSchema {
    pub source_name: String,
    pub identifier: String,
    pub kind: ScalarKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<Conversion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
    #[serde(default)]
    pub overridden: bool,
}

impl ColumnSchema {
    pub fn rust_type(&self) -> &'static str {
        self.kind.rust_type()
    }
}

/// Serialized form of the inferred schema written by `probe --emit-schema`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferredSchema {
    pub source: String,
    pub columns: Vec<ColumnSchema>,
}

impl InferredSchema {
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|err| Error::io(path, err))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|err| Error::io(path, err.into()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| Error::io(path, err))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|err| Error::Config(format!("Parsing schema JSON {path:?}: {err}")))
    }
}

/// Per-kind lists of source column names whose type is fixed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OverrideLists {
    #[serde(alias = "integers")]
    pub integer: Vec<String>,
    #[serde(alias = "dates", alias = "date")]
    pub datetime: Vec<String>,
    #[serde(alias = "floats")]
    pub float: Vec<String>,
    #[serde(alias = "booleans")]
    pub boolean: Vec<String>,
    #[serde(alias = "strings")]
    pub string: Vec<String>,
}

impl OverrideLists {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| {
            Error::Config(format!("Opening override file {path:?}: {err}"))
        })?;
        serde_yaml::from_reader(BufReader::new(file))
            .map_err(|err| Error::Config(format!("Parsing override file {path:?}: {err}")))
    }

    fn in_assignment_order(&self) -> [(ScalarKind, &[String]); 5] {
        [
            (ScalarKind::Integer, self.integer.as_slice()),
            (ScalarKind::DateTime, self.datetime.as_slice()),
            (ScalarKind::Float, self.float.as_slice()),
            (ScalarKind::Boolean, self.boolean.as_slice()),
            (ScalarKind::String, self.string.as_slice()),
        ]
    }
}

/// Immutable mapping from source column name to a forced kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: HashMap<String, ScalarKind>,
}

impl OverrideTable {
    pub fn builder() -> OverrideTableBuilder {
        OverrideTableBuilder::default()
    }

    pub fn from_lists(lists: &OverrideLists) -> Self {
        Self::builder().lists(lists).build()
    }

    pub fn get(&self, source_name: &str) -> Option<ScalarKind> {
        self.entries.get(source_name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct OverrideTableBuilder {
    entries: HashMap<String, ScalarKind>,
}

impl OverrideTableBuilder {
    /// Assigns `kind` to every name in the given comma-separated lists.
    /// A later assignment of the same name replaces an earlier one.
    pub fn assign<S: AsRef<str>>(mut self, kind: ScalarKind, lists: &[S]) -> Self {
        for list in lists {
            for name in list.as_ref().split(',') {
                if name.is_empty() {
                    continue;
                }
                if let Some(previous) = self.entries.insert(name.to_string(), kind)
                    && previous != kind
                {
                    debug!("Override for column '{name}' changed from {previous} to {kind}");
                }
            }
        }
        self
    }

    pub fn lists(self, lists: &OverrideLists) -> Self {
        lists
            .in_assignment_order()
            .into_iter()
            .fold(self, |builder, (kind, names)| builder.assign(kind, names))
    }

    pub fn build(self) -> OverrideTable {
        OverrideTable {
            entries: self.entries,
        }
    }
}

/// Everything the renderer needs. Built once, consumed once.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    type_name: String,
    module_name: String,
    runtime_path: String,
    source_file: String,
    generated_at: String,
    columns: Vec<ColumnSchema>,
    emit_index_map: bool,
    tracing: bool,
    derive_serde: bool,
}

impl GenerationContext {
    pub fn builder(columns: Vec<ColumnSchema>) -> ContextBuilder {
        ContextBuilder {
            type_name: DEFAULT_TYPE_NAME.to_string(),
            module_name: DEFAULT_MODULE_NAME.to_string(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            source_file: String::new(),
            generated_at: None,
            columns,
            emit_index_map: false,
            tracing: true,
            derive_serde: false,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn runtime_path(&self) -> &str {
        &self.runtime_path
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn generated_at(&self) -> &str {
        &self.generated_at
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn emit_index_map(&self) -> bool {
        self.emit_index_map
    }

    pub fn tracing(&self) -> bool {
        self.tracing
    }

    pub fn derive_serde(&self) -> bool {
        self.derive_serde
    }

    pub fn has_kind(&self, kind: ScalarKind) -> bool {
        self.columns.iter().any(|c| c.kind == kind)
    }
}

#[derive(Debug)]
pub struct ContextBuilder {
    type_name: String,
    module_name: String,
    runtime_path: String,
    source_file: String,
    generated_at: Option<String>,
    columns: Vec<ColumnSchema>,
    emit_index_map: bool,
    tracing: bool,
    derive_serde: bool,
}

impl ContextBuilder {
    pub fn type_name(mut self, value: impl Into<String>) -> Self {
        self.type_name = value.into();
        self
    }

    pub fn module_name(mut self, value: impl Into<String>) -> Self {
        self.module_name = value.into();
        self
    }

    pub fn runtime_path(mut self, value: impl Into<String>) -> Self {
        self.runtime_path = value.into();
        self
    }

    pub fn source_file(mut self, value: impl Into<String>) -> Self {
        self.source_file = value.into();
        self
    }

    /// Fixes the banner timestamp; defaults to the local time of `build`.
    pub fn generated_at(mut self, value: impl Into<String>) -> Self {
        self.generated_at = Some(value.into());
        self
    }

    pub fn emit_index_map(mut self, value: bool) -> Self {
        self.emit_index_map = value;
        self
    }

    pub fn tracing(mut self, value: bool) -> Self {
        self.tracing = value;
        self
    }

    pub fn derive_serde(mut self, value: bool) -> Self {
        self.derive_serde = value;
        self
    }

    pub fn build(self) -> GenerationContext {
        GenerationContext {
            type_name: self.type_name,
            module_name: self.module_name,
            runtime_path: self.runtime_path,
            source_file: self.source_file,
            generated_at: self
                .generated_at
                .unwrap_or_else(|| Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            columns: self.columns,
            emit_index_map: self.emit_index_map,
            tracing: self.tracing,
            derive_serde: self.derive_serde,
        }
    }
}

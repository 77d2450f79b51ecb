//! Runtime conversions called by generated `from_row` functions.
//!
//! Each scalar kind has a silent and a tracing variant. Both return the
//! type's default value when a cell cannot be converted; the tracing variant
//! additionally logs a warning naming the source column. Empty cells are
//! treated as missing values and convert to the default without a warning.

use std::fmt;

use chrono::NaiveDateTime;
use log::warn;
use thiserror::Error;

use crate::{classify, schema::ScalarKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Value::String(_) => ScalarKind::String,
            Value::Integer(_) => ScalarKind::Integer,
            Value::Float(_) => ScalarKind::Float,
            Value::Boolean(_) => ScalarKind::Boolean,
            Value::DateTime(_) => ScalarKind::DateTime,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse '{raw}' as {kind}")]
pub struct ConvertError {
    pub raw: String,
    pub kind: ScalarKind,
}

/// Converts a raw cell into a typed value. Empty cells yield `Ok(None)`.
pub fn try_convert(kind: ScalarKind, raw: &str) -> Result<Option<Value>, ConvertError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let parsed = match kind {
        ScalarKind::String => Some(Value::String(raw.to_string())),
        ScalarKind::Integer => classify::parse_integer(raw).map(Value::Integer),
        ScalarKind::Float => classify::parse_float(raw).map(Value::Float),
        ScalarKind::Boolean => parse_bool_cell(raw).map(Value::Boolean),
        ScalarKind::DateTime => classify::parse_datetime(raw).map(Value::DateTime),
    };
    parsed.map(Some).ok_or_else(|| ConvertError {
        raw: raw.to_string(),
        kind,
    })
}

// Spreadsheets commonly store booleans as 1/0.
fn parse_bool_cell(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" => Some(true),
        "0" => Some(false),
        other => classify::parse_boolean(other),
    }
}

fn convert_or_default<T: Default>(
    kind: ScalarKind,
    raw: &str,
    label: Option<&str>,
    extract: impl FnOnce(Value) -> Option<T>,
) -> T {
    match try_convert(kind, raw) {
        Ok(Some(value)) => extract(value).unwrap_or_default(),
        Ok(None) => T::default(),
        Err(err) => {
            if let Some(label) = label {
                warn!("Column '{label}': {err}; using default value");
            }
            T::default()
        }
    }
}

fn as_integer(value: Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(i),
        _ => None,
    }
}

fn as_float(value: Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(f),
        _ => None,
    }
}

fn as_boolean(value: Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(b),
        _ => None,
    }
}

fn as_datetime(value: Value) -> Option<NaiveDateTime> {
    match value {
        Value::DateTime(dt) => Some(dt),
        _ => None,
    }
}

/// Raw text of cell `index`, or `""` when the row is shorter.
pub fn cell<S: AsRef<str>>(row: &[S], index: usize) -> &str {
    row.get(index).map(|value| value.as_ref()).unwrap_or_default()
}

pub fn to_int(raw: &str) -> i64 {
    convert_or_default(ScalarKind::Integer, raw, None, as_integer)
}

pub fn to_float(raw: &str) -> f64 {
    convert_or_default(ScalarKind::Float, raw, None, as_float)
}

pub fn to_bool(raw: &str) -> bool {
    convert_or_default(ScalarKind::Boolean, raw, None, as_boolean)
}

pub fn to_datetime(raw: &str) -> NaiveDateTime {
    convert_or_default(ScalarKind::DateTime, raw, None, as_datetime)
}

pub fn trace_to_int(raw: &str, label: &str) -> i64 {
    convert_or_default(ScalarKind::Integer, raw, Some(label), as_integer)
}

pub fn trace_to_float(raw: &str, label: &str) -> f64 {
    convert_or_default(ScalarKind::Float, raw, Some(label), as_float)
}

pub fn trace_to_bool(raw: &str, label: &str) -> bool {
    convert_or_default(ScalarKind::Boolean, raw, Some(label), as_boolean)
}

pub fn trace_to_datetime(raw: &str, label: &str) -> NaiveDateTime {
    convert_or_default(ScalarKind::DateTime, raw, Some(label), as_datetime)
}

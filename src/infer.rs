use log::debug;

use crate::{
    classify,
    schema::{ColumnSchema, Conversion, HeaderColumn, OverrideTable, ScalarKind},
    source::cell_address,
};

/// One-based spreadsheet row that holds the sampled data.
pub const SAMPLE_ROW_NUMBER: u32 = 2;

/// Classifies a single cell. The predicates are tried from the most to the
/// least specific and the first match wins.
pub fn classify_cell(value: &str) -> ScalarKind {
    if classify::is_integer(value) {
        ScalarKind::Integer
    } else if classify::is_float(value) {
        ScalarKind::Float
    } else if classify::is_boolean(value) {
        ScalarKind::Boolean
    } else if classify::is_datetime(value) {
        ScalarKind::DateTime
    } else {
        ScalarKind::String
    }
}

/// Resolves the kind and conversion of one column.
///
/// A user override always wins and the sample is not looked at. Otherwise
/// the sample cell decides; a missing cell counts as empty text.
pub fn infer(
    column: &HeaderColumn,
    overrides: &OverrideTable,
    sample: Option<&str>,
    tracing: bool,
) -> ColumnSchema {
    let (kind, overridden) = match overrides.get(&column.source_name) {
        Some(kind) => (kind, true),
        None => (classify_cell(sample.unwrap_or_default()), false),
    };
    debug!(
        "Column '{}' -> {} ({})",
        column.source_name,
        kind,
        if overridden { "override" } else { "sampled" }
    );
    ColumnSchema {
        source_name: column.source_name.clone(),
        identifier: column.identifier.clone(),
        kind,
        conversion: Conversion::for_kind(kind, tracing),
        cell_address: Some(cell_address(column.position, SAMPLE_ROW_NUMBER)),
        sample: sample.map(str::to_string),
        overridden,
    }
}

/// Infers every column in header order from one sample row.
pub fn infer_columns<S: AsRef<str>>(
    headers: &[HeaderColumn],
    sample_row: &[S],
    overrides: &OverrideTable,
    tracing: bool,
) -> Vec<ColumnSchema> {
    if sample_row.len() < headers.len() {
        debug!(
            "Sample row has {} cell(s) for {} column(s); missing cells are treated as empty",
            sample_row.len(),
            headers.len()
        );
    }
    headers
        .iter()
        .map(|column| {
            let sample = sample_row.get(column.position).map(|value| value.as_ref());
            infer(column, overrides, sample, tracing)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::assign_identifiers;

    fn header(name: &str) -> HeaderColumn {
        assign_identifiers(&[name]).remove(0)
    }

    #[test]
    fn predicate_order_prefers_specific_kinds() {
        assert_eq!(classify_cell("42"), ScalarKind::Integer);
        assert_eq!(classify_cell("42.0"), ScalarKind::Float);
        assert_eq!(classify_cell("true"), ScalarKind::Boolean);
        assert_eq!(classify_cell("2023-08-03"), ScalarKind::DateTime);
        assert_eq!(classify_cell("hello"), ScalarKind::String);
        assert_eq!(classify_cell(""), ScalarKind::String);
    }

    #[test]
    fn override_wins_over_sample() {
        let overrides = OverrideTable::builder()
            .assign(ScalarKind::Integer, &["Code"])
            .build();
        let column = infer(&header("Code"), &overrides, Some("abc"), true);
        assert_eq!(column.kind, ScalarKind::Integer);
        assert!(column.overridden);
        assert_eq!(
            column.conversion.map(|c| c.function_name()),
            Some("trace_to_int")
        );
    }

    #[test]
    fn string_columns_have_no_conversion() {
        let column = infer(&header("Text"), &OverrideTable::default(), Some("hi"), false);
        assert_eq!(column.kind, ScalarKind::String);
        assert_eq!(column.conversion, None);
        assert_eq!(column.cell_address.as_deref(), Some("A2"));
    }

    #[test]
    fn short_sample_rows_fall_back_to_string() {
        let headers = assign_identifiers(&["A", "B", "C"]);
        let columns = infer_columns(&headers, &["1"], &OverrideTable::default(), false);
        let kinds: Vec<_> = columns.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [ScalarKind::Integer, ScalarKind::String, ScalarKind::String]
        );
        assert_eq!(columns[2].sample, None);
        assert_eq!(columns[2].cell_address.as_deref(), Some("C2"));
    }
}

use proptest::prelude::*;
use sheetgen::infer::{classify_cell, infer, infer_columns};
use sheetgen::naming::assign_identifiers;
use sheetgen::schema::{OverrideTable, ScalarKind};

#[test]
fn sample_workbook_row_infers_expected_kinds() {
    let headers = assign_identifiers(&["Integer Value", "Date Value", "Float Value", "Text"]);
    let columns = infer_columns(
        &headers,
        &["5", "2023-08-03", "3.14", "hello"],
        &OverrideTable::default(),
        true,
    );
    let kinds: Vec<_> = columns.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        [
            ScalarKind::Integer,
            ScalarKind::DateTime,
            ScalarKind::Float,
            ScalarKind::String
        ]
    );
    let conversions: Vec<_> = columns
        .iter()
        .map(|c| c.conversion.map(|conv| conv.function_name()))
        .collect();
    assert_eq!(
        conversions,
        [
            Some("trace_to_int"),
            Some("trace_to_datetime"),
            Some("trace_to_float"),
            None
        ]
    );
}

#[test]
fn predicate_priority_resolves_overlaps() {
    assert_eq!(classify_cell("42"), ScalarKind::Integer);
    assert_eq!(classify_cell("42.0"), ScalarKind::Float);
    assert_eq!(classify_cell("true"), ScalarKind::Boolean);
    assert_eq!(classify_cell("1"), ScalarKind::Integer);
}

#[test]
fn overrides_are_matched_on_source_name_not_identifier() {
    let overrides = OverrideTable::builder()
        .assign(ScalarKind::Float, &["Unit Price"])
        .build();
    let headers = assign_identifiers(&["Unit Price", "UnitPrice"]);
    let columns = infer_columns(&headers, &["7", "7"], &overrides, false);
    assert_eq!(columns[0].kind, ScalarKind::Float);
    assert!(columns[0].overridden);
    assert_eq!(columns[1].kind, ScalarKind::Integer);
    assert!(!columns[1].overridden);
}

#[test]
fn string_override_keeps_leading_zeros_as_text() {
    let overrides = OverrideTable::builder()
        .assign(ScalarKind::String, &["Zip"])
        .build();
    let headers = assign_identifiers(&["Zip"]);
    let column = infer(&headers[0], &overrides, Some("01234"), true);
    assert_eq!(column.kind, ScalarKind::String);
    assert_eq!(column.conversion, None);
    assert_eq!(column.sample.as_deref(), Some("01234"));
}

#[test]
fn silent_mode_uses_plain_conversions() {
    let headers = assign_identifiers(&["Flag"]);
    let column = infer(&headers[0], &OverrideTable::default(), Some("no"), false);
    assert_eq!(column.kind, ScalarKind::Boolean);
    assert_eq!(column.conversion.map(|c| c.function_name()), Some("to_bool"));
}

fn any_kind() -> impl Strategy<Value = ScalarKind> {
    prop_oneof![
        Just(ScalarKind::Integer),
        Just(ScalarKind::Float),
        Just(ScalarKind::Boolean),
        Just(ScalarKind::DateTime),
        Just(ScalarKind::String),
    ]
}

proptest! {
    #[test]
    fn override_wins_for_any_sample(kind in any_kind(), sample in "\\PC{0,20}", tracing in any::<bool>()) {
        let overrides = OverrideTable::builder().assign(kind, &["Column"]).build();
        let headers = assign_identifiers(&["Column"]);
        let column = infer(&headers[0], &overrides, Some(&sample), tracing);
        prop_assert_eq!(column.kind, kind);
        prop_assert_eq!(column.conversion.is_none(), kind == ScalarKind::String);
    }

    #[test]
    fn every_sample_resolves_to_exactly_one_kind(sample in "\\PC{0,20}") {
        let headers = assign_identifiers(&["Any"]);
        let column = infer(&headers[0], &OverrideTable::default(), Some(&sample), true);
        prop_assert_eq!(column.kind, classify_cell(&sample));
        prop_assert_eq!(column.conversion.is_some(), column.kind != ScalarKind::String);
    }

    #[test]
    fn integers_never_classify_as_float(value in any::<i64>()) {
        prop_assert_eq!(classify_cell(&value.to_string()), ScalarKind::Integer);
    }
}

use std::collections::HashSet;

use heck::{ToShoutySnakeCase, ToTitleCase};
use log::warn;

use crate::schema::HeaderColumn;

const IDENTIFIER_PREFIX: &str = "Column";

const RESERVED_WORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Title-cases every word of a header and drops everything that is not an
/// ASCII letter or digit, e.g. `"Unit price (EUR)"` becomes `"UnitPriceEur"`.
///
/// The result may be empty or start with a digit; [`assign_identifiers`]
/// turns such names into usable identifiers.
pub fn normalize(raw: &str) -> String {
    raw.to_title_case()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Normalizes a whole header row into identifiers that can be used as
/// struct fields side by side.
///
/// Empty names become `Column{n}` (1-based), names starting with a digit or
/// clashing with a reserved word get a `Column` prefix, and repeated names
/// receive the smallest numeric suffix from 2 upward that is still free.
/// The first occurrence of a name always keeps it.
pub fn assign_identifiers<S: AsRef<str>>(headers: &[S]) -> Vec<HeaderColumn> {
    let mut taken = HashSet::with_capacity(headers.len());
    headers
        .iter()
        .enumerate()
        .map(|(position, raw)| {
            let source_name = raw.as_ref();
            let base = usable_base(&normalize(source_name), position);
            let mut identifier = base.clone();
            let mut suffix = 2usize;
            while taken.contains(&identifier) {
                identifier = format!("{base}{suffix}");
                suffix += 1;
            }
            if identifier != base {
                warn!(
                    "Header '{source_name}' at column {} normalizes to '{base}' which is already used; naming it '{identifier}'",
                    position + 1
                );
            }
            taken.insert(identifier.clone());
            HeaderColumn {
                source_name: source_name.to_string(),
                identifier,
                position,
            }
        })
        .collect()
}

fn usable_base(normalized: &str, position: usize) -> String {
    match normalized.chars().next() {
        None => format!("{IDENTIFIER_PREFIX}{}", position + 1),
        Some(first) if first.is_ascii_digit() => format!("{IDENTIFIER_PREFIX}{normalized}"),
        Some(_) if is_reserved(normalized) => format!("{IDENTIFIER_PREFIX}{normalized}"),
        Some(_) => normalized.to_string(),
    }
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Checks that `name` is a plain (non-raw) Rust identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') || name == "_" {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') && !is_reserved(name)
}

/// Checks a `::`-separated path such as `sheetgen` or `crate::runtime`.
pub fn is_valid_path(path: &str) -> bool {
    path.split("::").enumerate().all(|(idx, segment)| {
        is_valid_identifier(segment)
            || (idx == 0 && matches!(segment, "crate" | "self" | "super"))
            || (idx > 0 && segment == "super")
    })
}

/// Prefix of module-level items derived from a type name, e.g.
/// `ExcelType` gives `EXCEL_TYPE`.
pub fn static_item_prefix(type_name: &str) -> String {
    type_name.to_shouty_snake_case()
}

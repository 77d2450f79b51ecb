use std::fmt::Write as _;

use crate::schema::ColumnSchema;

const PROBE_HEADERS: &[&str] = &["#", "cell", "source", "field", "kind", "sample"];

/// Probe output: one line per inferred column.
pub fn render_columns(columns: &[ColumnSchema]) -> String {
    let headers = PROBE_HEADERS
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let kind = if column.overridden {
                format!("{} (override)", column.kind)
            } else {
                column.kind.to_string()
            };
            vec![
                idx.to_string(),
                column.cell_address.clone().unwrap_or_default(),
                column.source_name.clone(),
                column.identifier.clone(),
                kind,
                column.sample.clone().unwrap_or_default(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header line.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));
    let rule = widths
        .iter()
        .map(|w| "-".repeat((*w).max(1)))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&rule, &widths));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let cell = single_line(value);
            let padding = width.saturating_sub(display_width(&cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    single_line(value).chars().count()
}

fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .collect()
}

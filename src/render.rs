//! Renders a [`GenerationContext`] into Rust source.
//!
//! The output is a single module containing, in column order:
//!
//! - the record struct, one documented field per column;
//! - optionally a lazily built map from source column name to position;
//! - `from_row`, which materializes a record from a row of raw cells.
//!
//! Rendering is plain string building; the context is validated up front so
//! a malformed context never yields partial text.

use std::{collections::HashSet, fmt::Write as _};

use crate::{
    error::{Error, Result},
    naming,
    schema::{ColumnSchema, GenerationContext, ScalarKind},
};

const INDENT: &str = "    ";

/// Names the generated module imports or refers to unqualified. A record
/// type with one of these names would shadow them.
const TEMPLATE_NAMES: &[&str] = &[
    "NaiveDateTime",
    "HashMap",
    "LazyLock",
    "convert",
    "String",
    "AsRef",
    "str",
    "bool",
    "i64",
    "f64",
    "usize",
];

pub fn render(ctx: &GenerationContext) -> Result<String> {
    validate(ctx)?;
    let mut code = CodeWriter::default();
    write_banner(&mut code, ctx);
    code.open(format_args!("pub mod {} {{", ctx.module_name()));
    write_imports(&mut code, ctx);
    write_struct(&mut code, ctx);
    if ctx.emit_index_map() {
        write_index_map(&mut code, ctx);
    }
    write_from_row(&mut code, ctx);
    code.close("}");
    Ok(code.finish())
}

fn validate(ctx: &GenerationContext) -> Result<()> {
    if ctx.type_name().is_empty() {
        return Err(Error::Template("type name is missing".to_string()));
    }
    if !naming::is_valid_identifier(ctx.type_name()) {
        return Err(Error::Template(format!(
            "type name '{}' is not a valid identifier",
            ctx.type_name()
        )));
    }
    if shadows_template_name(ctx) {
        return Err(Error::Template(format!(
            "type name '{}' clashes with a name used by the generated module",
            ctx.type_name()
        )));
    }
    if !naming::is_valid_identifier(ctx.module_name()) {
        return Err(Error::Template(format!(
            "module name '{}' is not a valid identifier",
            ctx.module_name()
        )));
    }
    if !naming::is_valid_path(ctx.runtime_path()) {
        return Err(Error::Template(format!(
            "runtime path '{}' is not a valid path",
            ctx.runtime_path()
        )));
    }
    let mut seen = HashSet::with_capacity(ctx.columns().len());
    for column in ctx.columns() {
        if !naming::is_valid_identifier(&column.identifier) {
            return Err(Error::Template(format!(
                "column '{}' has invalid field name '{}'",
                column.source_name, column.identifier
            )));
        }
        if !seen.insert(column.identifier.as_str()) {
            return Err(Error::Template(format!(
                "field name '{}' is used by more than one column",
                column.identifier
            )));
        }
    }
    Ok(())
}

fn shadows_template_name(ctx: &GenerationContext) -> bool {
    let name = ctx.type_name();
    let runtime_root = ctx.runtime_path().split("::").next().unwrap_or_default();
    TEMPLATE_NAMES.contains(&name)
        || name == runtime_root
        || (ctx.derive_serde() && name == "serde")
}

fn write_banner(code: &mut CodeWriter, ctx: &GenerationContext) {
    code.line(format_args!(
        "// Automatically generated by sheetgen from file {} on {}.",
        comment_text(ctx.source_file()),
        comment_text(ctx.generated_at())
    ));
    code.line(format_args!(
        "// Conversions: {}. Do not edit by hand.",
        if ctx.tracing() { "tracing" } else { "silent" }
    ));
    code.blank();
}

fn write_imports(code: &mut CodeWriter, ctx: &GenerationContext) {
    let mut imports = Vec::new();
    if ctx.has_kind(ScalarKind::DateTime) {
        imports.push(format!("use {}::chrono::NaiveDateTime;", ctx.runtime_path()));
    }
    if ctx.emit_index_map() {
        imports.push("use std::collections::HashMap;".to_string());
        imports.push("use std::sync::LazyLock;".to_string());
    }
    if !ctx.columns().is_empty() {
        imports.push(format!("use {}::convert;", ctx.runtime_path()));
    }
    for import in &imports {
        code.line(import);
    }
    if !imports.is_empty() {
        code.blank();
    }
}

fn write_struct(code: &mut CodeWriter, ctx: &GenerationContext) {
    if ctx.derive_serde() {
        code.line("#[derive(Debug, Clone, PartialEq, serde::Serialize)]");
    } else {
        code.line("#[derive(Debug, Clone, PartialEq)]");
    }
    code.line("#[allow(non_snake_case)]");
    if ctx.columns().is_empty() {
        code.line(format_args!("pub struct {} {{}}", ctx.type_name()));
        code.blank();
        return;
    }
    code.open(format_args!("pub struct {} {{", ctx.type_name()));
    for column in ctx.columns() {
        code.line(format_args!(
            "/// Source column {} ({}).",
            comment_text(&rust_string_literal(&column.source_name)),
            column.kind
        ));
        if ctx.derive_serde() {
            code.line(format_args!(
                "#[serde(rename = {})]",
                rust_string_literal(&column.source_name)
            ));
        }
        code.line(format_args!(
            "pub {}: {},",
            column.identifier,
            column.rust_type()
        ));
    }
    code.close("}");
    code.blank();
}

fn write_index_map(code: &mut CodeWriter, ctx: &GenerationContext) {
    code.line("/// Zero-based position of every source column, keyed by header text.");
    code.open(format_args!(
        "pub static {}_COLUMNS: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {{",
        naming::static_item_prefix(ctx.type_name())
    ));
    if ctx.columns().is_empty() {
        code.line("HashMap::new()");
    } else {
        code.open("HashMap::from([");
        for (position, column) in ctx.columns().iter().enumerate() {
            code.line(format_args!(
                "({}, {position}),",
                rust_string_literal(&column.source_name)
            ));
        }
        code.close("])");
    }
    code.close("});");
    code.blank();
}

fn write_from_row(code: &mut CodeWriter, ctx: &GenerationContext) {
    code.open(format_args!("impl {} {{", ctx.type_name()));
    code.line("/// Builds a record from one row of raw cells in source column order.");
    code.line("/// Missing trailing cells are read as empty text.");
    code.open("pub fn from_row<S: AsRef<str>>(row: &[S]) -> Self {");
    if ctx.columns().is_empty() {
        code.line("let _ = row;");
        code.line("Self {}");
    } else {
        code.open("Self {");
        for (position, column) in ctx.columns().iter().enumerate() {
            code.line(format_args!(
                "{}: {}, // {}",
                column.identifier,
                cell_expression(column, position),
                comment_text(&column.source_name)
            ));
        }
        code.close("}");
    }
    code.close("}");
    code.close("}");
}

/// Expression reading column `position` of `row` as the column's type.
pub fn cell_expression(column: &ColumnSchema, position: usize) -> String {
    let cell = format!("convert::cell(row, {position})");
    match column.conversion {
        None => format!("{cell}.to_string()"),
        Some(conversion) if conversion.tracing => format!(
            "convert::{}({cell}, {})",
            conversion.function_name(),
            rust_string_literal(&column.source_name)
        ),
        Some(conversion) => format!("convert::{}({cell})", conversion.function_name()),
    }
}

/// Quotes `value` as a Rust string literal, escaping quotes, backslashes
/// and non-printable characters.
pub fn rust_string_literal(value: &str) -> String {
    format!("{value:?}")
}

/// Collapses line breaks and tabs so `value` fits in a line comment.
fn comment_text(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}

#[derive(Debug, Default)]
struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    fn line(&mut self, text: impl std::fmt::Display) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        let _ = writeln!(self.out, "{text}");
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self, text: impl std::fmt::Display) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: impl std::fmt::Display) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    fn finish(mut self) -> String {
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
        self.out
    }
}

//! Header → inference → render, wired together.

use log::info;

use crate::{
    error::Result,
    infer, naming, render,
    schema::{ColumnSchema, GenerationContext, OverrideTable},
    source::{self, TabularReader},
};

/// Knobs of a generation run apart from the source itself.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub type_name: String,
    pub module_name: String,
    pub runtime_path: String,
    pub source_file: String,
    pub overrides: OverrideTable,
    pub tracing: bool,
    pub emit_index_map: bool,
    pub derive_serde: bool,
    pub generated_at: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            type_name: crate::schema::DEFAULT_TYPE_NAME.to_string(),
            module_name: crate::schema::DEFAULT_MODULE_NAME.to_string(),
            runtime_path: crate::schema::DEFAULT_RUNTIME_PATH.to_string(),
            source_file: String::new(),
            overrides: OverrideTable::default(),
            tracing: true,
            emit_index_map: false,
            derive_serde: false,
            generated_at: None,
        }
    }
}

/// Reads the header and sample rows and infers the column schema.
pub fn describe(
    reader: &mut dyn TabularReader,
    overrides: &OverrideTable,
    tracing: bool,
) -> Result<Vec<ColumnSchema>> {
    let (header, sample) = source::read_header_and_sample(reader)?;
    let headers = naming::assign_identifiers(&header);
    let columns = infer::infer_columns(&headers, &sample, overrides, tracing);
    info!(
        "Inferred {} column(s) ({} from overrides)",
        columns.len(),
        columns.iter().filter(|c| c.overridden).count()
    );
    Ok(columns)
}

pub fn build_context(columns: Vec<ColumnSchema>, options: &GenerateOptions) -> GenerationContext {
    let builder = GenerationContext::builder(columns)
        .type_name(options.type_name.as_str())
        .module_name(options.module_name.as_str())
        .runtime_path(options.runtime_path.as_str())
        .source_file(options.source_file.as_str())
        .tracing(options.tracing)
        .emit_index_map(options.emit_index_map)
        .derive_serde(options.derive_serde);
    match &options.generated_at {
        Some(timestamp) => builder.generated_at(timestamp.as_str()).build(),
        None => builder.build(),
    }
}

/// Runs the whole pipeline and returns the rendered source text.
pub fn generate(reader: &mut dyn TabularReader, options: &GenerateOptions) -> Result<String> {
    let columns = describe(reader, &options.overrides, options.tracing)?;
    let ctx = build_context(columns, options);
    render::render(&ctx)
}

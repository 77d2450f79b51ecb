pub mod classify;
pub mod cli;
pub mod convert;
pub mod error;
pub mod infer;
pub mod io_utils;
pub mod naming;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod source;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

pub use crate::error::Error;
// Generated modules name their date type through this crate.
pub use chrono;

use crate::{
    cli::{Cli, Commands, OverrideArgs},
    io_utils::Destination,
    pipeline::GenerateOptions,
    schema::{InferredSchema, OverrideLists, OverrideTable},
    source::SourceOptions,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sheetgen", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => handle_generate(&args),
        Commands::Probe(args) => handle_probe(&args),
    }
}

fn load_overrides(args: &OverrideArgs) -> Result<OverrideTable> {
    let file = match &args.overrides {
        Some(path) => Some(
            OverrideLists::load(path)
                .with_context(|| format!("Loading overrides from {path:?}"))?,
        ),
        None => None,
    };
    let table = args.table(file.as_ref());
    debug!("{} column type override(s) configured", table.len());
    Ok(table)
}

fn source_options(args: &cli::SourceArgs) -> SourceOptions {
    SourceOptions {
        delimiter: args.delimiter,
        encoding: args.input_encoding.clone(),
    }
}

fn handle_generate(args: &cli::GenerateArgs) -> Result<()> {
    let overrides = load_overrides(&args.overrides)?;
    let mut reader = source::open(&args.source.input, &source_options(&args.source))
        .with_context(|| format!("Opening {:?}", args.source.input))?;
    let options = GenerateOptions {
        type_name: args.type_name.clone(),
        module_name: args.package.clone(),
        runtime_path: args.runtime.clone(),
        source_file: args.source.input.display().to_string(),
        overrides,
        tracing: args.tracing,
        emit_index_map: args.cols,
        derive_serde: args.serde,
        generated_at: None,
    };
    let code = pipeline::generate(reader.as_mut(), &options)
        .with_context(|| format!("Generating {} from {:?}", args.type_name, args.source.input))?;
    let destination = Destination::from_arg(&args.out);
    io_utils::write_output(&destination, &code)
        .with_context(|| format!("Writing generated code to {}", destination.describe()))?;
    info!(
        "Generated {} in module {} ({} bytes)",
        args.type_name,
        args.package,
        code.len()
    );
    Ok(())
}

fn handle_probe(args: &cli::ProbeArgs) -> Result<()> {
    let overrides = load_overrides(&args.overrides)?;
    let mut reader = source::open(&args.source.input, &source_options(&args.source))
        .with_context(|| format!("Opening {:?}", args.source.input))?;
    let columns = pipeline::describe(reader.as_mut(), &overrides, true)
        .with_context(|| format!("Inferring columns of {:?}", args.source.input))?;
    print!("{}", table::render_columns(&columns));
    if let Some(path) = &args.emit_schema {
        let schema = InferredSchema {
            source: args.source.input.display().to_string(),
            columns,
        };
        schema
            .save(path)
            .with_context(|| format!("Writing schema to {path:?}"))?;
        info!(
            "Inferred schema for {} column(s) written to {:?}",
            schema.columns.len(),
            path
        );
    }
    Ok(())
}

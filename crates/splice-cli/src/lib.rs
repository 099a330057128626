//! Splice CLI library
//!
//! This module contains the core CLI logic for the Splice formatter.

pub mod error_adapter;
pub mod value;

mod args;
mod config;

pub use args::Args;
pub use config::ConfigError;

use std::{fs, io};

use log::info;
use thiserror::Error;

use splice::{Arg, SpliceError, Template};

use value::Value;

/// Errors raised by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Splice(#[from] SpliceError),

    #[error("Failed to read template file: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Run the Splice CLI application
///
/// Loads the configuration, reads the template and formats it with the
/// command-line values. Returns the formatted text.
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - Template file I/O errors
/// - Template parse errors and argument errors
/// - Unresolved placeholders, unless `--partial` is given
pub fn run(args: &Args) -> Result<String, CliError> {
    info!(
        template = args.template,
        values = args.values.len(),
        named = args.named.len();
        "Formatting template"
    );

    let config = config::load_config(args.config.as_ref())?;

    let source = if args.file {
        fs::read_to_string(&args.template)?
    } else {
        args.template.clone()
    };

    let values: Vec<Value> = args.values.iter().map(|raw| Value::parse(raw)).collect();
    let named: Vec<(&str, Value)> = args
        .named
        .iter()
        .map(|(name, raw)| (name.as_str(), Value::parse(raw)))
        .collect();

    let arguments: Vec<Arg<'_>> = values
        .iter()
        .map(Value::to_arg)
        .chain(named.iter().map(|(name, value)| value.to_named_arg(name)))
        .collect();

    let mut template = Template::with_config(&source, config)?;
    template.format(&arguments)?;

    let output = if args.partial {
        template.text()
    } else {
        template.finish()?
    };

    info!(len = output.len(); "Template formatted successfully");

    Ok(output)
}

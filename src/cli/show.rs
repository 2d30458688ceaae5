//! Show subcommand: print ordered definitions.

use anyhow::{Result, bail};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use super::FormatArg;
use crate::definition::DefinitionAssembler;
use crate::format::{OutputFormat, format_definitions_json, format_definitions_markdown};
use crate::source::load_path;

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Definition file or directory
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Only show the definition with this name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Run the show subcommand.
pub fn run(
    args: &ShowArgs,
    assembler: &DefinitionAssembler,
    default_format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = load_path(&args.path, assembler)?;

    let selected: Vec<_> = match args.name {
        Some(ref name) => match catalog.get(name) {
            Some(def) => vec![def],
            None => bail!("No definition named '{}' in {}", name, args.path.display()),
        },
        None => catalog.iter().collect(),
    };

    let format = args.format.map(OutputFormat::from).unwrap_or(default_format);
    match format {
        OutputFormat::Json => writeln!(out, "{}", format_definitions_json(selected)?)?,
        OutputFormat::Markdown => write!(out, "{}", format_definitions_markdown(selected))?,
    }
    Ok(())
}

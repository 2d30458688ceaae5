//! CLI command definitions for qualified-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod check;
pub mod compare;
pub mod show;

use clap::{Parser, Subcommand, ValueEnum};
use check::CheckArgs;
use compare::CompareArgs;
use show::ShowArgs;

use crate::format::OutputFormat;

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    #[value(alias = "md")]
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

/// Validate and order qualifier-based config definitions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a settings file (skips project/user settings tiers)
    #[arg(short, long, global = true)]
    pub settings: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate definition files and report problems
    Check(CheckArgs),

    /// Print definitions with their candidates in priority order
    Show(ShowArgs),

    /// Explain how two candidates of a definition are ordered
    Compare(CompareArgs),
}

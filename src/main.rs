//! qualified-config CLI
//!
//! Validates config definition files and prints their candidates in
//! priority order.

use anyhow::Result;
use clap::Parser;
use qualified_config::cli::{Cli, Command, check, compare, show};
use qualified_config::config::{SettingsLoader, SettingsPaths};
use qualified_config::definition::DefinitionAssembler;
use qualified_config::logging::{self, LogTarget};
use std::process::ExitCode;
use tracing::{debug, info};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut paths = SettingsPaths::discover();
    if let Some(ref settings_path) = cli.settings {
        paths = paths.with_file(settings_path);
    }
    let loader = SettingsLoader::load_with_paths(paths)?;
    debug!(source = %loader.source(), "Settings loaded");
    let settings = loader.into_settings();

    let assembler = DefinitionAssembler::new(settings.keys.clone());
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Check(args) => {
            let passed = check::run(&args, &assembler, &mut stdout)?;
            if !passed {
                info!("Definition check failed");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Show(args) => {
            show::run(&args, &assembler, settings.output.output_format(), &mut stdout)?;
        }
        Command::Compare(args) => {
            compare::run(&args, &settings.keys, &mut stdout)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

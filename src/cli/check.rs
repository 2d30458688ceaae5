//! Check subcommand: validate definition files.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::definition::DefinitionAssembler;
use crate::error::ErrorReport;
use crate::source::{DefinitionCatalog, definition_files, load_file};

/// Arguments for the check subcommand
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Definition files or directories
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Emit results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome for one definition or one failed file.
#[derive(Debug, Serialize)]
pub struct CheckEntry {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl CheckEntry {
    fn failed(path: &Path, err: &anyhow::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            name: None,
            values: None,
            error: Some(ErrorReport::from(err)),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Check every file, collecting one entry per definition or failure.
///
/// Definition names must be unique across everything checked. A directory
/// that cannot be listed yields an error entry like an unreadable file.
pub fn check_paths(paths: &[PathBuf], assembler: &DefinitionAssembler) -> Vec<CheckEntry> {
    let mut entries = Vec::new();
    let mut catalog = DefinitionCatalog::new();

    for path in paths {
        let files = if path.is_dir() {
            match definition_files(path) {
                Ok(files) => files,
                Err(err) => {
                    entries.push(CheckEntry::failed(path, &err));
                    continue;
                }
            }
        } else {
            vec![path.clone()]
        };
        for file in files {
            check_file(&file, assembler, &mut catalog, &mut entries);
        }
    }
    entries
}

fn check_file(
    file: &Path,
    assembler: &DefinitionAssembler,
    catalog: &mut DefinitionCatalog,
    entries: &mut Vec<CheckEntry>,
) {
    let definitions = match load_file(file, assembler) {
        Ok(defs) => defs,
        Err(err) => {
            entries.push(CheckEntry::failed(file, &err));
            return;
        }
    };

    for definition in definitions {
        let name = definition.name().to_string();
        let values = definition.len();
        let error = catalog.insert(definition).err().map(|e| e.report());
        entries.push(CheckEntry {
            path: file.to_path_buf(),
            name: Some(name),
            values: Some(values),
            error,
        });
    }
}

/// Run the check subcommand. Returns whether everything passed.
pub fn run(args: &CheckArgs, assembler: &DefinitionAssembler, out: &mut impl Write) -> Result<bool> {
    let entries = check_paths(&args.paths, assembler);
    let passed = entries.iter().all(CheckEntry::is_ok);

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(passed);
    }

    for entry in &entries {
        match (&entry.error, &entry.name) {
            (None, Some(name)) => writeln!(
                out,
                "ok     {} ({} values) in {}",
                name,
                entry.values.unwrap_or_default(),
                entry.path.display()
            )?,
            (Some(err), _) => writeln!(out, "error  {}: {}", entry.path.display(), err.message)?,
            (None, None) => {}
        }
    }
    let failed = entries.iter().filter(|e| !e.is_ok()).count();
    writeln!(out, "{} checked, {} failed", entries.len(), failed)?;
    Ok(passed)
}

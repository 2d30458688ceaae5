//! Reading definition documents from disk.
//!
//! A definition file is JSON (`.json`) or YAML (`.yaml`, `.yml`) holding
//! either one definition object or a list of them. Parsing happens here; the
//! definition core only ever sees the parsed [`Value`].

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::definition::{ConfigDefinition, DefinitionAssembler};
use crate::error::DefinitionError;

/// Extensions recognised as definition files.
pub const DEFINITION_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Definitions keyed by name.
#[derive(Debug, Clone, Default)]
pub struct DefinitionCatalog {
    definitions: BTreeMap<String, ConfigDefinition>,
}

impl DefinitionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition; names must be unique.
    pub fn insert(&mut self, definition: ConfigDefinition) -> Result<(), DefinitionError> {
        if self.definitions.contains_key(definition.name()) {
            return Err(DefinitionError::DuplicateDefinition {
                name: definition.name().to_string(),
            });
        }
        self.definitions
            .insert(definition.name().to_string(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ConfigDefinition> {
        self.definitions.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Whether `path` has a definition file extension.
pub fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| DEFINITION_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Parse a definition file into its top-level documents.
pub fn read_documents(path: &Path) -> Result<Vec<Value>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let value: Value = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    };

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![value]),
        Value::Null => Ok(Vec::new()),
        _ => bail!("{}: expected a definition object or a list of them", path.display()),
    }
}

/// Load every definition in one file.
pub fn load_file(path: &Path, assembler: &DefinitionAssembler) -> Result<Vec<ConfigDefinition>> {
    let documents = read_documents(path)?;
    let mut definitions = Vec::with_capacity(documents.len());
    for (i, document) in documents.iter().enumerate() {
        let definition = assembler
            .from_document(document)
            .with_context(|| format!("{}: definition #{}", path.display(), i + 1))?;
        definitions.push(definition);
    }
    debug!(path = %path.display(), count = definitions.len(), "Loaded definition file");
    Ok(definitions)
}

/// Definition files directly inside `dir`, sorted by name.
pub fn definition_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && is_definition_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every definition file in a directory into a catalog.
pub fn load_dir(dir: &Path, assembler: &DefinitionAssembler) -> Result<DefinitionCatalog> {
    let mut catalog = DefinitionCatalog::new();
    for file in definition_files(dir)? {
        for definition in load_file(&file, assembler)? {
            catalog
                .insert(definition)
                .with_context(|| format!("{}", file.display()))?;
        }
    }
    Ok(catalog)
}

/// Load a file or a directory into a catalog.
pub fn load_path(path: &Path, assembler: &DefinitionAssembler) -> Result<DefinitionCatalog> {
    if path.is_dir() {
        return load_dir(path, assembler);
    }
    let mut catalog = DefinitionCatalog::new();
    for definition in load_file(path, assembler)? {
        catalog
            .insert(definition)
            .with_context(|| format!("{}", path.display()))?;
    }
    Ok(catalog)
}

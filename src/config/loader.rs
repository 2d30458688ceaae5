//! Settings loader with tier-based merging.

use super::merge::merge_tiers;
use super::types::Settings;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the settings file inside each tier directory.
pub const SETTINGS_FILE: &str = "config.yaml";

/// Settings tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SettingsTier {
    /// Compiled-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level settings ($CWD/qualified-config/)
    Project = 1,
    /// User-level settings (~/.qualified-config/)
    User = 2,
    /// Explicit settings file (--settings or QUALIFIED_CONFIG_PATH)
    Explicit = 3,
    /// Environment variables (highest priority)
    Environment = 4,
}

impl std::fmt::Display for SettingsTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsTier::Defaults => write!(f, "defaults"),
            SettingsTier::Project => write!(f, "project"),
            SettingsTier::User => write!(f, "user"),
            SettingsTier::Explicit => write!(f, "explicit"),
            SettingsTier::Environment => write!(f, "environment"),
        }
    }
}

/// Where each tier lives.
#[derive(Debug, Clone, Default)]
pub struct SettingsPaths {
    /// Explicit settings file; when set, the directory tiers are skipped.
    pub explicit: Option<PathBuf>,
    /// Project-level settings directory
    pub project_dir: Option<PathBuf>,
    /// User-level settings directory
    pub user_dir: Option<PathBuf>,
}

impl SettingsPaths {
    /// Discover paths from environment and defaults.
    pub fn discover() -> Self {
        let explicit = std::env::var("QUALIFIED_CONFIG_PATH").ok().map(PathBuf::from);

        let project_dir = std::env::var("QUALIFIED_CONFIG_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("qualified-config")));

        let user_dir = std::env::var("QUALIFIED_CONFIG_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".qualified-config")));

        Self {
            explicit,
            project_dir,
            user_dir,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            explicit: None,
            project_dir,
            user_dir,
        }
    }

    /// Use a single settings file instead of the directory tiers.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }
}

/// Loads [`Settings`] by merging every tier.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    pub paths: SettingsPaths,
    settings: Settings,
    /// Highest-priority tier that contributed a file
    source: SettingsTier,
}

impl SettingsLoader {
    /// Load settings from discovered paths.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(SettingsPaths::discover())
    }

    /// Load settings with explicit paths.
    pub fn load_with_paths(paths: SettingsPaths) -> Result<Self> {
        if let Some(ref explicit) = paths.explicit {
            let value = read_yaml(explicit)?;
            let mut settings: Settings = if value.is_null() {
                Settings::default()
            } else {
                serde_json::from_value(value)
                    .with_context(|| format!("Invalid settings in {}", explicit.display()))?
            };
            let source = if Self::apply_env_overrides(&mut settings) {
                SettingsTier::Environment
            } else {
                SettingsTier::Explicit
            };
            return Ok(Self {
                paths,
                settings,
                source,
            });
        }

        let mut tiers: Vec<Value> = vec![serde_json::to_value(Settings::default())?];
        let mut source = SettingsTier::Defaults;

        for (tier, dir) in [
            (SettingsTier::Project, paths.project_dir.as_deref()),
            (SettingsTier::User, paths.user_dir.as_deref()),
        ] {
            let Some(dir) = dir else { continue };
            let file = dir.join(SETTINGS_FILE);
            if !file.exists() {
                continue;
            }
            match read_yaml(&file) {
                Ok(value) => {
                    debug!(tier = %tier, path = %file.display(), "Loaded settings tier");
                    tiers.push(value);
                    source = tier;
                }
                Err(e) => warn!(tier = %tier, "Skipping unreadable settings: {:#}", e),
            }
        }

        let mut settings: Settings =
            serde_json::from_value(merge_tiers(tiers)).context("Invalid merged settings")?;
        if Self::apply_env_overrides(&mut settings) {
            source = SettingsTier::Environment;
        }

        Ok(Self {
            paths,
            settings,
            source,
        })
    }

    /// Apply environment variable overrides. Returns true if any applied.
    fn apply_env_overrides(settings: &mut Settings) -> bool {
        if let Ok(format) = std::env::var("QUALIFIED_CONFIG_FORMAT") {
            settings.output.format = format;
            return true;
        }
        false
    }

    /// Get the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get mutable access for CLI overrides.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Consume the loader and return the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Highest tier that supplied a value.
    pub fn source(&self) -> SettingsTier {
        self.source
    }
}

fn read_yaml(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_has_project_dir() {
        let paths = SettingsPaths::discover();
        assert!(paths.project_dir.is_some());
    }

    #[test]
    fn test_load_defaults_only() {
        let temp = TempDir::new().unwrap();
        let paths = SettingsPaths::with_dirs(
            Some(temp.path().join("project")),
            Some(temp.path().join("user")),
        );

        let loader = SettingsLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.settings().keys.name, "name");
        assert_eq!(loader.settings().keys.values, "values");
    }

    #[test]
    fn test_user_overrides_project() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("project");
        let user_dir = temp.path().join("user");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::create_dir_all(&user_dir).unwrap();

        std::fs::write(
            project_dir.join(SETTINGS_FILE),
            "keys:\n  name: config\n  schema: configCondition\n",
        )
        .unwrap();
        std::fs::write(user_dir.join(SETTINGS_FILE), "keys:\n  name: id\n").unwrap();

        let loader =
            SettingsLoader::load_with_paths(SettingsPaths::with_dirs(Some(project_dir), Some(user_dir)))
                .unwrap();
        let keys = &loader.settings().keys;
        assert_eq!(keys.name, "id");
        assert_eq!(keys.schema, "configCondition");
        assert_eq!(keys.values, "values");
    }

    #[test]
    fn test_broken_tier_is_skipped() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("project");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(project_dir.join(SETTINGS_FILE), "keys: [unclosed").unwrap();

        let loader =
            SettingsLoader::load_with_paths(SettingsPaths::with_dirs(Some(project_dir), None))
                .unwrap();
        assert_eq!(loader.settings().keys.name, "name");
    }

    #[test]
    fn test_broken_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("settings.yaml");
        std::fs::write(&file, "keys: [unclosed").unwrap();

        let paths = SettingsPaths::default().with_file(&file);
        assert!(SettingsLoader::load_with_paths(paths).is_err());
    }
}

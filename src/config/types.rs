//! Settings types.

use crate::definition::ReservedKeys;
use crate::format::OutputFormat;
use serde::{Deserialize, Serialize};

/// Tool settings. Every field has a default, so any tier may be partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Reserved structural keys of definition documents.
    #[serde(default)]
    pub keys: ReservedKeys,

    /// Output preferences for the CLI.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Default output format: "json" or "markdown" (default: markdown).
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "markdown".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl OutputSettings {
    /// Parsed format; unknown names fall back to markdown.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_str(&self.format).unwrap_or(OutputFormat::Markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings: Settings = serde_yaml::from_str("keys:\n  schema: configCondition\n").unwrap();
        assert_eq!(settings.keys.name, "name");
        assert_eq!(settings.keys.schema, "configCondition");
        assert_eq!(settings.keys.values, "values");
        assert_eq!(settings.output.format, "markdown");
    }

    #[test]
    fn test_unknown_format_falls_back() {
        let output = OutputSettings {
            format: "xml".into(),
        };
        assert_eq!(output.output_format(), OutputFormat::Markdown);

        let output = OutputSettings {
            format: "JSON".into(),
        };
        assert_eq!(output.output_format(), OutputFormat::Json);
    }
}

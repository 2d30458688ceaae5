//! Output formatting for definitions in markdown and JSON.

use crate::definition::{ConfigDefinition, ConfigValue};
use serde_json::Value;

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Render one candidate's conditions, e.g. `env={prod} region={eu,us}`.
pub fn format_conditions(value: &ConfigValue) -> String {
    if value.qualifiers().is_empty() {
        return "*".to_string();
    }
    value
        .qualifiers()
        .iter()
        .map(|(field, accepted)| {
            let accepted: Vec<&str> = accepted.iter().map(String::as_str).collect();
            format!("{}={{{}}}", field, accepted.join(","))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a definition as markdown, candidates in priority order.
pub fn format_definition_markdown(def: &ConfigDefinition) -> String {
    let mut md = String::new();

    md.push_str(&format!("## {}\n", def.name()));
    if let Some(schema) = def.schema() {
        let fields: Vec<String> = schema.iter().map(|f| format!("`{}`", f)).collect();
        md.push_str(&format!("- **schema**: {}\n", fields.join(" > ")));
    }
    for (key, value) in def.metadata() {
        md.push_str(&format!("- **{}**: {}\n", key, value));
    }

    md.push_str("\n| # | value | conditions |\n|---|---|---|\n");
    for (i, value) in def.values().iter().enumerate() {
        md.push_str(&format!(
            "| {} | `{}` | {} |\n",
            i + 1,
            value.value(),
            format_conditions(value)
        ));
    }

    md
}

/// Format several definitions as markdown.
pub fn format_definitions_markdown<'a>(
    defs: impl IntoIterator<Item = &'a ConfigDefinition>,
) -> String {
    defs.into_iter()
        .map(format_definition_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format definitions as a JSON array.
pub fn format_definitions_json<'a>(
    defs: impl IntoIterator<Item = &'a ConfigDefinition>,
) -> serde_json::Result<String> {
    let values: Vec<Value> = defs
        .into_iter()
        .map(serde_json::to_value)
        .collect::<serde_json::Result<_>>()?;
    serde_json::to_string_pretty(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::DefinitionAssembler;
    use serde_json::json;

    fn definition() -> ConfigDefinition {
        DefinitionAssembler::default()
            .from_document(&json!({
                "name": "timeout",
                "schema": ["env", "region"],
                "values": [
                    { "value": "10" },
                    { "value": "30", "qualifiers": { "env": "prod", "region": ["us", "eu"] } }
                ],
                "owner": "platform"
            }))
            .unwrap()
    }

    #[test]
    fn test_markdown_lists_values_in_order() {
        let md = format_definition_markdown(&definition());
        assert!(md.starts_with("## timeout\n"));
        assert!(md.contains("- **schema**: `env` > `region`\n"));
        assert!(md.contains("- **owner**: platform\n"));
        assert!(md.contains("| 1 | `30` | env={prod} region={eu,us} |\n"));
        assert!(md.contains("| 2 | `10` | * |\n"));
    }

    #[test]
    fn test_json_is_array() {
        let def = definition();
        let out = format_definitions_json([&def]).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["name"], "timeout");
        assert_eq!(parsed[0]["values"][0]["value"], "30");
        assert_eq!(parsed[0]["metadata"]["owner"], "platform");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::from_str("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_str("Json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("csv"), None);
    }
}

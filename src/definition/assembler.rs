//! Config definition aggregate and its assembler.

use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::comparator::QualifierComparator;
use super::extract::{RawDefinition, ReservedKeys, extract_metadata};
use super::schema::QualifierSchema;
use super::validator::validate;
use super::value::ConfigValue;
use crate::error::DefinitionResult;

/// A named, validated set of candidate values in priority order.
///
/// `values` is never empty and is strictly ascending under the
/// [`QualifierComparator`] built from `schema`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigDefinition {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<QualifierSchema>,
    values: Vec<ConfigValue>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl ConfigDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&QualifierSchema> {
        self.schema.as_ref()
    }

    /// Candidates, most specific first.
    pub fn values(&self) -> &[ConfigValue] {
        &self.values
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Head of the ordering.
    pub fn most_specific(&self) -> &ConfigValue {
        // values is non-empty by construction
        &self.values[0]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for an assembled definition.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Comparator matching this definition's ordering.
    pub fn comparator(&self) -> QualifierComparator {
        QualifierComparator::new(self.schema.clone().unwrap_or_default())
    }
}

/// Builds [`ConfigDefinition`]s from extracted parts.
///
/// Duplicate candidates (comparing equal) collapse to the one that appeared
/// first in the input.
#[derive(Debug, Clone, Default)]
pub struct DefinitionAssembler {
    keys: ReservedKeys,
}

impl DefinitionAssembler {
    pub fn new(keys: ReservedKeys) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &ReservedKeys {
        &self.keys
    }

    /// Validate, order and package one definition.
    ///
    /// `raw_fields` is the whole top-level document; reserved keys are
    /// skipped and the rest become metadata.
    pub fn assemble(
        &self,
        name: impl Into<String>,
        raw_fields: &Map<String, Value>,
        values: Option<Vec<ConfigValue>>,
        schema: Option<QualifierSchema>,
    ) -> DefinitionResult<ConfigDefinition> {
        let name = name.into();
        validate(values.as_deref(), schema.as_ref())?;

        let mut values = values.unwrap_or_default();
        let input_len = values.len();
        let comparator = QualifierComparator::new(schema.clone().unwrap_or_default());
        comparator.sort(&mut values);
        values.dedup_by(|later, earlier| comparator.compare(earlier, later) == Ordering::Equal);

        let collapsed = input_len - values.len();
        if collapsed > 0 {
            warn!(definition = %name, collapsed, "Duplicate candidate values collapsed");
        }
        debug!(definition = %name, values = values.len(), "Assembled config definition");

        Ok(ConfigDefinition {
            name,
            schema,
            values,
            metadata: extract_metadata(raw_fields, &self.keys),
        })
    }

    /// Extract and assemble a single document.
    pub fn from_document(&self, document: &Value) -> DefinitionResult<ConfigDefinition> {
        let raw = RawDefinition::extract(document, &self.keys)?;
        self.assemble(raw.name, &raw.fields, raw.values, raw.schema)
    }
}

/// Assemble with the default reserved keys.
pub fn assemble(
    name: impl Into<String>,
    raw_fields: &Map<String, Value>,
    values: Option<Vec<ConfigValue>>,
    schema: Option<QualifierSchema>,
) -> DefinitionResult<ConfigDefinition> {
    DefinitionAssembler::default().assemble(name, raw_fields, values, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DefinitionError;
    use serde_json::json;

    fn schema() -> Option<QualifierSchema> {
        Some(QualifierSchema::new(["env", "region"]))
    }

    #[test]
    fn test_orders_values_most_specific_first() {
        let values = vec![
            ConfigValue::new("default"),
            ConfigValue::new("eu-or-us").with_qualifier("region", ["eu", "us"]),
            ConfigValue::new("prod").with_qualifier("env", ["prod"]),
            ConfigValue::new("eu-or-us").with_qualifier("region", ["eu"]),
        ];

        let def = assemble("timeout", &Map::new(), Some(values), schema()).unwrap();
        let order: Vec<&str> = def.values().iter().map(ConfigValue::value).collect();
        assert_eq!(order, vec!["prod", "eu-or-us", "eu-or-us", "default"]);
        assert_eq!(def.values()[1].qualifier("region").map(|s| s.len()), Some(1));
        assert_eq!(def.most_specific().value(), "prod");
        assert!(def.comparator().is_ordered(def.values()));
    }

    #[test]
    fn test_duplicates_collapse() {
        let values = vec![
            ConfigValue::new("a").with_qualifier("region", ["us", "eu"]),
            ConfigValue::new("b"),
            ConfigValue::new("a").with_qualifier("region", ["eu", "us"]),
        ];
        let def = assemble("x", &Map::new(), Some(values), schema()).unwrap();
        assert_eq!(def.len(), 2);
    }

    #[test]
    fn test_validation_failure_aborts() {
        let values = vec![ConfigValue::new("a").with_qualifier("zone", ["z1"])];
        let err = assemble("x", &Map::new(), Some(values), schema()).unwrap_err();
        assert!(matches!(err, DefinitionError::UndeclaredQualifier { .. }));

        let err = assemble("x", &Map::new(), None, schema()).unwrap_err();
        assert_eq!(err, DefinitionError::EmptyCandidateSet);
    }

    #[test]
    fn test_from_document_splits_metadata() {
        let doc = json!({
            "name": "retries",
            "schema": ["env"],
            "values": [{ "value": "3" }, { "value": "5", "qualifiers": { "env": ["prod"] } }],
            "owner": "platform",
            "version": 2
        });

        let def = DefinitionAssembler::default().from_document(&doc).unwrap();
        assert_eq!(def.name(), "retries");
        assert_eq!(def.most_specific().value(), "5");
        assert_eq!(def.metadata().len(), 2);
        assert_eq!(def.metadata_value("owner"), Some("platform"));
        assert_eq!(def.metadata_value("version"), Some("2"));
        assert_eq!(def.metadata_value("name"), None);
    }

    #[test]
    fn test_serializes_ordered_values() {
        let doc = json!({
            "name": "n",
            "schema": ["env"],
            "values": [{ "value": "b" }, { "value": "a" }]
        });
        let def = DefinitionAssembler::default().from_document(&doc).unwrap();
        let out = serde_json::to_value(&def).unwrap();
        assert_eq!(
            out,
            json!({
                "name": "n",
                "schema": ["env"],
                "values": [{ "value": "a" }, { "value": "b" }]
            })
        );
    }
}

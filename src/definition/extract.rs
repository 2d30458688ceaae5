//! Extraction of definition parts from a parsed key-value document.
//!
//! A document is a JSON-like object. Three reserved keys carry structure
//! (name, schema, values); every other top-level key is definition metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::schema::QualifierSchema;
use super::value::ConfigValue;
use crate::error::{DefinitionError, DefinitionResult};

/// The three reserved structural keys of a definition document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedKeys {
    #[serde(default = "default_name_key")]
    pub name: String,
    #[serde(default = "default_schema_key")]
    pub schema: String,
    #[serde(default = "default_values_key")]
    pub values: String,
}

fn default_name_key() -> String {
    "name".to_string()
}

fn default_schema_key() -> String {
    "schema".to_string()
}

fn default_values_key() -> String {
    "values".to_string()
}

impl Default for ReservedKeys {
    fn default() -> Self {
        Self {
            name: default_name_key(),
            schema: default_schema_key(),
            values: default_values_key(),
        }
    }
}

impl ReservedKeys {
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.name || key == self.schema || key == self.values
    }
}

/// A document split into its parts, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDefinition {
    pub name: String,
    pub schema: Option<QualifierSchema>,
    pub values: Option<Vec<ConfigValue>>,
    /// All top-level fields, reserved ones included.
    pub fields: Map<String, Value>,
}

impl RawDefinition {
    /// Run the fixed extraction steps over one document.
    pub fn extract(document: &Value, keys: &ReservedKeys) -> DefinitionResult<Self> {
        let fields = document
            .as_object()
            .ok_or_else(|| DefinitionError::invalid_field("definition", "expected an object"))?;

        Ok(Self {
            name: extract_name(fields, &keys.name)?,
            schema: extract_schema(fields, &keys.schema)?,
            values: extract_values(fields, &keys.values)?,
            fields: fields.clone(),
        })
    }
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn extract_name(fields: &Map<String, Value>, key: &str) -> DefinitionResult<String> {
    match present(fields, key) {
        None => Err(DefinitionError::missing_field(key)),
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.clone()),
        Some(Value::String(_)) => Err(DefinitionError::invalid_field(key, "must not be blank")),
        Some(_) => Err(DefinitionError::invalid_field(key, "expected a string")),
    }
}

fn extract_schema(
    fields: &Map<String, Value>,
    key: &str,
) -> DefinitionResult<Option<QualifierSchema>> {
    let Some(raw) = present(fields, key) else {
        return Ok(None);
    };
    QualifierSchema::deserialize(raw)
        .map(Some)
        .map_err(|_| DefinitionError::invalid_field(key, "expected a list of qualifier names"))
}

fn extract_values(
    fields: &Map<String, Value>,
    key: &str,
) -> DefinitionResult<Option<Vec<ConfigValue>>> {
    let Some(raw) = present(fields, key) else {
        return Ok(None);
    };
    let items = raw
        .as_array()
        .ok_or_else(|| DefinitionError::invalid_field(key, "expected a list of values"))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            ConfigValue::deserialize(item)
                .map_err(|e| DefinitionError::invalid_field(&format!("{}[{}]", key, i), e.to_string()))
        })
        .collect::<DefinitionResult<Vec<_>>>()
        .map(Some)
}

/// Collect the non-reserved fields as string metadata.
///
/// Strings are kept verbatim, numbers and booleans use their display form,
/// arrays and objects become compact JSON. Null entries are dropped.
pub fn extract_metadata(fields: &Map<String, Value>, keys: &ReservedKeys) -> BTreeMap<String, String> {
    fields
        .iter()
        .filter(|(key, _)| !keys.is_reserved(key))
        .filter_map(|(key, value)| coerce_to_string(value).map(|s| (key.clone(), s)))
        .collect()
}

fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

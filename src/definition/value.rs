//! Candidate values and their qualifier conditions.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Accepted values per qualifier field.
///
/// Both levels are B-trees so iteration is always in ascending order, which
/// is what the comparator relies on when it walks two sets side by side.
pub type QualifierMap = BTreeMap<String, BTreeSet<String>>;

/// One candidate value for a configuration key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigValue {
    /// Payload returned when this candidate is selected.
    #[serde(deserialize_with = "deserialize_scalar")]
    value: String,

    /// Qualifier field -> accepted values.
    #[serde(
        default,
        deserialize_with = "deserialize_qualifiers",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    qualifiers: QualifierMap,
}

impl ConfigValue {
    /// Create an unqualified candidate.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            qualifiers: QualifierMap::new(),
        }
    }

    /// Add (or replace) the accepted values of one qualifier field.
    pub fn with_qualifier<I, S>(mut self, field: impl Into<String>, accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.qualifiers
            .insert(field.into(), accepted.into_iter().map(Into::into).collect());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn qualifiers(&self) -> &QualifierMap {
        &self.qualifiers
    }

    /// Accepted values for `field`, if the candidate declares it.
    pub fn qualifier(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.qualifiers.get(field)
    }

    pub fn declares(&self, field: &str) -> bool {
        self.qualifiers.contains_key(field)
    }

    /// Short human-readable identity, used in error details.
    pub fn describe(&self) -> String {
        if self.qualifiers.is_empty() {
            return format!("'{}'", self.value);
        }
        let conditions: Vec<String> = self
            .qualifiers
            .iter()
            .map(|(field, accepted)| {
                let values: Vec<&str> = accepted.iter().map(String::as_str).collect();
                format!("{}={{{}}}", field, values.join(","))
            })
            .collect();
        format!("'{}' [{}]", self.value, conditions.join(" "))
    }
}

/// A string, number or boolean; arrays and objects do not match.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Bool(bool),
    Number(serde_json::Number),
}

impl Scalar {
    /// Display form, same rule as definition metadata.
    fn into_string(self) -> String {
        match self {
            Scalar::String(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Scalar),
    Many(Vec<Scalar>),
}

fn deserialize_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Scalar::into_string)
}

fn deserialize_qualifiers<'de, D>(deserializer: D) -> Result<QualifierMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, OneOrMany>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(field, accepted)| {
            let set = match accepted {
                OneOrMany::One(v) => BTreeSet::from([v.into_string()]),
                OneOrMany::Many(vs) => vs.into_iter().map(Scalar::into_string).collect(),
            };
            (field, set)
        })
        .collect())
}

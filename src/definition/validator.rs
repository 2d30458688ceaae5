//! Consistency checks between candidates and the qualifier schema.

use std::collections::BTreeSet;

use super::schema::QualifierSchema;
use super::value::ConfigValue;
use crate::error::{DefinitionError, DefinitionResult};

/// Check that a candidate set is non-empty and that every qualifier it uses
/// is declared in `schema`.
///
/// Has no side effects. This guards the comparator's precondition; it knows
/// nothing about ordering itself.
pub fn validate(
    values: Option<&[ConfigValue]>,
    schema: Option<&QualifierSchema>,
) -> DefinitionResult<()> {
    let values = match values {
        Some(v) if !v.is_empty() => v,
        _ => return Err(DefinitionError::EmptyCandidateSet),
    };

    let used: BTreeSet<&str> = values
        .iter()
        .flat_map(|cv| cv.qualifiers().keys().map(String::as_str))
        .collect();
    if used.is_empty() {
        return Ok(());
    }

    let Some(schema) = schema else {
        return Err(DefinitionError::MissingSchema {
            fields: used.into_iter().map(str::to_string).collect(),
        });
    };

    let undeclared: BTreeSet<&str> = used
        .into_iter()
        .filter(|field| !schema.contains(field))
        .collect();
    if undeclared.is_empty() {
        return Ok(());
    }

    let candidates = values
        .iter()
        .filter(|cv| cv.qualifiers().keys().any(|k| undeclared.contains(k.as_str())))
        .map(ConfigValue::describe)
        .collect();
    Err(DefinitionError::UndeclaredQualifier {
        fields: undeclared.into_iter().map(str::to_string).collect(),
        candidates,
    })
}

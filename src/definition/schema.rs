//! Priority-ordered qualifier schema.

use serde::{Deserialize, Serialize};

/// Ordered list of qualifier field names, most significant first.
///
/// Index 0 has the highest priority. Uniqueness of names is expected but not
/// enforced; a repeated field is simply visited twice by the comparator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifierSchema(Vec<String>);

impl QualifierSchema {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }

    /// Field names in priority order.
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == field)
    }

    /// Priority rank of a field (0 = highest), if declared.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.0.iter().position(|f| f == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for QualifierSchema {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

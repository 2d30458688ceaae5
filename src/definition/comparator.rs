//! Qualifier priority ordering.
//!
//! Candidates are ordered by, in turn:
//! 1. Presence: walking the schema in priority order, the first field declared
//!    by exactly one side decides; the declaring side sorts first.
//! 2. Payload: lexicographic comparison of the value strings.
//! 3. Specificity: for each schema field both sides declare, the smaller set
//!    sorts first; equal-sized sets are compared element by element in
//!    ascending order.
//! 4. Residual: the full qualifier maps are compared as sorted sequences, so
//!    two candidates are equal only when they are structurally identical.
//!
//! Each step compares a key derived from one candidate at a time, which keeps
//! the relation a total order (reflexive, antisymmetric, transitive).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::schema::QualifierSchema;
use super::value::ConfigValue;

/// Which step of the ordering decided a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecidingRule {
    Presence,
    Payload,
    Specificity,
    Residual,
    /// The candidates are structurally identical.
    Identical,
}

impl std::fmt::Display for DecidingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecidingRule::Presence => write!(f, "qualifier presence"),
            DecidingRule::Payload => write!(f, "value"),
            DecidingRule::Specificity => write!(f, "qualifier specificity"),
            DecidingRule::Residual => write!(f, "full qualifier map"),
            DecidingRule::Identical => write!(f, "identical"),
        }
    }
}

/// Orders [`ConfigValue`]s against a captured [`QualifierSchema`].
#[derive(Debug, Clone)]
pub struct QualifierComparator {
    schema: QualifierSchema,
}

impl QualifierComparator {
    pub fn new(schema: QualifierSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &QualifierSchema {
        &self.schema
    }

    /// Compare two candidates; `Less` means `a` is more specific than `b`.
    pub fn compare(&self, a: &ConfigValue, b: &ConfigValue) -> Ordering {
        self.compare_presence(a, b)
            .then_with(|| a.value().cmp(b.value()))
            .then_with(|| self.compare_specificity(a, b))
            .then_with(|| a.qualifiers().cmp(b.qualifiers()))
    }

    /// Compare and report which step decided. Later steps are only
    /// evaluated when earlier ones tie.
    pub fn explain(&self, a: &ConfigValue, b: &ConfigValue) -> (Ordering, DecidingRule) {
        let steps: [(DecidingRule, &dyn Fn() -> Ordering); 4] = [
            (DecidingRule::Presence, &|| self.compare_presence(a, b)),
            (DecidingRule::Payload, &|| a.value().cmp(b.value())),
            (DecidingRule::Specificity, &|| self.compare_specificity(a, b)),
            (DecidingRule::Residual, &|| a.qualifiers().cmp(b.qualifiers())),
        ];
        steps
            .iter()
            .map(|(rule, step)| (step(), *rule))
            .find(|(ord, _)| *ord != Ordering::Equal)
            .unwrap_or((Ordering::Equal, DecidingRule::Identical))
    }

    /// Sort `values` in place. The sort is stable, so equal candidates keep
    /// their input order.
    pub fn sort(&self, values: &mut [ConfigValue]) {
        values.sort_by(|a, b| self.compare(a, b));
    }

    /// Whether `values` is strictly ascending (sorted, no duplicates).
    pub fn is_ordered(&self, values: &[ConfigValue]) -> bool {
        values
            .windows(2)
            .all(|pair| self.compare(&pair[0], &pair[1]) == Ordering::Less)
    }

    fn compare_presence(&self, a: &ConfigValue, b: &ConfigValue) -> Ordering {
        for field in self.schema.iter() {
            match (a.declares(field), b.declares(field)) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
        Ordering::Equal
    }

    fn compare_specificity(&self, a: &ConfigValue, b: &ConfigValue) -> Ordering {
        for field in self.schema.iter() {
            if let (Some(set_a), Some(set_b)) = (a.qualifier(field), b.qualifier(field)) {
                let ord = compare_sets(set_a, set_b);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
        Ordering::Equal
    }
}

/// Narrower sets first, then element-wise in ascending order.
fn compare_sets(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.iter().cmp(b.iter()))
}

//! Mandatory profile fields and their collection bookkeeping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A profile field that must be gathered before onboarding is structurally complete.
///
/// Declaration order is the order in which missing fields are asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MandatoryField {
    Name,
    Age,
    Location,
}

impl MandatoryField {
    /// All mandatory fields, in asking order.
    pub const ALL: [MandatoryField; 3] = [Self::Name, Self::Age, Self::Location];

    /// Human-readable label used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for MandatoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The set of mandatory fields collected so far. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectedFields(BTreeSet<MandatoryField>);

impl CollectedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a field collected. Returns true if it was not collected before.
    pub fn mark(&mut self, field: MandatoryField) -> bool {
        self.0.insert(field)
    }

    pub fn contains(&self, field: MandatoryField) -> bool {
        self.0.contains(&field)
    }

    /// True once every mandatory field has been collected at least once.
    pub fn is_complete(&self) -> bool {
        MandatoryField::ALL.iter().all(|f| self.0.contains(f))
    }

    /// Fields still missing, in asking order.
    pub fn missing(&self) -> Vec<MandatoryField> {
        MandatoryField::ALL
            .iter()
            .copied()
            .filter(|f| !self.0.contains(f))
            .collect()
    }

    /// Collected fields, in asking order.
    pub fn collected(&self) -> Vec<MandatoryField> {
        self.0.iter().copied().collect()
    }
}

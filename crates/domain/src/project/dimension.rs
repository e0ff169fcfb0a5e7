//! Dimension types
//!
//! A dimension is the ordered set of variant slots owned by one conditional
//! container. Its name equals the container's identifier.

use serde::{Deserialize, Serialize};

use super::variable::HIDDEN;
use crate::id::generate_id;

/// One slot in a dimension: a spawn identifier or the `Hidden` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionValue {
    /// Spawn identifier, or `"Hidden"`.
    pub value: String,
}

impl DimensionValue {
    /// Creates a value referencing a spawn.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Creates the `Hidden` sentinel value.
    #[must_use]
    pub fn hidden() -> Self {
        Self::new(HIDDEN)
    }

    /// Returns true if this is the `Hidden` sentinel.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.value == HIDDEN
    }
}

/// The named set of variant slots for a conditional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Stable id.
    pub id: String,

    /// Identifier of the owning conditional.
    pub name: String,

    /// Ordered slots.
    #[serde(default)]
    pub values: Vec<DimensionValue>,
}

impl Dimension {
    /// Creates an empty dimension with a generated id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Builder: appends values in order.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.extend(values.into_iter().map(DimensionValue::new));
        self
    }

    /// Returns true if a slot holds `value`.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.value == value)
    }

    /// Returns true if the `Hidden` sentinel is present.
    #[must_use]
    pub fn has_hidden(&self) -> bool {
        self.values.iter().any(DimensionValue::is_hidden)
    }

    /// Iterates spawn identifiers, skipping the sentinel.
    pub fn spawn_identifiers(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|v| !v.is_hidden())
            .map(|v| v.value.as_str())
    }
}

//! Project snapshot
//!
//! The full set of variables and dimensions of one project at a point in time.

use serde::{Deserialize, Serialize};

use super::dimension::Dimension;
use super::variable::{Variable, VariableId};

/// All variables and dimensions for a project.
///
/// Iteration order of both vectors is significant: lookups that could match
/// several entries always pick the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Variables in store order.
    #[serde(default)]
    pub variables: Vec<Variable>,

    /// Dimensions in store order.
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
}

impl ProjectSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: appends a variable.
    #[must_use]
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Builder: appends a dimension.
    #[must_use]
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    /// Finds the first variable with the given identifier.
    #[must_use]
    pub fn variable(&self, identifier: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.identifier == identifier)
    }

    /// Finds the first variable with the given identifier for editing.
    pub fn variable_mut(&mut self, identifier: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.identifier == identifier)
    }

    /// Finds a variable by id.
    #[must_use]
    pub fn variable_by_id(&self, id: &VariableId) -> Option<&Variable> {
        self.variables.iter().find(|v| &v.id == id)
    }

    /// Finds the first dimension with the given name.
    #[must_use]
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Finds the first dimension with the given name for editing.
    pub fn dimension_mut(&mut self, name: &str) -> Option<&mut Dimension> {
        self.dimensions.iter_mut().find(|d| d.name == name)
    }

    /// Removes a variable by id, returning it.
    ///
    /// Callers are expected to check usage first; this performs no checks.
    pub fn remove_variable(&mut self, id: &VariableId) -> Option<Variable> {
        let index = self.variables.iter().position(|v| &v.id == id)?;
        Some(self.variables.remove(index))
    }
}

//! Variable store
//!
//! Read-only indexed view over one project snapshot. Lookups never fail:
//! stale or dangling data shows up as an absent or empty result.

use std::collections::HashMap;

use strand_domain::{Dimension, ProjectSnapshot, Variable, VariableId};

use super::parser::contains_placeholder;
use super::relationships::{Lookup, RelationshipModel, Slot};

/// One slot of a conditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSlot<'a> {
    /// A spawn variable.
    Spawn(&'a Variable),
    /// The `Hidden` sentinel.
    Hidden,
}

impl<'a> SpawnSlot<'a> {
    /// Returns the spawn variable, if this is not the sentinel.
    #[must_use]
    pub const fn variable(self) -> Option<&'a Variable> {
        match self {
            Self::Spawn(variable) => Some(variable),
            Self::Hidden => None,
        }
    }
}

/// Indexed, immutable project snapshot.
///
/// Safe to share between threads; rebuild it whenever the snapshot changes.
#[derive(Debug, Clone)]
pub struct VariableStore {
    snapshot: ProjectSnapshot,
    by_identifier: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
    by_id: HashMap<VariableId, usize>,
    dimension_by_name: HashMap<String, usize>,
    relations: RelationshipModel,
}

impl VariableStore {
    /// Builds the store and its relationship model.
    #[must_use]
    pub fn new(snapshot: ProjectSnapshot) -> Self {
        let mut by_identifier = HashMap::new();
        let mut by_alias = HashMap::new();
        let mut by_id = HashMap::new();
        for (index, variable) in snapshot.variables.iter().enumerate() {
            by_identifier
                .entry(variable.identifier.clone())
                .or_insert(index);
            by_id.entry(variable.id.clone()).or_insert(index);
            for alias in &variable.aliases {
                by_alias.entry(alias.clone()).or_insert(index);
            }
        }

        let mut dimension_by_name = HashMap::new();
        for (index, dimension) in snapshot.dimensions.iter().enumerate() {
            dimension_by_name
                .entry(dimension.name.clone())
                .or_insert(index);
        }

        let relations = RelationshipModel::build(
            &snapshot.variables,
            &snapshot.dimensions,
            &Lookup {
                by_identifier: &by_identifier,
                by_alias: &by_alias,
                by_id: &by_id,
                dimension_by_name: &dimension_by_name,
            },
        );

        Self {
            snapshot,
            by_identifier,
            by_alias,
            by_id,
            dimension_by_name,
            relations,
        }
    }

    /// Returns the underlying snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &ProjectSnapshot {
        &self.snapshot
    }

    /// Consumes the store, returning the snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> ProjectSnapshot {
        self.snapshot
    }

    /// All variables in store order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.snapshot.variables
    }

    /// All dimensions in store order.
    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.snapshot.dimensions
    }

    /// Finds a variable by the name used inside `{{...}}`.
    ///
    /// Exact identifier matches win over legacy aliases; among several
    /// matches the first in store order wins.
    #[must_use]
    pub fn find_by_identifier(&self, name: &str) -> Option<&Variable> {
        self.index_of_name(name).map(|i| &self.snapshot.variables[i])
    }

    /// Finds a variable by id.
    #[must_use]
    pub fn get(&self, id: &VariableId) -> Option<&Variable> {
        self.by_id.get(id).map(|&i| &self.snapshot.variables[i])
    }

    /// Returns the dimension owned by a conditional.
    #[must_use]
    pub fn dimension_of(&self, conditional: &Variable) -> Option<&Dimension> {
        if !conditional.is_conditional() {
            return None;
        }
        self.dimension_by_name
            .get(&conditional.identifier)
            .map(|&i| &self.snapshot.dimensions[i])
    }

    /// Ordered slots of a conditional, sentinel included.
    ///
    /// Dangling dimension values are skipped.
    #[must_use]
    pub fn spawns_of(&self, conditional: &Variable) -> Vec<SpawnSlot<'_>> {
        self.index_of(conditional)
            .map(|i| {
                self.relations
                    .slots(i)
                    .iter()
                    .map(|slot| match *slot {
                        Slot::Spawn(s) => SpawnSlot::Spawn(&self.snapshot.variables[s]),
                        Slot::Hidden => SpawnSlot::Hidden,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Conditionals whose dimension lists this variable.
    #[must_use]
    pub fn conditionals_referencing(&self, variable: &Variable) -> Vec<&Variable> {
        self.index_of(variable)
            .map(|i| self.resolve_all(self.relations.owners(i)))
            .unwrap_or_default()
    }

    /// The spawn controlling this spawn, if it still exists.
    #[must_use]
    pub fn controller_of(&self, spawn: &Variable) -> Option<&Variable> {
        self.index_of(spawn)
            .and_then(|i| self.relations.controller(i))
            .map(|c| &self.snapshot.variables[c])
    }

    /// Spawns whose controller is this variable.
    #[must_use]
    pub fn controlled_by(&self, controller: &Variable) -> Vec<&Variable> {
        self.index_of(controller)
            .map(|i| self.resolve_all(self.relations.controlled(i)))
            .unwrap_or_default()
    }

    /// Variables whose template contains `{{name}}` for any name of `variable`.
    ///
    /// The variable itself is never reported. Computed on demand.
    #[must_use]
    pub fn embedders_of(&self, variable: &Variable) -> Vec<&Variable> {
        let needles: Vec<&str> = variable.names().collect();
        self.snapshot
            .variables
            .iter()
            .filter(|candidate| candidate.id != variable.id)
            .filter(|candidate| {
                candidate.template().is_some_and(|template| {
                    needles
                        .iter()
                        .any(|name| contains_placeholder(template, name))
                })
            })
            .collect()
    }

    fn index_of_name(&self, name: &str) -> Option<usize> {
        self.by_identifier
            .get(name)
            .or_else(|| self.by_alias.get(name))
            .copied()
    }

    fn index_of(&self, variable: &Variable) -> Option<usize> {
        self.by_id.get(&variable.id).copied()
    }

    fn resolve_all(&self, indices: &[usize]) -> Vec<&Variable> {
        indices
            .iter()
            .map(|&i| &self.snapshot.variables[i])
            .collect()
    }
}

impl From<ProjectSnapshot> for VariableStore {
    fn from(snapshot: ProjectSnapshot) -> Self {
        Self::new(snapshot)
    }
}

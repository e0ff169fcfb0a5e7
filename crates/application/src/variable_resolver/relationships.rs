//! Relationship model
//!
//! Index-based view of how variables relate: which spawns each conditional
//! offers, which conditionals list a spawn, and who controls whom. Built once
//! per snapshot and never mutated afterwards.

use std::collections::HashMap;

use strand_domain::{Dimension, Variable, VariableId};
use tracing::warn;

/// One slot of a conditional, as indices into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Spawn(usize),
    Hidden,
}

/// Name and id lookups the model is built against.
pub(crate) struct Lookup<'a> {
    pub by_identifier: &'a HashMap<String, usize>,
    pub by_alias: &'a HashMap<String, usize>,
    pub by_id: &'a HashMap<VariableId, usize>,
    pub dimension_by_name: &'a HashMap<String, usize>,
}

impl Lookup<'_> {
    pub fn name(&self, name: &str) -> Option<usize> {
        self.by_identifier
            .get(name)
            .or_else(|| self.by_alias.get(name))
            .copied()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RelationshipModel {
    slots: HashMap<usize, Vec<Slot>>,
    owners: HashMap<usize, Vec<usize>>,
    controller: HashMap<usize, usize>,
    controlled: HashMap<usize, Vec<usize>>,
}

impl RelationshipModel {
    pub fn build(variables: &[Variable], dimensions: &[Dimension], lookup: &Lookup<'_>) -> Self {
        let mut model = Self::default();

        for (index, variable) in variables.iter().enumerate() {
            if !variable.is_conditional() {
                continue;
            }
            let Some(&dim_index) = lookup.dimension_by_name.get(&variable.identifier) else {
                continue;
            };

            let mut slots = Vec::with_capacity(dimensions[dim_index].values.len());
            for value in &dimensions[dim_index].values {
                if value.is_hidden() {
                    slots.push(Slot::Hidden);
                    continue;
                }
                let Some(spawn) = lookup.name(&value.value) else {
                    warn!(
                        conditional = %variable.identifier,
                        value = %value.value,
                        "dimension value does not match any variable"
                    );
                    continue;
                };
                slots.push(Slot::Spawn(spawn));

                let owners = model.owners.entry(spawn).or_default();
                if !owners.contains(&index) {
                    owners.push(index);
                }
            }
            model.slots.insert(index, slots);
        }

        for dimension in dimensions {
            let owned = lookup
                .by_identifier
                .get(&dimension.name)
                .is_some_and(|&i| variables[i].is_conditional());
            if !owned {
                warn!(dimension = %dimension.name, "dimension has no conditional container");
            }
        }

        for (index, variable) in variables.iter().enumerate() {
            let Some(controller_id) = &variable.controlling_spawn_id else {
                continue;
            };
            match lookup.by_id.get(controller_id) {
                Some(&controller) if controller != index => {
                    model.controller.insert(index, controller);
                    model.controlled.entry(controller).or_default().push(index);
                }
                Some(_) => {
                    warn!(spawn = %variable.identifier, "spawn lists itself as its controller");
                }
                None => {
                    warn!(
                        spawn = %variable.identifier,
                        controller = %controller_id,
                        "controlling spawn no longer exists"
                    );
                }
            }
        }

        model
    }

    pub fn slots(&self, conditional: usize) -> &[Slot] {
        self.slots.get(&conditional).map_or(&[], Vec::as_slice)
    }

    pub fn owners(&self, spawn: usize) -> &[usize] {
        self.owners.get(&spawn).map_or(&[], Vec::as_slice)
    }

    pub fn controller(&self, spawn: usize) -> Option<usize> {
        self.controller.get(&spawn).copied()
    }

    pub fn controlled(&self, controller: usize) -> &[usize] {
        self.controlled.get(&controller).map_or(&[], Vec::as_slice)
    }
}

//! Selection rules
//!
//! Decides which spawns of a conditional may be selected, applies lazy
//! defaults and propagates controller selections. The [`SelectionState`]
//! map itself stays passive; every check lives here.

use std::collections::{HashSet, VecDeque};

use strand_domain::{Selection, SelectionState, Variable, VariableId};
use thiserror::Error;
use tracing::debug;

use super::store::{SpawnSlot, VariableStore};

/// Errors returned by [`SelectionRules::select`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// No variable has this identifier.
    #[error("unknown conditional: {0}")]
    UnknownConditional(String),

    /// The variable exists but is not a conditional container.
    #[error("{0} is not a conditional")]
    NotAConditional(String),

    /// The spawn is not one of the conditional's slots.
    #[error("{spawn} is not a spawn of {conditional}")]
    NotASpawn {
        /// Conditional identifier.
        conditional: String,
        /// Requested spawn.
        spawn: String,
    },

    /// A sibling is forced on by a different controller.
    #[error("{spawn} cannot be selected in {conditional} while another spawn is forced on")]
    SpawnDisabled {
        /// Conditional identifier.
        conditional: String,
        /// Requested spawn.
        spawn: String,
    },

    /// The conditional does not offer the `Hidden` option.
    #[error("{0} has no hide option")]
    HiddenNotOffered(String),
}

/// One write applied to a [`SelectionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// Conditional identifier.
    pub conditional: String,
    /// New selection.
    pub selection: Selection,
}

/// Presentation state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotState<'a> {
    /// The slot.
    pub slot: SpawnSlot<'a>,
    /// Currently the effective selection.
    pub selected: bool,
    /// Forced on by an active controller.
    pub auto_selected: bool,
    /// Not separately selectable.
    pub disabled: bool,
}

/// Eligibility and propagation rules over one store.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRules<'a> {
    store: &'a VariableStore,
}

impl<'a> SelectionRules<'a> {
    /// Creates rules for a store.
    #[must_use]
    pub const fn new(store: &'a VariableStore) -> Self {
        Self { store }
    }

    /// True when the spawn's controller is the stored selection of the
    /// controller's own conditional, under its identifier or any alias.
    #[must_use]
    pub fn is_auto_selected(&self, spawn: &Variable, state: &SelectionState) -> bool {
        let Some(controller) = self.store.controller_of(spawn) else {
            return false;
        };
        self.store
            .conditionals_referencing(controller)
            .iter()
            .filter_map(|owner| state.get(&owner.identifier))
            .filter_map(Selection::spawn_identifier)
            .any(|name| controller.names().any(|n| n == name))
    }

    /// True when a sibling is forced on through a different controller.
    ///
    /// A spawn that is itself forced on is never disabled.
    #[must_use]
    pub fn is_disabled(
        &self,
        conditional: &Variable,
        spawn: &Variable,
        state: &SelectionState,
    ) -> bool {
        if self.is_auto_selected(spawn, state) {
            return false;
        }
        let own_controller = self.controller_id(spawn);
        self.store
            .spawns_of(conditional)
            .into_iter()
            .filter_map(SpawnSlot::variable)
            .filter(|sibling| sibling.id != spawn.id)
            .any(|sibling| {
                self.is_auto_selected(sibling, state)
                    && self.controller_id(sibling) != own_controller
            })
    }

    /// Spawns that may be selected right now, in slot order.
    ///
    /// The `Hidden` sentinel is never part of this list.
    #[must_use]
    pub fn eligible_spawns(
        &self,
        conditional: &Variable,
        state: &SelectionState,
    ) -> Vec<&'a Variable> {
        self.store
            .spawns_of(conditional)
            .into_iter()
            .filter_map(SpawnSlot::variable)
            .filter(|spawn| !self.is_disabled(conditional, spawn, state))
            .collect()
    }

    /// Finds the spawn of `conditional` answering to `name`.
    #[must_use]
    pub fn spawn_named(&self, conditional: &Variable, name: &str) -> Option<&'a Variable> {
        let spawns: Vec<&'a Variable> = self
            .store
            .spawns_of(conditional)
            .into_iter()
            .filter_map(SpawnSlot::variable)
            .collect();
        spawns
            .iter()
            .find(|s| s.identifier == name)
            .or_else(|| spawns.iter().find(|s| s.aliases.iter().any(|a| a == name)))
            .copied()
    }

    /// The selection a conditional renders with, without writing anything.
    ///
    /// A stored selection is returned as is, even when it no longer names
    /// one of the conditional's spawns; callers render that as empty. Only an
    /// unset conditional falls back to the first eligible spawn.
    #[must_use]
    pub fn effective_selection(
        &self,
        conditional: &Variable,
        state: &SelectionState,
    ) -> Option<Selection> {
        match state.get(&conditional.identifier) {
            Some(selection) => Some(selection.clone()),
            None => self
                .eligible_spawns(conditional, state)
                .first()
                .map(|spawn| Selection::spawn(spawn.identifier.as_str())),
        }
    }

    /// Applies the lazy default and returns the selection to render.
    ///
    /// Writes to `state` only when the conditional had no selection at all.
    /// A stale selection is left in place and resolves to no spawn.
    pub fn ensure_default(
        &self,
        conditional: &Variable,
        state: &mut SelectionState,
    ) -> Option<Selection> {
        if state.get(&conditional.identifier).is_none() {
            let eligible = self.eligible_spawns(conditional, state);
            let chosen = state
                .default_if_unset(
                    &conditional.identifier,
                    eligible.iter().map(|s| s.identifier.as_str()),
                )
                .cloned();
            if let Some(selection) = &chosen {
                debug!(
                    conditional = %conditional.identifier,
                    %selection,
                    "applied default selection"
                );
            }
            return chosen;
        }
        self.effective_selection(conditional, state)
    }

    /// Per-slot flags for presentation code.
    #[must_use]
    pub fn slot_states(
        &self,
        conditional: &Variable,
        state: &SelectionState,
    ) -> Vec<SlotState<'a>> {
        let effective = self.effective_selection(conditional, state);
        self.store
            .spawns_of(conditional)
            .into_iter()
            .map(|slot| match slot {
                SpawnSlot::Hidden => SlotState {
                    slot,
                    selected: effective.as_ref().is_some_and(Selection::is_hidden),
                    auto_selected: false,
                    disabled: false,
                },
                SpawnSlot::Spawn(spawn) => SlotState {
                    slot,
                    selected: effective
                        .as_ref()
                        .and_then(Selection::spawn_identifier)
                        .is_some_and(|name| spawn.names().any(|n| n == name)),
                    auto_selected: self.is_auto_selected(spawn, state),
                    disabled: self.is_disabled(conditional, spawn, state),
                },
            })
            .collect()
    }

    /// Validates and applies a user choice, then propagates controllers.
    ///
    /// Returns every write in the order it was applied; the state is fully
    /// updated before this returns.
    ///
    /// # Errors
    /// Returns an error if the conditional or spawn is unknown, the spawn is
    /// disabled, or `Hidden` is requested where it is not offered.
    pub fn select(
        &self,
        state: &mut SelectionState,
        conditional: &str,
        choice: &Selection,
    ) -> Result<Vec<SelectionChange>, SelectionError> {
        let container = self
            .store
            .find_by_identifier(conditional)
            .ok_or_else(|| SelectionError::UnknownConditional(conditional.to_string()))?;
        if !container.is_conditional() {
            return Err(SelectionError::NotAConditional(conditional.to_string()));
        }

        let spawn = match choice {
            Selection::Hidden => {
                let offered = self
                    .store
                    .spawns_of(container)
                    .contains(&SpawnSlot::Hidden);
                if !offered {
                    return Err(SelectionError::HiddenNotOffered(container.identifier.clone()));
                }
                state.set(container.identifier.as_str(), Selection::Hidden);
                return Ok(vec![SelectionChange {
                    conditional: container.identifier.clone(),
                    selection: Selection::Hidden,
                }]);
            }
            Selection::Spawn(name) => self.spawn_named(container, name).ok_or_else(|| {
                SelectionError::NotASpawn {
                    conditional: container.identifier.clone(),
                    spawn: name.clone(),
                }
            })?,
        };

        if self.is_disabled(container, spawn, state) {
            return Err(SelectionError::SpawnDisabled {
                conditional: container.identifier.clone(),
                spawn: spawn.identifier.clone(),
            });
        }

        let selection = Selection::spawn(spawn.identifier.as_str());
        state.set(container.identifier.as_str(), selection.clone());
        let mut changes = vec![SelectionChange {
            conditional: container.identifier.clone(),
            selection,
        }];
        changes.extend(self.propagate(state, spawn));
        Ok(changes)
    }

    /// Force-selects every spawn transitively controlled by `from`.
    ///
    /// Each controlled spawn is visited once, so controller cycles in the data
    /// still terminate.
    pub fn propagate(&self, state: &mut SelectionState, from: &Variable) -> Vec<SelectionChange> {
        let mut changes = Vec::new();
        let mut visited: HashSet<&VariableId> = HashSet::new();
        visited.insert(&from.id);
        let mut queue: VecDeque<&Variable> = VecDeque::new();
        if let Some(start) = self.store.get(&from.id) {
            queue.push_back(start);
        }

        while let Some(controller) = queue.pop_front() {
            for dependent in self.store.controlled_by(controller) {
                if !visited.insert(&dependent.id) {
                    continue;
                }
                for owner in self.store.conditionals_referencing(dependent) {
                    let selection = Selection::spawn(dependent.identifier.as_str());
                    state.set(owner.identifier.as_str(), selection.clone());
                    debug!(
                        conditional = %owner.identifier,
                        spawn = %dependent.identifier,
                        controller = %controller.identifier,
                        "propagated controlled selection"
                    );
                    changes.push(SelectionChange {
                        conditional: owner.identifier.clone(),
                        selection,
                    });
                }
                queue.push_back(dependent);
            }
        }
        changes
    }

    fn controller_id(&self, spawn: &Variable) -> Option<&'a VariableId> {
        self.store.controller_of(spawn).map(|c| &c.id)
    }
}

//! Selection state
//!
//! Session-scoped record of which spawn is active for each conditional. The
//! map is passive: it performs no validation, eligibility is decided by the
//! caller before `set` is issued.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::project::HIDDEN;

/// The chosen variant of one conditional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// A spawn, by identifier.
    Spawn(String),
    /// Render nothing.
    Hidden,
}

impl Selection {
    /// Creates a spawn selection.
    #[must_use]
    pub fn spawn(identifier: impl Into<String>) -> Self {
        Self::Spawn(identifier.into())
    }

    /// Returns the spawn identifier, if any.
    #[must_use]
    pub fn spawn_identifier(&self) -> Option<&str> {
        match self {
            Self::Spawn(identifier) => Some(identifier),
            Self::Hidden => None,
        }
    }

    /// Returns true for the `Hidden` sentinel.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == HIDDEN {
            Self::Hidden
        } else {
            Self::Spawn(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Spawn(identifier) => identifier,
            Selection::Hidden => HIDDEN.to_string(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(identifier) => f.write_str(identifier),
            Self::Hidden => f.write_str(HIDDEN),
        }
    }
}

/// Conditional identifier -> chosen spawn.
///
/// Keys are kept sorted so serialized state is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    selections: BTreeMap<String, Selection>,
}

impl SelectionState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selection for a conditional.
    #[must_use]
    pub fn get(&self, conditional: &str) -> Option<&Selection> {
        self.selections.get(conditional)
    }

    /// Overwrites the selection for a conditional, returning the previous one.
    pub fn set(
        &mut self,
        conditional: impl Into<String>,
        selection: Selection,
    ) -> Option<Selection> {
        self.selections.insert(conditional.into(), selection)
    }

    /// Removes the selection for a conditional.
    pub fn clear(&mut self, conditional: &str) -> Option<Selection> {
        self.selections.remove(conditional)
    }

    /// Selects the first candidate when nothing is selected yet.
    ///
    /// Leaves the state untouched when a selection exists or there are no
    /// candidates. Returns the selection in effect afterwards.
    pub fn default_if_unset<'c, I>(&mut self, conditional: &str, candidates: I) -> Option<&Selection>
    where
        I: IntoIterator<Item = &'c str>,
    {
        if !self.selections.contains_key(conditional) {
            if let Some(first) = candidates.into_iter().next() {
                self.selections
                    .insert(conditional.to_string(), Selection::spawn(first));
            }
        }
        self.selections.get(conditional)
    }

    /// Returns true if `spawn` is the active selection of `conditional`.
    #[must_use]
    pub fn is_selected(&self, conditional: &str, spawn: &str) -> bool {
        self.get(conditional)
            .and_then(Selection::spawn_identifier)
            .is_some_and(|selected| selected == spawn)
    }

    /// Iterates selections in conditional order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selection)> {
        self.selections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of conditionals with a selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Selection)> for SelectionState {
    fn from_iter<T: IntoIterator<Item = (K, Selection)>>(iter: T) -> Self {
        Self {
            selections: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

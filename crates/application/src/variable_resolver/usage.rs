//! Usage analysis
//!
//! Answers "is this variable referenced or spawned, and by whom" so callers
//! can block deletions that would leave dangling references behind. Records
//! are computed on demand from the current store and never cached.

use std::fmt;

use strand_domain::Variable;
use thiserror::Error;

use super::store::VariableStore;

/// How a variable is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageType {
    /// Referenced from other content.
    Embedded,
    /// Part of a conditional or controller relationship.
    Spawn,
    /// Both of the above.
    Both,
}

/// One structural relationship that keeps a variable in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnUsage {
    /// The variable is forced on by this controller.
    ControlledBy(String),
    /// The variable is a slot of this conditional.
    SpawnOf(String),
    /// The variable forces this dependent spawn on.
    Controls(String),
}

impl fmt::Display for SpawnUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControlledBy(identifier) => write!(f, "controlled by {identifier}"),
            Self::SpawnOf(identifier) => write!(f, "spawn of {identifier}"),
            Self::Controls(identifier) => write!(f, "controls {identifier}"),
        }
    }
}

/// Usage of one variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageRecord {
    /// True if any usage exists.
    pub is_in_use: bool,
    /// Identifiers of variables whose content embeds this one.
    pub embedded_in: Vec<String>,
    /// Structural relationships.
    pub spawn_of: Vec<SpawnUsage>,
    /// Summary of the two lists, `None` when unused.
    pub usage_type: Option<UsageType>,
}

impl UsageRecord {
    fn new(embedded_in: Vec<String>, spawn_of: Vec<SpawnUsage>) -> Self {
        let usage_type = match (embedded_in.is_empty(), spawn_of.is_empty()) {
            (true, true) => None,
            (false, true) => Some(UsageType::Embedded),
            (true, false) => Some(UsageType::Spawn),
            (false, false) => Some(UsageType::Both),
        };
        Self {
            is_in_use: usage_type.is_some(),
            embedded_in,
            spawn_of,
            usage_type,
        }
    }

    /// Human-readable list of every usage.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        self.embedded_in
            .iter()
            .map(|identifier| format!("embedded in {identifier}"))
            .chain(self.spawn_of.iter().map(ToString::to_string))
            .collect()
    }
}

/// Errors raised by deletion checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsageError {
    /// A destructive operation targets a variable still in use.
    #[error("{identifier} is still in use: {}", .record.describe().join(", "))]
    InUse {
        /// The variable that cannot be deleted.
        identifier: String,
        /// Why.
        record: UsageRecord,
    },
}

/// Reachability queries over one store.
#[derive(Debug, Clone, Copy)]
pub struct UsageAnalyzer<'a> {
    store: &'a VariableStore,
}

impl<'a> UsageAnalyzer<'a> {
    /// Creates an analyzer for a store.
    #[must_use]
    pub const fn new(store: &'a VariableStore) -> Self {
        Self { store }
    }

    /// Computes the usage record of a variable.
    #[must_use]
    pub fn analyze(&self, variable: &Variable) -> UsageRecord {
        let mut embedded_in: Vec<String> = Vec::new();
        for embedder in self.store.embedders_of(variable) {
            if !embedded_in.contains(&embedder.identifier) {
                embedded_in.push(embedder.identifier.clone());
            }
        }

        let mut spawn_of = Vec::new();
        if let Some(controller) = self.store.controller_of(variable) {
            spawn_of.push(SpawnUsage::ControlledBy(controller.identifier.clone()));
        }
        for conditional in self.store.conditionals_referencing(variable) {
            spawn_of.push(SpawnUsage::SpawnOf(conditional.identifier.clone()));
        }
        for dependent in self.store.controlled_by(variable) {
            spawn_of.push(SpawnUsage::Controls(dependent.identifier.clone()));
        }

        UsageRecord::new(embedded_in, spawn_of)
    }

    /// Checks that a variable can be deleted without leaving dangling
    /// references.
    ///
    /// # Errors
    /// Returns [`UsageError`] carrying the usage record if the variable is in
    /// use.
    pub fn ensure_deletable(&self, variable: &Variable) -> Result<(), UsageError> {
        let record = self.analyze(variable);
        if record.is_in_use {
            return Err(UsageError::InUse {
                identifier: variable.identifier.clone(),
                record,
            });
        }
        Ok(())
    }

    /// Variables nothing refers to, in store order.
    #[must_use]
    pub fn unused(&self) -> Vec<&'a Variable> {
        self.store
            .variables()
            .iter()
            .filter(|variable| !self.analyze(variable).is_in_use)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strand_domain::{Dimension, ProjectSnapshot};

    fn store() -> VariableStore {
        VariableStore::new(
            ProjectSnapshot::new()
                .with_variable(Variable::plain("g", "greeting", "Hi {{name}}, {{name}}"))
                .with_variable(Variable::conditional("n", "name"))
                .with_variable(Variable::plain("a", "Alice", "Alice").with_alias("alice_hash"))
                .with_variable(Variable::plain("s", "sig", "Regards, {{alice_hash}}"))
                .with_variable(Variable::conditional("t", "tone"))
                .with_variable(Variable::plain("f", "formal", "Dear").controlled_by("a"))
                .with_variable(Variable::plain("o", "orphan", "nobody uses me"))
                .with_dimension(Dimension::new("name").with_values(["Alice"]))
                .with_dimension(Dimension::new("tone").with_values(["formal"])),
        )
    }

    #[test]
    fn test_embedded_usage() {
        let store = store();
        let analyzer = UsageAnalyzer::new(&store);
        let name = store.find_by_identifier("name").unwrap();

        let record = analyzer.analyze(name);
        assert!(record.is_in_use);
        assert_eq!(record.embedded_in, vec!["greeting"]);
        assert_eq!(record.usage_type, Some(UsageType::Embedded));
    }

    #[test]
    fn test_alias_embedding_and_spawn_roles() {
        let store = store();
        let analyzer = UsageAnalyzer::new(&store);
        let alice = store.find_by_identifier("Alice").unwrap();

        let record = analyzer.analyze(alice);
        assert_eq!(record.embedded_in, vec!["sig"]);
        assert_eq!(
            record.spawn_of,
            vec![
                SpawnUsage::SpawnOf("name".into()),
                SpawnUsage::Controls("formal".into()),
            ]
        );
        assert_eq!(record.usage_type, Some(UsageType::Both));
    }

    #[test]
    fn test_controlled_spawn_usage() {
        let store = store();
        let analyzer = UsageAnalyzer::new(&store);
        let formal = store.find_by_identifier("formal").unwrap();

        let record = analyzer.analyze(formal);
        assert_eq!(
            record.describe(),
            vec!["controlled by Alice".to_string(), "spawn of tone".to_string()]
        );
        assert_eq!(record.usage_type, Some(UsageType::Spawn));
    }

    #[test]
    fn test_unused_variable_is_deletable() {
        let store = store();
        let analyzer = UsageAnalyzer::new(&store);
        let orphan = store.find_by_identifier("orphan").unwrap();

        assert_eq!(analyzer.analyze(orphan), UsageRecord::default());
        assert!(analyzer.ensure_deletable(orphan).is_ok());
    }

    #[test]
    fn test_in_use_variable_is_blocked() {
        let store = store();
        let analyzer = UsageAnalyzer::new(&store);
        let name = store.find_by_identifier("name").unwrap();

        let err = analyzer.ensure_deletable(name).unwrap_err();
        let UsageError::InUse { identifier, record } = &err;
        assert_eq!(identifier, "name");
        assert_eq!(record.usage_type, Some(UsageType::Embedded));
        assert_eq!(err.to_string(), "name is still in use: embedded in greeting");
    }

    #[test]
    fn test_unused_lists_roots() {
        let store = store();
        let analyzer = UsageAnalyzer::new(&store);
        let unused: Vec<_> = analyzer
            .unused()
            .into_iter()
            .map(|v| v.identifier.as_str())
            .collect();
        assert_eq!(unused, vec!["greeting", "sig", "tone", "orphan"]);
    }
}

//! Dimension bookkeeping
//!
//! Pure edits that keep dimensions consistent with their containers before a
//! project is saved, plus identifier renames that rewrite every reference.

use std::collections::HashSet;

use strand_domain::{
    Dimension, DimensionValue, DomainError, DomainResult, HIDDEN, ProjectSnapshot, placeholder_for,
};
use tracing::{debug, info};

use crate::variable_resolver::is_valid_identifier;

/// What [`sync_dimensions`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Containers that received a new, empty dimension.
    pub created: Vec<String>,
    /// Names of dimensions dropped because no container owns them.
    pub orphans_removed: Vec<String>,
    /// Names of extra dimensions dropped for an already-owned container.
    pub duplicates_removed: Vec<String>,
    /// Repeated values dropped across all dimensions.
    pub values_deduplicated: usize,
    /// Dimensions whose `Hidden` slot was added, removed or moved last.
    pub hidden_adjusted: Vec<String>,
}

impl SyncReport {
    /// Returns true if the snapshot was already consistent.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.created.is_empty()
            && self.orphans_removed.is_empty()
            && self.duplicates_removed.is_empty()
            && self.values_deduplicated == 0
            && self.hidden_adjusted.is_empty()
    }
}

/// Makes every container own exactly one dimension.
///
/// Values are deduplicated in order and the `Hidden` slot is present, last,
/// exactly when the container offers the hide option. Dangling values are
/// kept; the store reports them when it is built.
pub fn sync_dimensions(snapshot: &mut ProjectSnapshot) -> SyncReport {
    let mut report = SyncReport::default();

    let containers: Vec<(String, bool)> = snapshot
        .variables
        .iter()
        .filter(|v| v.is_conditional())
        .map(|v| (v.identifier.clone(), v.includes_hidden()))
        .collect();

    let mut owned: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(snapshot.dimensions.len());
    for dimension in std::mem::take(&mut snapshot.dimensions) {
        if !containers.iter().any(|(name, _)| *name == dimension.name) {
            report.orphans_removed.push(dimension.name);
        } else if owned.insert(dimension.name.clone()) {
            kept.push(dimension);
        } else {
            report.duplicates_removed.push(dimension.name);
        }
    }
    snapshot.dimensions = kept;

    for (name, include_hidden) in containers {
        if owned.insert(name.clone()) {
            snapshot.dimensions.push(Dimension::new(name.as_str()));
            report.created.push(name.clone());
        }
        let Some(dimension) = snapshot.dimension_mut(&name) else {
            continue;
        };
        report.values_deduplicated += dedupe_values(dimension);
        if align_hidden(dimension, include_hidden) {
            report.hidden_adjusted.push(name);
        }
    }

    if report.is_clean() {
        debug!("dimensions already consistent");
    } else {
        info!(
            created = report.created.len(),
            orphans = report.orphans_removed.len(),
            duplicates = report.duplicates_removed.len(),
            values = report.values_deduplicated,
            hidden = report.hidden_adjusted.len(),
            "synchronized dimensions"
        );
    }
    report
}

fn dedupe_values(dimension: &mut Dimension) -> usize {
    let before = dimension.values.len();
    let mut seen = HashSet::new();
    dimension.values.retain(|v| seen.insert(v.value.clone()));
    before - dimension.values.len()
}

fn align_hidden(dimension: &mut Dimension, include_hidden: bool) -> bool {
    let last_is_hidden = dimension.values.last().is_some_and(DimensionValue::is_hidden);
    let hidden_count = dimension.values.iter().filter(|v| v.is_hidden()).count();
    let consistent = if include_hidden {
        last_is_hidden && hidden_count == 1
    } else {
        hidden_count == 0
    };
    if consistent {
        return false;
    }
    dimension.values.retain(|v| !v.is_hidden());
    if include_hidden {
        dimension.values.push(DimensionValue::hidden());
    }
    true
}

/// What [`rename_identifier`] rewrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Identifiers of variables whose content had `{{old}}` rewritten.
    pub rewritten_content: Vec<String>,
    /// Dimension values that named the old identifier.
    pub rewritten_values: usize,
    /// True if the variable owned a dimension that was renamed with it.
    pub dimension_renamed: bool,
}

/// Renames a variable and rewrites every reference to its old identifier.
///
/// # Errors
/// Returns an error if `old` names no variable, `new` is not a valid
/// identifier, or `new` is already taken by another variable.
pub fn rename_identifier(
    snapshot: &mut ProjectSnapshot,
    old: &str,
    new: &str,
) -> DomainResult<RenameReport> {
    if new == HIDDEN {
        return Err(DomainError::ReservedIdentifier(new.to_string()));
    }
    if !is_valid_identifier(new) {
        return Err(DomainError::InvalidIdentifier(new.to_string()));
    }
    let Some(target) = snapshot.variable(old) else {
        return Err(DomainError::UnknownVariable(old.to_string()));
    };
    let target_id = target.id.clone();
    let is_conditional = target.is_conditional();
    if old == new {
        return Ok(RenameReport::default());
    }
    let taken = snapshot
        .variables
        .iter()
        .any(|v| v.id != target_id && v.names().any(|n| n == new));
    if taken {
        return Err(DomainError::DuplicateIdentifier(new.to_string()));
    }

    let mut report = RenameReport::default();
    let from = placeholder_for(old);
    let to = placeholder_for(new);
    for variable in &mut snapshot.variables {
        if variable.id == target_id {
            variable.identifier = new.to_string();
        }
        if let Some(content) = variable.template_mut()
            && content.contains(&from)
        {
            *content = content.replace(&from, &to);
            report.rewritten_content.push(variable.identifier.clone());
        }
    }

    for dimension in &mut snapshot.dimensions {
        if is_conditional && !report.dimension_renamed && dimension.name == old {
            dimension.name = new.to_string();
            report.dimension_renamed = true;
        }
        for value in &mut dimension.values {
            if value.value == old {
                value.value = new.to_string();
                report.rewritten_values += 1;
            }
        }
    }

    info!(
        old,
        new,
        content = report.rewritten_content.len(),
        values = report.rewritten_values,
        "renamed identifier"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strand_domain::Variable;

    fn values(snapshot: &ProjectSnapshot, name: &str) -> Vec<String> {
        snapshot
            .dimension(name)
            .unwrap()
            .values
            .iter()
            .map(|v| v.value.clone())
            .collect()
    }

    #[test]
    fn test_sync_creates_missing_dimension() {
        let mut snapshot = ProjectSnapshot::new().with_variable(Variable::conditional("1", "name"));

        let report = sync_dimensions(&mut snapshot);

        assert_eq!(report.created, vec!["name"]);
        assert!(snapshot.dimension("name").unwrap().values.is_empty());
    }

    #[test]
    fn test_sync_drops_orphans_and_duplicates() {
        let mut snapshot = ProjectSnapshot::new()
            .with_variable(Variable::conditional("1", "name"))
            .with_dimension(Dimension::new("name").with_values(["Alice"]))
            .with_dimension(Dimension::new("gone").with_values(["X"]))
            .with_dimension(Dimension::new("name").with_values(["Bob"]));

        let report = sync_dimensions(&mut snapshot);

        assert_eq!(report.orphans_removed, vec!["gone"]);
        assert_eq!(report.duplicates_removed, vec!["name"]);
        assert_eq!(snapshot.dimensions.len(), 1);
        assert_eq!(values(&snapshot, "name"), vec!["Alice"]);
    }

    #[test]
    fn test_sync_dedupes_and_appends_hidden_last() {
        let mut snapshot = ProjectSnapshot::new()
            .with_variable(Variable::conditional("1", "name").with_hide_option(true))
            .with_dimension(Dimension::new("name").with_values(["Hidden", "Alice", "Bob", "Alice"]));

        let report = sync_dimensions(&mut snapshot);

        assert_eq!(report.values_deduplicated, 1);
        assert_eq!(report.hidden_adjusted, vec!["name"]);
        assert_eq!(values(&snapshot, "name"), vec!["Alice", "Bob", "Hidden"]);
    }

    #[test]
    fn test_sync_removes_hidden_without_hide_option() {
        let mut snapshot = ProjectSnapshot::new()
            .with_variable(Variable::conditional("1", "name"))
            .with_dimension(Dimension::new("name").with_values(["Alice", "Hidden"]));

        sync_dimensions(&mut snapshot);

        assert_eq!(values(&snapshot, "name"), vec!["Alice"]);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut snapshot = ProjectSnapshot::new()
            .with_variable(Variable::conditional("1", "name").with_hide_option(true))
            .with_dimension(Dimension::new("name").with_values(["Alice", "Alice"]));

        assert!(!sync_dimensions(&mut snapshot).is_clean());
        let synced = snapshot.clone();
        assert!(sync_dimensions(&mut snapshot).is_clean());
        assert_eq!(snapshot, synced);
    }

    fn rename_fixture() -> ProjectSnapshot {
        ProjectSnapshot::new()
            .with_variable(Variable::plain("1", "greeting", "Hi {{name}} and {{name}}"))
            .with_variable(Variable::conditional("2", "name"))
            .with_variable(Variable::plain("3", "Alice", "Alice"))
            .with_variable(Variable::plain("4", "footer", "Bye {{Alice}}"))
            .with_dimension(Dimension::new("name").with_values(["Alice"]))
    }

    #[test]
    fn test_rename_conditional_moves_dimension() {
        let mut snapshot = rename_fixture();

        let report = rename_identifier(&mut snapshot, "name", "person").unwrap();

        assert!(report.dimension_renamed);
        assert_eq!(report.rewritten_content, vec!["greeting"]);
        assert_eq!(
            snapshot.variable("greeting").unwrap().template(),
            Some("Hi {{person}} and {{person}}")
        );
        assert!(snapshot.dimension("person").is_some());
        assert!(snapshot.dimension("name").is_none());
    }

    #[test]
    fn test_rename_spawn_rewrites_dimension_values() {
        let mut snapshot = rename_fixture();

        let report = rename_identifier(&mut snapshot, "Alice", "Alicia").unwrap();

        assert_eq!(report.rewritten_values, 1);
        assert!(!report.dimension_renamed);
        assert_eq!(values(&snapshot, "name"), vec!["Alicia"]);
        assert_eq!(
            snapshot.variable("footer").unwrap().template(),
            Some("Bye {{Alicia}}")
        );
    }

    #[test]
    fn test_rename_rejections() {
        let mut snapshot = rename_fixture();
        let before = snapshot.clone();

        assert_eq!(
            rename_identifier(&mut snapshot, "missing", "x"),
            Err(DomainError::UnknownVariable("missing".into()))
        );
        assert_eq!(
            rename_identifier(&mut snapshot, "name", "Alice"),
            Err(DomainError::DuplicateIdentifier("Alice".into()))
        );
        assert_eq!(
            rename_identifier(&mut snapshot, "name", "Hidden"),
            Err(DomainError::ReservedIdentifier("Hidden".into()))
        );
        assert_eq!(
            rename_identifier(&mut snapshot, "name", "a}b"),
            Err(DomainError::InvalidIdentifier("a}b".into()))
        );
        assert_eq!(snapshot, before);
    }
}

//! Variable and dimension records.

use serde::{Deserialize, Serialize};

use super::common::{Id, non_blank};
use crate::error::DomainError;
use crate::project::{Dimension, DimensionValue, Variable, VariableId, VariableKind};

/// A variable as stored on disk.
///
/// The identifier is derived, in order, from `custom_name`, `hash`,
/// `effective_name` and finally `id`. Every other non-blank name, plus the
/// entries of `aliases`, becomes an alias.
///
/// Saving normalizes the name fields: the identifier is always written as
/// `custom_name` and every alias goes to `aliases`, so a record read back
/// yields the same identifier and aliases in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRecord {
    /// Unique id.
    pub id: Id,

    /// Name chosen by the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,

    /// Auto-generated fallback name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Legacy computed name kept by older project files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_name: Option<String>,

    /// Additional names the variable answers to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Template text, or advisory text for containers.
    #[serde(default)]
    pub content: String,

    /// Marks the variable as a conditional container.
    #[serde(default)]
    pub is_conditional: bool,

    /// Container-level "include hide option" flag.
    #[serde(default)]
    pub include_hidden: bool,

    /// Id of the spawn that forces this spawn on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controlling_spawn_id: Option<Id>,
}

impl VariableRecord {
    /// Returns the canonical identifier this record resolves to.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.candidate_names()
            .next()
            .unwrap_or_else(|| self.id.trim())
    }

    fn candidate_names(&self) -> impl Iterator<Item = &str> {
        [
            self.custom_name.as_deref(),
            self.hash.as_deref(),
            self.effective_name.as_deref(),
        ]
        .into_iter()
        .filter_map(non_blank)
    }
}

impl TryFrom<VariableRecord> for Variable {
    type Error = DomainError;

    fn try_from(record: VariableRecord) -> Result<Self, Self::Error> {
        let id = record.id.trim();
        if id.is_empty() {
            return Err(DomainError::InvalidRecord(format!(
                "variable {:?} has an empty id",
                record.identifier()
            )));
        }

        let identifier = record.identifier().to_string();
        let mut aliases: Vec<String> = Vec::new();
        let extra = record.aliases.iter().filter_map(|a| non_blank(Some(a.as_str())));
        for name in record.candidate_names().chain(extra) {
            if name != identifier && !aliases.iter().any(|a| a == name) {
                aliases.push(name.to_string());
            }
        }

        let kind = if record.is_conditional {
            VariableKind::Conditional {
                note: record.content,
                include_hidden: record.include_hidden,
            }
        } else {
            VariableKind::Plain {
                content: record.content,
            }
        };

        Ok(Self {
            id: VariableId::new(id),
            identifier,
            kind,
            controlling_spawn_id: non_blank(record.controlling_spawn_id.as_deref())
                .map(VariableId::new),
            aliases,
        })
    }
}

impl From<&Variable> for VariableRecord {
    fn from(variable: &Variable) -> Self {
        let (content, is_conditional, include_hidden) = match &variable.kind {
            VariableKind::Plain { content } => (content.clone(), false, false),
            VariableKind::Conditional {
                note,
                include_hidden,
            } => (note.clone(), true, *include_hidden),
        };

        Self {
            id: variable.id.to_string(),
            custom_name: Some(variable.identifier.clone()),
            hash: None,
            effective_name: None,
            aliases: variable.aliases.clone(),
            content,
            is_conditional,
            include_hidden,
            controlling_spawn_id: variable.controlling_spawn_id.as_ref().map(ToString::to_string),
        }
    }
}

/// A dimension value as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionValueRecord {
    /// Spawn identifier or `"Hidden"`.
    pub value: String,
}

/// A dimension as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRecord {
    /// Unique id.
    pub id: Id,

    /// Owning conditional's identifier.
    pub name: String,

    /// Ordered values.
    #[serde(default)]
    pub values: Vec<DimensionValueRecord>,
}

impl From<DimensionRecord> for Dimension {
    fn from(record: DimensionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            values: record
                .values
                .into_iter()
                .map(|v| DimensionValue::new(v.value))
                .collect(),
        }
    }
}

impl From<&Dimension> for DimensionRecord {
    fn from(dimension: &Dimension) -> Self {
        Self {
            id: dimension.id.clone(),
            name: dimension.name.clone(),
            values: dimension
                .values
                .iter()
                .map(|v| DimensionValueRecord {
                    value: v.value.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: &str) -> VariableRecord {
        VariableRecord {
            id: id.to_string(),
            ..VariableRecord::default()
        }
    }

    #[test]
    fn test_custom_name_preferred_over_hash() {
        let rec = VariableRecord {
            custom_name: Some("greeting".into()),
            hash: Some("a1b2c3".into()),
            ..record("1")
        };
        let var = Variable::try_from(rec).unwrap();
        assert_eq!(var.identifier, "greeting");
        assert_eq!(var.aliases, vec!["a1b2c3".to_string()]);
    }

    #[test]
    fn test_blank_custom_name_falls_back_to_hash() {
        let rec = VariableRecord {
            custom_name: Some("   ".into()),
            hash: Some("a1b2c3".into()),
            ..record("1")
        };
        let var = Variable::try_from(rec).unwrap();
        assert_eq!(var.identifier, "a1b2c3");
        assert!(var.aliases.is_empty());
    }

    #[test]
    fn test_id_is_last_resort() {
        let var = Variable::try_from(record("v-9")).unwrap();
        assert_eq!(var.identifier, "v-9");
    }

    #[test]
    fn test_duplicate_legacy_names_collapse() {
        let rec = VariableRecord {
            custom_name: Some("x".into()),
            hash: Some("h".into()),
            effective_name: Some("h".into()),
            ..record("1")
        };
        let var = Variable::try_from(rec).unwrap();
        assert_eq!(var.aliases, vec!["h".to_string()]);
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = Variable::try_from(record("  "));
        assert!(matches!(result, Err(DomainError::InvalidRecord(_))));
    }

    #[test]
    fn test_conditional_record_builds_container() {
        let rec = VariableRecord {
            custom_name: Some("name".into()),
            content: "pick a name".into(),
            is_conditional: true,
            include_hidden: true,
            controlling_spawn_id: Some(String::new()),
            ..record("1")
        };
        let var = Variable::try_from(rec).unwrap();
        assert!(var.includes_hidden());
        assert_eq!(var.template(), None);
        assert_eq!(var.controlling_spawn_id, None);
    }

    #[test]
    fn test_record_from_variable_keeps_every_alias() {
        let var = Variable::plain("1", "greeting", "Hi")
            .with_alias("h1")
            .with_alias("old_greeting")
            .with_alias("salutation");
        let rec = VariableRecord::from(&var);
        assert_eq!(rec.custom_name.as_deref(), Some("greeting"));
        assert_eq!(rec.hash, None);
        assert_eq!(rec.aliases, vec!["h1", "old_greeting", "salutation"]);
        assert_eq!(Variable::try_from(rec).unwrap(), var);
    }

    #[test]
    fn test_hash_derived_identifier_survives_save() {
        let rec = VariableRecord {
            hash: Some("a1b2c3".into()),
            effective_name: Some("legacy".into()),
            ..record("1")
        };
        let loaded = Variable::try_from(rec).unwrap();
        let saved = VariableRecord::from(&loaded);
        assert_eq!(saved.identifier(), "a1b2c3");
        assert_eq!(Variable::try_from(saved).unwrap(), loaded);
    }

    #[test]
    fn test_alias_list_merges_with_legacy_names() {
        let rec = VariableRecord {
            custom_name: Some("x".into()),
            hash: Some("h".into()),
            aliases: vec!["h".into(), " ".into(), "y".into()],
            ..record("1")
        };
        let var = Variable::try_from(rec).unwrap();
        assert_eq!(var.aliases, vec!["h".to_string(), "y".to_string()]);
    }
}

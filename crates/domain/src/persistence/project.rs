//! Project file type (project.json).

use serde::{Deserialize, Serialize};

use super::common::CURRENT_SCHEMA_VERSION;
use super::records::{DimensionRecord, VariableRecord};
use crate::error::{DomainError, DomainResult};
use crate::project::{Dimension, ProjectSnapshot, Variable};

const fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

/// Project file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Schema version for migration support.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Variables in store order.
    #[serde(default)]
    pub variables: Vec<VariableRecord>,

    /// Dimensions in store order.
    #[serde(default)]
    pub dimensions: Vec<DimensionRecord>,
}

impl ProjectRecord {
    /// Converts the record into a domain snapshot.
    ///
    /// # Errors
    /// Returns an error if the schema version is newer than supported or any
    /// variable record is invalid.
    pub fn into_snapshot(self) -> DomainResult<ProjectSnapshot> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(DomainError::InvalidRecord(format!(
                "unsupported schema version {}",
                self.schema_version
            )));
        }

        let variables = self
            .variables
            .into_iter()
            .map(Variable::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        let dimensions = self.dimensions.into_iter().map(Dimension::from).collect();

        Ok(ProjectSnapshot {
            variables,
            dimensions,
        })
    }
}

impl From<&ProjectSnapshot> for ProjectRecord {
    fn from(snapshot: &ProjectSnapshot) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            variables: snapshot.variables.iter().map(VariableRecord::from).collect(),
            dimensions: snapshot.dimensions.iter().map(DimensionRecord::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_legacy_project_file() {
        let json = r#"{
            "variables": [
                {"id": "1", "custom_name": "greeting", "content": "Hi {{name}}"},
                {"id": "2", "hash": "name", "is_conditional": true, "include_hidden": true},
                {"id": "3", "custom_name": "Alice", "content": "Alice"}
            ],
            "dimensions": [
                {"id": "d1", "name": "name", "values": [{"value": "Alice"}, {"value": "Hidden"}]}
            ]
        }"#;

        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.schema_version, CURRENT_SCHEMA_VERSION);

        let snapshot = record.into_snapshot().unwrap();
        assert_eq!(snapshot.variables.len(), 3);
        assert!(snapshot.variable("name").unwrap().is_conditional());
        assert!(snapshot.dimension("name").unwrap().has_hidden());
    }

    #[test]
    fn test_future_schema_rejected() {
        let record = ProjectRecord {
            schema_version: CURRENT_SCHEMA_VERSION + 1,
            variables: Vec::new(),
            dimensions: Vec::new(),
        };
        assert!(record.into_snapshot().is_err());
    }

    #[test]
    fn test_snapshot_survives_record_conversion() {
        let snapshot = ProjectSnapshot::new()
            .with_variable(Variable::plain("1", "a", "{{b}}"))
            .with_variable(Variable::conditional("2", "b").with_hide_option(true))
            .with_dimension(Dimension::new("b").with_values(["Hidden"]));

        let back = ProjectRecord::from(&snapshot).into_snapshot().unwrap();
        assert_eq!(back, snapshot);
    }
}

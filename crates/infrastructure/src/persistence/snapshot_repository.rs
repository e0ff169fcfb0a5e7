//! File-based snapshot repository implementation.
//!
//! A project is one JSON file holding a [`ProjectRecord`]. The path is chosen
//! by the caller.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use strand_application::ports::{SnapshotError, SnapshotRepository};
use strand_domain::ProjectSnapshot;
use strand_domain::persistence::ProjectRecord;
use tokio::fs;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// File-based snapshot repository using tokio's filesystem API.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSnapshotRepository;

impl FileSnapshotRepository {
    /// Creates a new file-based snapshot repository.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SnapshotRepository for FileSnapshotRepository {
    async fn load(&self, path: &Path) -> Result<ProjectSnapshot, SnapshotError> {
        let content = fs::read(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SnapshotError::NotFound(path.to_path_buf())
            } else {
                SnapshotError::Io(e)
            }
        })?;

        let record: ProjectRecord = from_json_bytes(&content)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        let snapshot = record.into_snapshot()?;

        debug!(
            path = %path.display(),
            variables = snapshot.variables.len(),
            dimensions = snapshot.dimensions.len(),
            "loaded project"
        );
        Ok(snapshot)
    }

    async fn save(&self, path: &Path, snapshot: &ProjectSnapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(&ProjectRecord::from(snapshot))
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        fs::write(path, content).await?;

        debug!(path = %path.display(), "saved project");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strand_domain::{Dimension, Variable};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("missing.json");

        let result = FileSnapshotRepository::new().load(&path).await;

        assert!(matches!(result, Err(SnapshotError::NotFound(p)) if p == path));
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("project.json");
        let snapshot =
            ProjectSnapshot::new().with_variable(Variable::plain("1", "greeting", "Hi"));

        FileSnapshotRepository::new()
            .save(&path, &snapshot)
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_json() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = FileSnapshotRepository::new().load(&path).await;

        assert!(matches!(result, Err(SnapshotError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_load_rejects_newer_schema() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("future.json");
        std::fs::write(&path, r#"{"schema_version": 99}"#).unwrap();

        let result = FileSnapshotRepository::new().load(&path).await;

        assert!(matches!(result, Err(SnapshotError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_exists() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("project.json");
        let repo = FileSnapshotRepository::new();

        assert!(!repo.exists(&path).await.unwrap());
        repo.save(&path, &ProjectSnapshot::new()).await.unwrap();
        assert!(repo.exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_saved_file_is_stable() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("project.json");
        let repo = FileSnapshotRepository::new();
        let snapshot = ProjectSnapshot::new()
            .with_variable(Variable::conditional("2", "name"))
            .with_variable(Variable::plain("3", "Alice", "Alice"))
            .with_dimension(Dimension::new("name").with_values(["Alice"]));

        repo.save(&path, &snapshot).await.unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        let loaded = repo.load(&path).await.unwrap();
        repo.save(&path, &loaded).await.unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.ends_with('\n'));
    }
}

//! Project use cases
//!
//! Load, save and delete operations over a [`SnapshotRepository`].

use std::path::Path;

use strand_domain::{ProjectSnapshot, Variable};
use tracing::info;

use super::dimensions::{SyncReport, sync_dimensions};
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::SnapshotRepository;
use crate::variable_resolver::{UsageAnalyzer, VariableStore};

/// Loads a project from storage.
pub struct LoadProject<R> {
    repository: R,
}

impl<R: SnapshotRepository> LoadProject<R> {
    /// Creates a new `LoadProject` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the project cannot be read or is invalid.
    pub async fn execute(&self, path: &Path) -> ApplicationResult<VariableStore> {
        let snapshot = self.repository.load(path).await?;
        Ok(VariableStore::new(snapshot))
    }
}

/// Synchronizes dimensions and writes a project to storage.
pub struct SaveProject<R> {
    repository: R,
}

impl<R: SnapshotRepository> SaveProject<R> {
    /// Creates a new `SaveProject` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the project cannot be written.
    pub async fn execute(
        &self,
        path: &Path,
        snapshot: &mut ProjectSnapshot,
    ) -> ApplicationResult<SyncReport> {
        let report = sync_dimensions(snapshot);
        self.repository.save(path, snapshot).await?;
        Ok(report)
    }
}

/// Result of a successful deletion.
#[derive(Debug)]
pub struct DeleteVariableOutput {
    /// The removed variable.
    pub removed: Variable,
    /// The project as saved.
    pub snapshot: ProjectSnapshot,
}

/// Deletes a variable nothing depends on.
pub struct DeleteVariable<R> {
    repository: R,
}

impl<R: SnapshotRepository> DeleteVariable<R> {
    /// Creates a new `DeleteVariable` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `ApplicationError::InUse` if the variable is still referenced,
    /// `ApplicationError::NotFound` if it does not exist, or a storage error.
    pub async fn execute(
        &self,
        path: &Path,
        identifier: &str,
    ) -> ApplicationResult<DeleteVariableOutput> {
        let store = VariableStore::new(self.repository.load(path).await?);
        let id = {
            let variable = store
                .find_by_identifier(identifier)
                .ok_or_else(|| ApplicationError::NotFound(identifier.to_string()))?;
            UsageAnalyzer::new(&store).ensure_deletable(variable)?;
            variable.id.clone()
        };

        let mut snapshot = store.into_snapshot();
        let removed = snapshot
            .remove_variable(&id)
            .ok_or_else(|| ApplicationError::NotFound(identifier.to_string()))?;
        sync_dimensions(&mut snapshot);
        self.repository.save(path, &snapshot).await?;

        info!(identifier = %removed.identifier, "deleted variable");
        Ok(DeleteVariableOutput { removed, snapshot })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::significant_drop_tightening)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use strand_domain::Dimension;

    use crate::ports::SnapshotError;
    use crate::variable_resolver::UsageError;

    #[derive(Clone, Default)]
    struct MockRepository {
        projects: Arc<Mutex<HashMap<PathBuf, ProjectSnapshot>>>,
    }

    impl MockRepository {
        fn with(path: &str, snapshot: ProjectSnapshot) -> Self {
            let repo = Self::default();
            repo.projects
                .lock()
                .expect("Lock poisoned")
                .insert(PathBuf::from(path), snapshot);
            repo
        }

        fn get(&self, path: &str) -> Option<ProjectSnapshot> {
            let projects = self.projects.lock().expect("Lock poisoned");
            projects.get(Path::new(path)).cloned()
        }
    }

    #[async_trait]
    impl SnapshotRepository for MockRepository {
        async fn load(&self, path: &Path) -> Result<ProjectSnapshot, SnapshotError> {
            let projects = self.projects.lock().expect("Lock poisoned");
            projects
                .get(path)
                .cloned()
                .ok_or_else(|| SnapshotError::NotFound(path.to_path_buf()))
        }

        async fn save(&self, path: &Path, snapshot: &ProjectSnapshot) -> Result<(), SnapshotError> {
            let mut projects = self.projects.lock().expect("Lock poisoned");
            projects.insert(path.to_path_buf(), snapshot.clone());
            Ok(())
        }
    }

    fn project() -> ProjectSnapshot {
        ProjectSnapshot::new()
            .with_variable(Variable::plain("1", "greeting", "Hi {{name}}"))
            .with_variable(Variable::conditional("2", "name"))
            .with_variable(Variable::plain("3", "Alice", "Alice"))
            .with_variable(Variable::plain("4", "draft", "unused"))
            .with_variable(Variable::conditional("5", "empty"))
            .with_dimension(Dimension::new("name").with_values(["Alice"]))
    }

    #[tokio::test]
    async fn test_load_project() {
        let repo = MockRepository::with("/p.json", project());
        let store = LoadProject::new(repo)
            .execute(Path::new("/p.json"))
            .await
            .unwrap();
        assert_eq!(store.variables().len(), 5);
    }

    #[tokio::test]
    async fn test_load_project_not_found() {
        let result = LoadProject::new(MockRepository::default())
            .execute(Path::new("/missing.json"))
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::Snapshot(SnapshotError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_save_project_syncs_dimensions() {
        let repo = MockRepository::default();
        let mut snapshot = project();

        let report = SaveProject::new(repo.clone())
            .execute(Path::new("/p.json"), &mut snapshot)
            .await
            .unwrap();

        assert_eq!(report.created, vec!["empty"]);
        let saved = repo.get("/p.json").unwrap();
        assert_eq!(saved, snapshot);
        assert!(saved.dimension("empty").is_some());
    }

    #[tokio::test]
    async fn test_delete_unused_variable() {
        let repo = MockRepository::with("/p.json", project());

        let output = DeleteVariable::new(repo.clone())
            .execute(Path::new("/p.json"), "draft")
            .await
            .unwrap();

        assert_eq!(output.removed.identifier, "draft");
        assert!(repo.get("/p.json").unwrap().variable("draft").is_none());
    }

    #[tokio::test]
    async fn test_delete_conditional_drops_its_dimension() {
        let repo = MockRepository::with(
            "/p.json",
            project().with_dimension(Dimension::new("empty")),
        );

        DeleteVariable::new(repo.clone())
            .execute(Path::new("/p.json"), "empty")
            .await
            .unwrap();

        assert!(repo.get("/p.json").unwrap().dimension("empty").is_none());
    }

    #[tokio::test]
    async fn test_delete_in_use_variable_is_blocked() {
        let repo = MockRepository::with("/p.json", project());

        let result = DeleteVariable::new(repo.clone())
            .execute(Path::new("/p.json"), "Alice")
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::InUse(UsageError::InUse { .. }))
        ));
        assert!(repo.get("/p.json").unwrap().variable("Alice").is_some());
    }

    #[tokio::test]
    async fn test_delete_unknown_variable() {
        let repo = MockRepository::with("/p.json", project());
        let result = DeleteVariable::new(repo)
            .execute(Path::new("/p.json"), "nobody")
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(name)) if name == "nobody"));
    }
}

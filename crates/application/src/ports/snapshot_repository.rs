//! Snapshot repository port
//!
//! Defines the interface for project snapshot persistence.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use strand_domain::{DomainError, ProjectSnapshot};

/// Errors that can occur during snapshot operations.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// No project file at this path.
    #[error("Project not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The stored data does not describe a valid project.
    #[error("Invalid project: {0}")]
    Invalid(#[from] DomainError),
}

/// Repository trait for project snapshot persistence.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Loads the project stored at `path`.
    ///
    /// # Errors
    /// Returns `SnapshotError::NotFound` if no project exists at `path`.
    async fn load(&self, path: &Path) -> Result<ProjectSnapshot, SnapshotError>;

    /// Saves a project to `path`, replacing any previous content.
    ///
    /// # Errors
    /// Returns an error if the project cannot be written.
    async fn save(&self, path: &Path, snapshot: &ProjectSnapshot) -> Result<(), SnapshotError>;

    /// Checks if a project exists at `path`.
    async fn exists(&self, path: &Path) -> Result<bool, SnapshotError> {
        match self.load(path).await {
            Ok(_) => Ok(true),
            Err(SnapshotError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

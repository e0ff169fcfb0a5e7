//! Application error types

use strand_domain::DomainError;
use thiserror::Error;

use crate::ports::SnapshotError;
use crate::variable_resolver::{SelectionError, UsageError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Loading or saving a project failed.
    #[error("storage error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A selection request was rejected.
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    /// A variable is still in use.
    #[error(transparent)]
    InUse(#[from] UsageError),

    /// The requested variable was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or ingestion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The identifier collides with the reserved `Hidden` sentinel.
    #[error("identifier is reserved: {0}")]
    ReservedIdentifier(String),

    /// Another variable in the project already uses this identifier.
    #[error("identifier already in use: {0}")]
    DuplicateIdentifier(String),

    /// No variable with the given identifier exists.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// A stored record has an invalid structure.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

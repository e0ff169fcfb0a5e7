//! Strand Domain - Core project types
//!
//! This crate defines the domain model for Strand projects: variables,
//! conditional containers, dimensions, the snapshot that bundles them and
//! the session-scoped selection state.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod id;
pub mod persistence;
pub mod project;
pub mod selection;

pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use project::{
    Dimension, DimensionValue, HIDDEN, ProjectSnapshot, Variable, VariableId, VariableKind,
    placeholder_for,
};
pub use selection::{Selection, SelectionState};

//! Strand Application - Resolution engine and use cases
//!
//! This crate holds the placeholder scanner, the indexed variable store, the
//! selection rules, the resolution engine and usage analysis, plus the use
//! cases that load, edit and save projects through the ports it defines.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use config::{DEFAULT_MAX_DEPTH, ResolverConfig};
pub use error::{ApplicationError, ApplicationResult};
pub use variable_resolver::{
    ResolutionResult, SelectionError, SelectionRules, UsageAnalyzer, UsageError, UsageRecord,
    VariableResolver, VariableStore,
};

//! Persistence format types
//!
//! These mirror the on-disk project file. They keep the legacy naming fields
//! older projects still carry; conversion into the domain types collapses
//! them into one canonical identifier plus read-time aliases.

mod common;
mod project;
mod records;

pub use common::{CURRENT_SCHEMA_VERSION, Id};
pub use project::ProjectRecord;
pub use records::{DimensionRecord, DimensionValueRecord, VariableRecord};

//! Variable resolution module
//!
//! Scanning, indexing, selection and resolution of `{{identifier}}`
//! references, plus the usage analysis that guards deletions.
//!
//! # Usage
//!
//! ```
//! use strand_application::variable_resolver::{VariableResolver, VariableStore};
//! use strand_domain::{Dimension, ProjectSnapshot, Selection, SelectionState, Variable};
//!
//! let store = VariableStore::new(
//!     ProjectSnapshot::new()
//!         .with_variable(Variable::plain("1", "greeting", "Hi {{name}}"))
//!         .with_variable(Variable::conditional("2", "name"))
//!         .with_variable(Variable::plain("3", "Alice", "Alice"))
//!         .with_variable(Variable::plain("4", "Bob", "Bob"))
//!         .with_dimension(Dimension::new("name").with_values(["Alice", "Bob"])),
//! );
//!
//! let resolver = VariableResolver::new(&store);
//! let mut state = SelectionState::new();
//! state.set("name", Selection::spawn("Bob"));
//!
//! let result = resolver.resolve("Hi {{name}}", &mut state);
//! assert_eq!(result.resolved, "Hi Bob");
//! ```

pub mod engine;
pub mod parser;
mod relationships;
pub mod selection;
pub mod store;
pub mod usage;

pub use engine::{ResolutionResult, VariableResolver};
pub use parser::{
    Placeholder, Placeholders, contains_placeholder, has_placeholders, is_valid_identifier,
    placeholder_names, scan,
};
pub use selection::{SelectionChange, SelectionError, SelectionRules, SlotState};
pub use store::{SpawnSlot, VariableStore};
pub use usage::{SpawnUsage, UsageAnalyzer, UsageError, UsageRecord, UsageType};

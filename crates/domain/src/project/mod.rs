//! Project domain types

mod dimension;
mod snapshot;
mod variable;

pub use dimension::{Dimension, DimensionValue};
pub use snapshot::ProjectSnapshot;
pub use variable::{HIDDEN, Variable, VariableId, VariableKind, placeholder_for};

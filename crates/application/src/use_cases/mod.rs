//! Application use cases (business logic orchestration).

mod dimensions;
mod project;

pub use dimensions::{RenameReport, SyncReport, rename_identifier, sync_dimensions};
pub use project::{DeleteVariable, DeleteVariableOutput, LoadProject, SaveProject};

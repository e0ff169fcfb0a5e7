//! Common types shared across persistence models.

/// Current schema version for the project file format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// An opaque string id as stored on disk.
pub type Id = String;

/// Returns the trimmed value if it is non-empty.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

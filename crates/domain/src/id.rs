//! Id generation for dimensions created at runtime.
//!
//! Variables always arrive with a store-assigned id; only dimensions created
//! by the engine (see [`crate::Dimension::new`]) need a fresh one.

use uuid::Uuid;

/// Generates a fresh, time-ordered dimension id.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_v7() {
        let id = Uuid::parse_str(&generate_id()).unwrap();
        assert_eq!(id.get_version_num(), 7);
    }

    #[test]
    fn test_generated_ids_are_unique_and_ordered() {
        let first = generate_id();
        let second = generate_id();
        assert_ne!(first, second);
        assert!(first < second);
    }
}

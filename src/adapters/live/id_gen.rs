//! UUID-backed message identifiers.

use uuid::Uuid;

use crate::ports::IdGenerator;

/// Generates random v4 UUIDs for chat messages.
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_uuids() {
        let ids = UuidGenerator;
        let first = ids.generate_id();
        assert_ne!(first, ids.generate_id());
        assert!(Uuid::parse_str(&first).is_ok());
    }
}

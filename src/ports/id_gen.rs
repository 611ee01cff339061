//! ID generator port for chat message identifiers.

/// Generates unique identifiers.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}

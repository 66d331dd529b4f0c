//! Identifier generation.

use uuid::Uuid;

/// Produces globally-unique, time-orderable identifiers for new records.
///
/// Abstracting generation keeps identifiers opaque to the store and lets
/// tests substitute a predictable sequence.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUIDv7 generator. Time-ordered and collision-free at practical volumes;
/// used uniformly by every adapter so all identifiers share one format.
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

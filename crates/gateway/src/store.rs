//! In-memory message store.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

/// A stored message. Immutable once saved: there is no update or delete, so
/// an identifier maps to exactly one `(author, text)` pair for the lifetime
/// of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Opaque identifier assigned by the [`IdGenerator`](crate::id::IdGenerator)
    /// at creation, never by a caller.
    pub id: String,
    pub author: String,
    pub text: String,
}

/// Store errors.
///
/// The in-memory backend never fails; the error type exists so that adapters
/// and the operation layer do not change shape when a real backend is
/// plugged in.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
}

/// Repository port for message persistence.
///
/// Only the operation layer holds a repository; protocol adapters never
/// touch it directly.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Inserts the record under `message.id`.
    async fn save(&self, message: Message) -> Result<(), StoreError>;

    /// Returns the stored record, or `None` if the identifier is absent.
    async fn get(&self, id: &str) -> Result<Option<Message>, StoreError>;
}

/// Process-wide in-memory store, created empty at startup and discarded at
/// exit.
///
/// Access goes through a [`RwLock`] so a `get` that begins after a `save`
/// for the same identifier has returned observes that record, and reads for
/// unrelated identifiers never observe partial state. Cancellation is
/// cooperative: a caller that drops its future abandons the operation at the
/// lock boundary.
#[derive(Default)]
pub struct MemoryStore {
    messages: RwLock<HashMap<String, Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn save(&self, message: Message) -> Result<(), StoreError> {
        self.messages
            .write()
            .await
            .insert(message.id.clone(), message);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Message>, StoreError> {
        Ok(self.messages.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, author: &str, text: &str) -> Message {
        Message {
            id: id.to_string(),
            author: author.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn save_then_get_returns_the_record() {
        let store = MemoryStore::new();
        store
            .save(message("m-1", "alice", "hi"))
            .await
            .expect("save");

        let found = store.get("m-1").await.expect("get");
        assert_eq!(found, Some(message("m-1", "alice", "hi")));
    }

    #[tokio::test]
    async fn get_unknown_id_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").await.expect("get"), None);
    }

    #[tokio::test]
    async fn records_under_distinct_ids_are_independent() {
        let store = MemoryStore::new();
        store.save(message("a", "alice", "one")).await.expect("save");
        store.save(message("b", "bob", "two")).await.expect("save");

        assert_eq!(store.get("a").await.expect("get"), Some(message("a", "alice", "one")));
        assert_eq!(store.get("b").await.expect("get"), Some(message("b", "bob", "two")));
    }
}

//! The shared operation layer.
//!
//! Every protocol adapter routes through [`Operations`]; none of them reads
//! or writes the store directly. Identical input through any adapter
//! therefore yields identical stored state.

use std::sync::Arc;

use thiserror::Error;

use crate::id::{IdGenerator, UuidGenerator};
use crate::store::{MemoryStore, Message, MessageRepository};

/// Operation-layer failures.
///
/// This layer knows nothing about HTTP status codes or gRPC status codes;
/// adapters translate these two conditions into their protocol's native
/// error representation.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("message {0} not found")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// The single business-logic boundary: `post` and `get`.
pub struct Operations {
    store: Arc<dyn MessageRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl Operations {
    pub fn new(store: Arc<dyn MessageRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Default wiring: in-memory store, UUIDv7 identifiers.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(UuidGenerator))
    }

    /// Generates a fresh identifier, stores the message, and returns the
    /// identifier. A retry creates a second, distinct record; posting is
    /// never idempotent.
    pub async fn post(&self, author: &str, text: &str) -> Result<String, OpError> {
        let id = self.ids.generate();

        self.store
            .save(Message {
                id: id.clone(),
                author: author.to_string(),
                text: text.to_string(),
            })
            .await
            .map_err(|err| OpError::Internal(err.to_string()))?;

        Ok(id)
    }

    /// Returns the stored message, or [`OpError::NotFound`] if the
    /// identifier is absent.
    pub async fn get(&self, id: &str) -> Result<Message, OpError> {
        match self.store.get(id).await {
            Ok(Some(message)) => Ok(message),
            Ok(None) => Err(OpError::NotFound(id.to_string())),
            Err(err) => Err(OpError::Internal(err.to_string())),
        }
    }
}

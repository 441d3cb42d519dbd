//! Tracking of open multi-turn dialogues. The store owns the id→timestamp
//! map and nothing else; contexts travel with the caller, so a conversation
//! entry exists only so a UI can detect a stale dialogue and discard it.
//!
//! Expiry is lazy: nothing runs on a timer, entries are purged at the top of
//! every top-level parse call.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ConversationStore {
    inner: RwLock<HashMap<Uuid, DateTime<Utc>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new conversation and return its id.
    pub fn begin(&self, now: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        let mut map = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        map.insert(id, now);
        tracing::debug!(conversation_id = %id, "conversation opened");
        id
    }

    /// Drop every conversation older than `timeout`.
    pub fn prune(&self, now: DateTime<Utc>, timeout: Duration) {
        let mut map = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = map.len();
        map.retain(|_, created| now.signed_duration_since(*created) < timeout);
        let pruned = before - map.len();
        if pruned > 0 {
            tracing::debug!(pruned, "expired conversations pruned");
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Second-level cache of loaded entities, consulted by [`crate::Db::get_by_id`]
//! when a time-to-live applies.

use crate::entity::Node;

use weft_core::stmt::Key;

use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Mutex,
    time::{Duration, Instant},
};

/// Stores loaded entities by entity type and key.
pub trait ObjectCache: Debug + Send + Sync + 'static {
    /// A live entry, if any
    fn get(&self, entity_type: &str, key: &Key) -> Option<Node>;

    fn put(&self, entity_type: &str, key: Key, node: Node, ttl: Duration);

    /// Drop the entry, called after the entity is written or deleted
    fn invalidate(&self, entity_type: &str, key: &Key);
}

/// Process-local [`ObjectCache`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<(String, Key), Entry>>,
}

#[derive(Debug)]
struct Entry {
    expires_at: Instant,
    node: Node,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, Key), Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectCache for MemoryCache {
    fn get(&self, entity_type: &str, key: &Key) -> Option<Node> {
        let mut entries = self.lock();
        let id = (entity_type.to_string(), key.clone());

        match entries.get(&id) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.node.clone()),
            Some(_) => {
                entries.remove(&id);
                None
            }
            None => None,
        }
    }

    fn put(&self, entity_type: &str, key: Key, node: Node, ttl: Duration) {
        let entry = Entry {
            expires_at: Instant::now() + ttl,
            node,
        };
        self.lock().insert((entity_type.to_string(), key), entry);
    }

    fn invalidate(&self, entity_type: &str, key: &Key) {
        self.lock().remove(&(entity_type.to_string(), key.clone()));
    }
}

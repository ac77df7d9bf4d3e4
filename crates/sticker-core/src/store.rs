//! Collection store abstraction
//!
//! Each collection is persisted as one JSON array under a logical key and is
//! always read and written as a whole.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Albums,
    Pages,
    Stickers,
    Packets,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 4] = [
        CollectionKey::Albums,
        CollectionKey::Pages,
        CollectionKey::Stickers,
        CollectionKey::Packets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Albums => "album",
            CollectionKey::Pages => "pagine",
            CollectionKey::Stickers => "figurine",
            CollectionKey::Packets => "pacchetti",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Serialized collection, `None` if it was never written
    async fn load(&self, key: CollectionKey) -> Result<Option<String>>;

    /// Replace the whole collection
    async fn save(&self, key: CollectionKey, payload: String) -> Result<()>;
}

/// Store kept in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn load(&self, key: CollectionKey) -> Result<Option<String>> {
        Ok(self.collections.read().await.get(&key).cloned())
    }

    async fn save(&self, key: CollectionKey, payload: String) -> Result<()> {
        self.collections.write().await.insert(key, payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_replaces() {
        let store = MemoryStore::new();
        assert!(store.load(CollectionKey::Albums).await.unwrap().is_none());

        store
            .save(CollectionKey::Albums, "[1]".to_string())
            .await
            .unwrap();
        store
            .save(CollectionKey::Albums, "[2]".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.load(CollectionKey::Albums).await.unwrap().as_deref(),
            Some("[2]")
        );
        assert!(store.load(CollectionKey::Packets).await.unwrap().is_none());
    }

    #[test]
    fn test_keys() {
        let keys: Vec<&str> = CollectionKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["album", "pagine", "figurine", "pacchetti"]);
    }
}

//! Typed access to the catalog collections
//!
//! Every operation loads the collections it needs, mutates them in memory and
//! writes each touched collection back whole.

mod albums;
mod packets;
mod pages;
mod stickers;

pub use albums::AlbumUpdate;
pub use stickers::{NewSticker, StickerUpdate};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{CollectionKey, CollectionStore, Platform, Result, Syndication};

pub struct Catalog<S> {
    store: S,
    platforms: Vec<Platform>,
}

impl<S: CollectionStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            platforms: Platform::ALL.to_vec(),
        }
    }

    /// Platforms that new entities get a syndication entry for
    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn default_syndication(&self) -> Syndication {
        Syndication::for_platforms(&self.platforms)
    }

    /// Whole collection, empty if absent
    pub async fn load_collection<T: DeserializeOwned>(&self, key: CollectionKey) -> Result<Vec<T>> {
        match self.store.load(key).await? {
            Some(payload) => {
                let items: Vec<T> = serde_json::from_str(&payload)?;
                debug!(collection = %key, count = items.len(), "loaded collection");
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    pub async fn save_collection<T: Serialize>(&self, key: CollectionKey, items: &[T]) -> Result<()> {
        let payload = serde_json::to_string(items)?;
        self.store.save(key, payload).await?;
        debug!(collection = %key, count = items.len(), "saved collection");
        Ok(())
    }

    /// Every collection as a JSON object keyed by collection name
    pub async fn export(&self) -> Result<serde_json::Value> {
        let mut out = serde_json::Map::new();
        for key in CollectionKey::ALL {
            let items: Vec<serde_json::Value> = self.load_collection(key).await?;
            out.insert(key.as_str().to_string(), serde_json::Value::Array(items));
        }
        Ok(serde_json::Value::Object(out))
    }
}

/// Case-insensitive substring match; an empty query matches everything
pub(crate) fn matches_query(name: &str, query: Option<&str>) -> bool {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => name.to_lowercase().contains(&q.to_lowercase()),
        None => true,
    }
}

pub(crate) fn require_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(crate::CoreError::EmptyName);
    }
    Ok(trimmed.to_string())
}

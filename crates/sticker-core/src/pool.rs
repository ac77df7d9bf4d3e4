//! Stickers available to a packet draft for one album

use crate::{Page, Sticker};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    pub sticker_id: String,
    pub name: String,
}

/// Stickers of one album, sorted by display name (case-insensitive) then id
#[derive(Debug, Clone, Default)]
pub struct StickerPool {
    album_id: Option<String>,
    entries: Vec<PoolEntry>,
}

impl StickerPool {
    pub fn for_album(album_id: &str, stickers: &[Sticker], pages: &[Page]) -> Self {
        let entries = stickers
            .iter()
            .filter(|s| s.resolve_album(pages) == Some(album_id))
            .map(|s| PoolEntry {
                sticker_id: s.id.clone(),
                name: s.nome.clone(),
            })
            .collect();
        Self::from_entries(album_id, entries)
    }

    pub fn from_entries(album_id: &str, mut entries: Vec<PoolEntry>) -> Self {
        entries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.sticker_id.cmp(&b.sticker_id))
        });
        Self {
            album_id: Some(album_id.to_string()),
            entries,
        }
    }

    pub fn album_id(&self) -> Option<&str> {
        self.album_id.as_deref()
    }

    /// Entries visible to a draft bound to `album_id`; empty for any other album
    pub fn entries_for(&self, album_id: Option<&str>) -> &[PoolEntry] {
        match (self.album_id.as_deref(), album_id) {
            (Some(mine), Some(theirs)) if mine == theirs => &self.entries,
            _ => &[],
        }
    }

    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    /// Whether a draft bound to `album_id` may select `sticker_id`
    pub fn contains(&self, album_id: Option<&str>, sticker_id: &str) -> bool {
        self.entries_for(album_id)
            .iter()
            .any(|e| e.sticker_id == sticker_id)
    }
}

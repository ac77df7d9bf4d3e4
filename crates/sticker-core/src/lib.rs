//! Core domain models and logic for the sticker album catalog
//!
//! This crate contains:
//! - Domain models (Album, Page, Sticker, Packet, Syndication)
//! - Packet draft reconciliation (the packet configuration state machine)
//! - Catalog services over a whole-collection store

pub mod album;
pub mod catalog;
pub mod draft;
pub mod error;
pub mod packet;
pub mod pool;
pub mod sticker;
pub mod store;
pub mod syndication;

pub use album::{Album, Page};
pub use catalog::{AlbumUpdate, Catalog, NewSticker, StickerUpdate};
pub use draft::{DraftEvent, MAX_WEIGHT, PacketDraft, Selection, reduce};
pub use error::{CoreError, Result};
pub use packet::{Packet, PacketKind, PacketSticker};
pub use pool::{PoolEntry, StickerPool};
pub use sticker::{Sticker, StickerKind};
pub use store::{CollectionKey, CollectionStore, MemoryStore};
pub use syndication::{Platform, Syndication, SyndicationEdit, SyndicationEntry};

/// Fresh opaque identifier for a new entity
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

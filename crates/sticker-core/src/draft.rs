//! Packet draft reconciliation
//!
//! A [`PacketDraft`] is the configuration-in-progress of a packet. Every edit
//! arrives as a [`DraftEvent`] and is applied synchronously against the
//! [`StickerPool`] of the draft's current album. The draft can only reach a
//! state where:
//! - every selected sticker belongs to the pool of the selected album
//! - positions form the contiguous sequence `1..=len`
//! - for static packets, a target-count change converges to
//!   `len(selections) == target_count`

use time::OffsetDateTime;
use tracing::debug;

use crate::{
    CoreError, Packet, PacketKind, PacketSticker, Result, StickerPool, Syndication,
    SyndicationEdit,
};

pub const MAX_WEIGHT: u32 = 100;

/// A selected sticker with its rank and (dynamic only) frequency weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub sticker_id: String,
    pub position: u32,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftEvent {
    /// Drops the whole selection and resets the target to zero
    AlbumChanged(String),
    TargetCountChanged(u32),
    /// Adds the sticker at the end or removes it
    StickerToggled(String),
    /// Moves a sticker to a 0-based index
    StickerMoved { sticker_id: String, index: usize },
    WeightChanged { sticker_id: String, weight: i64 },
    Renamed(String),
    Syndication(SyndicationEdit),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PacketDraft {
    packet_id: Option<String>,
    created_at: Option<OffsetDateTime>,
    name: String,
    mode: PacketKind,
    target_count: u32,
    album_id: Option<String>,
    selections: Vec<Selection>,
    syndication: Syndication,
}

impl PacketDraft {
    pub fn new(mode: PacketKind) -> Self {
        Self {
            packet_id: None,
            created_at: None,
            name: String::new(),
            mode,
            target_count: 1,
            album_id: None,
            selections: Vec::new(),
            syndication: Syndication::default(),
        }
    }

    /// Hydrate a draft from a stored packet.
    ///
    /// Stored stickers that are no longer part of the album pool are dropped.
    pub fn from_packet(packet: &Packet, pool: &StickerPool) -> Self {
        let album_id = packet.album_id.clone();
        let available = pool.entries_for(album_id.as_deref());

        let mut stored: Vec<&PacketSticker> = packet
            .stickers()
            .iter()
            .filter(|s| available.iter().any(|e| e.sticker_id == s.figurina_id))
            .collect();
        stored.sort_by_key(|s| s.ordine);

        let mut draft = Self {
            packet_id: Some(packet.id.clone()),
            created_at: Some(packet.created_at),
            name: packet.nome.clone(),
            mode: packet.tipo,
            target_count: packet.num_figurine,
            album_id,
            selections: Vec::with_capacity(stored.len()),
            syndication: packet.syndication.clone(),
        };

        for sticker in stored {
            if draft.position_of(&sticker.figurina_id).is_some() {
                continue;
            }
            draft.selections.push(Selection {
                sticker_id: sticker.figurina_id.clone(),
                position: 0,
                weight: sticker.frequenza.unwrap_or(0).min(MAX_WEIGHT),
            });
        }
        draft.renumber();
        draft
    }

    pub fn packet_id(&self) -> Option<&str> {
        self.packet_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> PacketKind {
        self.mode
    }

    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    pub fn album_id(&self) -> Option<&str> {
        self.album_id.as_deref()
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn syndication(&self) -> &Syndication {
        &self.syndication
    }

    pub fn weight_sum(&self) -> u32 {
        self.selections.iter().map(|s| s.weight).sum()
    }

    pub fn apply(&mut self, event: DraftEvent, pool: &StickerPool) {
        match event {
            DraftEvent::AlbumChanged(album_id) => {
                debug!(album_id = %album_id, "album changed, clearing selection");
                self.album_id = Some(album_id);
                self.selections.clear();
                self.target_count = 0;
            }
            DraftEvent::TargetCountChanged(requested) => match self.mode {
                PacketKind::Statico => self.reconcile_target(requested, pool),
                PacketKind::Dinamico => self.target_count = requested,
            },
            DraftEvent::StickerToggled(sticker_id) => self.toggle(sticker_id, pool),
            DraftEvent::StickerMoved { sticker_id, index } => self.move_to(&sticker_id, index),
            DraftEvent::WeightChanged { sticker_id, weight } => {
                if !self.mode.is_dynamic() {
                    return;
                }
                if let Some(selection) = self.selections.iter_mut().find(|s| s.sticker_id == sticker_id) {
                    selection.weight = weight.clamp(0, i64::from(MAX_WEIGHT)) as u32;
                }
            }
            DraftEvent::Renamed(name) => self.name = name,
            DraftEvent::Syndication(edit) => self.syndication.apply(edit),
        }
    }

    /// Check that the draft can be committed
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyName);
        }
        if self.mode.is_dynamic() && !self.selections.is_empty() {
            let sum = self.weight_sum();
            if sum != MAX_WEIGHT {
                return Err(CoreError::WeightSum { sum });
            }
        }
        Ok(())
    }

    /// Build the record to persist, keeping id and creation time of a hydrated draft
    pub fn to_packet(&self) -> Result<Packet> {
        self.validate()?;

        let dynamic = self.mode.is_dynamic();
        let figurine = self.album_id.as_ref().map(|_| {
            self.selections
                .iter()
                .map(|s| PacketSticker {
                    figurina_id: s.sticker_id.clone(),
                    ordine: s.position,
                    frequenza: dynamic.then_some(s.weight),
                })
                .collect()
        });

        Ok(Packet {
            id: self.packet_id.clone().unwrap_or_else(crate::new_id),
            nome: self.name.trim().to_string(),
            num_figurine: self.target_count,
            tipo: self.mode,
            syndication: self.syndication.clone(),
            created_at: self.created_at.unwrap_or_else(OffsetDateTime::now_utc),
            album_id: self.album_id.clone(),
            figurine,
        })
    }

    fn reconcile_target(&mut self, requested: u32, pool: &StickerPool) {
        let available = pool.entries_for(self.album_id.as_deref());
        if available.is_empty() {
            self.target_count = 0;
            self.selections.clear();
            return;
        }

        let max = u32::try_from(available.len()).unwrap_or(u32::MAX);
        let clamped = requested.clamp(1, max);
        if clamped != requested {
            debug!(requested, clamped, "target count clamped to album size");
            return self.reconcile_target(clamped, pool);
        }

        self.target_count = clamped;
        let target = clamped as usize;

        if self.selections.len() > target {
            self.selections.truncate(target);
        } else if self.selections.len() < target {
            let missing = target - self.selections.len();
            let candidates: Vec<String> = available
                .iter()
                .filter(|e| self.position_of(&e.sticker_id).is_none())
                .take(missing)
                .map(|e| e.sticker_id.clone())
                .collect();
            for sticker_id in candidates {
                self.selections.push(Selection {
                    sticker_id,
                    position: 0,
                    weight: 0,
                });
            }
        }
        self.renumber();
    }

    fn toggle(&mut self, sticker_id: String, pool: &StickerPool) {
        if let Some(index) = self.position_of(&sticker_id) {
            self.selections.remove(index);
        } else {
            if !pool.contains(self.album_id.as_deref(), &sticker_id) {
                debug!(sticker_id = %sticker_id, "ignoring sticker outside the selected album");
                return;
            }
            self.selections.push(Selection {
                sticker_id,
                position: 0,
                weight: 0,
            });
        }
        self.renumber();

        if self.mode == PacketKind::Statico {
            self.target_count = self.selections.len() as u32;
        }
    }

    fn move_to(&mut self, sticker_id: &str, index: usize) {
        if index >= self.selections.len() {
            return;
        }
        let Some(from) = self.position_of(sticker_id) else {
            return;
        };
        let moved = self.selections.remove(from);
        self.selections.insert(index, moved);
        self.renumber();
    }

    fn position_of(&self, sticker_id: &str) -> Option<usize> {
        self.selections.iter().position(|s| s.sticker_id == sticker_id)
    }

    fn renumber(&mut self) {
        for (i, selection) in self.selections.iter_mut().enumerate() {
            selection.position = i as u32 + 1;
        }
    }
}

/// Pure form of [`PacketDraft::apply`]
pub fn reduce(mut draft: PacketDraft, event: DraftEvent, pool: &StickerPool) -> PacketDraft {
    draft.apply(event, pool);
    draft
}

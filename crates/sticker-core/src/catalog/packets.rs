use tracing::info;

use super::{Catalog, require_name};
use crate::{
    CollectionKey, CollectionStore, CoreError, Packet, PacketDraft, PacketKind, Page, Result,
    Sticker, StickerPool,
};

impl<S: CollectionStore> Catalog<S> {
    pub async fn create_packet(&self, nome: &str, tipo: PacketKind, num_figurine: u32) -> Result<Packet> {
        let nome = require_name(nome)?;
        let mut packets: Vec<Packet> = self.load_collection(CollectionKey::Packets).await?;

        let packet = Packet::new(nome, tipo, num_figurine, self.default_syndication());
        packets.push(packet.clone());
        self.save_collection(CollectionKey::Packets, &packets).await?;

        info!(packet_id = %packet.id, kind = %tipo, "created packet");
        Ok(packet)
    }

    pub async fn list_packets(&self) -> Result<Vec<Packet>> {
        self.load_collection(CollectionKey::Packets).await
    }

    pub async fn get_packet(&self, id: &str) -> Result<Packet> {
        let packets: Vec<Packet> = self.load_collection(CollectionKey::Packets).await?;
        packets
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::PacketNotFound(id.to_string()))
    }

    pub async fn delete_packet(&self, id: &str) -> Result<Packet> {
        let mut packets: Vec<Packet> = self.load_collection(CollectionKey::Packets).await?;
        let index = packets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::PacketNotFound(id.to_string()))?;
        let removed = packets.remove(index);

        self.save_collection(CollectionKey::Packets, &packets).await?;
        info!(packet_id = %id, "deleted packet");
        Ok(removed)
    }

    /// Stickers a draft bound to `album_id` may select
    pub async fn sticker_pool(&self, album_id: &str) -> Result<StickerPool> {
        let pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        let stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;
        Ok(StickerPool::for_album(album_id, &stickers, &pages))
    }

    /// Open a stored packet for editing, with the pool of its album
    pub async fn open_draft(&self, id: &str) -> Result<(PacketDraft, StickerPool)> {
        let packet = self.get_packet(id).await?;
        let pool = match packet.album_id.as_deref() {
            Some(album_id) => self.sticker_pool(album_id).await?,
            None => StickerPool::default(),
        };
        Ok((PacketDraft::from_packet(&packet, &pool), pool))
    }

    /// Commit a draft, replacing the stored packet with the same id or appending it.
    ///
    /// Nothing is written when the draft does not validate.
    pub async fn save_draft(&self, draft: &PacketDraft) -> Result<Packet> {
        let packet = draft.to_packet()?;
        let mut packets: Vec<Packet> = self.load_collection(CollectionKey::Packets).await?;

        match packets.iter_mut().find(|p| p.id == packet.id) {
            Some(existing) => *existing = packet.clone(),
            None => packets.push(packet.clone()),
        }
        self.save_collection(CollectionKey::Packets, &packets).await?;

        info!(
            packet_id = %packet.id,
            stickers = packet.stickers().len(),
            "saved packet"
        );
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Catalog, CoreError, DraftEvent, MemoryStore, NewSticker, PacketDraft, PacketKind,
    };

    async fn album_with(catalog: &Catalog<MemoryStore>, names: &[&str]) -> (String, Vec<String>) {
        let album = catalog.create_album("Album", 2024).await.unwrap();
        let mut ids = Vec::new();
        for name in names {
            let sticker = catalog
                .create_sticker(NewSticker::new(name, &album.id))
                .await
                .unwrap();
            ids.push(sticker.id);
        }
        (album.id, ids)
    }

    #[tokio::test]
    async fn test_static_packet_workflow() {
        let catalog = Catalog::new(MemoryStore::new());
        let (album_id, _) = album_with(&catalog, &["E", "D", "C", "B", "A"]).await;
        let packet = catalog
            .create_packet("Starter", PacketKind::Statico, 1)
            .await
            .unwrap();

        let (mut draft, _) = catalog.open_draft(&packet.id).await.unwrap();
        let pool = catalog.sticker_pool(&album_id).await.unwrap();
        draft.apply(DraftEvent::AlbumChanged(album_id.clone()), &pool);
        draft.apply(DraftEvent::TargetCountChanged(8), &pool);
        catalog.save_draft(&draft).await.unwrap();

        let stored = catalog.list_packets().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].num_figurine, 5);
        let ordine: Vec<u32> = stored[0].stickers().iter().map(|s| s.ordine).collect();
        assert_eq!(ordine, vec![1, 2, 3, 4, 5]);
        assert_eq!(stored[0].id, packet.id);
    }

    #[tokio::test]
    async fn test_rejected_save_writes_nothing() {
        let catalog = Catalog::new(MemoryStore::new());
        let (album_id, ids) = album_with(&catalog, &["A", "B"]).await;
        let pool = catalog.sticker_pool(&album_id).await.unwrap();

        let mut draft = PacketDraft::new(PacketKind::Dinamico);
        draft.apply(DraftEvent::Renamed("Lucky".to_string()), &pool);
        draft.apply(DraftEvent::AlbumChanged(album_id), &pool);
        for (id, weight) in ids.iter().zip([60, 30]) {
            draft.apply(DraftEvent::StickerToggled(id.clone()), &pool);
            draft.apply(
                DraftEvent::WeightChanged {
                    sticker_id: id.clone(),
                    weight,
                },
                &pool,
            );
        }

        let err = catalog.save_draft(&draft).await.unwrap_err();
        assert!(matches!(err, CoreError::WeightSum { sum: 90 }));
        assert!(err.is_validation());
        assert!(catalog.list_packets().await.unwrap().is_empty());

        draft.apply(
            DraftEvent::WeightChanged {
                sticker_id: ids[1].clone(),
                weight: 40,
            },
            &pool,
        );
        let saved = catalog.save_draft(&draft).await.unwrap();
        assert_eq!(catalog.get_packet(&saved.id).await.unwrap().stickers().len(), 2);
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let catalog = Catalog::new(MemoryStore::new());
        let packet = catalog
            .create_packet("Before", PacketKind::Statico, 1)
            .await
            .unwrap();
        catalog
            .create_packet("Other", PacketKind::Dinamico, 3)
            .await
            .unwrap();

        let (mut draft, pool) = catalog.open_draft(&packet.id).await.unwrap();
        draft.apply(DraftEvent::Renamed("After".to_string()), &pool);
        catalog.save_draft(&draft).await.unwrap();

        let packets = catalog.list_packets().await.unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].nome, "After");
        assert_eq!(packets[0].id, packet.id);
    }

    #[tokio::test]
    async fn test_open_draft_drops_deleted_stickers() {
        let catalog = Catalog::new(MemoryStore::new());
        let (album_id, ids) = album_with(&catalog, &["A", "B", "C"]).await;
        let pool = catalog.sticker_pool(&album_id).await.unwrap();

        let mut draft = PacketDraft::new(PacketKind::Statico);
        draft.apply(DraftEvent::Renamed("Fixed".to_string()), &pool);
        draft.apply(DraftEvent::AlbumChanged(album_id), &pool);
        draft.apply(DraftEvent::TargetCountChanged(3), &pool);
        let saved = catalog.save_draft(&draft).await.unwrap();

        catalog.delete_sticker(&ids[0]).await.unwrap();
        let (reopened, _) = catalog.open_draft(&saved.id).await.unwrap();
        let positions: Vec<u32> = reopened.selections().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2]);
        assert!(reopened.selections().iter().all(|s| s.sticker_id != ids[0]));
    }

    #[tokio::test]
    async fn test_delete_packet() {
        let catalog = Catalog::new(MemoryStore::new());
        let packet = catalog
            .create_packet("Gone", PacketKind::Statico, 1)
            .await
            .unwrap();
        catalog.delete_packet(&packet.id).await.unwrap();
        assert!(matches!(
            catalog.get_packet(&packet.id).await,
            Err(CoreError::PacketNotFound(_))
        ));
        assert!(matches!(
            catalog.create_packet(" ", PacketKind::Statico, 1).await,
            Err(CoreError::EmptyName)
        ));
    }
}

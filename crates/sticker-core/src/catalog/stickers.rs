use tracing::info;

use super::pages::renumber_page;
use super::{Catalog, matches_query, require_name};
use crate::{
    Album, CollectionKey, CollectionStore, CoreError, Page, Result, Sticker, StickerKind,
};

#[derive(Debug, Clone)]
pub struct NewSticker {
    pub nome: String,
    pub album_id: String,
    pub tipo: StickerKind,
    pub doppia: bool,
    pub link: Option<String>,
}

impl NewSticker {
    pub fn new(nome: &str, album_id: &str) -> Self {
        Self {
            nome: nome.to_string(),
            album_id: album_id.to_string(),
            tipo: StickerKind::Standard,
            doppia: false,
            link: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StickerUpdate {
    pub nome: Option<String>,
    pub tipo: Option<StickerKind>,
    pub doppia: Option<bool>,
    pub link: Option<String>,
}

impl<S: CollectionStore> Catalog<S> {
    /// Create a sticker numbered after the highest number in its album
    pub async fn create_sticker(&self, new: NewSticker) -> Result<Sticker> {
        let nome = require_name(&new.nome)?;
        if new.album_id.trim().is_empty() {
            return Err(CoreError::AlbumRequired);
        }
        let albums: Vec<Album> = self.load_collection(CollectionKey::Albums).await?;
        if !albums.iter().any(|a| a.id == new.album_id) {
            return Err(CoreError::AlbumNotFound(new.album_id));
        }

        let mut stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;
        let numero = stickers
            .iter()
            .filter(|s| s.album_id.as_deref() == Some(new.album_id.as_str()))
            .map(|s| s.numero)
            .max()
            .map_or(1, |n| n + 1);

        let mut sticker = Sticker::new(nome, numero, new.album_id);
        sticker.tipo = new.tipo;
        sticker.doppia = new.doppia;
        sticker.link = new.link.filter(|l| !l.is_empty());

        stickers.push(sticker.clone());
        self.save_collection(CollectionKey::Stickers, &stickers).await?;

        info!(sticker_id = %sticker.id, numero, "created sticker");
        Ok(sticker)
    }

    /// Stickers filtered by name and optionally by album, ordered by number
    pub async fn list_stickers(
        &self,
        query: Option<&str>,
        album_id: Option<&str>,
    ) -> Result<Vec<Sticker>> {
        let pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        let stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;

        let mut found: Vec<Sticker> = stickers
            .iter()
            .filter(|s| matches_query(&s.nome, query))
            .filter(|s| album_id.is_none_or(|id| s.resolve_album(&pages) == Some(id)))
            .cloned()
            .collect();
        found.sort_by_key(|s| s.numero);
        Ok(found)
    }

    pub async fn get_sticker(&self, id: &str) -> Result<Sticker> {
        let stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;
        stickers
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::StickerNotFound(id.to_string()))
    }

    pub async fn update_sticker(&self, id: &str, update: StickerUpdate) -> Result<Sticker> {
        let mut stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;
        let sticker = stickers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::StickerNotFound(id.to_string()))?;

        if let Some(nome) = update.nome {
            sticker.nome = require_name(&nome)?;
        }
        if let Some(tipo) = update.tipo {
            sticker.tipo = tipo;
        }
        if let Some(doppia) = update.doppia {
            sticker.doppia = doppia;
        }
        if let Some(link) = update.link {
            sticker.link = Some(link).filter(|l| !l.is_empty());
        }

        let updated = sticker.clone();
        self.save_collection(CollectionKey::Stickers, &stickers).await?;
        info!(sticker_id = %id, "updated sticker");
        Ok(updated)
    }

    pub async fn delete_sticker(&self, id: &str) -> Result<Sticker> {
        let mut stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;
        let index = stickers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::StickerNotFound(id.to_string()))?;
        let removed = stickers.remove(index);
        if let Some(page_id) = removed.pagina_id.as_deref() {
            renumber_page(&mut stickers, page_id);
        }

        self.save_collection(CollectionKey::Stickers, &stickers).await?;
        info!(sticker_id = %id, "deleted sticker");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Catalog, CoreError, MemoryStore, NewSticker, StickerKind, StickerUpdate};

    #[tokio::test]
    async fn test_numbering_per_album() {
        let catalog = Catalog::new(MemoryStore::new());
        let first = catalog.create_album("First", 2024).await.unwrap();
        let second = catalog.create_album("Second", 2024).await.unwrap();

        let a = catalog
            .create_sticker(NewSticker::new("A", &first.id))
            .await
            .unwrap();
        let b = catalog
            .create_sticker(NewSticker::new("B", &first.id))
            .await
            .unwrap();
        let c = catalog
            .create_sticker(NewSticker::new("C", &second.id))
            .await
            .unwrap();

        assert_eq!((a.numero, b.numero, c.numero), (1, 2, 1));

        catalog.delete_sticker(&a.id).await.unwrap();
        let d = catalog
            .create_sticker(NewSticker::new("D", &first.id))
            .await
            .unwrap();
        assert_eq!(d.numero, 3);
    }

    #[tokio::test]
    async fn test_delete_renumbers_page() {
        let catalog = Catalog::new(MemoryStore::new());
        let album = catalog.create_album("Album", 2024).await.unwrap();
        let page = catalog.create_page("Page 1", &album.id).await.unwrap();
        let mut ids = Vec::new();
        for name in ["A", "B", "C"] {
            let sticker = catalog
                .create_sticker(NewSticker::new(name, &album.id))
                .await
                .unwrap();
            catalog.toggle_page_sticker(&page.id, &sticker.id).await.unwrap();
            ids.push(sticker.id);
        }

        catalog.delete_sticker(&ids[0]).await.unwrap();

        let on_page = catalog.page_stickers(&page.id).await.unwrap();
        let remaining: Vec<(&str, Option<u32>)> =
            on_page.iter().map(|s| (s.nome.as_str(), s.ordine)).collect();
        assert_eq!(remaining, vec![("B", Some(1)), ("C", Some(2))]);
    }

    #[tokio::test]
    async fn test_create_requires_album() {
        let catalog = Catalog::new(MemoryStore::new());
        let err = catalog
            .create_sticker(NewSticker::new("A", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::AlbumRequired));

        let err = catalog
            .create_sticker(NewSticker::new("A", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::AlbumNotFound(_)));
    }

    #[tokio::test]
    async fn test_filter_and_update() {
        let catalog = Catalog::new(MemoryStore::new());
        let album = catalog.create_album("Album", 2024).await.unwrap();
        let other = catalog.create_album("Other", 2024).await.unwrap();
        let baggio = catalog
            .create_sticker(NewSticker::new("Roberto Baggio", &album.id))
            .await
            .unwrap();
        catalog
            .create_sticker(NewSticker::new("Paolo Maldini", &album.id))
            .await
            .unwrap();
        catalog
            .create_sticker(NewSticker::new("Roberto Mancini", &other.id))
            .await
            .unwrap();

        let found = catalog
            .list_stickers(Some("roberto"), Some(&album.id))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, baggio.id);

        let updated = catalog
            .update_sticker(
                &baggio.id,
                StickerUpdate {
                    tipo: Some(StickerKind::Speciale),
                    doppia: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.tipo, StickerKind::Speciale);
        assert!(updated.doppia);
        assert_eq!(updated.nome, "Roberto Baggio");
    }
}

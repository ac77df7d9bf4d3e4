use tracing::info;

use super::{Catalog, matches_query, require_name};
use crate::{
    Album, CollectionKey, CollectionStore, CoreError, Page, Result, Sticker, SyndicationEdit,
};

/// Changes to an existing album; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct AlbumUpdate {
    pub nome: Option<String>,
    pub anno: Option<i32>,
    pub syndication: Vec<SyndicationEdit>,
}

impl<S: CollectionStore> Catalog<S> {
    pub async fn create_album(&self, nome: &str, anno: i32) -> Result<Album> {
        let nome = require_name(nome)?;
        let mut albums: Vec<Album> = self.load_collection(CollectionKey::Albums).await?;

        let album = Album::new(nome, anno, self.default_syndication());
        albums.push(album.clone());
        self.save_collection(CollectionKey::Albums, &albums).await?;

        info!(album_id = %album.id, name = %album.nome, "created album");
        Ok(album)
    }

    pub async fn list_albums(&self, query: Option<&str>) -> Result<Vec<Album>> {
        let albums: Vec<Album> = self.load_collection(CollectionKey::Albums).await?;
        Ok(albums
            .into_iter()
            .filter(|a| matches_query(&a.nome, query))
            .collect())
    }

    pub async fn get_album(&self, id: &str) -> Result<Album> {
        let albums: Vec<Album> = self.load_collection(CollectionKey::Albums).await?;
        albums
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::AlbumNotFound(id.to_string()))
    }

    pub async fn update_album(&self, id: &str, update: AlbumUpdate) -> Result<Album> {
        let mut albums: Vec<Album> = self.load_collection(CollectionKey::Albums).await?;
        let album = albums
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::AlbumNotFound(id.to_string()))?;

        if let Some(nome) = update.nome {
            album.nome = require_name(&nome)?;
        }
        if let Some(anno) = update.anno {
            album.anno = anno;
        }
        for edit in update.syndication {
            album.syndication.apply(edit);
        }

        let updated = album.clone();
        self.save_collection(CollectionKey::Albums, &albums).await?;
        info!(album_id = %id, "updated album");
        Ok(updated)
    }

    /// Delete an album together with its pages and stickers
    pub async fn delete_album(&self, id: &str) -> Result<Album> {
        let mut albums: Vec<Album> = self.load_collection(CollectionKey::Albums).await?;
        let index = albums
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| CoreError::AlbumNotFound(id.to_string()))?;
        let album = albums.remove(index);

        let pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        let stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;

        let kept_stickers: Vec<Sticker> = stickers
            .iter()
            .filter(|s| s.resolve_album(&pages) != Some(id))
            .cloned()
            .collect();
        let removed_stickers = stickers.len() - kept_stickers.len();
        let kept_pages: Vec<Page> = pages.into_iter().filter(|p| p.album_id != id).collect();

        self.save_collection(CollectionKey::Albums, &albums).await?;
        self.save_collection(CollectionKey::Pages, &kept_pages).await?;
        self.save_collection(CollectionKey::Stickers, &kept_stickers)
            .await?;

        info!(album_id = %id, removed_stickers, "deleted album");
        Ok(album)
    }

    pub async fn album_sticker_count(&self, id: &str) -> Result<usize> {
        let pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        let stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;
        Ok(stickers
            .iter()
            .filter(|s| s.resolve_album(&pages) == Some(id))
            .count())
    }
}

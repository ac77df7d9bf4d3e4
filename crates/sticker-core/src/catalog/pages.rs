use tracing::info;

use super::{Catalog, matches_query, require_name};
use crate::{Album, CollectionKey, CollectionStore, CoreError, Page, Result, Sticker};

impl<S: CollectionStore> Catalog<S> {
    /// Create a page placed after the last page of its album
    pub async fn create_page(&self, nome: &str, album_id: &str) -> Result<Page> {
        let nome = require_name(nome)?;
        if album_id.trim().is_empty() {
            return Err(CoreError::AlbumRequired);
        }
        let albums: Vec<Album> = self.load_collection(CollectionKey::Albums).await?;
        if !albums.iter().any(|a| a.id == album_id) {
            return Err(CoreError::AlbumNotFound(album_id.to_string()));
        }

        let mut pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        let ordine = pages
            .iter()
            .filter(|p| p.album_id == album_id)
            .map(|p| p.ordine)
            .max()
            .map_or(1, |n| n + 1);

        let page = Page::new(nome, album_id.to_string(), ordine);
        pages.push(page.clone());
        self.save_collection(CollectionKey::Pages, &pages).await?;

        info!(page_id = %page.id, album_id, ordine, "created page");
        Ok(page)
    }

    pub async fn list_pages(&self, album_id: &str) -> Result<Vec<Page>> {
        let pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        let mut found: Vec<Page> = pages.into_iter().filter(|p| p.album_id == album_id).collect();
        found.sort_by_key(|p| p.ordine);
        Ok(found)
    }

    pub async fn get_page(&self, id: &str) -> Result<Page> {
        let pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        pages
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::PageNotFound(id.to_string()))
    }

    /// Stickers placed on a page, in page order
    pub async fn page_stickers(&self, page_id: &str) -> Result<Vec<Sticker>> {
        let stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;
        Ok(on_page(&stickers, page_id))
    }

    /// Stickers of the page's album matching `query`, ordered by number
    pub async fn available_stickers(&self, page_id: &str, query: Option<&str>) -> Result<Vec<Sticker>> {
        let pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        let page = find_page(&pages, page_id)?;
        let stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;

        let mut found: Vec<Sticker> = stickers
            .iter()
            .filter(|s| s.resolve_album(&pages) == Some(page.album_id.as_str()))
            .filter(|s| matches_query(&s.nome, query))
            .cloned()
            .collect();
        found.sort_by_key(|s| s.numero);
        Ok(found)
    }

    /// Attach a sticker at the end of the page, or detach it.
    ///
    /// Returns `true` when the sticker ends up on the page.
    pub async fn toggle_page_sticker(&self, page_id: &str, sticker_id: &str) -> Result<bool> {
        let pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        let page = find_page(&pages, page_id)?;
        let mut stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;

        let next_ordine = stickers
            .iter()
            .filter(|s| s.pagina_id.as_deref() == Some(page_id))
            .filter_map(|s| s.ordine)
            .max()
            .map_or(1, |n| n + 1);

        let index = stickers
            .iter()
            .position(|s| s.id == sticker_id)
            .ok_or_else(|| CoreError::StickerNotFound(sticker_id.to_string()))?;

        let previous_page = stickers[index].pagina_id.clone();
        let attached = if previous_page.as_deref() == Some(page_id) {
            let sticker = &mut stickers[index];
            sticker.pagina_id = None;
            sticker.ordine = None;
            false
        } else {
            if stickers[index].resolve_album(&pages) != Some(page.album_id.as_str()) {
                return Err(CoreError::StickerOutsideAlbum {
                    sticker_id: sticker_id.to_string(),
                    album_id: page.album_id.clone(),
                });
            }
            let sticker = &mut stickers[index];
            sticker.album_id.get_or_insert_with(|| page.album_id.clone());
            sticker.pagina_id = Some(page_id.to_string());
            sticker.ordine = Some(next_ordine);
            true
        };

        renumber_page(&mut stickers, page_id);
        if let Some(previous) = previous_page.as_deref().filter(|p| *p != page_id) {
            renumber_page(&mut stickers, previous);
        }
        self.save_collection(CollectionKey::Stickers, &stickers).await?;

        info!(page_id, sticker_id, attached, "toggled page sticker");
        Ok(attached)
    }

    /// Move a sticker to a 0-based index within its page.
    ///
    /// Returns `false` when the index is out of range or the sticker is not on the page.
    pub async fn move_page_sticker(&self, page_id: &str, sticker_id: &str, index: usize) -> Result<bool> {
        let mut stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;
        let mut order: Vec<String> = on_page(&stickers, page_id).into_iter().map(|s| s.id).collect();

        let Some(from) = order.iter().position(|id| id == sticker_id) else {
            return Ok(false);
        };
        if index >= order.len() || index == from {
            return Ok(false);
        }
        let moved = order.remove(from);
        order.insert(index, moved);

        for sticker in stickers.iter_mut() {
            if let Some(pos) = order.iter().position(|id| *id == sticker.id) {
                sticker.ordine = Some(pos as u32 + 1);
            }
        }
        self.save_collection(CollectionKey::Stickers, &stickers).await?;

        info!(page_id, sticker_id, index, "moved page sticker");
        Ok(true)
    }

    /// Delete a page; its stickers stay in the album, detached
    pub async fn delete_page(&self, id: &str) -> Result<Page> {
        let mut pages: Vec<Page> = self.load_collection(CollectionKey::Pages).await?;
        let index = pages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::PageNotFound(id.to_string()))?;
        let page = pages.remove(index);

        let mut stickers: Vec<Sticker> = self.load_collection(CollectionKey::Stickers).await?;
        for sticker in stickers.iter_mut().filter(|s| s.pagina_id.as_deref() == Some(id)) {
            sticker.album_id.get_or_insert_with(|| page.album_id.clone());
            sticker.pagina_id = None;
            sticker.ordine = None;
        }

        self.save_collection(CollectionKey::Pages, &pages).await?;
        self.save_collection(CollectionKey::Stickers, &stickers).await?;

        info!(page_id = %id, "deleted page");
        Ok(page)
    }
}

fn find_page<'a>(pages: &'a [Page], id: &str) -> Result<&'a Page> {
    pages
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CoreError::PageNotFound(id.to_string()))
}

fn on_page(stickers: &[Sticker], page_id: &str) -> Vec<Sticker> {
    let mut found: Vec<Sticker> = stickers
        .iter()
        .filter(|s| s.pagina_id.as_deref() == Some(page_id))
        .cloned()
        .collect();
    found.sort_by_key(|s| s.ordine.unwrap_or(0));
    found
}

pub(super) fn renumber_page(stickers: &mut [Sticker], page_id: &str) {
    let order: Vec<String> = on_page(stickers, page_id).into_iter().map(|s| s.id).collect();
    for sticker in stickers.iter_mut() {
        if let Some(pos) = order.iter().position(|id| *id == sticker.id) {
            sticker.ordine = Some(pos as u32 + 1);
        }
    }
}

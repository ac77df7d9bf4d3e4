use anyhow::Result;
use sticker_core::AlbumUpdate;
use time::OffsetDateTime;

use super::{AppCatalog, confirm, print_syndication, syndication_edits};
use crate::cli::AlbumCommands;

pub async fn handle(cmd: AlbumCommands, catalog: &AppCatalog) -> Result<()> {
    match cmd {
        AlbumCommands::Create { name, year } => {
            let year = year.unwrap_or_else(|| OffsetDateTime::now_utc().year());
            create(catalog, name, year).await
        }
        AlbumCommands::List { search } => list(catalog, search).await,
        AlbumCommands::Show { album } => show(catalog, album).await,
        AlbumCommands::Update {
            album,
            name,
            year,
            syndication,
        } => {
            let update = AlbumUpdate {
                nome: name,
                anno: year,
                syndication: syndication_edits(syndication)?,
            };
            update_album(catalog, album, update).await
        }
        AlbumCommands::Delete { album, force } => delete(catalog, album, force).await,
    }
}

async fn create(catalog: &AppCatalog, name: String, year: i32) -> Result<()> {
    let album = catalog.create_album(&name, year).await?;

    println!("✓ Created album: {}", album.nome);
    println!("  ID: {}", album.id);
    println!("  Year: {}", album.anno);

    Ok(())
}

async fn list(catalog: &AppCatalog, search: Option<String>) -> Result<()> {
    let albums = catalog.list_albums(search.as_deref()).await?;

    if albums.is_empty() {
        println!("No albums found.");
        return Ok(());
    }

    println!("Albums:");
    for album in albums {
        let count = catalog.album_sticker_count(&album.id).await?;
        println!("  {} ({})", album.nome, album.id);
        println!("    Year: {}  Stickers: {}", album.anno, count);
    }

    Ok(())
}

async fn show(catalog: &AppCatalog, album_id: String) -> Result<()> {
    let album = catalog.get_album(&album_id).await?;

    println!("Album: {}", album.nome);
    println!("  ID: {}", album.id);
    println!("  Year: {}", album.anno);
    println!("  Created: {}", album.created_at);
    print_syndication(&album.syndication);

    let pages = catalog.list_pages(&album.id).await?;
    if pages.is_empty() {
        println!("\nNo pages.");
    } else {
        println!("\nPages ({}):", pages.len());
        for page in pages {
            println!("  {}. {} ({})", page.ordine, page.nome, page.id);
        }
    }

    let stickers = catalog.list_stickers(None, Some(&album.id)).await?;
    if stickers.is_empty() {
        println!("\nNo stickers.");
    } else {
        println!("\nStickers ({}):", stickers.len());
        for sticker in stickers {
            println!("  #{} {} [{}] ({})", sticker.numero, sticker.nome, sticker.tipo, sticker.id);
        }
    }

    Ok(())
}

async fn update_album(catalog: &AppCatalog, album_id: String, update: AlbumUpdate) -> Result<()> {
    let album = catalog.update_album(&album_id, update).await?;

    println!("✓ Updated album: {}", album.nome);
    print_syndication(&album.syndication);

    Ok(())
}

async fn delete(catalog: &AppCatalog, album_id: String, force: bool) -> Result<()> {
    let album = catalog.get_album(&album_id).await?;

    if !force && !confirm(&format!("Delete album '{}' with all its pages and stickers?", album.nome))? {
        println!("Cancelled.");
        return Ok(());
    }

    catalog.delete_album(&album.id).await?;
    println!("✓ Deleted album: {}", album.nome);

    Ok(())
}

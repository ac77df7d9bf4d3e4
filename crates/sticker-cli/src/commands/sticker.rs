use anyhow::Result;
use sticker_core::{NewSticker, StickerUpdate};

use super::AppCatalog;
use crate::cli::StickerCommands;

pub async fn handle(cmd: StickerCommands, catalog: &AppCatalog) -> Result<()> {
    match cmd {
        StickerCommands::Create {
            name,
            album,
            kind,
            double,
            link,
        } => {
            let new = NewSticker {
                nome: name,
                album_id: album,
                tipo: kind,
                doppia: double,
                link,
            };
            let sticker = catalog.create_sticker(new).await?;
            println!("✓ Created sticker #{}: {}", sticker.numero, sticker.nome);
            println!("  ID: {}", sticker.id);
            Ok(())
        }
        StickerCommands::List { search, album } => {
            let stickers = catalog
                .list_stickers(search.as_deref(), album.as_deref())
                .await?;
            if stickers.is_empty() {
                println!("No stickers found.");
                return Ok(());
            }
            println!("Stickers:");
            for sticker in stickers {
                let double = if sticker.doppia { " (double)" } else { "" };
                println!(
                    "  #{} {} [{}]{} ({})",
                    sticker.numero, sticker.nome, sticker.tipo, double, sticker.id
                );
            }
            Ok(())
        }
        StickerCommands::Update {
            sticker,
            name,
            kind,
            double,
            link,
        } => {
            let update = StickerUpdate {
                nome: name,
                tipo: kind,
                doppia: double,
                link,
            };
            let sticker = catalog.update_sticker(&sticker, update).await?;
            println!("✓ Updated sticker #{}: {}", sticker.numero, sticker.nome);
            Ok(())
        }
        StickerCommands::Delete { sticker } => {
            let removed = catalog.delete_sticker(&sticker).await?;
            println!("✓ Deleted sticker: {}", removed.nome);
            Ok(())
        }
    }
}

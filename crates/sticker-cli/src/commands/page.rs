use anyhow::Result;

use super::AppCatalog;
use crate::cli::PageCommands;

pub async fn handle(cmd: PageCommands, catalog: &AppCatalog) -> Result<()> {
    match cmd {
        PageCommands::Create { name, album } => {
            let page = catalog.create_page(&name, &album).await?;
            println!("✓ Created page {}: {}", page.ordine, page.nome);
            println!("  ID: {}", page.id);
            Ok(())
        }
        PageCommands::List { album } => {
            let pages = catalog.list_pages(&album).await?;
            if pages.is_empty() {
                println!("No pages found.");
                return Ok(());
            }
            println!("Pages:");
            for page in pages {
                println!("  {}. {} ({})", page.ordine, page.nome, page.id);
            }
            Ok(())
        }
        PageCommands::Show { page, search } => show(catalog, page, search).await,
        PageCommands::Toggle { page, sticker } => {
            let attached = catalog.toggle_page_sticker(&page, &sticker).await?;
            if attached {
                println!("✓ Added sticker {} to page", sticker);
            } else {
                println!("✓ Removed sticker {} from page", sticker);
            }
            Ok(())
        }
        PageCommands::Move {
            page,
            sticker,
            index,
        } => {
            if catalog.move_page_sticker(&page, &sticker, index).await? {
                println!("✓ Moved sticker {} to index {}", sticker, index);
            } else {
                println!("Nothing to move.");
            }
            Ok(())
        }
        PageCommands::Delete { page } => {
            let removed = catalog.delete_page(&page).await?;
            println!("✓ Deleted page: {}", removed.nome);
            Ok(())
        }
    }
}

async fn show(catalog: &AppCatalog, page_id: String, search: Option<String>) -> Result<()> {
    let page = catalog.get_page(&page_id).await?;

    println!("Page {}: {}", page.ordine, page.nome);
    println!("  ID: {}", page.id);
    println!("  Album: {}", page.album_id);

    let on_page = catalog.page_stickers(&page.id).await?;
    if on_page.is_empty() {
        println!("\nNo stickers on this page.");
    } else {
        println!("\nStickers ({}):", on_page.len());
        for sticker in &on_page {
            println!(
                "  {}. #{} {} ({})",
                sticker.ordine.unwrap_or(0),
                sticker.numero,
                sticker.nome,
                sticker.id
            );
        }
    }

    let available = catalog
        .available_stickers(&page.id, search.as_deref())
        .await?;
    println!("\nAvailable ({}):", available.len());
    for sticker in available {
        let mark = if sticker.pagina_id.as_deref() == Some(page.id.as_str()) {
            "x"
        } else {
            " "
        };
        println!("  [{}] #{} {} ({})", mark, sticker.numero, sticker.nome, sticker.id);
    }

    Ok(())
}

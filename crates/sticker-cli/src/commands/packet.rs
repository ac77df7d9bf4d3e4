use anyhow::Result;
use std::collections::HashMap;
use sticker_config::Config;
use sticker_core::{DraftEvent, PacketDraft, PacketKind, StickerPool, SyndicationEdit};

use super::{AppCatalog, confirm, print_syndication, syndication_edits};
use crate::cli::PacketCommands;

/// Form edits collected from the command line
#[derive(Debug, Default)]
pub struct DraftEdits {
    pub name: Option<String>,
    pub count: Option<u32>,
    pub toggle: Vec<String>,
    pub moves: Vec<(String, usize)>,
    pub weights: Vec<(String, i64)>,
    pub syndication: Vec<SyndicationEdit>,
}

impl DraftEdits {
    /// Events in application order: name, count, toggles, moves, weights, syndication
    pub fn into_events(self) -> Vec<DraftEvent> {
        let mut events = Vec::new();
        if let Some(name) = self.name {
            events.push(DraftEvent::Renamed(name));
        }
        if let Some(count) = self.count {
            events.push(DraftEvent::TargetCountChanged(count));
        }
        events.extend(self.toggle.into_iter().map(DraftEvent::StickerToggled));
        events.extend(
            self.moves
                .into_iter()
                .map(|(sticker_id, index)| DraftEvent::StickerMoved { sticker_id, index }),
        );
        events.extend(
            self.weights
                .into_iter()
                .map(|(sticker_id, weight)| DraftEvent::WeightChanged { sticker_id, weight }),
        );
        events.extend(self.syndication.into_iter().map(DraftEvent::Syndication));
        events
    }
}

pub async fn handle(cmd: PacketCommands, catalog: &AppCatalog, config: &Config) -> Result<()> {
    match cmd {
        PacketCommands::Create { name, kind, count } => {
            let count = count.unwrap_or(config.packets.default_size);
            create(catalog, name, kind, count).await
        }
        PacketCommands::List => list(catalog).await,
        PacketCommands::Show { packet } => show(catalog, packet).await,
        PacketCommands::Edit {
            packet,
            album,
            name,
            count,
            toggle,
            moves,
            weight,
            syndication,
            dry_run,
        } => {
            let edits = DraftEdits {
                name,
                count,
                toggle,
                moves,
                weights: weight,
                syndication: syndication_edits(syndication)?,
            };
            edit(catalog, packet, album, edits, dry_run).await
        }
        PacketCommands::Delete { packet, force } => delete(catalog, packet, force).await,
    }
}

async fn create(catalog: &AppCatalog, name: String, kind: PacketKind, count: u32) -> Result<()> {
    let packet = catalog.create_packet(&name, kind, count).await?;

    println!("✓ Created {} packet: {}", packet.tipo, packet.nome);
    println!("  ID: {}", packet.id);
    println!("  Stickers: {}", packet.num_figurine);

    Ok(())
}

async fn list(catalog: &AppCatalog) -> Result<()> {
    let packets = catalog.list_packets().await?;

    if packets.is_empty() {
        println!("No packets found.");
        return Ok(());
    }

    println!("Packets:");
    for packet in packets {
        println!("  {} ({})", packet.nome, packet.id);
        println!("    Type: {}  Stickers: {}", packet.tipo, packet.num_figurine);
    }

    Ok(())
}

async fn show(catalog: &AppCatalog, packet_id: String) -> Result<()> {
    let (draft, pool) = catalog.open_draft(&packet_id).await?;
    let packet = catalog.get_packet(&packet_id).await?;

    println!("Packet: {}", packet.nome);
    println!("  ID: {}", packet.id);
    println!("  Created: {}", packet.created_at);
    print_draft(&draft, &pool);
    print_syndication(draft.syndication());

    Ok(())
}

async fn edit(
    catalog: &AppCatalog,
    packet_id: String,
    album: Option<String>,
    edits: DraftEdits,
    dry_run: bool,
) -> Result<()> {
    let (mut draft, mut pool) = catalog.open_draft(&packet_id).await?;

    if let Some(album_id) = album {
        let album = catalog.get_album(&album_id).await?;
        pool = catalog.sticker_pool(&album.id).await?;
        draft.apply(DraftEvent::AlbumChanged(album.id), &pool);
    }

    for event in edits.into_events() {
        draft.apply(event, &pool);
    }

    print_draft(&draft, &pool);

    if dry_run {
        println!("\n(dry run, not saved)");
        return Ok(());
    }

    match catalog.save_draft(&draft).await {
        Ok(packet) => {
            println!("\n✓ Saved packet: {}", packet.nome);
            Ok(())
        }
        Err(e) if e.is_validation() => anyhow::bail!("Packet not saved: {}", e),
        Err(e) => Err(e.into()),
    }
}

async fn delete(catalog: &AppCatalog, packet_id: String, force: bool) -> Result<()> {
    let packet = catalog.get_packet(&packet_id).await?;

    if !force && !confirm(&format!("Delete packet '{}'?", packet.nome))? {
        println!("Cancelled.");
        return Ok(());
    }

    catalog.delete_packet(&packet.id).await?;
    println!("✓ Deleted packet: {}", packet.nome);

    Ok(())
}

fn print_draft(draft: &PacketDraft, pool: &StickerPool) {
    let names: HashMap<&str, &str> = pool
        .entries()
        .iter()
        .map(|e| (e.sticker_id.as_str(), e.name.as_str()))
        .collect();

    println!("  Name: {}", draft.name());
    println!("  Type: {}", draft.mode());
    println!("  Album: {}", draft.album_id().unwrap_or("(none)"));
    println!("  Stickers: {}", draft.target_count());

    if draft.selections().is_empty() {
        println!("\n  No stickers selected.");
        return;
    }

    println!("\n  Selection ({}):", draft.selections().len());
    for selection in draft.selections() {
        let name = names.get(selection.sticker_id.as_str()).copied().unwrap_or("?");
        if draft.mode().is_dynamic() {
            println!(
                "    {}. {} ({}) {}%",
                selection.position, name, selection.sticker_id, selection.weight
            );
        } else {
            println!("    {}. {} ({})", selection.position, name, selection.sticker_id);
        }
    }
    if draft.mode().is_dynamic() {
        println!("  Frequency total: {}%", draft.weight_sum());
    }
}

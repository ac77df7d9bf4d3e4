use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use sticker_core::{PacketKind, Platform, StickerKind};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Parser)]
#[command(name = "stickers")]
#[command(about = "Curate sticker albums, pages and packets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database file (overrides the configured location)
    #[arg(long, global = true, env = "STICKERS_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage albums
    #[command(subcommand)]
    Album(AlbumCommands),

    /// Manage stickers
    #[command(subcommand)]
    Sticker(StickerCommands),

    /// Manage album pages
    #[command(subcommand)]
    Page(PageCommands),

    /// Manage packets
    #[command(subcommand)]
    Packet(PacketCommands),

    /// Print every collection as JSON
    Export,

    /// Show stored collections
    Status,
}

/// Syndication flags shared by album and packet edits
#[derive(clap::Args, Debug, Default)]
pub struct SyndicationArgs {
    /// Publish on every platform
    #[arg(long, conflicts_with = "unpublish_all")]
    pub publish_all: bool,

    /// Unpublish from every platform
    #[arg(long)]
    pub unpublish_all: bool,

    /// Publish on a platform (iOS, Android)
    #[arg(long)]
    pub publish: Vec<Platform>,

    /// Unpublish from a platform
    #[arg(long)]
    pub unpublish: Vec<Platform>,

    /// Set a start date: PLATFORM=RFC3339 (empty date clears it)
    #[arg(long, value_parser = parse_assignment::<OptionalDate>)]
    pub start: Vec<(String, OptionalDate)>,

    /// Set an end date: PLATFORM=RFC3339 (empty date clears it)
    #[arg(long, value_parser = parse_assignment::<OptionalDate>)]
    pub end: Vec<(String, OptionalDate)>,

    /// Copy the start date into the end date
    #[arg(long)]
    pub copy_start: Vec<Platform>,

    /// Clear the end date
    #[arg(long)]
    pub clear_end: Vec<Platform>,
}

#[derive(Subcommand)]
pub enum AlbumCommands {
    /// Create a new album
    Create {
        /// Name of the album
        name: String,

        /// Year (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// List albums
    List {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
    },

    /// Show album details
    Show {
        /// Album ID
        album: String,
    },

    /// Update an album
    Update {
        /// Album ID
        album: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[command(flatten)]
        syndication: SyndicationArgs,
    },

    /// Delete an album with its pages and stickers
    Delete {
        /// Album ID
        album: String,

        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum StickerCommands {
    /// Create a new sticker
    Create {
        /// Name of the sticker
        name: String,

        /// Album ID
        #[arg(long)]
        album: String,

        /// Standard or Speciale
        #[arg(long, default_value = "standard")]
        kind: StickerKind,

        /// Double sticker
        #[arg(long)]
        double: bool,

        /// Image link
        #[arg(long)]
        link: Option<String>,
    },

    /// List stickers
    List {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,

        /// Only stickers of this album
        #[arg(long)]
        album: Option<String>,
    },

    /// Update a sticker
    Update {
        /// Sticker ID
        sticker: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        kind: Option<StickerKind>,

        #[arg(long)]
        double: Option<bool>,

        /// Image link (empty clears it)
        #[arg(long)]
        link: Option<String>,
    },

    /// Delete a sticker
    Delete {
        /// Sticker ID
        sticker: String,
    },
}

#[derive(Subcommand)]
pub enum PageCommands {
    /// Create a page at the end of an album
    Create {
        /// Name of the page
        name: String,

        /// Album ID
        #[arg(long)]
        album: String,
    },

    /// List the pages of an album
    List {
        /// Album ID
        album: String,
    },

    /// Show a page with its stickers and the stickers that can be added
    Show {
        /// Page ID
        page: String,

        /// Filter the available stickers by name
        #[arg(long)]
        search: Option<String>,
    },

    /// Add a sticker to the page, or remove it if already there
    Toggle {
        /// Page ID
        page: String,

        /// Sticker ID
        sticker: String,
    },

    /// Move a sticker to a 0-based index on the page
    Move {
        /// Page ID
        page: String,

        /// Sticker ID
        sticker: String,

        index: usize,
    },

    /// Delete a page; its stickers stay in the album
    Delete {
        /// Page ID
        page: String,
    },
}

#[derive(Subcommand)]
pub enum PacketCommands {
    /// Create a new packet
    Create {
        /// Name of the packet
        name: String,

        /// statico or dinamico
        #[arg(long, default_value = "statico")]
        kind: PacketKind,

        /// Number of stickers (default from config: 1)
        #[arg(long)]
        count: Option<u32>,
    },

    /// List all packets
    List,

    /// Show packet details
    Show {
        /// Packet ID
        packet: String,
    },

    /// Configure a packet and save it
    ///
    /// Edits are applied in this order: album, name, count, toggles, moves,
    /// weights, syndication.
    Edit {
        /// Packet ID
        packet: String,

        /// Select an album (clears the current selection)
        #[arg(long)]
        album: Option<String>,

        #[arg(long)]
        name: Option<String>,

        /// Target number of stickers
        #[arg(long)]
        count: Option<u32>,

        /// Add or remove a sticker (repeatable)
        #[arg(long)]
        toggle: Vec<String>,

        /// Move a sticker: STICKER=INDEX (0-based)
        #[arg(long = "move", value_parser = parse_assignment::<usize>)]
        moves: Vec<(String, usize)>,

        /// Set a dynamic frequency: STICKER=WEIGHT
        #[arg(long, value_parser = parse_assignment::<i64>)]
        weight: Vec<(String, i64)>,

        #[command(flatten)]
        syndication: SyndicationArgs,

        /// Show the result without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a packet
    Delete {
        /// Packet ID
        packet: String,

        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// A date argument where an empty value means "clear"
#[derive(Debug, Clone, Copy)]
pub struct OptionalDate(pub Option<OffsetDateTime>);

impl FromStr for OptionalDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(OptionalDate(None));
        }
        OffsetDateTime::parse(s.trim(), &Rfc3339)
            .map(|d| OptionalDate(Some(d)))
            .map_err(|e| format!("invalid date '{s}': {e}"))
    }
}

/// Parse `KEY=VALUE`
pub fn parse_assignment<T>(s: &str) -> Result<(String, T), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let value = value
        .parse()
        .map_err(|e| format!("invalid value for '{key}': {e}"))?;
    Ok((key.to_string(), value))
}

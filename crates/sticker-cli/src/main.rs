mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use sticker_config::Config;
use sticker_core::Catalog;
use sticker_storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;

    // Open storage once (creates connection pool and runs migrations)
    let db_path = cli.db.clone().or_else(|| config.database.path.clone());
    let storage = Storage::new(db_path).await?;
    let catalog = Catalog::new(storage).with_platforms(config.syndication.platforms.clone());

    match cli.command {
        cli::Commands::Album(cmd) => commands::album::handle(cmd, &catalog).await,
        cli::Commands::Sticker(cmd) => commands::sticker::handle(cmd, &catalog).await,
        cli::Commands::Page(cmd) => commands::page::handle(cmd, &catalog).await,
        cli::Commands::Packet(cmd) => commands::packet::handle(cmd, &catalog, &config).await,
        cli::Commands::Export => commands::export::export(&catalog).await,
        cli::Commands::Status => commands::export::status(&catalog).await,
    }
}

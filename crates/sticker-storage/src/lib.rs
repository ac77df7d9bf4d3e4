//! Storage layer for the sticker catalog
//!
//! This crate provides:
//! - SQLite database operations
//! - The `CollectionStore` implementation used by the CLI

pub mod db;
pub mod error;
pub mod models;

pub use db::Storage;
pub use error::{Result, StorageError};
pub use models::CollectionRecord;

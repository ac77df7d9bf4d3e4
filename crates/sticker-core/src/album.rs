//! Album and page domain models

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Syndication;

/// Top-level collection entity containing pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub nome: String,
    pub anno: i32,
    #[serde(default)]
    pub syndication: Syndication,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immagine_default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_home: Option<String>,
}

impl Album {
    pub fn new(nome: String, anno: i32, syndication: Syndication) -> Self {
        Self {
            id: crate::new_id(),
            nome,
            anno,
            syndication,
            created_at: OffsetDateTime::now_utc(),
            immagine_default: None,
            logo: None,
            cta_home: None,
        }
    }
}

/// Ordered container of stickers within an album
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub nome: String,
    pub album_id: String,
    pub ordine: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_link: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Page {
    pub fn new(nome: String, album_id: String, ordine: u32) -> Self {
        Self {
            id: crate::new_id(),
            nome,
            album_id,
            ordine,
            background_link: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

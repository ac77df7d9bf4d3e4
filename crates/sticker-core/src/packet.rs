//! Packet domain model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::Syndication;

/// A sellable bundle of stickers (pacchetto)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Packet {
    pub id: String,
    pub nome: String,
    pub num_figurine: u32,
    pub tipo: PacketKind,
    #[serde(default)]
    pub syndication: Syndication,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figurine: Option<Vec<PacketSticker>>,
}

impl Packet {
    pub fn new(nome: String, tipo: PacketKind, num_figurine: u32, syndication: Syndication) -> Self {
        Self {
            id: crate::new_id(),
            nome,
            num_figurine,
            tipo,
            syndication,
            created_at: OffsetDateTime::now_utc(),
            album_id: None,
            figurine: None,
        }
    }

    pub fn stickers(&self) -> &[PacketSticker] {
        self.figurine.as_deref().unwrap_or_default()
    }
}

/// Static packets carry a fixed ordered list, dynamic ones draw by weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketKind {
    #[serde(alias = "Statico")]
    Statico,
    #[serde(alias = "Dinamico")]
    Dinamico,
}

impl PacketKind {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, PacketKind::Dinamico)
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketKind::Statico => f.write_str("statico"),
            PacketKind::Dinamico => f.write_str("dinamico"),
        }
    }
}

impl FromStr for PacketKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "statico" | "static" => Ok(PacketKind::Statico),
            "dinamico" | "dynamic" => Ok(PacketKind::Dinamico),
            other => Err(format!("unknown packet kind: {other}")),
        }
    }
}

/// A sticker inside a stored packet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketSticker {
    pub figurina_id: String,
    pub ordine: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequenza: Option<u32>,
}

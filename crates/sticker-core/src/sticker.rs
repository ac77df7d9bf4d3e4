use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StickerKind {
    #[default]
    Standard,
    Speciale,
}

impl fmt::Display for StickerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StickerKind::Standard => f.write_str("Standard"),
            StickerKind::Speciale => f.write_str("Speciale"),
        }
    }
}

impl FromStr for StickerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(StickerKind::Standard),
            "speciale" | "special" => Ok(StickerKind::Speciale),
            other => Err(format!("unknown sticker kind: {other}")),
        }
    }
}

/// Smallest catalog item (figurina)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    pub id: String,
    pub nome: String,
    pub numero: u32,
    #[serde(default)]
    pub tipo: StickerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagina_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordine: Option<u32>,
    #[serde(default)]
    pub doppia: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Sticker {
    pub fn new(nome: String, numero: u32, album_id: String) -> Self {
        Self {
            id: crate::new_id(),
            nome,
            numero,
            tipo: StickerKind::Standard,
            album_id: Some(album_id),
            pagina_id: None,
            ordine: None,
            doppia: false,
            link: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Album the sticker belongs to, directly or through its page
    pub fn resolve_album<'a>(&'a self, pages: &'a [Page]) -> Option<&'a str> {
        if let Some(album_id) = self.album_id.as_deref().filter(|id| !id.is_empty()) {
            return Some(album_id);
        }
        let page_id = self.pagina_id.as_deref().filter(|id| !id.is_empty())?;
        pages
            .iter()
            .find(|p| p.id == page_id)
            .map(|p| p.album_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_album_direct() {
        let sticker = Sticker::new("Totti".to_string(), 1, "a1".to_string());
        assert_eq!(sticker.resolve_album(&[]), Some("a1"));
    }

    #[test]
    fn test_resolve_album_via_page() {
        let page = Page::new("Roma".to_string(), "a2".to_string(), 1);
        let mut sticker = Sticker::new("Totti".to_string(), 1, String::new());
        sticker.album_id = None;
        sticker.pagina_id = Some(page.id.clone());
        assert_eq!(sticker.resolve_album(std::slice::from_ref(&page)), Some("a2"));

        sticker.pagina_id = Some("missing".to_string());
        assert_eq!(sticker.resolve_album(&[page]), None);
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "id": "s1",
            "nome": "Baggio",
            "numero": 10,
            "albumId": "a1",
            "createdAt": "2024-05-01T09:00:00Z"
        }"#;
        let sticker: Sticker = serde_json::from_str(json).unwrap();
        assert_eq!(sticker.tipo, StickerKind::Standard);
        assert!(!sticker.doppia);
        assert_eq!(sticker.album_id.as_deref(), Some("a1"));
    }
}

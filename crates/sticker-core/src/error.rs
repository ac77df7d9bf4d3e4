use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Sticker frequencies must sum to 100 (current sum: {sum})")]
    WeightSum { sum: u32 },

    #[error("An album must be selected")]
    AlbumRequired,

    #[error("Album not found: {0}")]
    AlbumNotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Sticker not found: {0}")]
    StickerNotFound(String),

    #[error("Sticker {sticker_id} does not belong to album {album_id}")]
    StickerOutsideAlbum {
        sticker_id: String,
        album_id: String,
    },

    #[error("Packet not found: {0}")]
    PacketNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Validation errors leave the draft intact and can be fixed by further edits.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::EmptyName | CoreError::WeightSum { .. } | CoreError::AlbumRequired
        )
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

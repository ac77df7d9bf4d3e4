use time::OffsetDateTime;

/// Summary of one stored collection row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CollectionRecord {
    pub key: String,
    pub size_bytes: i64,
    pub updated_at: i64,
}

impl CollectionRecord {
    pub fn updated_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.updated_at).ok()
    }
}

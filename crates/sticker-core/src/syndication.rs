//! Per-entity publish schedule across platforms

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "iOS")]
    Ios,
    Android,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Android];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyndicationEntry {
    pub platform: Platform,
    pub is_published: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
}

impl SyndicationEntry {
    pub fn unpublished(platform: Platform) -> Self {
        Self {
            platform,
            is_published: false,
            start_date: None,
            end_date: None,
        }
    }
}

/// A single edit coming from the syndication form section
#[derive(Debug, Clone, PartialEq)]
pub enum SyndicationEdit {
    PublishAll(bool),
    Publish {
        platform: Platform,
        published: bool,
    },
    SetStart {
        platform: Platform,
        date: Option<OffsetDateTime>,
    },
    SetEnd {
        platform: Platform,
        date: Option<OffsetDateTime>,
    },
    /// Only copies when a start date is present
    CopyStartToEnd(Platform),
    ClearEnd(Platform),
}

/// Ordered list of per-platform entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Syndication(pub Vec<SyndicationEntry>);

impl Default for Syndication {
    fn default() -> Self {
        Self::for_platforms(&Platform::ALL)
    }
}

impl Syndication {
    pub fn for_platforms(platforms: &[Platform]) -> Self {
        Self(
            platforms
                .iter()
                .copied()
                .map(SyndicationEntry::unpublished)
                .collect(),
        )
    }

    pub fn entries(&self) -> &[SyndicationEntry] {
        &self.0
    }

    pub fn entry(&self, platform: Platform) -> Option<&SyndicationEntry> {
        self.0.iter().find(|e| e.platform == platform)
    }

    pub fn all_published(&self) -> bool {
        self.0.iter().all(|e| e.is_published)
    }

    pub fn apply(&mut self, edit: SyndicationEdit) {
        match edit {
            SyndicationEdit::PublishAll(published) => {
                for entry in &mut self.0 {
                    entry.is_published = published;
                }
            }
            SyndicationEdit::Publish {
                platform,
                published,
            } => {
                if let Some(entry) = self.entry_mut(platform) {
                    entry.is_published = published;
                }
            }
            SyndicationEdit::SetStart { platform, date } => {
                if let Some(entry) = self.entry_mut(platform) {
                    entry.start_date = date;
                }
            }
            SyndicationEdit::SetEnd { platform, date } => {
                if let Some(entry) = self.entry_mut(platform) {
                    entry.end_date = date;
                }
            }
            SyndicationEdit::CopyStartToEnd(platform) => {
                if let Some(entry) = self.entry_mut(platform) {
                    if entry.start_date.is_some() {
                        entry.end_date = entry.start_date;
                    }
                }
            }
            SyndicationEdit::ClearEnd(platform) => {
                if let Some(entry) = self.entry_mut(platform) {
                    entry.end_date = None;
                }
            }
        }
    }

    fn entry_mut(&mut self, platform: Platform) -> Option<&mut SyndicationEntry> {
        self.0.iter_mut().find(|e| e.platform == platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_default_is_unpublished() {
        let syndication = Syndication::default();
        assert_eq!(syndication.entries().len(), 2);
        assert!(!syndication.all_published());
        assert!(syndication.entries().iter().all(|e| e.start_date.is_none()));
    }

    #[test]
    fn test_publish_all_and_single() {
        let mut syndication = Syndication::default();
        syndication.apply(SyndicationEdit::PublishAll(true));
        assert!(syndication.all_published());

        syndication.apply(SyndicationEdit::Publish {
            platform: Platform::Android,
            published: false,
        });
        assert!(!syndication.all_published());
        assert!(syndication.entry(Platform::Ios).unwrap().is_published);
    }

    #[test]
    fn test_copy_start_requires_start() {
        let mut syndication = Syndication::default();
        let end = datetime!(2025-03-01 10:00 UTC);
        syndication.apply(SyndicationEdit::SetEnd {
            platform: Platform::Ios,
            date: Some(end),
        });

        syndication.apply(SyndicationEdit::CopyStartToEnd(Platform::Ios));
        assert_eq!(syndication.entry(Platform::Ios).unwrap().end_date, Some(end));

        let start = datetime!(2025-02-01 08:30 UTC);
        syndication.apply(SyndicationEdit::SetStart {
            platform: Platform::Ios,
            date: Some(start),
        });
        syndication.apply(SyndicationEdit::CopyStartToEnd(Platform::Ios));
        assert_eq!(
            syndication.entry(Platform::Ios).unwrap().end_date,
            Some(start)
        );

        syndication.apply(SyndicationEdit::ClearEnd(Platform::Ios));
        assert!(syndication.entry(Platform::Ios).unwrap().end_date.is_none());
    }

    #[test]
    fn test_edit_unknown_platform_is_ignored() {
        let mut syndication = Syndication::for_platforms(&[Platform::Ios]);
        syndication.apply(SyndicationEdit::Publish {
            platform: Platform::Android,
            published: true,
        });
        assert_eq!(syndication.entries().len(), 1);
        assert!(!syndication.all_published());
    }

    #[test]
    fn test_serialized_shape() {
        let mut syndication = Syndication::for_platforms(&[Platform::Ios]);
        syndication.apply(SyndicationEdit::SetStart {
            platform: Platform::Ios,
            date: Some(datetime!(2025-01-15 12:00 UTC)),
        });
        let json = serde_json::to_value(&syndication).unwrap();
        assert_eq!(json[0]["platform"], "iOS");
        assert_eq!(json[0]["isPublished"], false);
        assert_eq!(json[0]["startDate"], "2025-01-15T12:00:00Z");
        assert!(json[0]["endDate"].is_null());
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("ios".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("Android".parse::<Platform>().unwrap(), Platform::Android);
        assert!("web".parse::<Platform>().is_err());
    }
}

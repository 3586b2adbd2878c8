/// Memory domain types
use crate::types::{EntryId, MemoryId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of media attached to a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// One or more still photos
    Photo,
    /// A video clip
    Video,
}

impl EntryType {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dated journal entry with its media
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEntry {
    /// Unique entry identifier
    pub id: EntryId,

    /// Media kind
    #[serde(rename = "type")]
    pub kind: EntryType,

    /// Media URIs in display order (opaque, resolved by the host)
    #[serde(default)]
    pub media_uris: Vec<String>,

    /// Free-text caption
    #[serde(default)]
    pub caption: Option<String>,

    /// Day the entry was recorded
    pub date: NaiveDate,
}

impl MemoryEntry {
    /// Create a photo entry
    pub fn photo(media_uris: Vec<String>, date: NaiveDate) -> Self {
        Self {
            id: EntryId::generate(),
            kind: EntryType::Photo,
            media_uris,
            caption: None,
            date,
        }
    }

    /// Create a video entry
    pub fn video(media_uris: Vec<String>, date: NaiveDate) -> Self {
        Self {
            id: EntryId::generate(),
            kind: EntryType::Video,
            media_uris,
            caption: None,
            date,
        }
    }

    /// Set the caption
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Replace the generated id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<EntryId>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether this entry contributes photos to a slideshow
    pub fn is_photo(&self) -> bool {
        self.kind == EntryType::Photo
    }
}

/// An entry surfaced as a memory ("3 years ago today")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    /// Unique memory identifier
    pub id: MemoryId,

    /// The underlying entry
    pub entry: MemoryEntry,

    /// How many years before today the entry was recorded
    pub years_ago: u32,

    /// Calendar year of the entry
    pub year: i32,
}

impl MemoryRecord {
    /// Create a memory record with a generated id
    pub fn new(entry: MemoryEntry, years_ago: u32, year: i32) -> Self {
        Self {
            id: MemoryId::generate(),
            entry,
            years_ago,
            year,
        }
    }

    /// Replace the generated id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<MemoryId>) -> Self {
        self.id = id.into();
        self
    }
}

//! Data models for rows of the file catalog.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Kind of file recorded in the catalog, stored as the catalog's integer code.
///
/// Equality goes by code, so `Other(1)` is the same kind as `Image`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    None,
    Image,
    Audio,
    Video,
    Playlist,
    Subtitle,
    Document,
    /// A code this crate does not know about. Never visible to the picker.
    Other(i64),
}

impl MediaType {
    pub fn code(&self) -> i64 {
        match self {
            MediaType::None => 0,
            MediaType::Image => 1,
            MediaType::Audio => 2,
            MediaType::Video => 3,
            MediaType::Playlist => 4,
            MediaType::Subtitle => 5,
            MediaType::Document => 6,
            MediaType::Other(code) => *code,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            0 => MediaType::None,
            1 => MediaType::Image,
            2 => MediaType::Audio,
            3 => MediaType::Video,
            4 => MediaType::Playlist,
            5 => MediaType::Subtitle,
            6 => MediaType::Document,
            other => MediaType::Other(other),
        }
    }

    /// Images and videos are the only kinds the picker ever shows.
    pub fn is_picker_media(&self) -> bool {
        matches!(MediaType::from_code(self.code()), MediaType::Image | MediaType::Video)
    }
}

impl PartialEq for MediaType {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for MediaType {}

impl std::hash::Hash for MediaType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl ToSql for MediaType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for MediaType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_i64().map(MediaType::from_code)
    }
}

/// `true` iff a row with these attributes is media the picker may show.
pub fn is_visible(media_type: MediaType, is_pending: bool, is_trashed: bool) -> bool {
    media_type.is_picker_media() && !is_pending && !is_trashed
}

/// The attributes of a row that decide its visibility and observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileState {
    pub media_type: MediaType,
    pub is_pending: bool,
    pub is_trashed: bool,
    pub is_favorite: bool,
}

impl FileState {
    pub fn is_visible(&self) -> bool {
        is_visible(self.media_type, self.is_pending, self.is_trashed)
    }
}

/// A row of the `files` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub id: u64,
    pub media_type: MediaType,
    pub is_pending: bool,
    pub is_trashed: bool,
    pub is_favorite: bool,
    pub is_download: bool,
    /// Slash-terminated directory prefix, e.g. `DCIM/Camera/`.
    pub relative_path: String,
    pub mime_type: String,
    pub size: u64,
    pub duration_ms: u64,
    /// Milliseconds since epoch.
    pub date_taken: Option<i64>,
    /// Seconds since epoch.
    pub date_modified: i64,
    pub generation_modified: u64,
}

impl CatalogRow {
    pub fn state(&self) -> FileState {
        FileState {
            media_type: self.media_type,
            is_pending: self.is_pending,
            is_trashed: self.is_trashed,
            is_favorite: self.is_favorite,
        }
    }

    pub fn is_visible(&self) -> bool {
        is_visible(self.media_type, self.is_pending, self.is_trashed)
    }
}

/// Values for a row about to be inserted by the catalog owner.
///
/// `id` is assigned by SQLite when absent and `generation_modified` defaults
/// to the generation of the inserting transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFile {
    pub id: Option<u64>,
    pub media_type: MediaType,
    pub is_pending: bool,
    pub is_trashed: bool,
    pub is_favorite: bool,
    pub is_download: bool,
    pub relative_path: String,
    pub mime_type: String,
    pub size: u64,
    pub duration_ms: u64,
    pub date_taken: Option<i64>,
    pub date_modified: i64,
    pub generation_modified: Option<u64>,
}

impl NewFile {
    pub fn state(&self) -> FileState {
        FileState {
            media_type: self.media_type,
            is_pending: self.is_pending,
            is_trashed: self.is_trashed,
            is_favorite: self.is_favorite,
        }
    }
}

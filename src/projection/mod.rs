//! CloudMedia view of the catalog: external column names, typed rows and cursors.
//!
//! Rows serialize with the external column names, so a cursor can be handed
//! to any serde-based transport unchanged.

use serde::Serialize;

/// Column names of media rows.
pub mod media_columns {
    pub const ID: &str = "id";
    pub const DATE_TAKEN_MS: &str = "date_taken_ms";
    pub const SIZE_BYTES: &str = "size_bytes";
    pub const MIME_TYPE: &str = "mime_type";
    pub const DURATION_MS: &str = "duration_ms";
    pub const IS_FAVORITE: &str = "is_favorite";
}

/// Column names of album rows.
pub mod album_columns {
    pub const ID: &str = "id";
    pub const DISPLAY_NAME: &str = "display_name";
    pub const MEDIA_COVER_ID: &str = "media_cover_id";
    pub const DATE_TAKEN_MS: &str = "date_taken_ms";
    pub const MEDIA_COUNT: &str = "album_media_count";
}

/// Column names of the media info row.
pub mod media_info_columns {
    pub const MEDIA_GENERATION: &str = "media_generation";
    pub const MEDIA_COUNT: &str = "media_count";
}

/// A row type with a fixed, ordered set of external column names.
pub trait Projection {
    const COLUMNS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRow {
    pub id: u64,
    pub date_taken_ms: i64,
    pub size_bytes: u64,
    pub mime_type: String,
    pub duration_ms: u64,
    /// 0 or 1.
    pub is_favorite: u8,
}

impl Projection for MediaRow {
    const COLUMNS: &'static [&'static str] = &[
        media_columns::ID,
        media_columns::DATE_TAKEN_MS,
        media_columns::SIZE_BYTES,
        media_columns::MIME_TYPE,
        media_columns::DURATION_MS,
        media_columns::IS_FAVORITE,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumRow {
    pub id: String,
    pub display_name: String,
    /// Decimal string of the cover's media id.
    pub media_cover_id: String,
    pub date_taken_ms: i64,
    #[serde(rename = "album_media_count")]
    pub media_count: u64,
}

impl Projection for AlbumRow {
    const COLUMNS: &'static [&'static str] = &[
        album_columns::ID,
        album_columns::DISPLAY_NAME,
        album_columns::MEDIA_COVER_ID,
        album_columns::DATE_TAKEN_MS,
        album_columns::MEDIA_COUNT,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MediaInfo {
    pub media_generation: u64,
    pub media_count: u64,
}

impl Projection for MediaInfo {
    const COLUMNS: &'static [&'static str] = &[
        media_info_columns::MEDIA_GENERATION,
        media_info_columns::MEDIA_COUNT,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletedMediaRow {
    pub id: u64,
}

impl Projection for DeletedMediaRow {
    const COLUMNS: &'static [&'static str] = &[media_columns::ID];
}

/// A finite, forward-only sequence of rows read from one catalog snapshot.
///
/// Dropping the cursor releases it; stopping half-way through is fine.
#[derive(Debug)]
pub struct Cursor<R> {
    rows: std::vec::IntoIter<R>,
}

impl<R: Projection> Cursor<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        R::COLUMNS.iter().position(|column| *column == name)
    }
}

impl<R> Iterator for Cursor<R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<R> ExactSizeIterator for Cursor<R> {}

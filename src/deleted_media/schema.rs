//! SQLite schema for the deleted-media log.

use crate::sqlite_column;
use crate::sqlite_persistence::{SqlType, Table};

/// Tombstones for ids that were visible media and no longer are.
pub(crate) const DELETED_MEDIA_TABLE: Table = Table {
    name: "deleted_media",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("generation_modified", &SqlType::Integer, non_null = true),
    ],
    indices: &[("deleted_media_generation_index", "generation_modified")],
};

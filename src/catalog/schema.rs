//! SQLite schema definitions for the catalog database.

use crate::deleted_media::DELETED_MEDIA_TABLE;
use crate::sqlite_column;
use crate::sqlite_persistence::{SqlType, Table, VersionedSchema};

/// Key of the generation counter in `catalog_meta`.
pub(crate) const GENERATION_KEY: &str = "generation";

/// The file catalog. Written by the catalog owner, read by the facade.
const FILES_TABLE: Table = Table {
    name: "files",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "media_type",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "is_pending",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "is_trashed",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "is_favorite",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "is_download",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "relative_path",
            &SqlType::Text,
            non_null = true,
            default_value = Some("''")
        ),
        sqlite_column!(
            "mime_type",
            &SqlType::Text,
            non_null = true,
            default_value = Some("''")
        ),
        sqlite_column!(
            "size",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        // Milliseconds since epoch, NULL when unknown
        sqlite_column!("date_taken", &SqlType::Integer),
        // Seconds since epoch
        sqlite_column!(
            "date_modified",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        // Milliseconds
        sqlite_column!(
            "duration",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "generation_modified",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
    ],
    indices: &[("files_generation_index", "generation_modified")],
};

/// Catalog-wide counters, keyed by name.
const CATALOG_META_TABLE: Table = Table {
    name: "catalog_meta",
    columns: &[
        sqlite_column!("key", &SqlType::Text, is_primary_key = true),
        sqlite_column!("value", &SqlType::Integer, non_null = true),
    ],
    indices: &[],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[FILES_TABLE, DELETED_MEDIA_TABLE, CATALOG_META_TABLE],
    migration: None,
}];

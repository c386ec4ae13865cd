//! SQLite-backed deleted-media store.

use super::models::Tombstone;
use super::trait_def::DeletedMediaStore;
use crate::catalog::{CatalogSnapshot, CatalogTransaction};
use crate::sqlite_persistence::to_sql_int;
use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

/// Keeps tombstones in the `deleted_media` table of the catalog database.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDeletedMediaStore;

impl DeletedMediaStore for SqliteDeletedMediaStore {
    fn add_deleted_media(&self, txn: &CatalogTransaction<'_>, id: u64) -> Result<bool> {
        let generation = txn.generation();
        let inserted = txn
            .conn()
            .execute(
                "INSERT OR REPLACE INTO deleted_media (id, generation_modified) VALUES (?1, ?2)",
                params![to_sql_int(id)?, to_sql_int(generation)?],
            )
            .with_context(|| format!("Failed to add deleted media {}", id))?;
        debug!("Added deleted media {} at generation {}", id, generation);
        Ok(inserted > 0)
    }

    fn remove_deleted_media(&self, txn: &CatalogTransaction<'_>, id: u64) -> Result<bool> {
        let removed = txn
            .conn()
            .execute(
                "DELETE FROM deleted_media WHERE id = ?1",
                params![to_sql_int(id)?],
            )
            .with_context(|| format!("Failed to remove deleted media {}", id))?;
        debug!("Removed deleted media {}: {}", id, removed > 0);
        Ok(removed > 0)
    }

    fn query_deleted_media(
        &self,
        snapshot: &CatalogSnapshot<'_>,
        generation: u64,
    ) -> Result<Vec<Tombstone>> {
        let mut stmt = snapshot.conn().prepare_cached(
            "SELECT id, generation_modified FROM deleted_media
             WHERE generation_modified > ?1
             ORDER BY generation_modified, id",
        )?;
        let tombstones = stmt
            .query_map(params![to_sql_int(generation)?], |row| {
                Ok(Tombstone {
                    id: row.get(0)?,
                    generation_modified: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to query deleted media")?;
        Ok(tombstones)
    }

    fn get_deleted_media(
        &self,
        snapshot: &CatalogSnapshot<'_>,
        id: u64,
    ) -> Result<Option<Tombstone>> {
        let tombstone = snapshot
            .conn()
            .query_row(
                "SELECT id, generation_modified FROM deleted_media WHERE id = ?1",
                params![to_sql_int(id)?],
                |row| {
                    Ok(Tombstone {
                        id: row.get(0)?,
                        generation_modified: row.get(1)?,
                    })
                },
            )
            .optional()
            .with_context(|| format!("Failed to read deleted media {}", id))?;
        Ok(tombstone)
    }
}

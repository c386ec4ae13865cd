//! DeletedMediaStore trait definition.

use super::models::Tombstone;
use crate::catalog::{CatalogSnapshot, CatalogTransaction};
use anyhow::Result;

/// Storage for tombstones of media that left the picker's view.
///
/// Writes happen inside the catalog owner's transaction so they commit or
/// roll back together with the catalog change that caused them.
pub trait DeletedMediaStore: Send + Sync {
    /// Insert or replace the tombstone for `id`, stamped with the
    /// transaction's generation.
    ///
    /// Re-adding an id in a later transaction bumps its generation. Within
    /// one transaction every add carries the same generation, so a second
    /// add of the same id leaves the tombstone unchanged.
    fn add_deleted_media(&self, txn: &CatalogTransaction<'_>, id: u64) -> Result<bool>;

    /// Remove the tombstone for `id`. Returns `false` if there was none.
    fn remove_deleted_media(&self, txn: &CatalogTransaction<'_>, id: u64) -> Result<bool>;

    /// Tombstones with `generation_modified > generation`.
    fn query_deleted_media(
        &self,
        snapshot: &CatalogSnapshot<'_>,
        generation: u64,
    ) -> Result<Vec<Tombstone>>;

    /// The tombstone for `id`, if any.
    fn get_deleted_media(&self, snapshot: &CatalogSnapshot<'_>, id: u64)
        -> Result<Option<Tombstone>>;
}

//! Keeps the deleted-media table in step with catalog changes.
//!
//! The catalog owner reports every insert, update and delete from inside the
//! write transaction that performs it. Each callback returns whether the
//! change is visible to picker clients, so the owner knows when to notify.

use crate::catalog::{CatalogTransaction, FileState, MediaType};
use crate::deleted_media::{DeletedMediaStore, SqliteDeletedMediaStore};
use anyhow::Result;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct ChangeRouter<S: DeletedMediaStore = SqliteDeletedMediaStore> {
    store: S,
}

impl<S: DeletedMediaStore> ChangeRouter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// A new row is observable when it is image or video and not pending.
    pub fn on_file_inserted(&self, media_type: MediaType, is_pending: bool) -> bool {
        let notify = media_type.is_picker_media() && !is_pending;
        debug!(
            "File inserted: media_type={:?} pending={} notify={}",
            media_type, is_pending, notify
        );
        notify
    }

    /// Tombstones `id` if the deleted row was image or video.
    pub fn on_file_deleted(
        &self,
        txn: &CatalogTransaction<'_>,
        id: u64,
        old_media_type: MediaType,
    ) -> Result<bool> {
        if !old_media_type.is_picker_media() {
            debug!("File {} deleted, was {:?}, ignored", id, old_media_type);
            return Ok(false);
        }
        self.store.add_deleted_media(txn, id)?;
        debug!("File {} deleted, tombstoned", id);
        Ok(true)
    }

    pub fn on_file_updated(
        &self,
        txn: &CatalogTransaction<'_>,
        id: u64,
        old: FileState,
        new: FileState,
    ) -> Result<bool> {
        let old_visible = old.is_visible();
        let new_visible = new.is_visible();

        let notify = match (old_visible, new_visible) {
            (true, false) => {
                self.store.add_deleted_media(txn, id)?;
                debug!("File {} left the picker, tombstoned", id);
                true
            }
            (false, true) => {
                if !self.store.remove_deleted_media(txn, id)? {
                    warn!("File {} became media but had no tombstone", id);
                }
                debug!("File {} entered the picker", id);
                true
            }
            (true, true) => {
                let favorite_changed = old.is_favorite != new.is_favorite;
                debug!("File {} updated, favorite changed: {}", id, favorite_changed);
                favorite_changed
            }
            (false, false) => {
                debug!("File {} updated while hidden, ignored", id);
                false
            }
        };
        Ok(notify)
    }
}

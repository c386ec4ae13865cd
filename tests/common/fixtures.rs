//! Catalog fixtures: a facade over a temporary database plus helpers that
//! play the catalog owner's part.

use super::constants::*;
use media_picker_facade::{
    CatalogRow, FacadeConfig, MediaFacade, MediaType, NewFile, RELATIVE_PATH_CAMERA,
};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestCatalog {
    pub facade: MediaFacade,
    pub db_path: PathBuf,
    _dir: TempDir,
}

impl TestCatalog {
    pub fn new() -> Self {
        init_tracing();
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("external.db");
        let facade =
            MediaFacade::open(&FacadeConfig::new(&db_path)).expect("Failed to open facade");
        Self {
            facade,
            db_path,
            _dir: dir,
        }
    }

    /// Inserts `file` in its own owner transaction, as the catalog owner
    /// would, and returns the new id.
    pub fn insert(&self, file: NewFile) -> u64 {
        self.insert_with_notify(file).0
    }

    /// Like [`insert`](Self::insert), also returning the router's notify
    /// decision for the new row.
    pub fn insert_with_notify(&self, file: NewFile) -> (u64, bool) {
        self.facade
            .catalog()
            .run_with_transaction(|txn| {
                let id = txn.insert_file(&file)?;
                let notify = self
                    .facade
                    .router()
                    .on_file_inserted(file.media_type, file.is_pending);
                Ok::<_, anyhow::Error>((id, notify))
            })
            .expect("Failed to insert file")
    }

    /// Applies `change` to row `id` and reports it to the router inside the
    /// same owner transaction. Returns the router's notify decision.
    pub fn update<F: FnOnce(&mut CatalogRow)>(&self, id: u64, change: F) -> bool {
        self.facade
            .catalog()
            .run_with_transaction(|txn| {
                let mut row = txn.get_file(id)?.expect("No such file");
                let old = row.state();
                change(&mut row);
                txn.update_file(&row)?;
                self.facade
                    .router()
                    .on_file_updated(txn, id, old, row.state())
            })
            .expect("Failed to update file")
    }

    /// Deletes row `id` and reports it to the router inside the same owner
    /// transaction.
    pub fn delete(&self, id: u64) -> bool {
        self.facade
            .catalog()
            .run_with_transaction(|txn| {
                let row = txn.delete_file(id)?.expect("No such file");
                self.facade.router().on_file_deleted(txn, id, row.media_type)
            })
            .expect("Failed to delete file")
    }

    pub fn media_ids(&self, generation: u64, album: Option<&str>, mime: Option<&str>) -> Vec<u64> {
        self.facade
            .query_media_generation(generation, album, mime)
            .expect("Failed to query media")
            .map(|row| row.id)
            .collect()
    }

    pub fn deleted_ids(&self, generation: u64) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .facade
            .query_deleted_media(generation)
            .expect("Failed to query deleted media")
            .map(|row| row.id)
            .collect();
        ids.sort();
        ids
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn image(relative_path: &str, date_taken_ms: i64) -> NewFile {
    NewFile {
        media_type: MediaType::Image,
        relative_path: relative_path.to_string(),
        mime_type: JPEG.to_string(),
        size: IMAGE_SIZE_BYTES,
        date_taken: Some(date_taken_ms),
        ..Default::default()
    }
}

pub fn video(relative_path: &str, date_taken_ms: i64) -> NewFile {
    NewFile {
        media_type: MediaType::Video,
        relative_path: relative_path.to_string(),
        mime_type: MP4.to_string(),
        size: IMAGE_SIZE_BYTES,
        duration_ms: VIDEO_DURATION_MS,
        date_taken: Some(date_taken_ms),
        ..Default::default()
    }
}

pub fn camera_image(date_taken_ms: i64) -> NewFile {
    image(RELATIVE_PATH_CAMERA, date_taken_ms)
}

pub fn download_image(date_taken_ms: i64) -> NewFile {
    NewFile {
        is_download: true,
        ..image(DOWNLOAD_PATH, date_taken_ms)
    }
}

//! The facade handed to the photo picker host.

use crate::album::{Album, AlbumDisplayNames};
use crate::catalog::{CatalogDb, FileState, MediaType};
use crate::change_router::ChangeRouter;
use crate::config::FacadeConfig;
use crate::deleted_media::DeletedMediaStore;
use crate::error::{to_sql_integer, FacadeResult};
use crate::projection::{AlbumRow, Cursor, DeletedMediaRow, MediaInfo, MediaRow};
use crate::query::{MimeFilter, QueryEngine};
use tracing::info;

/// Projects the catalog into CloudMedia rows and keeps the deleted-media
/// log in step with catalog changes.
///
/// Every read runs in one catalog snapshot. The `on_file_*` and
/// `*_deleted_media` methods open their own write transaction; owners that
/// already hold one should go through [`router`](Self::router) instead.
#[derive(Clone)]
pub struct MediaFacade {
    catalog: CatalogDb,
    router: ChangeRouter,
    engine: QueryEngine,
}

impl MediaFacade {
    pub fn new(catalog: CatalogDb, album_names: AlbumDisplayNames) -> Self {
        Self {
            catalog,
            router: ChangeRouter::default(),
            engine: QueryEngine::new(album_names),
        }
    }

    pub fn open(config: &FacadeConfig) -> FacadeResult<Self> {
        let catalog = CatalogDb::open(&config.db_path, config.busy_timeout)?;
        info!("Media facade opened on {:?}", config.db_path);
        Ok(Self::new(catalog, config.album_names.clone()))
    }

    pub fn catalog(&self) -> &CatalogDb {
        &self.catalog
    }

    pub fn router(&self) -> &ChangeRouter {
        &self.router
    }

    pub fn add_deleted_media(&self, id: u64) -> FacadeResult<bool> {
        to_sql_integer(id, "id")?;
        let added = self
            .catalog
            .run_with_transaction(|txn| self.router.store().add_deleted_media(txn, id))?;
        Ok(added)
    }

    pub fn remove_deleted_media(&self, id: u64) -> FacadeResult<bool> {
        to_sql_integer(id, "id")?;
        let removed = self
            .catalog
            .run_with_transaction(|txn| self.router.store().remove_deleted_media(txn, id))?;
        Ok(removed)
    }

    /// Ids tombstoned after `generation`.
    pub fn query_deleted_media(&self, generation: u64) -> FacadeResult<Cursor<DeletedMediaRow>> {
        to_sql_integer(generation, "generation")?;
        let tombstones = self
            .catalog
            .run_with_read(|snapshot| self.router.store().query_deleted_media(snapshot, generation))?;
        Ok(Cursor::new(
            tombstones
                .into_iter()
                .map(|t| DeletedMediaRow { id: t.id })
                .collect(),
        ))
    }

    pub fn on_file_inserted(&self, media_type: MediaType, is_pending: bool) -> bool {
        self.router.on_file_inserted(media_type, is_pending)
    }

    pub fn on_file_deleted(&self, id: u64, old_media_type: MediaType) -> FacadeResult<bool> {
        to_sql_integer(id, "id")?;
        let notify = self
            .catalog
            .run_with_transaction(|txn| self.router.on_file_deleted(txn, id, old_media_type))?;
        Ok(notify)
    }

    pub fn on_file_updated(&self, id: u64, old: FileState, new: FileState) -> FacadeResult<bool> {
        to_sql_integer(id, "id")?;
        let notify = self
            .catalog
            .run_with_transaction(|txn| self.router.on_file_updated(txn, id, old, new))?;
        Ok(notify)
    }

    /// Visible media modified after `generation`, optionally restricted to
    /// one album and a MIME pattern, newest first.
    pub fn query_media_generation(
        &self,
        generation: u64,
        album_id: Option<&str>,
        mime_type: Option<&str>,
    ) -> FacadeResult<Cursor<MediaRow>> {
        to_sql_integer(generation, "generation")?;
        let album = album_id.map(str::parse::<Album>).transpose()?;
        let mime = mime_type.map(MimeFilter::parse).transpose()?;

        let rows = self.catalog.run_with_read(|snapshot| {
            self.engine
                .query_media_generation(snapshot, generation, album, mime.as_ref())
        })?;
        Ok(Cursor::new(rows))
    }

    /// At most one row: the media with `id`, if it is visible.
    pub fn query_media_id(&self, id: u64) -> FacadeResult<Cursor<MediaRow>> {
        to_sql_integer(id, "id")?;
        let row = self
            .catalog
            .run_with_read(|snapshot| self.engine.query_media_id(snapshot, id))?;
        Ok(Cursor::new(row.into_iter().collect()))
    }

    /// Exactly one row.
    pub fn get_media_info(&self, generation: u64) -> FacadeResult<Cursor<MediaInfo>> {
        to_sql_integer(generation, "generation")?;
        let info = self
            .catalog
            .run_with_read(|snapshot| self.engine.get_media_info(snapshot, generation))?;
        Ok(Cursor::new(vec![info]))
    }

    pub fn query_albums(&self, mime_type: Option<&str>) -> FacadeResult<Cursor<AlbumRow>> {
        let mime = mime_type.map(MimeFilter::parse).transpose()?;
        let albums = self
            .catalog
            .run_with_read(|snapshot| self.engine.query_albums(snapshot, mime.as_ref()))?;
        Ok(Cursor::new(albums))
    }
}

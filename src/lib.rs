//! Media metadata facade for a photo picker.
//!
//! Projects a device-local file catalog into the CloudMedia view a picker
//! consumes: incremental media queries keyed by catalog generation, a
//! per-item lookup, a media summary, virtual albums, and a log of media
//! that left the picker's view.

pub mod album;
pub mod catalog;
pub mod change_router;
pub mod config;
pub mod deleted_media;
pub mod error;
pub mod facade;
pub mod projection;
pub mod query;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use album::{Album, AlbumDisplayNames, RELATIVE_PATH_CAMERA, RELATIVE_PATH_SCREENSHOTS};
pub use catalog::{is_visible, CatalogDb, CatalogRow, FileState, MediaType, NewFile};
pub use change_router::ChangeRouter;
pub use config::{FacadeConfig, FileConfig};
pub use deleted_media::{DeletedMediaStore, SqliteDeletedMediaStore, Tombstone};
pub use error::{FacadeError, FacadeResult};
pub use facade::MediaFacade;
pub use projection::{AlbumRow, Cursor, DeletedMediaRow, MediaInfo, MediaRow, Projection};
pub use query::{MimeFilter, QueryEngine};

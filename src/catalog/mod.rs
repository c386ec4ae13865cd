//! Catalog adapter: the owner's file table plus the generation counter.

mod models;
mod schema;
mod store;

pub use models::{is_visible, CatalogRow, FileState, MediaType, NewFile};
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use store::{CatalogDb, CatalogSnapshot, CatalogTransaction};

/// SQL condition selecting rows of `files` that satisfy [`is_visible`].
pub(crate) const VISIBLE_MEDIA_WHERE: &str =
    "media_type IN (1, 3) AND is_pending = 0 AND is_trashed = 0";

/// SQL expression for a row's effective date in milliseconds.
pub(crate) const EFFECTIVE_DATE_MS_SQL: &str = "COALESCE(date_taken, date_modified * 1000)";

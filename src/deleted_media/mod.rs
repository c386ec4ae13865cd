mod models;
mod schema;
mod store;
mod trait_def;

pub use models::Tombstone;
pub(crate) use schema::DELETED_MEDIA_TABLE;
pub use store::SqliteDeletedMediaStore;
pub use trait_def::DeletedMediaStore;

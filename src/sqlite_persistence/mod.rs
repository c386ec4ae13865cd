mod versioned_schema;

pub use versioned_schema::{
    migrate_if_needed, Column, SqlType, Table, VersionedSchema, BASE_DB_VERSION,
};

/// SQLite integers are signed; ids and generations are handled as `u64`.
pub fn to_sql_int(value: u64) -> anyhow::Result<i64> {
    i64::try_from(value).map_err(|_| anyhow::anyhow!("{} does not fit in a SQLite integer", value))
}

//! SQLite-backed catalog: connections, transactions and the generation counter.

use super::models::{CatalogRow, NewFile};
use super::schema::{CATALOG_VERSIONED_SCHEMAS, GENERATION_KEY};
use crate::sqlite_persistence::{migrate_if_needed, to_sql_int as to_i64};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

const FILE_COLUMNS: &str = "id, media_type, is_pending, is_trashed, is_favorite, is_download, \
     relative_path, mime_type, size, duration, date_taken, date_modified, generation_modified";

/// Handle to the file catalog and the tables that live next to it.
///
/// Writes are serialized on one connection, reads go through a second,
/// read-only connection so they never wait behind a writer (WAL mode).
#[derive(Clone)]
pub struct CatalogDb {
    read_conn: Arc<Mutex<Connection>>,
    write_conn: Arc<Mutex<Connection>>,
}

/// A write transaction of the catalog owner.
///
/// The catalog generation is advanced once when the transaction begins;
/// every write made through it is stamped with [`generation`](Self::generation).
pub struct CatalogTransaction<'conn> {
    tx: Transaction<'conn>,
    generation: u64,
}

/// A read transaction: every query made through it sees the same snapshot.
pub struct CatalogSnapshot<'conn> {
    tx: Transaction<'conn>,
}

impl CatalogDb {
    pub fn open<P: AsRef<Path>>(db_path: P, busy_timeout: Duration) -> Result<Self> {
        let db_path_ref = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path_ref,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database {:?}", db_path_ref))?;
        write_conn.busy_timeout(busy_timeout)?;

        migrate_if_needed(&mut write_conn, CATALOG_VERSIONED_SCHEMAS, "catalog")?;

        write_conn
            .pragma_update(None, "journal_mode", "WAL")
            .context("Failed to set WAL mode on catalog write connection")?;

        let read_conn = Connection::open_with_flags(
            db_path_ref,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open catalog database for reading")?;
        read_conn.busy_timeout(busy_timeout)?;

        let generation = read_generation(&read_conn)?;
        info!(
            "Catalog ready at {:?}, generation {}",
            db_path_ref, generation
        );

        Ok(Self {
            read_conn: Arc::new(Mutex::new(read_conn)),
            write_conn: Arc::new(Mutex::new(write_conn)),
        })
    }

    /// Runs `f` inside a write transaction, committing when it returns `Ok`
    /// and rolling back otherwise.
    ///
    /// Must not be re-entered from inside `f`: pass the transaction down instead.
    pub fn run_with_transaction<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&CatalogTransaction<'_>) -> std::result::Result<T, E>,
        E: From<anyhow::Error>,
    {
        let mut conn = self
            .write_conn
            .lock()
            .map_err(|_| anyhow!("Catalog write connection is poisoned"))?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to begin catalog write transaction")?;
        let generation = advance_generation(&tx)?;
        debug!("Began catalog write transaction at generation {}", generation);

        let txn = CatalogTransaction { tx, generation };
        let value = f(&txn)?;
        txn.tx
            .commit()
            .context("Failed to commit catalog write transaction")?;
        Ok(value)
    }

    /// Runs `f` inside a read transaction on the read-only connection.
    pub fn run_with_read<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&CatalogSnapshot<'_>) -> std::result::Result<T, E>,
        E: From<anyhow::Error>,
    {
        let mut conn = self
            .read_conn
            .lock()
            .map_err(|_| anyhow!("Catalog read connection is poisoned"))?;
        let tx = conn
            .transaction()
            .context("Failed to begin catalog read transaction")?;
        let snapshot = CatalogSnapshot { tx };
        let result = f(&snapshot);
        result
    }

    /// Generation of the last committed write transaction, 0 on a fresh catalog.
    pub fn current_generation(&self) -> Result<u64> {
        let conn = self
            .read_conn
            .lock()
            .map_err(|_| anyhow!("Catalog read connection is poisoned"))?;
        read_generation(&conn)
    }
}

fn advance_generation(conn: &Connection) -> Result<u64> {
    conn.execute(
        "INSERT INTO catalog_meta (key, value) VALUES (?1, 1)
         ON CONFLICT(key) DO UPDATE SET value = value + 1",
        params![GENERATION_KEY],
    )
    .context("Failed to advance catalog generation")?;
    let generation = conn.query_row(
        "SELECT value FROM catalog_meta WHERE key = ?1",
        params![GENERATION_KEY],
        |r| r.get(0),
    )?;
    Ok(generation)
}

fn read_generation(conn: &Connection) -> Result<u64> {
    let generation = conn
        .query_row(
            "SELECT value FROM catalog_meta WHERE key = ?1",
            params![GENERATION_KEY],
            |r| r.get(0),
        )
        .optional()
        .context("Failed to read catalog generation")?;
    Ok(generation.unwrap_or(0))
}

fn row_to_catalog_row(row: &Row<'_>) -> rusqlite::Result<CatalogRow> {
    Ok(CatalogRow {
        id: row.get(0)?,
        media_type: row.get(1)?,
        is_pending: row.get(2)?,
        is_trashed: row.get(3)?,
        is_favorite: row.get(4)?,
        is_download: row.get(5)?,
        relative_path: row.get(6)?,
        mime_type: row.get(7)?,
        size: row.get(8)?,
        duration_ms: row.get(9)?,
        date_taken: row.get(10)?,
        date_modified: row.get(11)?,
        generation_modified: row.get(12)?,
    })
}

fn fetch_file(conn: &Connection, id: i64) -> Result<Option<CatalogRow>> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {} FROM files WHERE id = ?1", FILE_COLUMNS))?;
    let row = stmt
        .query_row(params![id], row_to_catalog_row)
        .optional()
        .with_context(|| format!("Failed to read file {}", id))?;
    Ok(row)
}

impl CatalogTransaction<'_> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.tx
    }

    /// Inserts a row and returns its id.
    pub fn insert_file(&self, file: &NewFile) -> Result<u64> {
        let generation = file.generation_modified.unwrap_or(self.generation);
        let id = file.id.map(to_i64).transpose()?;
        self.tx
            .execute(
                "INSERT INTO files
                 (id, media_type, is_pending, is_trashed, is_favorite, is_download,
                  relative_path, mime_type, size, duration, date_taken, date_modified,
                  generation_modified)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    id,
                    file.media_type,
                    file.is_pending,
                    file.is_trashed,
                    file.is_favorite,
                    file.is_download,
                    file.relative_path,
                    file.mime_type,
                    to_i64(file.size)?,
                    to_i64(file.duration_ms)?,
                    file.date_taken,
                    file.date_modified,
                    to_i64(generation)?,
                ],
            )
            .context("Failed to insert file")?;
        Ok(self.tx.last_insert_rowid() as u64)
    }

    /// Overwrites the row with `file.id`, stamping it with this transaction's
    /// generation. Returns `false` when no such row exists.
    pub fn update_file(&self, file: &CatalogRow) -> Result<bool> {
        let updated = self
            .tx
            .execute(
                "UPDATE files SET
                 media_type = ?2, is_pending = ?3, is_trashed = ?4, is_favorite = ?5,
                 is_download = ?6, relative_path = ?7, mime_type = ?8, size = ?9,
                 duration = ?10, date_taken = ?11, date_modified = ?12,
                 generation_modified = ?13
                 WHERE id = ?1",
                params![
                    to_i64(file.id)?,
                    file.media_type,
                    file.is_pending,
                    file.is_trashed,
                    file.is_favorite,
                    file.is_download,
                    file.relative_path,
                    file.mime_type,
                    to_i64(file.size)?,
                    to_i64(file.duration_ms)?,
                    file.date_taken,
                    file.date_modified,
                    to_i64(self.generation)?,
                ],
            )
            .with_context(|| format!("Failed to update file {}", file.id))?;
        Ok(updated > 0)
    }

    /// Deletes a row, returning it as it was before the delete.
    pub fn delete_file(&self, id: u64) -> Result<Option<CatalogRow>> {
        let id = to_i64(id)?;
        let Some(row) = fetch_file(&self.tx, id)? else {
            return Ok(None);
        };
        self.tx
            .execute("DELETE FROM files WHERE id = ?1", params![id])
            .with_context(|| format!("Failed to delete file {}", id))?;
        Ok(Some(row))
    }

    pub fn get_file(&self, id: u64) -> Result<Option<CatalogRow>> {
        fetch_file(&self.tx, to_i64(id)?)
    }
}

impl CatalogSnapshot<'_> {
    pub(crate) fn conn(&self) -> &Connection {
        &self.tx
    }

    pub fn get_file(&self, id: u64) -> Result<Option<CatalogRow>> {
        fetch_file(&self.tx, to_i64(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MediaType;
    use tempfile::TempDir;

    fn create_test_catalog() -> (CatalogDb, TempDir) {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("external.db");
        let catalog = CatalogDb::open(&db_path, Duration::from_secs(5)).unwrap();
        (catalog, tmp)
    }

    fn image(date_taken: i64) -> NewFile {
        NewFile {
            media_type: MediaType::Image,
            mime_type: "image/jpeg".to_string(),
            size: 8000,
            duration_ms: 5,
            date_taken: Some(date_taken),
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_catalog_starts_at_generation_zero() {
        let (catalog, _tmp) = create_test_catalog();
        assert_eq!(catalog.current_generation().unwrap(), 0);
    }

    #[test]
    fn test_each_write_transaction_advances_generation() {
        let (catalog, _tmp) = create_test_catalog();

        let first = catalog
            .run_with_transaction(|txn| Ok::<_, anyhow::Error>(txn.generation()))
            .unwrap();
        let second = catalog
            .run_with_transaction(|txn| Ok::<_, anyhow::Error>(txn.generation()))
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(catalog.current_generation().unwrap(), 2);
    }

    #[test]
    fn test_failed_transaction_rolls_back_writes_and_generation() {
        let (catalog, _tmp) = create_test_catalog();

        let result: Result<()> = catalog.run_with_transaction(|txn| {
            txn.insert_file(&image(1))?;
            Err(anyhow!("owner aborted"))
        });
        assert!(result.is_err());

        assert_eq!(catalog.current_generation().unwrap(), 0);
        let row = catalog
            .run_with_read(|snapshot| snapshot.get_file(1))
            .unwrap();
        assert!(row.is_none());
    }

    #[test]
    fn test_insert_assigns_ids_and_transaction_generation() {
        let (catalog, _tmp) = create_test_catalog();

        let (id1, id2) = catalog
            .run_with_transaction(|txn| {
                let id1 = txn.insert_file(&image(10))?;
                let id2 = txn.insert_file(&NewFile {
                    generation_modified: Some(42),
                    ..image(20)
                })?;
                Ok::<_, anyhow::Error>((id1, id2))
            })
            .unwrap();
        assert_eq!((id1, id2), (1, 2));

        let (row1, row2) = catalog
            .run_with_read(|snapshot| {
                Ok::<_, anyhow::Error>((snapshot.get_file(1)?, snapshot.get_file(2)?))
            })
            .unwrap();
        let row1 = row1.unwrap();
        assert_eq!(row1.generation_modified, 1);
        assert_eq!(row1.media_type, MediaType::Image);
        assert_eq!(row1.mime_type, "image/jpeg");
        assert_eq!(row1.date_taken, Some(10));
        assert_eq!(row2.unwrap().generation_modified, 42);
    }

    #[test]
    fn test_update_stamps_generation_and_delete_returns_old_row() {
        let (catalog, _tmp) = create_test_catalog();
        catalog
            .run_with_transaction(|txn| txn.insert_file(&image(10)).map(|_| ()))
            .unwrap();

        let updated = catalog
            .run_with_transaction(|txn| {
                let mut row = txn.get_file(1)?.unwrap();
                row.is_trashed = true;
                txn.update_file(&row)
            })
            .unwrap();
        assert!(updated);

        let deleted = catalog
            .run_with_transaction(|txn| txn.delete_file(1))
            .unwrap()
            .unwrap();
        assert!(deleted.is_trashed);
        assert_eq!(deleted.generation_modified, 2);

        let missing = catalog.run_with_transaction(|txn| txn.delete_file(1)).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_reopen_keeps_schema_and_generation() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("external.db");
        {
            let catalog = CatalogDb::open(&db_path, Duration::from_secs(5)).unwrap();
            catalog
                .run_with_transaction(|txn| txn.insert_file(&image(10)).map(|_| ()))
                .unwrap();
        }

        let catalog = CatalogDb::open(&db_path, Duration::from_secs(5)).unwrap();
        assert_eq!(catalog.current_generation().unwrap(), 1);
    }

    #[test]
    fn test_open_rejects_foreign_files_table() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("external.db");
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute("CREATE TABLE files (id INTEGER PRIMARY KEY, name TEXT)", [])
                .unwrap();
        }

        let err = CatalogDb::open(&db_path, Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(format!("{:#}", err).contains("files"));
    }
}

//! Read queries projecting visible catalog rows into CloudMedia rows.

use super::mime::MimeFilter;
use crate::album::{Album, AlbumDisplayNames};
use crate::catalog::{CatalogSnapshot, EFFECTIVE_DATE_MS_SQL, VISIBLE_MEDIA_WHERE};
use crate::projection::{AlbumRow, MediaInfo, MediaRow};
use crate::sqlite_persistence::to_sql_int;
use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use tracing::debug;

/// Accumulates the WHERE clause of a query over visible rows of `files`.
struct Selection {
    clauses: Vec<String>,
    args: Vec<Value>,
}

impl Selection {
    fn visible() -> Self {
        Self {
            clauses: vec![VISIBLE_MEDIA_WHERE.to_string()],
            args: Vec::new(),
        }
    }

    fn id(mut self, id: u64) -> Result<Self> {
        self.clauses.push("id = ?".to_string());
        self.args.push(Value::Integer(to_sql_int(id)?));
        Ok(self)
    }

    fn generation_after(mut self, generation: u64) -> Result<Self> {
        self.clauses.push("generation_modified > ?".to_string());
        self.args.push(Value::Integer(to_sql_int(generation)?));
        Ok(self)
    }

    fn mime_type(mut self, filter: Option<&MimeFilter>) -> Self {
        if let Some(filter) = filter {
            self.clauses.push("mime_type LIKE ? ESCAPE '\\'".to_string());
            self.args.push(Value::Text(filter.like_pattern().to_string()));
        }
        self
    }

    fn album(mut self, album: Option<Album>) -> Self {
        if let Some(album) = album {
            self.clauses.push(album.where_clause());
        }
        self
    }

    fn where_sql(&self) -> String {
        self.clauses.join(" AND ")
    }
}

/// Runs the picker's read queries against a catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    album_names: AlbumDisplayNames,
}

impl QueryEngine {
    pub fn new(album_names: AlbumDisplayNames) -> Self {
        Self { album_names }
    }

    /// Visible rows modified after `generation`, newest effective date first.
    pub fn query_media_generation(
        &self,
        snapshot: &CatalogSnapshot<'_>,
        generation: u64,
        album: Option<Album>,
        mime_type: Option<&MimeFilter>,
    ) -> Result<Vec<MediaRow>> {
        let selection = Selection::visible()
            .generation_after(generation)?
            .album(album)
            .mime_type(mime_type);
        query_media(snapshot.conn(), &selection)
            .with_context(|| format!("Failed to query media after generation {}", generation))
    }

    /// The row with `id` if it is visible.
    pub fn query_media_id(&self, snapshot: &CatalogSnapshot<'_>, id: u64) -> Result<Option<MediaRow>> {
        let selection = Selection::visible().id(id)?;
        let mut rows = query_media(snapshot.conn(), &selection)
            .with_context(|| format!("Failed to query media {}", id))?;
        Ok(rows.pop())
    }

    /// Count and newest generation of visible rows modified after `generation`.
    pub fn get_media_info(&self, snapshot: &CatalogSnapshot<'_>, generation: u64) -> Result<MediaInfo> {
        let selection = Selection::visible().generation_after(generation)?;
        let sql = format!(
            "SELECT COUNT(*), COALESCE(MAX(generation_modified), 0) FROM files WHERE {}",
            selection.where_sql()
        );
        let info = snapshot
            .conn()
            .query_row(&sql, params_from_iter(selection.args.iter()), |row| {
                Ok(MediaInfo {
                    media_count: row.get(0)?,
                    media_generation: row.get(1)?,
                })
            })
            .context("Failed to query media info")?;
        Ok(info)
    }

    /// One row per non-empty album, in [`Album::ALL`] order.
    pub fn query_albums(
        &self,
        snapshot: &CatalogSnapshot<'_>,
        mime_type: Option<&MimeFilter>,
    ) -> Result<Vec<AlbumRow>> {
        let mut albums = Vec::with_capacity(Album::ALL.len());
        for album in Album::ALL {
            let selection = Selection::visible().album(Some(album)).mime_type(mime_type);
            let sql = format!(
                "SELECT id, {} AS date_taken_ms, COUNT(*) OVER () FROM files
                 WHERE {}
                 ORDER BY date_taken_ms DESC, id DESC
                 LIMIT 1",
                EFFECTIVE_DATE_MS_SQL,
                selection.where_sql()
            );
            let cover = snapshot
                .conn()
                .query_row(&sql, params_from_iter(selection.args.iter()), |row| {
                    Ok((
                        row.get::<_, u64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, u64>(2)?,
                    ))
                })
                .optional()
                .with_context(|| format!("Failed to query album {}", album))?;

            match cover {
                Some((cover_id, date_taken_ms, media_count)) => {
                    debug!("Album {} has {} items, cover {}", album, media_count, cover_id);
                    albums.push(AlbumRow {
                        id: album.id().to_string(),
                        display_name: self.album_names.get(album).to_string(),
                        media_cover_id: cover_id.to_string(),
                        date_taken_ms,
                        media_count,
                    });
                }
                None => debug!("Album {} is empty, omitted", album),
            }
        }
        Ok(albums)
    }
}

fn query_media(conn: &Connection, selection: &Selection) -> Result<Vec<MediaRow>> {
    let sql = format!(
        "SELECT id, {} AS date_taken_ms, size, mime_type, duration, is_favorite FROM files
         WHERE {}
         ORDER BY date_taken_ms DESC, id DESC",
        EFFECTIVE_DATE_MS_SQL,
        selection.where_sql()
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(selection.args.iter()), |row| {
            Ok(MediaRow {
                id: row.get(0)?,
                date_taken_ms: row.get(1)?,
                size_bytes: row.get(2)?,
                mime_type: row.get(3)?,
                duration_ms: row.get(4)?,
                is_favorite: u8::from(row.get::<_, bool>(5)?),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

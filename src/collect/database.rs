//! Read-only access to the content database.
//!
//! Each content type may have a table of the same name with a `slug`
//! column and an optional `category_slug` column.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use rustc_hash::FxHashSet;

use super::DataError;
use crate::debug;

/// One row of a content table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRow {
    pub table: String,
    pub slug: String,
    pub category: Option<String>,
}

/// Read every content row of the configured tables, in table order.
///
/// Tables missing from the database or lacking a `slug` column are skipped.
pub fn read_rows(db: &Path, types: &[String]) -> Result<Vec<ContentRow>, DataError> {
    let err = |e| DataError::Database(db.to_path_buf(), e);

    if !db.is_file() {
        return Err(DataError::Io(
            db.to_path_buf(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "database not found"),
        ));
    }

    let conn = Connection::open_with_flags(
        db,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(err)?;

    let tables = table_names(&conn).map_err(err)?;
    let mut rows = Vec::new();

    for table in types.iter().filter(|t| tables.contains(t.as_str())) {
        let columns = column_names(&conn, table).map_err(err)?;
        if !columns.contains("slug") {
            debug!("collect"; "table {} has no slug column, skipping", table);
            continue;
        }

        let sql = if columns.contains("category_slug") {
            format!("SELECT slug, category_slug FROM \"{table}\"")
        } else {
            format!("SELECT slug, NULL FROM \"{table}\"")
        };

        let mut stmt = conn.prepare(&sql).map_err(err)?;
        let table_rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            })
            .map_err(err)?
            .filter_map(Result::ok)
            .filter_map(|(slug, category)| {
                let slug = slug.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
                let category = category
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty());
                Some(ContentRow {
                    table: table.clone(),
                    slug,
                    category,
                })
            });
        rows.extend(table_rows);
    }

    Ok(rows)
}

fn table_names(conn: &Connection) -> rusqlite::Result<FxHashSet<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<_>>()?;
    Ok(names)
}

fn column_names(conn: &Connection, table: &str) -> rusqlite::Result<FxHashSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{table}\")"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<_>>()?;
    Ok(names)
}

//! SQLite-backed phone directory storage
//!
//! [`Directory`] owns the single database connection for the process. It
//! provides:
//! - Lookup-or-create resolution of name components (surnames, names,
//!   patronymics) as one atomic upsert
//! - Record add/update/delete, each in its own transaction
//! - Joined listings, unfiltered or through the filter query builder
//!
//! Writes either commit completely or roll back. Reads that fail through
//! [`Directory::fetch_all`] are logged and reported as no rows.

mod lookups;
mod records;
mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, Params, Row, Transaction};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::core::error::{DirectoryError, Result};

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Row counts and file details for `phonedir status`
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryStats {
    /// Rows in the directory table
    pub records: usize,
    /// Rows visible in the joined listing
    pub listed: usize,
    pub surnames: usize,
    pub names: usize,
    pub patronymics: usize,
    pub db_size_bytes: u64,
}

/// The phone directory database
pub struct Directory {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Directory {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| DirectoryError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        debug!(path = %path.display(), "connected to directory database");

        Self::from_connection(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_casefold(&conn)?;

        let mut directory = Self { conn, path };
        directory.init_schema()?;
        Ok(directory)
    }

    /// Database file, or `None` for an in-memory database
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a write statement in its own transaction
    ///
    /// Success commits; failure rolls back and returns the error.
    pub fn execute<P: Params>(&mut self, sql: &str, params: P) -> Result<usize> {
        self.write("execute", |tx| Ok(tx.execute(sql, params)?))
    }

    /// Run a read query, reporting failure as no rows
    pub fn fetch_all<T, P, F>(&self, sql: &str, params: P, map: F) -> Vec<T>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        match self.query_rows(sql, params, map) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "read failed, treating as no rows");
                Vec::new()
            }
        }
    }

    /// Run a read query, surfacing failures
    fn query_rows<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map)?;
        let collected = rows.collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(collected)
    }

    /// Run `op` inside a transaction, committing on success
    ///
    /// Returning early drops the transaction, which rolls it back.
    fn write<T, F>(&mut self, op: &str, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let tx = self.conn.transaction()?;
        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                debug!(op, "write committed");
                Ok(value)
            }
            Err(e) => {
                error!(op, error = %e, "write failed, rolled back");
                Err(e)
            }
        }
    }

    /// Count rows of a table
    fn count(&self, table: &str) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        Ok(n as usize)
    }

    /// Gather row counts for every table
    pub fn statistics(&self) -> Result<DirectoryStats> {
        let listed: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM ({})", crate::core::filter::BASE_QUERY),
            [],
            |row| row.get(0),
        )?;

        let db_size_bytes = self
            .path
            .as_ref()
            .and_then(|p| fs::metadata(p).ok())
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(DirectoryStats {
            records: self.count("directory")?,
            listed: listed as usize,
            surnames: self.count("surnames")?,
            names: self.count("names")?,
            patronymics: self.count("patronymics")?,
            db_size_bytes,
        })
    }

    /// Close the connection, reporting any failure
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| DirectoryError::Storage(e))?;
        debug!("directory database closed");
        Ok(())
    }
}

/// Register `casefold(text)`: Unicode lowercasing, NULL passes through
///
/// SQLite's built-in `lower()` and `LIKE` only fold ASCII.
fn register_casefold(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests;

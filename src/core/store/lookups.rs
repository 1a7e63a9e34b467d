//! Lookup-table resolution and management

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::Directory;
use crate::core::error::{DirectoryError, Result};
use crate::core::lookup::{LookupEntry, LookupTable};

/// Resolve `value` to its uid in `table`, inserting it if absent
///
/// One upsert statement: on a unique conflict the existing row is touched
/// and its uid returned, so there is no window between lookup and insert.
/// `value` must already be trimmed and non-empty.
pub(super) fn resolve_in(conn: &Connection, table: LookupTable, value: &str) -> Result<i64> {
    let sql = format!(
        "INSERT INTO {} (value) VALUES (?1) \
         ON CONFLICT(value) DO UPDATE SET value = excluded.value \
         RETURNING uid",
        table.table_name()
    );
    let uid: i64 = conn.query_row(&sql, params![value], |row| row.get(0))?;
    debug!(table = table.table_name(), uid, "resolved lookup value");
    Ok(uid)
}

/// Trim a lookup value, rejecting it if nothing is left
fn required(table: LookupTable, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DirectoryError::EmptyField {
            field: table.field_label(),
        });
    }
    Ok(value.to_string())
}

impl Directory {
    /// Resolve a name component to its uid, creating it if needed
    ///
    /// Matching is exact and case-sensitive, unlike listing filters.
    pub fn resolve(&mut self, table: LookupTable, value: &str) -> Result<i64> {
        let value = required(table, value)?;
        self.write("resolve", |tx| resolve_in(tx, table, &value))
    }

    /// Find the uid of an exact value without creating it
    pub fn find_lookup(&self, table: LookupTable, value: &str) -> Result<Option<i64>> {
        let sql = format!("SELECT uid FROM {} WHERE value = ?1", table.table_name());
        let uid = self
            .conn
            .query_row(&sql, params![value], |row| row.get(0))
            .optional()?;
        Ok(uid)
    }

    /// All values of a lookup table, oldest first
    pub fn list_lookup(&self, table: LookupTable) -> Vec<LookupEntry> {
        let sql = format!(
            "SELECT uid, value FROM {} ORDER BY uid ASC",
            table.table_name()
        );
        self.fetch_all(&sql, [], |row| {
            Ok(LookupEntry {
                uid: row.get(0)?,
                value: row.get(1)?,
            })
        })
    }

    /// Insert a new value; an existing equal value is a constraint error
    pub fn add_lookup(&mut self, table: LookupTable, value: &str) -> Result<i64> {
        let value = required(table, value)?;
        let sql = format!(
            "INSERT INTO {} (value) VALUES (?1) RETURNING uid",
            table.table_name()
        );
        self.write("add_lookup", |tx| {
            Ok(tx.query_row(&sql, params![value], |row| row.get(0))?)
        })
    }

    /// Change the text of an existing value, keeping its uid
    pub fn rename_lookup(&mut self, table: LookupTable, uid: i64, value: &str) -> Result<()> {
        let value = required(table, value)?;
        let sql = format!("UPDATE {} SET value = ?1 WHERE uid = ?2", table.table_name());
        self.write("rename_lookup", |tx| {
            let changed = tx.execute(&sql, params![value, uid])?;
            if changed == 0 {
                return Err(DirectoryError::LookupNotFound { table, uid });
            }
            Ok(())
        })
    }

    /// Delete a value
    ///
    /// Directory records referencing it stay stored but drop out of listings.
    pub fn delete_lookup(&mut self, table: LookupTable, uid: i64) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE uid = ?1", table.table_name());
        self.write("delete_lookup", |tx| {
            let changed = tx.execute(&sql, params![uid])?;
            if changed == 0 {
                return Err(DirectoryError::LookupNotFound { table, uid });
            }
            Ok(())
        })
    }

    /// Number of directory records referencing a lookup value
    pub fn lookup_usage(&self, table: LookupTable, uid: i64) -> Result<usize> {
        let sql = format!(
            "SELECT COUNT(*) FROM directory WHERE {} = ?1",
            table.directory_column()
        );
        let n: i64 = self.conn.query_row(&sql, params![uid], |row| row.get(0))?;
        Ok(n as usize)
    }
}

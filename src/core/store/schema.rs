//! Database schema initialization

use rusqlite::{params, OptionalExtension};
use tracing::warn;

use super::{Directory, SCHEMA_VERSION};
use crate::core::error::{DirectoryError, Result};

impl Directory {
    /// Create any missing tables and check the schema version
    ///
    /// A database from another schema version is rebuilt only while it
    /// holds no rows; otherwise opening fails.
    ///
    /// Lookup values are unique so resolution can upsert. A lookup row deleted
    /// while still referenced nulls the reference, and the joined listing then
    /// drops that record.
    pub(super) fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Normalized name components
            CREATE TABLE IF NOT EXISTS surnames (
                uid INTEGER PRIMARY KEY AUTOINCREMENT,
                value TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS names (
                uid INTEGER PRIMARY KEY AUTOINCREMENT,
                value TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS patronymics (
                uid INTEGER PRIMARY KEY AUTOINCREMENT,
                value TEXT NOT NULL UNIQUE
            );

            -- Directory entries
            CREATE TABLE IF NOT EXISTS directory (
                uid INTEGER PRIMARY KEY AUTOINCREMENT,
                surname INTEGER REFERENCES surnames(uid) ON DELETE SET NULL,
                name INTEGER REFERENCES names(uid) ON DELETE SET NULL,
                patronymic INTEGER REFERENCES patronymics(uid) ON DELETE SET NULL,
                city TEXT NOT NULL,
                street TEXT NOT NULL,
                house TEXT NOT NULL,
                telephone TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_directory_surname ON directory(surname);
            CREATE INDEX IF NOT EXISTS idx_directory_name ON directory(name);
            CREATE INDEX IF NOT EXISTS idx_directory_patronymic ON directory(patronymic);
            "#,
        )?;

        let found: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        match found {
            None => {
                self.conn.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    params![SCHEMA_VERSION],
                )?;
                Ok(())
            }
            Some(version) if version == SCHEMA_VERSION => Ok(()),
            Some(version) if self.is_blank()? => {
                warn!(found = version, expected = SCHEMA_VERSION, "rebuilding empty database");
                self.conn.execute_batch(
                    "DROP TABLE IF EXISTS directory;
                     DROP TABLE IF EXISTS surnames;
                     DROP TABLE IF EXISTS names;
                     DROP TABLE IF EXISTS patronymics;
                     DROP TABLE IF EXISTS schema_version;",
                )?;
                self.init_schema()
            }
            Some(version) => Err(DirectoryError::SchemaMismatch {
                found: version,
                expected: SCHEMA_VERSION,
            }),
        }
    }

    /// True when no table holds any row
    fn is_blank(&self) -> Result<bool> {
        for table in ["directory", "surnames", "names", "patronymics"] {
            if self.count(table)? > 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

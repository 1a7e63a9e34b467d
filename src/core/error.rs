//! Error types for directory storage operations

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::lookup::LookupTable;

/// Errors surfaced by the directory storage layer
#[derive(Debug, Error, Diagnostic)]
pub enum DirectoryError {
    /// A required field was empty after trimming
    #[error("{field} must not be empty")]
    #[diagnostic(
        code(phonedir::validation),
        help("All of surname, name, patronymic, city, street, house and telephone are required")
    )]
    EmptyField { field: &'static str },

    /// No directory record has the given uid
    #[error("no directory record with uid {0}")]
    #[diagnostic(code(phonedir::not_found), help("Run `phonedir list` to see existing records"))]
    RecordNotFound(i64),

    /// No lookup value has the given uid
    #[error("no entry with uid {uid} in {table}")]
    #[diagnostic(code(phonedir::not_found))]
    LookupNotFound { table: LookupTable, uid: i64 },

    /// Unrecognized column label in a filter
    #[error("unknown column '{0}'")]
    #[diagnostic(
        code(phonedir::filter),
        help("Valid columns: ID, Surname, Name, Patronymic, City, Street, House, Telephone")
    )]
    UnknownColumn(String),

    /// The database was created by an incompatible schema version
    #[error("database schema version {found} does not match expected version {expected}")]
    #[diagnostic(code(phonedir::schema))]
    SchemaMismatch { found: i32, expected: i32 },

    /// The database location could not be prepared
    #[error("cannot create {}: {source}", path.display())]
    #[diagnostic(code(phonedir::io))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Any failure reported by SQLite
    #[error("storage error: {0}")]
    #[diagnostic(code(phonedir::storage))]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

//! Directory record writes and listings

use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::lookups::resolve_in;
use super::Directory;
use crate::core::error::{DirectoryError, Result};
use crate::core::filter::{FilterSpec, BASE_QUERY};
use crate::core::lookup::LookupTable;
use crate::core::record::{DirectoryRecord, DirectoryRow, RecordFields};

/// Map a row shaped like [`BASE_QUERY`]
fn directory_row(row: &Row<'_>) -> rusqlite::Result<DirectoryRow> {
    Ok(DirectoryRow {
        uid: row.get(0)?,
        surname: row.get(1)?,
        name: row.get(2)?,
        patronymic: row.get(3)?,
        city: row.get(4)?,
        street: row.get(5)?,
        house: row.get(6)?,
        telephone: row.get(7)?,
    })
}

impl Directory {
    /// Add a record, resolving its name components
    ///
    /// Resolution and insert share one transaction: if the insert fails, no
    /// newly created lookup value is kept either.
    pub fn add_record(&mut self, fields: &RecordFields) -> Result<i64> {
        let fields = fields.validated()?;
        self.write("add_record", |tx| {
            let surname = resolve_in(tx, LookupTable::Surnames, &fields.surname)?;
            let name = resolve_in(tx, LookupTable::Names, &fields.name)?;
            let patronymic = resolve_in(tx, LookupTable::Patronymics, &fields.patronymic)?;

            tx.execute(
                "INSERT INTO directory (surname, name, patronymic, city, street, house, telephone)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    surname,
                    name,
                    patronymic,
                    fields.city,
                    fields.street,
                    fields.house,
                    fields.telephone
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    /// Replace every field of an existing record
    pub fn update_record(&mut self, uid: i64, fields: &RecordFields) -> Result<()> {
        let fields = fields.validated()?;
        self.write("update_record", |tx| {
            let surname = resolve_in(tx, LookupTable::Surnames, &fields.surname)?;
            let name = resolve_in(tx, LookupTable::Names, &fields.name)?;
            let patronymic = resolve_in(tx, LookupTable::Patronymics, &fields.patronymic)?;

            let changed = tx.execute(
                "UPDATE directory
                 SET surname = ?1, name = ?2, patronymic = ?3,
                     city = ?4, street = ?5, house = ?6, telephone = ?7
                 WHERE uid = ?8",
                params![
                    surname,
                    name,
                    patronymic,
                    fields.city,
                    fields.street,
                    fields.house,
                    fields.telephone,
                    uid
                ],
            )?;
            if changed == 0 {
                return Err(DirectoryError::RecordNotFound(uid));
            }
            Ok(())
        })
    }

    /// Delete a record by uid
    pub fn delete_record(&mut self, uid: i64) -> Result<()> {
        self.write("delete_record", |tx| {
            let changed = tx.execute("DELETE FROM directory WHERE uid = ?1", params![uid])?;
            if changed == 0 {
                return Err(DirectoryError::RecordNotFound(uid));
            }
            Ok(())
        })
    }

    /// Get a record as listed, `None` if missing or hidden by a deleted
    /// name component
    pub fn get_record(&self, uid: i64) -> Result<Option<DirectoryRow>> {
        let sql = format!("{} WHERE d.uid = ?1", BASE_QUERY);
        let row = self
            .conn
            .query_row(&sql, params![uid], directory_row)
            .optional()?;
        Ok(row)
    }

    /// Get the stored record with its raw lookup keys
    pub fn get_stored_record(&self, uid: i64) -> Result<Option<DirectoryRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT uid, surname, name, patronymic, city, street, house, telephone
                 FROM directory WHERE uid = ?1",
                params![uid],
                |row| {
                    Ok(DirectoryRecord {
                        uid: row.get(0)?,
                        surname_uid: row.get(1)?,
                        name_uid: row.get(2)?,
                        patronymic_uid: row.get(3)?,
                        city: row.get(4)?,
                        street: row.get(5)?,
                        house: row.get(6)?,
                        telephone: row.get(7)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Every listable record, unfiltered
    pub fn list_all(&self) -> Vec<DirectoryRow> {
        self.fetch_all(BASE_QUERY, [], directory_row)
    }

    /// Records matching a filter spec
    ///
    /// Unlike [`Directory::list_all`], a failing query is returned as an
    /// error so the caller can report it.
    pub fn search(&self, filter: &FilterSpec) -> Result<Vec<DirectoryRow>> {
        let query = filter.build_query();
        self.query_rows(&query.sql, params_from_iter(query.params.iter()), directory_row)
    }

    /// Stored directory rows, including ones hidden from listings
    pub fn count_records(&self) -> Result<usize> {
        self.count("directory")
    }
}

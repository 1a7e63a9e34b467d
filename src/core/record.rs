//! Directory record types

use serde::Serialize;

use crate::core::error::{DirectoryError, Result};

/// User-entered fields of a directory record, submitted for add and update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub city: String,
    pub street: String,
    pub house: String,
    pub telephone: String,
}

impl RecordFields {
    /// Trim every field and reject the record if any field is empty
    ///
    /// Runs before storage is touched, so a rejected record has no side effect.
    pub fn validated(&self) -> Result<RecordFields> {
        let fields = RecordFields {
            surname: self.surname.trim().to_string(),
            name: self.name.trim().to_string(),
            patronymic: self.patronymic.trim().to_string(),
            city: self.city.trim().to_string(),
            street: self.street.trim().to_string(),
            house: self.house.trim().to_string(),
            telephone: self.telephone.trim().to_string(),
        };

        let required = [
            ("surname", &fields.surname),
            ("name", &fields.name),
            ("patronymic", &fields.patronymic),
            ("city", &fields.city),
            ("street", &fields.street),
            ("house", &fields.house),
            ("telephone", &fields.telephone),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(DirectoryError::EmptyField { field });
            }
        }

        Ok(fields)
    }
}

/// A stored directory row, name components held as lookup-table keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryRecord {
    pub uid: i64,
    pub surname_uid: Option<i64>,
    pub name_uid: Option<i64>,
    pub patronymic_uid: Option<i64>,
    pub city: String,
    pub street: String,
    pub house: String,
    pub telephone: String,
}

/// A directory row joined with its lookup values, as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryRow {
    pub uid: i64,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub city: String,
    pub street: String,
    pub house: String,
    pub telephone: String,
}

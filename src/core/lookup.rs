//! Lookup tables holding the normalized name components

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the three tables of shared name components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupTable {
    Surnames,
    Names,
    Patronymics,
}

impl LookupTable {
    pub const ALL: [LookupTable; 3] = [
        LookupTable::Surnames,
        LookupTable::Names,
        LookupTable::Patronymics,
    ];

    /// SQL table name
    pub fn table_name(&self) -> &'static str {
        match self {
            LookupTable::Surnames => "surnames",
            LookupTable::Names => "names",
            LookupTable::Patronymics => "patronymics",
        }
    }

    /// Column of `directory` holding the foreign key into this table
    pub fn directory_column(&self) -> &'static str {
        match self {
            LookupTable::Surnames => "surname",
            LookupTable::Names => "name",
            LookupTable::Patronymics => "patronymic",
        }
    }

    /// Human-readable singular label, used in validation messages
    pub fn field_label(&self) -> &'static str {
        match self {
            LookupTable::Surnames => "surname",
            LookupTable::Names => "name",
            LookupTable::Patronymics => "patronymic",
        }
    }
}

impl fmt::Display for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for LookupTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "surnames" | "surname" => Ok(LookupTable::Surnames),
            "names" | "name" => Ok(LookupTable::Names),
            "patronymics" | "patronymic" => Ok(LookupTable::Patronymics),
            _ => Err(format!("unknown lookup table: {}", s)),
        }
    }
}

/// A single (uid, value) row of a lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupEntry {
    pub uid: i64,
    pub value: String,
}

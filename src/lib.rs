//! phonedir: a normalized phone directory
//!
//! Records store surname, name and patronymic as keys into shared lookup
//! tables, alongside free-text address and telephone fields, in a local
//! SQLite database.

pub mod cli;
pub mod core;

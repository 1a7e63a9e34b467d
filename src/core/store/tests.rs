use super::*;
use rusqlite::params;
use tempfile::tempdir;

use crate::core::filter::{FilterColumn, FilterSpec};
use crate::core::lookup::LookupTable;
use crate::core::record::{DirectoryRow, RecordFields};

fn fields(
    surname: &str,
    name: &str,
    patronymic: &str,
    city: &str,
    street: &str,
    house: &str,
    telephone: &str,
) -> RecordFields {
    RecordFields {
        surname: surname.to_string(),
        name: name.to_string(),
        patronymic: patronymic.to_string(),
        city: city.to_string(),
        street: street.to_string(),
        house: house.to_string(),
        telephone: telephone.to_string(),
    }
}

fn rows_with_value(dir: &Directory, table: LookupTable, value: &str) -> i64 {
    dir.conn
        .query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE value = ?1", table.table_name()),
            params![value],
            |row| row.get(0),
        )
        .unwrap()
}

fn uids(rows: &[DirectoryRow]) -> Vec<i64> {
    let mut uids: Vec<i64> = rows.iter().map(|r| r.uid).collect();
    uids.sort();
    uids
}

#[test]
fn test_open_creates_schema() {
    let dir = Directory::open_in_memory().unwrap();
    let stats = dir.statistics().unwrap();

    assert_eq!(stats.records, 0);
    assert_eq!(stats.surnames, 0);
    assert!(dir.path().is_none());
}

#[test]
fn test_open_on_disk_and_reopen() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("nested/directory.db");

    let mut dir = Directory::open(&path).unwrap();
    dir.add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Tverskaya", "1", "111"))
        .unwrap();
    dir.close().unwrap();

    let dir = Directory::open(&path).unwrap();
    assert_eq!(dir.count_records().unwrap(), 1);
    assert_eq!(dir.path(), Some(path.as_path()));
    assert!(dir.statistics().unwrap().db_size_bytes > 0);
}

#[test]
fn test_schema_version_mismatch_is_rejected() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("directory.db");

    let mut dir = Directory::open(&path).unwrap();
    dir.add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Tverskaya", "1", "111"))
        .unwrap();
    dir.conn
        .execute("UPDATE schema_version SET version = 99", [])
        .unwrap();
    dir.close().unwrap();

    let err = Directory::open(&path).err().unwrap();
    assert!(matches!(
        err,
        DirectoryError::SchemaMismatch {
            found: 99,
            expected: SCHEMA_VERSION
        }
    ));
}

#[test]
fn test_schema_version_mismatch_rebuilds_empty_database() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("directory.db");

    let dir = Directory::open(&path).unwrap();
    dir.conn
        .execute("UPDATE schema_version SET version = 99", [])
        .unwrap();
    dir.close().unwrap();

    let dir = Directory::open(&path).unwrap();
    let version: i32 = dir
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
}

// =========================================================================
// Resolver
// =========================================================================

#[test]
fn test_resolve_is_idempotent() {
    let mut dir = Directory::open_in_memory().unwrap();

    let first = dir.resolve(LookupTable::Surnames, "Ivanov").unwrap();
    let second = dir.resolve(LookupTable::Surnames, "Ivanov").unwrap();

    assert_eq!(first, second);
    assert_eq!(rows_with_value(&dir, LookupTable::Surnames, "Ivanov"), 1);
}

#[test]
fn test_resolve_keeps_values_unique() {
    let mut dir = Directory::open_in_memory().unwrap();
    let values = ["Petrov", "Sidorov", "Petrov", "petrov", "Sidorov", "Petrov"];

    for value in values {
        dir.resolve(LookupTable::Surnames, value).unwrap();
    }

    for value in ["Petrov", "Sidorov", "petrov"] {
        assert_eq!(rows_with_value(&dir, LookupTable::Surnames, value), 1);
    }
    assert_eq!(dir.list_lookup(LookupTable::Surnames).len(), 3);
}

#[test]
fn test_resolve_is_case_sensitive() {
    let mut dir = Directory::open_in_memory().unwrap();

    let upper = dir.resolve(LookupTable::Names, "Anna").unwrap();
    let lower = dir.resolve(LookupTable::Names, "anna").unwrap();

    assert_ne!(upper, lower);
}

#[test]
fn test_resolve_tables_are_independent() {
    let mut dir = Directory::open_in_memory().unwrap();

    let surname = dir.resolve(LookupTable::Surnames, "Pavel").unwrap();
    let name = dir.resolve(LookupTable::Names, "Pavel").unwrap();

    assert_eq!(surname, 1);
    assert_eq!(name, 1);
    assert_eq!(dir.find_lookup(LookupTable::Patronymics, "Pavel").unwrap(), None);
}

#[test]
fn test_resolve_rejects_blank_value() {
    let mut dir = Directory::open_in_memory().unwrap();

    let err = dir.resolve(LookupTable::Patronymics, "   ").unwrap_err();
    assert!(matches!(err, DirectoryError::EmptyField { field: "patronymic" }));
    assert!(dir.list_lookup(LookupTable::Patronymics).is_empty());
}

#[test]
fn test_resolve_trims_value() {
    let mut dir = Directory::open_in_memory().unwrap();

    let padded = dir.resolve(LookupTable::Names, "  Olga ").unwrap();
    let plain = dir.resolve(LookupTable::Names, "Olga").unwrap();

    assert_eq!(padded, plain);
}

// =========================================================================
// Records
// =========================================================================

#[test]
fn test_add_record_shares_lookup_values() {
    let mut dir = Directory::open_in_memory().unwrap();

    let a = dir
        .add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Arbat", "1", "111"))
        .unwrap();
    let b = dir
        .add_record(&fields("Ivanov", "Petr", "Ivanovich", "Tula", "Lenina", "2", "222"))
        .unwrap();

    let a = dir.get_stored_record(a).unwrap().unwrap();
    let b = dir.get_stored_record(b).unwrap().unwrap();
    assert_eq!(a.surname_uid, b.surname_uid);
    assert_eq!(a.patronymic_uid, b.patronymic_uid);
    assert_ne!(a.name_uid, b.name_uid);
    assert_eq!(dir.list_lookup(LookupTable::Surnames).len(), 1);
}

#[test]
fn test_add_record_rejects_empty_field_without_side_effects() {
    let mut dir = Directory::open_in_memory().unwrap();

    let err = dir
        .add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Arbat", "", "111"))
        .unwrap_err();

    assert!(matches!(err, DirectoryError::EmptyField { field: "house" }));
    assert_eq!(dir.count_records().unwrap(), 0);
    assert!(dir.list_lookup(LookupTable::Surnames).is_empty());
}

#[test]
fn test_get_record_returns_joined_values() {
    let mut dir = Directory::open_in_memory().unwrap();
    let uid = dir
        .add_record(&fields("Иванов", "Иван", "Иванович", "Москва", "Тверская", "7", "+7 495 123"))
        .unwrap();

    let row = dir.get_record(uid).unwrap().unwrap();
    assert_eq!(row.surname, "Иванов");
    assert_eq!(row.house, "7");
    assert!(dir.get_record(uid + 1).unwrap().is_none());
}

#[test]
fn test_update_record_replaces_all_fields() {
    let mut dir = Directory::open_in_memory().unwrap();
    let uid = dir
        .add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Arbat", "1", "111"))
        .unwrap();

    dir.update_record(
        uid,
        &fields("Petrov", "Petr", "Petrovich", "Tula", "Lenina", "2", "222"),
    )
    .unwrap();

    let row = dir.get_record(uid).unwrap().unwrap();
    assert_eq!(row.surname, "Petrov");
    assert_eq!(row.name, "Petr");
    assert_eq!(row.patronymic, "Petrovich");
    assert_eq!(row.city, "Tula");
    assert_eq!(row.street, "Lenina");
    assert_eq!(row.house, "2");
    assert_eq!(row.telephone, "222");
    assert_eq!(dir.count_records().unwrap(), 1);
}

#[test]
fn test_update_unknown_record_rolls_back_new_lookups() {
    let mut dir = Directory::open_in_memory().unwrap();

    let err = dir
        .update_record(
            42,
            &fields("Smirnov", "Oleg", "Olegovich", "Kazan", "Bauman", "3", "333"),
        )
        .unwrap_err();

    assert!(matches!(err, DirectoryError::RecordNotFound(42)));
    assert_eq!(dir.find_lookup(LookupTable::Surnames, "Smirnov").unwrap(), None);
}

#[test]
fn test_delete_record() {
    let mut dir = Directory::open_in_memory().unwrap();
    let uid = dir
        .add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Arbat", "1", "111"))
        .unwrap();

    dir.delete_record(uid).unwrap();

    assert_eq!(dir.count_records().unwrap(), 0);
    assert!(matches!(
        dir.delete_record(uid),
        Err(DirectoryError::RecordNotFound(_))
    ));
    // Lookup values outlive the records that used them
    assert_eq!(dir.list_lookup(LookupTable::Surnames).len(), 1);
}

#[test]
fn test_failed_write_leaves_directory_unchanged() {
    let mut dir = Directory::open_in_memory().unwrap();
    dir.add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Arbat", "1", "111"))
        .unwrap();
    let before = dir.count_records().unwrap();

    let result = dir.execute(
        "INSERT INTO directory (surname, name, patronymic, city, street, house, telephone)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![999, 999, 999, "Nowhere", "Nostreet", "0", "000"],
    );

    assert!(matches!(result, Err(DirectoryError::Storage(_))));
    assert_eq!(dir.count_records().unwrap(), before);
}

#[test]
fn test_fetch_all_reports_failure_as_no_rows() {
    let dir = Directory::open_in_memory().unwrap();

    let rows: Vec<i64> = dir.fetch_all("SELECT uid FROM no_such_table", [], |row| row.get(0));
    assert!(rows.is_empty());
}

// =========================================================================
// Listings
// =========================================================================

#[test]
fn test_list_all_without_filters_returns_every_row() {
    let mut dir = Directory::open_in_memory().unwrap();
    let a = dir
        .add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Arbat", "1", "111"))
        .unwrap();
    let b = dir
        .add_record(&fields("Petrov", "Petr", "Petrovich", "Tula", "Lenina", "2", "222"))
        .unwrap();

    assert_eq!(uids(&dir.list_all()), vec![a, b]);
    assert_eq!(uids(&dir.search(&FilterSpec::new()).unwrap()), vec![a, b]);
}

#[test]
fn test_search_matches_any_of_seven_fields() {
    let mut dir = Directory::open_in_memory().unwrap();
    let by_surname = dir
        .add_record(&fields("Smith", "John", "James", "London", "Baker", "221", "020-1111"))
        .unwrap();
    let by_city = dir
        .add_record(&fields("Brown", "Anne", "Marie", "Smithfield", "Main", "5", "020-2222"))
        .unwrap();
    let by_phone = dir
        .add_record(&fields("Jones", "Paul", "David", "Leeds", "High", "9", "555-SMITH-LIKE"))
        .unwrap();
    let _unrelated = dir
        .add_record(&fields("Taylor", "Emma", "Rose", "York", "Church", "12", "020-3333"))
        .unwrap();

    let rows = dir.search(&FilterSpec::new().with_search("smith")).unwrap();

    assert_eq!(uids(&rows), vec![by_surname, by_city, by_phone]);
}

#[test]
fn test_search_and_column_filter_must_both_match() {
    let mut dir = Directory::open_in_memory().unwrap();
    let both = dir
        .add_record(&fields("Adams", "Ann", "Lee", "New York", "5th", "1", "555-1234"))
        .unwrap();
    let _city_only = dir
        .add_record(&fields("Baker", "Bob", "Ray", "New York", "6th", "2", "111-1111"))
        .unwrap();
    let _phone_only = dir
        .add_record(&fields("Clark", "Cid", "Max", "Boston", "7th", "3", "555-9999"))
        .unwrap();

    let filter = FilterSpec::new()
        .with_search("555")
        .with_column(FilterColumn::City, "York");
    let rows = dir.search(&filter).unwrap();

    assert_eq!(uids(&rows), vec![both]);
}

#[test]
fn test_column_filters_on_id_and_house_compare_as_text() {
    let mut dir = Directory::open_in_memory().unwrap();
    for i in 1..=12 {
        dir.add_record(&fields(
            "Surname",
            "Name",
            "Patronymic",
            "City",
            "Street",
            &format!("{}a", i),
            "000",
        ))
        .unwrap();
    }

    let by_id = dir
        .search(&FilterSpec::new().with_column(FilterColumn::Id, "1"))
        .unwrap();
    assert_eq!(uids(&by_id), vec![1, 10, 11, 12]);

    let by_house = dir
        .search(&FilterSpec::new().with_column(FilterColumn::House, "2A"))
        .unwrap();
    assert_eq!(uids(&by_house), vec![2, 12]);
}

#[test]
fn test_search_folds_cyrillic_case() {
    let mut dir = Directory::open_in_memory().unwrap();
    let uid = dir
        .add_record(&fields("Иванов", "Иван", "Иванович", "Москва", "Тверская", "7", "123"))
        .unwrap();

    let rows = dir.search(&FilterSpec::new().with_search("иванов")).unwrap();
    assert_eq!(uids(&rows), vec![uid]);

    let rows = dir
        .search(&FilterSpec::new().with_column(FilterColumn::City, "МОСК"))
        .unwrap();
    assert_eq!(uids(&rows), vec![uid]);
}

#[test]
fn test_search_treats_wildcards_literally() {
    let mut dir = Directory::open_in_memory().unwrap();
    let percent = dir
        .add_record(&fields("Discount", "Sale", "Promo", "Paris", "Rue", "50%", "000"))
        .unwrap();
    let _plain = dir
        .add_record(&fields("Regular", "Sale", "Promo", "Paris", "Rue", "500", "000"))
        .unwrap();

    let rows = dir
        .search(&FilterSpec::new().with_column(FilterColumn::House, "0%"))
        .unwrap();
    assert_eq!(uids(&rows), vec![percent]);

    let rows = dir.search(&FilterSpec::new().with_search("_")).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_deleted_lookup_hides_record_from_listings() {
    let mut dir = Directory::open_in_memory().unwrap();

    let ivanov = dir.resolve(LookupTable::Surnames, "Ivanov").unwrap();
    assert_eq!(ivanov, 1);

    let uid = dir
        .add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Arbat", "1", "111"))
        .unwrap();
    assert_eq!(dir.list_all().len(), 1);
    assert_eq!(dir.lookup_usage(LookupTable::Surnames, ivanov).unwrap(), 1);

    dir.delete_lookup(LookupTable::Surnames, ivanov).unwrap();

    assert!(dir.list_all().is_empty());
    assert!(dir.get_record(uid).unwrap().is_none());
    let stored = dir.get_stored_record(uid).unwrap().unwrap();
    assert_eq!(stored.surname_uid, None);

    let stats = dir.statistics().unwrap();
    assert_eq!(stats.records, 1);
    assert_eq!(stats.listed, 0);
}

// =========================================================================
// Lookup management
// =========================================================================

#[test]
fn test_add_lookup_rejects_duplicate() {
    let mut dir = Directory::open_in_memory().unwrap();

    dir.add_lookup(LookupTable::Names, "Maria").unwrap();
    let err = dir.add_lookup(LookupTable::Names, "Maria").unwrap_err();

    assert!(matches!(err, DirectoryError::Storage(_)));
    assert_eq!(rows_with_value(&dir, LookupTable::Names, "Maria"), 1);
}

#[test]
fn test_rename_lookup_changes_listed_value() {
    let mut dir = Directory::open_in_memory().unwrap();
    let uid = dir
        .add_record(&fields("Ivanov", "Ivan", "Ivanovich", "Moscow", "Arbat", "1", "111"))
        .unwrap();
    let surname = dir.find_lookup(LookupTable::Surnames, "Ivanov").unwrap().unwrap();

    dir.rename_lookup(LookupTable::Surnames, surname, "Ivanova").unwrap();

    assert_eq!(dir.get_record(uid).unwrap().unwrap().surname, "Ivanova");
    assert!(matches!(
        dir.rename_lookup(LookupTable::Surnames, 77, "Nobody"),
        Err(DirectoryError::LookupNotFound { uid: 77, .. })
    ));
}

#[test]
fn test_list_lookup_is_ordered_by_uid() {
    let mut dir = Directory::open_in_memory().unwrap();
    for value in ["Zoya", "Anna", "Maria"] {
        dir.add_lookup(LookupTable::Names, value).unwrap();
    }

    let values: Vec<String> = dir
        .list_lookup(LookupTable::Names)
        .into_iter()
        .map(|e| e.value)
        .collect();
    assert_eq!(values, vec!["Zoya", "Anna", "Maria"]);
}

#[test]
fn test_delete_unknown_lookup_fails() {
    let mut dir = Directory::open_in_memory().unwrap();

    assert!(matches!(
        dir.delete_lookup(LookupTable::Patronymics, 5),
        Err(DirectoryError::LookupNotFound { .. })
    ));
}

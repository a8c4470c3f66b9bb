//! Synchronization workflow tests.
//!
//! Drives records through the lifecycle an owning table would: load from
//! storage, edit, mark for deletion, and pick out the pending change set.

use ntest::timeout;
use std::io::Cursor;

use record_core::record::write_records;
use record_core::{Record, RecordError, RecordReader, State};

use super::helpers::{accounts_schema, values};

#[timeout(1000)]
#[test]
fn test_edit_cycle_produces_change_set() {
    let schema = accounts_schema();

    let mut loaded: Vec<Record> = (1..=4)
        .map(|i| {
            let id = i.to_string();
            Record::new(
                &values(&[("id", id.as_str()), ("owner", "bank"), ("balance", "0")]),
                &schema,
                State::Loaded,
            )
            .unwrap()
        })
        .collect();

    // Edit the second row and re-create it as an update, cancel the fourth
    loaded[1]
        .update(&values(&[("balance", "12.3")]), &schema)
        .unwrap();
    let edited = Record::new(&loaded[1].current(), &schema, State::Updating).unwrap();
    assert_eq!(loaded[1].get_old("balance"), Some("0.00"));
    loaded[1] = edited;
    loaded[3].cancel();

    let inserted = Record::new(
        &values(&[("id", "5"), ("owner", "new"), ("opened", "2024-01-31")]),
        &schema,
        State::Inserting,
    )
    .unwrap();
    loaded.push(inserted);

    let pending: Vec<(State, Option<&str>)> = loaded
        .iter()
        .filter(|r| r.state().is_pending())
        .map(|r| (r.state(), r.get_current("id")))
        .collect();
    assert_eq!(
        pending,
        vec![
            (State::Updating, Some("2")),
            (State::Deleting, Some("4")),
            (State::Inserting, Some("5")),
        ]
    );

    let visible = loaded.iter().filter(|r| r.visible()).count();
    assert_eq!(visible, 4);
}

#[timeout(1000)]
#[test]
fn test_persisted_table_reloads_as_committed_truth() {
    let schema = accounts_schema();
    let mut record = Record::new(
        &values(&[("id", "1"), ("owner", "ann"), ("balance", "1")]),
        &schema,
        State::Loaded,
    )
    .unwrap();
    record
        .update(&values(&[("owner", "bob")]), &schema)
        .unwrap();
    assert_eq!(record.changed_columns(), vec!["owner"]);

    let mut cursor = Cursor::new(Vec::new());
    write_records(&mut cursor, [&record]).unwrap();
    cursor.set_position(0);

    let reloaded: Vec<Record> = RecordReader::new(cursor)
        .unwrap()
        .map(|item| item.unwrap().1)
        .collect();

    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].state(), State::Loaded);
    assert_eq!(reloaded[0].get_current("owner"), Some("bob"));
    assert_eq!(reloaded[0].get_old("owner"), Some("bob"));
    assert!(reloaded[0].changed_columns().is_empty());
}

#[timeout(1000)]
#[test]
fn test_validation_errors_name_the_column() {
    let schema = accounts_schema();

    let cases = [
        (values(&[("id", "1"), ("nickname", "x")]), "nickname"),
        (values(&[("id", "1"), ("balance", "12.345")]), "balance"),
        (values(&[("id", "1"), ("active", "perhaps")]), "active"),
        (values(&[("id", "1"), ("opened", "2024-02-30")]), "opened"),
        (values(&[("id", ""), ("owner", "x")]), "id"),
    ];

    for (input, column) in cases {
        let err: RecordError = Record::new(&input, &schema, State::Inserting).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.column(), Some(column), "{:?}", err);
    }
}

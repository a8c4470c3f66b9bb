//! File-backed record persistence tests.
//!
//! Records are written to real files and scanned back, checking that offsets
//! follow `size()` and that damaged files are reported rather than
//! silently truncated.

use ntest::timeout;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use tempfile::tempdir;

use record_core::record::write_records;
use record_core::{Record, RecordReader, State};

use super::helpers::{accounts_schema, values};

fn sample_records() -> Vec<Record> {
    let schema = accounts_schema();
    (1..=20)
        .map(|i| {
            let id = i.to_string();
            let owner = format!("owner-{}", i);
            let balance = format!("{}.5", i * 10);
            let state = match i % 3 {
                0 => State::Loaded,
                1 => State::Inserting,
                _ => State::Updating,
            };
            Record::new(
                &values(&[
                    ("id", id.as_str()),
                    ("owner", owner.as_str()),
                    ("balance", balance.as_str()),
                    ("active", if i % 2 == 0 { "yes" } else { "no" }),
                    ("opened", "2021-06-01"),
                ]),
                &schema,
                state,
            )
            .unwrap()
        })
        .collect()
}

#[timeout(5000)]
#[test]
fn test_records_survive_file_round_trip() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("accounts.rec");
    let records = sample_records();

    let mut writer = BufWriter::new(File::create(&path).unwrap());
    let written = write_records(&mut writer, &records).unwrap();
    writer.flush().unwrap();
    drop(writer);

    assert_eq!(fs::metadata(&path).unwrap().len(), written);
    assert_eq!(written, records.iter().map(Record::size).sum::<u64>());

    let reader = RecordReader::new(File::open(&path).unwrap()).unwrap();
    let mut expected_offset = 0;
    let mut restored = Vec::new();
    for item in reader {
        let (offset, record) = item.unwrap();
        assert_eq!(offset, expected_offset);
        expected_offset += record.size();
        restored.push(record);
    }

    assert_eq!(restored, records);
    assert_eq!(restored[0].get_current("balance"), Some("10.50"));
    assert_eq!(restored[1].get_current("active"), Some("true"));
}

#[timeout(5000)]
#[test]
fn test_position_delta_equals_size_on_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("single.rec");
    let record = sample_records().remove(4);

    let mut file = File::create(&path).unwrap();
    file.write_all(&[0xAA; 17]).unwrap();
    let start = file.stream_position().unwrap();
    record.write(&mut file).unwrap();
    let end = file.stream_position().unwrap();

    assert_eq!(end - start, record.size());

    let mut file = File::open(&path).unwrap();
    file.seek(SeekFrom::Start(start)).unwrap();
    let mut restored = Record::empty();
    restored.read(&mut file).unwrap();
    assert_eq!(restored, record);
}

#[timeout(5000)]
#[test]
fn test_truncated_file_is_reported() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("truncated.rec");
    let records = sample_records();

    let mut file = File::create(&path).unwrap();
    write_records(&mut file, &records).unwrap();
    drop(file);

    let len = fs::metadata(&path).unwrap().len();
    let file = OpenOptions::new().write(true).open(&path).unwrap();
    file.set_len(len - 3).unwrap();
    drop(file);

    let results: Vec<_> = RecordReader::new(File::open(&path).unwrap())
        .unwrap()
        .collect();

    assert_eq!(results.len(), records.len());
    assert!(results[..records.len() - 1].iter().all(|r| r.is_ok()));
    let err = results.last().unwrap().as_ref().unwrap_err();
    assert!(err.is_storage());
}

#[timeout(5000)]
#[test]
fn test_reader_starts_at_current_position() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("offset.rec");
    let records = sample_records();

    let mut file = File::create(&path).unwrap();
    write_records(&mut file, &records[..3]).unwrap();
    drop(file);

    let mut file = File::open(&path).unwrap();
    file.seek(SeekFrom::Start(records[0].size())).unwrap();

    let scanned: Vec<Record> = RecordReader::new(file)
        .unwrap()
        .map(|item| item.unwrap().1)
        .collect();
    assert_eq!(scanned, records[1..3].to_vec());
}

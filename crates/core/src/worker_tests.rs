// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn range_is_ascending_and_exclusive() {
    let ids: Vec<_> = WorkerId::range(3).collect();
    assert_eq!(ids, vec![WorkerId(0), WorkerId(1), WorkerId(2)]);
    assert_eq!(WorkerId::range(0).count(), 0);
}

#[parameterized(
    zero = { "worker-0", Some(0) },
    multi_digit = { "worker-12", Some(12) },
    wrong_prefix = { "slot-1", None },
    not_a_number = { "worker-x", None },
    negative = { "worker--1", None },
    bare = { "worker-", None },
)]
fn parses_file_stems(stem: &str, expected: Option<u32>) {
    assert_eq!(WorkerId::from_file_stem(stem), expected.map(WorkerId));
}

#[test]
fn file_stem_round_trips_through_parser() {
    let id = WorkerId(7);
    assert_eq!(WorkerId::from_file_stem(&id.file_stem()), Some(id));
}

#[test]
fn record_path_is_not_persisted() {
    let record = WorkerRecord {
        id: WorkerId(1),
        pid: 4242,
        started_at: Utc::now(),
        config_location: PathBuf::from("/srv/herd"),
        record_path: PathBuf::from("/state/workers/worker-1.json"),
    };

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["pid"], 4242);
    assert!(json.get("record_path").is_none());

    let loaded: WorkerRecord = serde_json::from_value(json).unwrap();
    assert_eq!(loaded.record_path, PathBuf::new());
}

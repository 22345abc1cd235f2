use std::fs;
use std::path::PathBuf;

use ringside_terminal::event::{parse_event_json, PayloadFormat, Stake};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_old_schema_fixture() {
    let raw = read_fixture("event_old.json");
    let snapshot = parse_event_json(&raw).expect("fixture should parse");
    assert_eq!(snapshot.format, PayloadFormat::Old);
    assert_eq!(snapshot.event_name, "Night of Champions");
    assert_eq!(snapshot.gamblers.len(), 3);
    assert_eq!(snapshot.gamblers[0].nickname, "Alpha");
    assert_eq!(snapshot.matches.len(), 2);
    assert_eq!(snapshot.matches[1].score_value, 10);
    assert!(snapshot.matches[1].title_change);
    assert_eq!(snapshot.result_of("a@ringside.club", "Opener"), 5);
    assert_eq!(snapshot.result_of("b@ringside.club", "Opener"), -5);
}

#[test]
fn parses_new_schema_fixture() {
    let raw = read_fixture("event_new.json");
    let snapshot = parse_event_json(&raw).expect("fixture should parse");
    assert_eq!(snapshot.format, PayloadFormat::New);
    assert_eq!(snapshot.gamblers.len(), 3);
    assert_eq!(snapshot.matches.len(), 2);
    assert_eq!(snapshot.result_of("a@ringside.club", "Main Event"), 10);
    assert_eq!(snapshot.result_of("c@ringside.club", "Main Event"), 0);
}

#[test]
fn old_schema_unlisted_gambler_is_absent() {
    let raw = read_fixture("event_old.json");
    let snapshot = parse_event_json(&raw).expect("fixture should parse");
    // Charlie never staked the main event; the opener's zero is explicit.
    assert_eq!(
        snapshot.stake_of("c@ringside.club", "Main Event"),
        Stake::Absent
    );
    assert_eq!(
        snapshot.stake_of("c@ringside.club", "Opener"),
        Stake::Scored(0)
    );
}

#[test]
fn unresolved_gambler_reference_is_dropped() {
    let raw = r#"{
        "gamblers": [{ "id": "a", "nickname": "Alpha" }],
        "matches": [{
            "match name": "Opener",
            "match score": 5,
            "gamblersResult": [
                { "id": "a", "result": 5 },
                { "id": "ghost", "result": 99 }
            ]
        }]
    }"#;
    let snapshot = parse_event_json(raw).expect("payload should parse");
    assert_eq!(snapshot.gamblers.len(), 1);
    assert_eq!(snapshot.result_of("a", "Opener"), 5);
    assert_eq!(snapshot.result_of("ghost", "Opener"), 0);
    assert_eq!(snapshot.stake_of("ghost", "Opener"), Stake::Absent);
}

#[test]
fn duplicate_gambler_ids_keep_first_entry() {
    let raw = r#"{
        "gamblers": [
            { "id": "a", "nickname": "Alpha" },
            { "id": "a", "nickname": "Impostor" }
        ],
        "matches": []
    }"#;
    let snapshot = parse_event_json(raw).expect("payload should parse");
    assert_eq!(snapshot.gamblers.len(), 1);
    assert_eq!(snapshot.gamblers[0].nickname, "Alpha");
}

#[test]
fn partial_match_records_take_defaults() {
    let raw = r#"{
        "gamblers": [{ "id": "a", "nickname": "Alpha" }],
        "matches": [{
            "match name": "Mystery Match",
            "gamblersResult": []
        }]
    }"#;
    let snapshot = parse_event_json(raw).expect("payload should parse");
    let record = &snapshot.matches[0];
    assert_eq!(record.score_value, 0);
    assert!(record.duration.is_none());
    assert!(record.rating.is_none());
    assert!(!record.title_change);
}

#[test]
fn legacy_numeric_durations_survive() {
    let raw = r#"{
        "gamblers": [],
        "matches": [{
            "match name": "Old Timer",
            "match score": 3,
            "duration": 12,
            "gamblersResult": []
        }]
    }"#;
    let snapshot = parse_event_json(raw).expect("payload should parse");
    assert_eq!(snapshot.matches[0].duration.as_deref(), Some("12"));
    assert_eq!(snapshot.matches[0].duration_minutes(), Some(12.0));
}

#[test]
fn null_payload_is_empty() {
    let snapshot = parse_event_json("null").expect("null should parse");
    assert!(snapshot.gamblers.is_empty());
    assert!(snapshot.matches.is_empty());
    assert!(parse_event_json("not json").is_err());
}

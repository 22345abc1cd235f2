use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use ringside_terminal::season::{countdown, parse_announcement_date, parse_season_json};
use ringside_terminal::store::event_filename;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_season_fixture() {
    let season = parse_season_json(&read_fixture("season.json")).expect("fixture should parse");
    assert_eq!(season.season_name, "Test Season");
    assert_eq!(season.standings.len(), 3);
    assert_eq!(season.past_events().len(), 2);
    assert_eq!(season.past_events()[0].event, "First Show");

    let next = season.next_event.as_ref().expect("next event should exist");
    assert_eq!(next.event, "Grand Finale");
    assert_eq!(next.card.len(), 1);
    assert_eq!(next.card[0].match_up, "Ace vs King");
    assert_eq!(next.card[0].stipulation.as_deref(), Some("Title Match"));

    assert_eq!(season.upcoming.len(), 1);
    assert_eq!(season.upcoming[0].event, "Preseason Special");
}

#[test]
fn season_ranks_share_on_ties_and_keep_payload_order() {
    let season = parse_season_json(&read_fixture("season.json")).expect("fixture should parse");
    // Bravo and Alpha both sit on 20; Bravo comes first in the payload and
    // the stable sort keeps it that way.
    assert_eq!(season.standings[0].nickname, "Bravo");
    assert_eq!(season.standings[0].rank, 1);
    assert_eq!(season.standings[1].nickname, "Alpha");
    assert_eq!(season.standings[1].rank, 1);
    assert_eq!(season.standings[2].nickname, "Charlie");
    assert_eq!(season.standings[2].rank, 3);
}

#[test]
fn missing_totals_fall_back_to_history_sum() {
    let raw = r#"{
        "seasonName": "Partial",
        "globalLeaderboard": [{
            "id": "a",
            "nickname": "Alpha",
            "history": [
                { "event": "First Show", "points": 9 },
                { "event": "Second Show", "points": -2 }
            ]
        }]
    }"#;
    let season = parse_season_json(raw).expect("payload should parse");
    assert_eq!(season.standings[0].total_points, 7);
    assert!(season.next_event.is_none());
    assert!(season.upcoming.is_empty());
}

#[test]
fn next_event_countdown_from_announced_date() {
    let season = parse_season_json(&read_fixture("season.json")).expect("fixture should parse");
    let next = season.next_event.expect("next event should exist");

    let today = NaiveDate::from_ymd_opt(2025, 2, 26).unwrap();
    let date = parse_announcement_date(&next.date, today).expect("date should parse");
    assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

    let target = date.and_hms_opt(0, 0, 0).unwrap();
    let now = today.and_hms_opt(21, 30, 0).unwrap();
    let left = countdown(target, now);
    assert_eq!(left.days, 1);
    assert_eq!(left.hours, 2);
    assert_eq!(left.minutes, 30);
    assert_eq!(left.seconds, 0);
}

#[test]
fn past_event_names_resolve_to_files() {
    let season = parse_season_json(&read_fixture("season.json")).expect("fixture should parse");
    let files: Vec<String> = season
        .past_events()
        .iter()
        .map(|entry| event_filename(&entry.event))
        .collect();
    assert_eq!(files, vec!["First_Show.json", "Second_Show.json"]);
}

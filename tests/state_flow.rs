use std::fs;
use std::path::PathBuf;

use ringside_terminal::event::parse_event_json;
use ringside_terminal::season::parse_season_json;
use ringside_terminal::state::{
    apply_delta, AppState, Delta, EventBundle, EventTab, HomeRow, Screen,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn state_with_season() -> AppState {
    let mut state = AppState::new();
    let season = parse_season_json(&read_fixture("season.json")).expect("fixture should parse");
    apply_delta(&mut state, Delta::SetSeason(season));
    state
}

#[test]
fn home_rows_list_past_then_next_then_upcoming() {
    let state = state_with_season();
    assert_eq!(
        state.home_rows(),
        vec![
            HomeRow::Past(0),
            HomeRow::Past(1),
            HomeRow::Next,
            HomeRow::Upcoming(0)
        ]
    );
    assert!(!state.loading);
}

#[test]
fn selection_wraps_both_ways() {
    let mut state = state_with_season();
    assert_eq!(state.selected, 0);
    state.select_prev();
    assert_eq!(state.selected, 3);
    state.select_next();
    assert_eq!(state.selected, 0);
}

#[test]
fn opening_rows_switches_screens() {
    let mut state = state_with_season();

    state.selected = 1;
    state.open_selected();
    assert_eq!(
        state.screen,
        Screen::Event {
            file: "Second_Show.json".to_string()
        }
    );
    assert_eq!(state.event_tab, EventTab::Leaderboard);

    state.back_to_season();
    state.selected = 2;
    state.open_selected();
    assert_eq!(state.screen, Screen::NextEvent);

    state.back_to_season();
    state.selected = 3;
    state.open_selected();
    assert_eq!(state.screen, Screen::Upcoming { index: 0 });
}

#[test]
fn event_tabs_cycle_and_reset_scroll() {
    let mut state = state_with_season();
    state.selected = 0;
    state.open_selected();
    state.event_scroll = 7;

    state.cycle_event_tab();
    assert_eq!(state.event_tab, EventTab::Matches);
    assert_eq!(state.event_scroll, 0);
    state.cycle_event_tab();
    state.cycle_event_tab();
    state.cycle_event_tab();
    assert_eq!(state.event_tab, EventTab::Leaderboard);
}

#[test]
fn event_deltas_track_errors_and_recovery() {
    let mut state = state_with_season();
    state.selected = 0;
    state.open_selected();

    apply_delta(
        &mut state,
        Delta::EventFailed {
            file: "First_Show.json".to_string(),
            error: "event file not found".to_string(),
        },
    );
    assert_eq!(state.current_event_error(), Some("event file not found"));
    assert!(state.current_event().is_none());

    let snapshot =
        parse_event_json(&read_fixture("event_old.json")).expect("fixture should parse");
    apply_delta(
        &mut state,
        Delta::UpsertEvent {
            file: "First_Show.json".to_string(),
            bundle: EventBundle::build(snapshot),
        },
    );
    assert!(state.current_event_error().is_none());
    let bundle = state.current_event().expect("event should be loaded");
    assert_eq!(bundle.leaderboard.len(), 3);
    assert_eq!(bundle.stats.number_of_matches, 2);
}

#[test]
fn log_ring_is_capped() {
    let mut state = AppState::new();
    for idx in 0..250 {
        state.push_log(format!("[INFO] line {idx}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}

use anyhow::Result;

use crate::event::{parse_event_json, EventSnapshot};
use crate::season::{parse_season_json, SeasonOverview};

// The shipped sample data, embedded so the binary renders something even
// when no data directory exists next to it.
static SEASON_JSON: &str = include_str!("../data/global_leaderboard.json");
static EVENT_FILES: &[(&str, &str)] = &[
    ("Royal_Rumble.json", include_str!("../data/Royal_Rumble.json")),
    (
        "Elimination_Chamber.json",
        include_str!("../data/Elimination_Chamber.json"),
    ),
];

pub fn demo_season() -> Result<SeasonOverview> {
    parse_season_json(SEASON_JSON)
}

pub fn demo_event(filename: &str) -> Option<Result<EventSnapshot>> {
    EVENT_FILES
        .iter()
        .find(|(name, _)| *name == filename)
        .map(|(_, raw)| parse_event_json(raw))
}

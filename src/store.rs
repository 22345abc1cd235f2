use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;

use crate::event::{parse_event_json, EventSnapshot};
use crate::season::{parse_season_json, SeasonOverview};

pub const SEASON_FILE: &str = "global_leaderboard.json";

static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    if let Ok(dir) = std::env::var("RINGSIDE_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    PathBuf::from("data")
});

pub fn data_dir() -> &'static Path {
    &DATA_DIR
}

/// Outcome of resolving an event file. `Missing` is an explicit not-found
/// state so the UI can render an error instead of an all-zero leaderboard.
#[derive(Debug)]
pub enum EventLoad {
    Ready(Box<EventSnapshot>),
    Missing,
}

/// "Royal Rumble" -> "Royal_Rumble.json", the same mapping the season
/// payload's event names use on disk.
pub fn event_filename(event_name: &str) -> String {
    let mut file = event_name
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    file.push_str(".json");
    file
}

pub fn load_event(dir: &Path, filename: &str) -> Result<EventLoad> {
    let path = dir.join(filename);
    if !path.is_file() {
        return Ok(EventLoad::Missing);
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot =
        parse_event_json(&raw).with_context(|| format!("failed to parse {filename}"))?;
    Ok(EventLoad::Ready(Box::new(snapshot)))
}

/// `Ok(None)` when the season file does not exist (the caller decides on a
/// fallback); parse and read failures are real errors.
pub fn load_season(dir: &Path) -> Result<Option<SeasonOverview>> {
    let path = dir.join(SEASON_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let season = parse_season_json(&raw).context("failed to parse season payload")?;
    Ok(Some(season))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_map_to_filenames() {
        assert_eq!(event_filename("Royal Rumble"), "Royal_Rumble.json");
        assert_eq!(event_filename("  Elimination  Chamber "), "Elimination_Chamber.json");
        assert_eq!(event_filename("WrestleMania"), "WrestleMania.json");
    }
}

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde_json::Value;

/// A season participant, normalized from either payload format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gambler {
    pub id: String,
    pub nickname: String,
}

#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub name: String,
    /// Points awarded for a correct pick; also the perfect-prediction threshold.
    pub score_value: i64,
    /// Original duration text ("56:10", "1:07:00", or a legacy bare minute count).
    pub duration: Option<String>,
    pub rating: Option<f64>,
    pub title_change: bool,
}

impl MatchRecord {
    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration.as_deref().map(duration_minutes)
    }
}

/// A gambler's stake on one match. `Absent` means no recorded prediction;
/// `Scored(0)` is an explicit zero and counts as a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stake {
    Absent,
    Scored(i64),
}

impl Stake {
    pub fn score(self) -> i64 {
        match self {
            Stake::Absent => 0,
            Stake::Scored(value) => value,
        }
    }

    pub fn is_explicit(self) -> bool {
        matches!(self, Stake::Scored(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// Flat match list with embedded per-gambler result arrays.
    Old,
    /// Per-gambler match-name-keyed score maps plus `matchDetails`.
    New,
}

/// Canonical in-memory view of one event. Downstream aggregation only sees
/// this type and is oblivious to which payload format produced it.
#[derive(Debug, Clone)]
pub struct EventSnapshot {
    pub event_name: String,
    pub event_date: String,
    pub location: String,
    pub format: PayloadFormat,
    pub gamblers: Vec<Gambler>,
    pub matches: Vec<MatchRecord>,
    stakes: HashMap<String, HashMap<String, i64>>,
    bonuses: HashMap<String, Vec<(String, i64)>>,
}

impl EventSnapshot {
    pub fn empty() -> Self {
        Self {
            event_name: String::new(),
            event_date: String::new(),
            location: String::new(),
            format: PayloadFormat::Old,
            gamblers: Vec::new(),
            matches: Vec::new(),
            stakes: HashMap::new(),
            bonuses: HashMap::new(),
        }
    }

    pub fn stake_of(&self, gambler_id: &str, match_name: &str) -> Stake {
        match self
            .stakes
            .get(gambler_id)
            .and_then(|per_match| per_match.get(match_name))
        {
            Some(value) => Stake::Scored(*value),
            None => Stake::Absent,
        }
    }

    /// Total prediction score for the pair, 0 when absent.
    pub fn result_of(&self, gambler_id: &str, match_name: &str) -> i64 {
        self.stake_of(gambler_id, match_name).score()
    }

    pub fn bonus_of(&self, gambler_id: &str) -> &[(String, i64)] {
        self.bonuses
            .get(gambler_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn bonus_total(&self, gambler_id: &str) -> i64 {
        self.bonus_of(gambler_id)
            .iter()
            .map(|(_, value)| value)
            .sum()
    }

    pub fn has_bonuses(&self) -> bool {
        self.bonuses.values().any(|entries| !entries.is_empty())
    }
}

pub fn parse_event_json(raw: &str) -> Result<EventSnapshot> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(EventSnapshot::empty());
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid event json")?;
    let root = root
        .as_object()
        .context("event payload should be a json object")?;

    let gamblers_value = root.get("gamblers").unwrap_or(&Value::Null);
    let match_entries = root
        .get("matchDetails")
        .and_then(Value::as_array)
        .or_else(|| root.get("matches").and_then(Value::as_array));

    // New format when the gambler collection is a mapping, or when the first
    // match record has no embedded results. An event with zero matches is
    // decided by the gambler collection's shape alone.
    let first_match = match_entries.and_then(|entries| entries.first());
    let format = if gamblers_value.is_object()
        || first_match.is_some_and(|entry| entry.get("gamblersResult").is_none())
    {
        PayloadFormat::New
    } else {
        PayloadFormat::Old
    };

    let mut snapshot = EventSnapshot::empty();
    snapshot.format = format;
    snapshot.event_name = pick_string(root, &["eventName", "event"]).unwrap_or_default();
    snapshot.event_date = pick_string(root, &["eventDate", "date"]).unwrap_or_default();
    snapshot.location = pick_string(root, &["location"]).unwrap_or_default();

    parse_gamblers(gamblers_value, &mut snapshot);

    if let Some(entries) = match_entries {
        for entry in entries {
            let Some(record) = parse_match_record(entry) else {
                continue;
            };
            if format == PayloadFormat::Old {
                collect_old_format_results(entry, &record.name, &mut snapshot);
            }
            snapshot.matches.push(record);
        }
    }

    Ok(snapshot)
}

fn parse_gamblers(value: &Value, snapshot: &mut EventSnapshot) {
    match value {
        Value::Array(entries) => {
            for entry in entries {
                let Some(id) = pick_string(entry, &["id"]) else {
                    continue;
                };
                push_gambler(snapshot, id.clone(), entry);
            }
        }
        Value::Object(map) => {
            for (id, entry) in map {
                push_gambler(snapshot, id.clone(), entry);
            }
        }
        _ => {}
    }
}

fn push_gambler(snapshot: &mut EventSnapshot, id: String, entry: &Value) {
    if snapshot.gamblers.iter().any(|g| g.id == id) {
        return;
    }
    let nickname = pick_string(entry, &["nickname"]).unwrap_or_else(|| id.clone());

    // New-format score map: a present key is an explicit stake, a missing
    // key stays absent. Entries naming unknown matches never join and so
    // contribute nothing downstream.
    if let Some(Value::Object(per_match)) = entry.get("matches") {
        let stakes = snapshot.stakes.entry(id.clone()).or_default();
        for (match_name, score) in per_match {
            if let Some(score) = value_as_i64(score) {
                stakes.insert(match_name.clone(), score);
            }
        }
    }

    if let Some(Value::Object(categories)) = entry.get("individuals") {
        let bonuses: Vec<(String, i64)> = categories
            .iter()
            .filter_map(|(name, value)| value_as_i64(value).map(|v| (name.clone(), v)))
            .collect();
        if !bonuses.is_empty() {
            snapshot.bonuses.insert(id.clone(), bonuses);
        }
    }

    snapshot.gamblers.push(Gambler { id, nickname });
}

fn parse_match_record(entry: &Value) -> Option<MatchRecord> {
    let name = pick_string(entry, &["match name", "name"])?;
    let score_value = pick_i64(entry, &["match score", "score"]).unwrap_or(0);
    let duration = match entry.get("duration") {
        Some(Value::String(text)) => Some(text.trim().to_string()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    };
    let rating = entry.get("rating").and_then(Value::as_f64);
    let title_change = entry
        .get("titleChange")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Some(MatchRecord {
        name,
        score_value,
        duration,
        rating,
        title_change,
    })
}

fn collect_old_format_results(entry: &Value, match_name: &str, snapshot: &mut EventSnapshot) {
    let Some(results) = entry.get("gamblersResult").and_then(Value::as_array) else {
        return;
    };
    for result in results {
        let Some(id) = pick_string(result, &["id"]) else {
            continue;
        };
        // Unresolved gambler references are dropped rather than invented.
        if !snapshot.gamblers.iter().any(|g| g.id == id) {
            continue;
        }
        let score = pick_i64(result, &["result"]).unwrap_or(0);
        // A repeated (gambler, match) entry accumulates into one stake.
        *snapshot
            .stakes
            .entry(id)
            .or_default()
            .entry(match_name.to_string())
            .or_insert(0) += score;
    }
}

/// Total duration parse: "H:MM:SS" and "MM:SS" clock strings, legacy bare
/// minute counts, and 0.0 for anything else.
pub fn duration_minutes(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Ok(minutes) = trimmed.parse::<f64>() {
        return minutes;
    }

    let parts: Option<Vec<f64>> = trimmed
        .split(':')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect();
    match parts.as_deref() {
        Some([hours, minutes, seconds]) => hours * 60.0 + minutes + seconds / 60.0,
        Some([minutes, seconds]) => minutes + seconds / 60.0,
        _ => 0.0,
    }
}

pub(crate) fn pick_string(value: &impl JsonGet, keys: &[&str]) -> Option<String> {
    for key in keys {
        match value.get_key(key) {
            Some(Value::String(text)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Some(Value::Number(number)) => return Some(number.to_string()),
            _ => {}
        }
    }
    None
}

pub(crate) fn pick_i64(value: &impl JsonGet, keys: &[&str]) -> Option<i64> {
    for key in keys {
        if let Some(found) = value.get_key(key).and_then(value_as_i64) {
            return Some(found);
        }
    }
    None
}

pub(crate) fn value_as_i64(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    if let Some(number) = value.as_f64() {
        return Some(number.round() as i64);
    }
    value.as_str().and_then(|text| text.trim().parse().ok())
}

/// Lets the pick helpers work over both `Value` and `Map` roots.
pub(crate) trait JsonGet {
    fn get_key(&self, key: &str) -> Option<&Value>;
}

impl JsonGet for Value {
    fn get_key(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl JsonGet for serde_json::Map<String, Value> {
    fn get_key(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::aggregate::competition_ranks;
use crate::event::{pick_i64, pick_string, value_as_i64};

#[derive(Debug, Clone, PartialEq)]
pub struct EventPoints {
    pub event: String,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonStanding {
    pub id: String,
    pub nickname: String,
    pub rank: u32,
    pub total_points: i64,
    /// Per-event points in event-date order, as published in the payload.
    pub history: Vec<EventPoints>,
}

/// A match announced for a not-yet-played event.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncedMatch {
    pub id: i64,
    pub match_up: String,
    pub kind: String,
    pub stipulation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventAnnouncement {
    pub event: String,
    pub date: String,
    pub location: String,
    pub notes: String,
    pub card: Vec<AnnouncedMatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonOverview {
    pub season_name: String,
    pub standings: Vec<SeasonStanding>,
    pub next_event: Option<EventAnnouncement>,
    pub upcoming: Vec<EventAnnouncement>,
}

impl SeasonOverview {
    /// The past-event columns shown on the season screen. The payload repeats
    /// the history per standing; the first row is authoritative for ordering.
    pub fn past_events(&self) -> &[EventPoints] {
        self.standings
            .first()
            .map(|standing| standing.history.as_slice())
            .unwrap_or(&[])
    }
}

pub fn parse_season_json(raw: &str) -> Result<SeasonOverview> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(SeasonOverview {
            season_name: String::new(),
            standings: Vec::new(),
            next_event: None,
            upcoming: Vec::new(),
        });
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid season json")?;
    let season_name = pick_string(&root, &["seasonName"]).unwrap_or_default();

    let mut standings = Vec::new();
    if let Some(entries) = root.get("globalLeaderboard").and_then(Value::as_array) {
        for entry in entries {
            let Some(id) = pick_string(entry, &["id"]) else {
                continue;
            };
            let nickname = pick_string(entry, &["nickname"]).unwrap_or_else(|| id.clone());
            let history = parse_history(entry.get("history"));
            // Missing totals fall back to the published per-event sum.
            let total_points = pick_i64(entry, &["totalPoints"])
                .unwrap_or_else(|| history.iter().map(|h| h.points).sum());
            standings.push(SeasonStanding {
                id,
                nickname,
                rank: 0,
                total_points,
                history,
            });
        }
    }

    standings.sort_by_key(|standing| std::cmp::Reverse(standing.total_points));
    let totals: Vec<i64> = standings.iter().map(|s| s.total_points).collect();
    for (standing, rank) in standings.iter_mut().zip(competition_ranks(&totals)) {
        standing.rank = rank;
    }

    let next_event = root.get("Next Event").and_then(parse_announcement);
    let upcoming = root
        .get("upcoming events")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(parse_announcement).collect())
        .unwrap_or_default();

    Ok(SeasonOverview {
        season_name,
        standings,
        next_event,
        upcoming,
    })
}

fn parse_history(value: Option<&Value>) -> Vec<EventPoints> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let event = pick_string(entry, &["event"])?;
            let points = entry
                .get("points")
                .and_then(value_as_i64)
                .unwrap_or(0);
            Some(EventPoints { event, points })
        })
        .collect()
}

fn parse_announcement(value: &Value) -> Option<EventAnnouncement> {
    let event = pick_string(value, &["event", "eventName"])?;
    let date = pick_string(value, &["date"]).unwrap_or_default();
    let location = pick_string(value, &["location"]).unwrap_or_default();
    let notes = pick_string(value, &["notes"]).unwrap_or_default();
    let card = value
        .get("matches")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let match_up = pick_string(entry, &["match"])?;
                    Some(AnnouncedMatch {
                        id: pick_i64(entry, &["id"]).unwrap_or(0),
                        match_up,
                        kind: pick_string(entry, &["type"]).unwrap_or_default(),
                        stipulation: pick_string(entry, &["stipulation"]),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Some(EventAnnouncement {
        event,
        date,
        location,
        notes,
        card,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn is_zero(&self) -> bool {
        *self == Countdown::default()
    }
}

/// Time left until `target`, clamped at zero. Recomputed from the wall clock
/// on every tick; nothing is accumulated between ticks.
pub fn countdown(target: NaiveDateTime, now: NaiveDateTime) -> Countdown {
    let remaining = target.signed_duration_since(now).num_seconds();
    if remaining <= 0 {
        return Countdown::default();
    }
    Countdown {
        days: remaining / 86_400,
        hours: remaining % 86_400 / 3_600,
        minutes: remaining % 3_600 / 60,
        seconds: remaining % 60,
    }
}

/// Announcement dates come as "February 28" or a range like "April 18-19".
/// The first day applies, in the current year, rolling to next year once the
/// date has passed.
pub fn parse_announcement_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let first = raw.split('-').next()?.trim();
    if first.is_empty() {
        return None;
    }
    let this_year = parse_month_day(first, today.year())?;
    if this_year < today {
        parse_month_day(first, today.year() + 1)
    } else {
        Some(this_year)
    }
}

fn parse_month_day(text: &str, year: i32) -> Option<NaiveDate> {
    let candidate = format!("{text} {year}");
    NaiveDate::parse_from_str(&candidate, "%B %d %Y")
        .or_else(|_| NaiveDate::parse_from_str(&candidate, "%b %d %Y"))
        .ok()
}

/// Renders "2025-02-01" as "February 1, 2025"; anything unparseable is shown
/// as-is rather than failing the header.
pub fn format_event_date(raw: &str) -> String {
    let trimmed = raw.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::season::SeasonOverview;
use crate::state::EventBundle;
use crate::store::event_filename;

pub struct ExportReport {
    pub standings: usize,
    pub event_sheets: usize,
    pub leaderboard_rows: usize,
}

/// Writes the season standings plus one leaderboard sheet per loaded event.
pub fn export_standings(
    path: &Path,
    season: &SeasonOverview,
    events: &HashMap<String, EventBundle>,
) -> Result<ExportReport> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Season").context("invalid sheet name")?;

    let mut header = vec![
        "Standing".to_string(),
        "Nickname".to_string(),
        "Total Score".to_string(),
    ];
    for entry in season.past_events() {
        header.push(entry.event.clone());
    }
    for (col, title) in header.iter().enumerate() {
        sheet.write(0, col as u16, title.as_str())?;
    }

    for (idx, standing) in season.standings.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write(row, 0, standing.rank as i64)?;
        sheet.write(row, 1, standing.nickname.as_str())?;
        sheet.write(row, 2, standing.total_points)?;
        for (col, entry) in standing.history.iter().enumerate() {
            sheet.write(row, col as u16 + 3, entry.points)?;
        }
    }

    let mut event_sheets = 0usize;
    let mut leaderboard_rows = 0usize;
    for (order, entry) in season.past_events().iter().enumerate() {
        let Some(bundle) = events.get(&event_filename(&entry.event)) else {
            continue;
        };
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(sheet_name(&entry.event, order))
            .context("invalid sheet name")?;
        event_sheets += 1;

        let mut header = vec![
            "Rank".to_string(),
            "Nickname".to_string(),
            "Total".to_string(),
            "Wins".to_string(),
            "Losses".to_string(),
            "Draws".to_string(),
        ];
        for record in &bundle.snapshot.matches {
            header.push(record.name.clone());
        }
        if bundle.snapshot.has_bonuses() {
            header.push("Individuals".to_string());
        }
        for (col, title) in header.iter().enumerate() {
            sheet.write(0, col as u16, title.as_str())?;
        }

        for (idx, line) in bundle.leaderboard.iter().enumerate() {
            let row = idx as u32 + 1;
            sheet.write(row, 0, line.rank as i64)?;
            sheet.write(row, 1, line.nickname.as_str())?;
            sheet.write(row, 2, line.total)?;
            sheet.write(row, 3, line.wins as i64)?;
            sheet.write(row, 4, line.losses as i64)?;
            sheet.write(row, 5, line.draws as i64)?;
            for (col, cell) in line.match_results.iter().enumerate() {
                sheet.write(row, col as u16 + 6, cell.result)?;
            }
            if bundle.snapshot.has_bonuses() {
                let col = line.match_results.len() as u16 + 6;
                sheet.write(row, col, line.bonus_total)?;
            }
            leaderboard_rows += 1;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(ExportReport {
        standings: season.standings.len(),
        event_sheets,
        leaderboard_rows,
    })
}

// Excel limits sheet names to 31 chars and a restricted character set; the
// positional suffix keeps truncated names unique.
fn sheet_name(event_name: &str, order: usize) -> String {
    let cleaned: String = event_name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            other => other,
        })
        .collect();
    let mut name: String = cleaned.trim().chars().take(27).collect();
    if name.is_empty() {
        name = "Event".to_string();
    }
    format!("{} {}", name.trim_end(), order + 1)
}

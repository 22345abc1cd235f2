use std::sync::mpsc::Sender;
use std::thread;

use rayon::prelude::*;

use crate::demo;
use crate::season::SeasonOverview;
use crate::state::{Delta, EventBundle};
use crate::store::{self, EventLoad};

/// Loads the season payload and every referenced event file on a background
/// thread, streaming results to the UI as deltas. Event files are
/// independent snapshots, so they parse and aggregate in parallel.
pub fn spawn_loader(tx: Sender<Delta>) {
    thread::spawn(move || run(&tx));
}

fn run(tx: &Sender<Delta>) {
    let dir = store::data_dir();

    let (season, from_demo) = match store::load_season(dir) {
        Ok(Some(season)) => {
            let _ = tx.send(Delta::Log(format!(
                "[INFO] Season data loaded from {}",
                dir.display()
            )));
            (season, false)
        }
        Ok(None) => {
            let _ = tx.send(Delta::Log(format!(
                "[INFO] No season file under {}, using bundled demo data",
                dir.display()
            )));
            match demo::demo_season() {
                Ok(season) => (season, true),
                Err(err) => {
                    let _ = tx.send(Delta::Log(format!("[WARN] Demo season error: {err:#}")));
                    return;
                }
            }
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Season load error: {err:#}")));
            match demo::demo_season() {
                Ok(season) => (season, true),
                Err(err) => {
                    let _ = tx.send(Delta::Log(format!("[WARN] Demo season error: {err:#}")));
                    return;
                }
            }
        }
    };

    let files = past_event_files(&season);
    let _ = tx.send(Delta::SetSeason(season));

    let outcomes: Vec<(String, Delta)> = files
        .into_par_iter()
        .map(|file| {
            let delta = load_one(&file, from_demo);
            (file, delta)
        })
        .collect();

    for (file, delta) in outcomes {
        if let Delta::EventFailed { error, .. } = &delta {
            let _ = tx.send(Delta::Log(format!("[WARN] {file}: {error}")));
        }
        let _ = tx.send(delta);
    }
    let _ = tx.send(Delta::Log("[INFO] Event files loaded".to_string()));
}

fn past_event_files(season: &SeasonOverview) -> Vec<String> {
    season
        .past_events()
        .iter()
        .map(|entry| store::event_filename(&entry.event))
        .collect()
}

fn load_one(file: &str, from_demo: bool) -> Delta {
    if from_demo {
        return match demo::demo_event(file) {
            Some(Ok(snapshot)) => Delta::UpsertEvent {
                file: file.to_string(),
                bundle: EventBundle::build(snapshot),
            },
            Some(Err(err)) => Delta::EventFailed {
                file: file.to_string(),
                error: format!("{err:#}"),
            },
            None => Delta::EventFailed {
                file: file.to_string(),
                error: "event file not found".to_string(),
            },
        };
    }

    match store::load_event(store::data_dir(), file) {
        Ok(EventLoad::Ready(snapshot)) => Delta::UpsertEvent {
            file: file.to_string(),
            bundle: EventBundle::build(*snapshot),
        },
        Ok(EventLoad::Missing) => Delta::EventFailed {
            file: file.to_string(),
            error: "event file not found".to_string(),
        },
        Err(err) => Delta::EventFailed {
            file: file.to_string(),
            error: format!("{err:#}"),
        },
    }
}

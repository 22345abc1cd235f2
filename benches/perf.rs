use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use ringside_terminal::aggregate::{event_leaderboard, event_statistics};
use ringside_terminal::event::parse_event_json;
use ringside_terminal::season::parse_season_json;

fn bench_event_parse_old(c: &mut Criterion) {
    c.bench_function("event_parse_old", |b| {
        b.iter(|| {
            let snapshot = parse_event_json(black_box(EVENT_OLD_JSON)).unwrap();
            black_box(snapshot.gamblers.len());
        })
    });
}

fn bench_event_parse_new(c: &mut Criterion) {
    c.bench_function("event_parse_new", |b| {
        b.iter(|| {
            let snapshot = parse_event_json(black_box(EVENT_NEW_JSON)).unwrap();
            black_box(snapshot.gamblers.len());
        })
    });
}

fn bench_leaderboard_compute(c: &mut Criterion) {
    let snapshot = parse_event_json(EVENT_OLD_JSON).unwrap();
    c.bench_function("leaderboard_compute", |b| {
        b.iter(|| {
            let lines = event_leaderboard(black_box(&snapshot));
            black_box(lines.len());
        })
    });
}

fn bench_statistics_compute(c: &mut Criterion) {
    let snapshot = parse_event_json(EVENT_NEW_JSON).unwrap();
    c.bench_function("statistics_compute", |b| {
        b.iter(|| {
            let stats = event_statistics(black_box(&snapshot));
            black_box(stats.total_predictions);
        })
    });
}

fn bench_season_parse(c: &mut Criterion) {
    c.bench_function("season_parse", |b| {
        b.iter(|| {
            let season = parse_season_json(black_box(SEASON_JSON)).unwrap();
            black_box(season.standings.len());
        })
    });
}

criterion_group!(
    perf,
    bench_event_parse_old,
    bench_event_parse_new,
    bench_leaderboard_compute,
    bench_statistics_compute,
    bench_season_parse
);
criterion_main!(perf);

static EVENT_OLD_JSON: &str = include_str!("../tests/fixtures/event_old.json");
static EVENT_NEW_JSON: &str = include_str!("../tests/fixtures/event_new.json");
static SEASON_JSON: &str = include_str!("../tests/fixtures/season.json");

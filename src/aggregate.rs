use std::collections::BTreeMap;

use crate::event::EventSnapshot;

/// One cell of a gambler's leaderboard row. `staked` is false when the
/// source payload carried no entry for the pair at all.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCell {
    pub match_name: String,
    pub result: i64,
    pub staked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GamblerLine {
    pub id: String,
    pub nickname: String,
    pub rank: u32,
    pub total: i64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub match_results: Vec<MatchCell>,
    pub bonus: Vec<(String, i64)>,
    pub bonus_total: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchExtreme {
    pub name: String,
    /// Original duration text, kept for display.
    pub label: String,
    pub minutes: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingExtreme {
    pub name: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GamblerHighlight {
    pub nickname: String,
    pub total: i64,
    pub wins: u32,
    pub losses: u32,
}

/// Event-level statistics. `None` fields mean "not applicable" (no matches
/// or no gamblers), never a division error.
#[derive(Debug, Clone, PartialEq)]
pub struct EventStats {
    pub number_of_matches: usize,
    pub number_of_gamblers: usize,
    pub total_predictions: usize,
    pub total_points: i64,
    pub avg_match_value: Option<f64>,
    pub accuracy_rate: Option<u32>,
    pub positive_scores: u32,
    pub negative_scores: u32,
    pub perfect_predictions: u32,
    pub title_changes: u32,
    pub longest_match: Option<MatchExtreme>,
    pub shortest_match: Option<MatchExtreme>,
    pub highest_rating_match: Option<RatingExtreme>,
    pub lowest_rating_match: Option<RatingExtreme>,
    pub top_performer: Option<GamblerHighlight>,
    pub most_wins: Option<GamblerHighlight>,
    pub score_distribution: Vec<(i64, u32)>,
}

/// Ranks for totals already sorted descending: ties share a rank, the next
/// distinct total resumes at 1 + count of entries strictly above it.
pub fn competition_ranks(totals: &[i64]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(totals.len());
    for (idx, total) in totals.iter().enumerate() {
        if idx > 0 && *total == totals[idx - 1] {
            let prev = ranks[idx - 1];
            ranks.push(prev);
        } else {
            ranks.push(idx as u32 + 1);
        }
    }
    ranks
}

/// Per-gambler tallies in gambler order, unranked. Total = match results +
/// bonus categories; wins/losses from the result sign, draws only from
/// explicit zero stakes.
fn tally_lines(event: &EventSnapshot) -> Vec<GamblerLine> {
    event
        .gamblers
        .iter()
        .map(|gambler| {
            let mut line = GamblerLine {
                id: gambler.id.clone(),
                nickname: gambler.nickname.clone(),
                rank: 0,
                total: 0,
                wins: 0,
                losses: 0,
                draws: 0,
                match_results: Vec::with_capacity(event.matches.len()),
                bonus: event.bonus_of(&gambler.id).to_vec(),
                bonus_total: event.bonus_total(&gambler.id),
            };
            for record in &event.matches {
                let stake = event.stake_of(&gambler.id, &record.name);
                let result = stake.score();
                line.total += result;
                if result > 0 {
                    line.wins += 1;
                } else if result < 0 {
                    line.losses += 1;
                } else if stake.is_explicit() {
                    line.draws += 1;
                }
                line.match_results.push(MatchCell {
                    match_name: record.name.clone(),
                    result,
                    staked: stake.is_explicit(),
                });
            }
            line.total += line.bonus_total;
            line
        })
        .collect()
}

/// The event leaderboard: stable-sorted by total descending (so exact ties
/// keep gambler order) with competition ranks assigned.
pub fn event_leaderboard(event: &EventSnapshot) -> Vec<GamblerLine> {
    let mut lines = tally_lines(event);
    lines.sort_by_key(|line| std::cmp::Reverse(line.total));
    let totals: Vec<i64> = lines.iter().map(|line| line.total).collect();
    for (line, rank) in lines.iter_mut().zip(competition_ranks(&totals)) {
        line.rank = rank;
    }
    lines
}

pub fn event_statistics(event: &EventSnapshot) -> EventStats {
    let lines = tally_lines(event);
    let number_of_matches = event.matches.len();
    let number_of_gamblers = event.gamblers.len();
    let total_predictions = number_of_matches * number_of_gamblers;

    let total_points: i64 = event.matches.iter().map(|m| m.score_value).sum();
    let avg_match_value = if number_of_matches == 0 {
        None
    } else {
        Some(total_points as f64 / number_of_matches as f64)
    };

    let mut positive_scores = 0u32;
    let mut negative_scores = 0u32;
    let mut perfect_predictions = 0u32;
    let mut distribution: BTreeMap<i64, u32> = BTreeMap::new();
    for record in &event.matches {
        for gambler in &event.gamblers {
            let stake = event.stake_of(&gambler.id, &record.name);
            if !stake.is_explicit() {
                continue;
            }
            let result = stake.score();
            if result > 0 {
                positive_scores += 1;
            } else if result < 0 {
                negative_scores += 1;
            }
            if result == record.score_value {
                perfect_predictions += 1;
            }
            *distribution.entry(result).or_insert(0) += 1;
        }
    }

    let accuracy_rate = if total_predictions == 0 {
        None
    } else {
        Some((positive_scores as f64 / total_predictions as f64 * 100.0).round() as u32)
    };

    let title_changes = event.matches.iter().filter(|m| m.title_change).count() as u32;

    // First occurrence wins every tie below, so scans use strict comparisons.
    let mut longest_match: Option<MatchExtreme> = None;
    let mut shortest_match: Option<MatchExtreme> = None;
    let mut highest_rating_match: Option<RatingExtreme> = None;
    let mut lowest_rating_match: Option<RatingExtreme> = None;
    for record in &event.matches {
        if let (Some(label), Some(minutes)) = (&record.duration, record.duration_minutes()) {
            let extreme = MatchExtreme {
                name: record.name.clone(),
                label: label.clone(),
                minutes,
            };
            if longest_match.as_ref().is_none_or(|best| minutes > best.minutes) {
                longest_match = Some(extreme.clone());
            }
            if shortest_match.as_ref().is_none_or(|best| minutes < best.minutes) {
                shortest_match = Some(extreme);
            }
        }
        if let Some(rating) = record.rating {
            let extreme = RatingExtreme {
                name: record.name.clone(),
                rating,
            };
            if highest_rating_match
                .as_ref()
                .is_none_or(|best| rating > best.rating)
            {
                highest_rating_match = Some(extreme.clone());
            }
            if lowest_rating_match
                .as_ref()
                .is_none_or(|best| rating < best.rating)
            {
                lowest_rating_match = Some(extreme);
            }
        }
    }

    let mut top_performer: Option<GamblerHighlight> = None;
    let mut most_wins: Option<GamblerHighlight> = None;
    for line in &lines {
        let highlight = GamblerHighlight {
            nickname: line.nickname.clone(),
            total: line.total,
            wins: line.wins,
            losses: line.losses,
        };
        if top_performer
            .as_ref()
            .is_none_or(|best| line.total > best.total)
        {
            top_performer = Some(highlight.clone());
        }
        if most_wins.as_ref().is_none_or(|best| line.wins > best.wins) {
            most_wins = Some(highlight);
        }
    }

    EventStats {
        number_of_matches,
        number_of_gamblers,
        total_predictions,
        total_points,
        avg_match_value,
        accuracy_rate,
        positive_scores,
        negative_scores,
        perfect_predictions,
        title_changes,
        longest_match,
        shortest_match,
        highest_rating_match,
        lowest_rating_match,
        top_performer,
        most_wins,
        score_distribution: distribution.into_iter().collect(),
    }
}

use std::collections::{HashMap, VecDeque};

use crate::aggregate::{event_leaderboard, event_statistics, EventStats, GamblerLine};
use crate::event::EventSnapshot;
use crate::season::SeasonOverview;
use crate::store::event_filename;

const LOG_CAP: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Season,
    Event { file: String },
    NextEvent,
    Upcoming { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTab {
    Leaderboard,
    Matches,
    Gamblers,
    Stats,
}

/// One row of the season screen's events sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeRow {
    Past(usize),
    Next,
    Upcoming(usize),
}

/// A fully aggregated event, computed once on the loader thread.
#[derive(Debug, Clone)]
pub struct EventBundle {
    pub snapshot: EventSnapshot,
    pub leaderboard: Vec<GamblerLine>,
    pub stats: EventStats,
}

impl EventBundle {
    pub fn build(snapshot: EventSnapshot) -> Self {
        let leaderboard = event_leaderboard(&snapshot);
        let stats = event_statistics(&snapshot);
        Self {
            snapshot,
            leaderboard,
            stats,
        }
    }
}

#[derive(Debug)]
pub enum Delta {
    SetSeason(SeasonOverview),
    UpsertEvent { file: String, bundle: EventBundle },
    EventFailed { file: String, error: String },
    Log(String),
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub season: Option<SeasonOverview>,
    pub events: HashMap<String, EventBundle>,
    pub event_errors: HashMap<String, String>,
    pub selected: usize,
    pub event_tab: EventTab,
    pub event_scroll: u16,
    pub loading: bool,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Season,
            season: None,
            events: HashMap::with_capacity(16),
            event_errors: HashMap::new(),
            selected: 0,
            event_tab: EventTab::Leaderboard,
            event_scroll: 0,
            loading: true,
            logs: VecDeque::with_capacity(LOG_CAP),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() >= LOG_CAP {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }

    /// Sidebar rows in display order: past events, then the next event,
    /// then farther-out upcoming events.
    pub fn home_rows(&self) -> Vec<HomeRow> {
        let Some(season) = &self.season else {
            return Vec::new();
        };
        let mut rows: Vec<HomeRow> = (0..season.past_events().len()).map(HomeRow::Past).collect();
        if season.next_event.is_some() {
            rows.push(HomeRow::Next);
        }
        rows.extend((0..season.upcoming.len()).map(HomeRow::Upcoming));
        rows
    }

    pub fn select_next(&mut self) {
        let total = self.home_rows().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.home_rows().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.home_rows().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    /// Enter the screen for the selected sidebar row.
    pub fn open_selected(&mut self) {
        let rows = self.home_rows();
        let Some(row) = rows.get(self.selected) else {
            return;
        };
        let Some(season) = &self.season else {
            return;
        };
        match row {
            HomeRow::Past(idx) => {
                let Some(entry) = season.past_events().get(*idx) else {
                    return;
                };
                let file = event_filename(&entry.event);
                self.screen = Screen::Event { file };
                self.event_tab = EventTab::Leaderboard;
                self.event_scroll = 0;
            }
            HomeRow::Next => self.screen = Screen::NextEvent,
            HomeRow::Upcoming(idx) => self.screen = Screen::Upcoming { index: *idx },
        }
    }

    pub fn back_to_season(&mut self) {
        self.screen = Screen::Season;
        self.event_scroll = 0;
    }

    pub fn cycle_event_tab(&mut self) {
        self.event_tab = match self.event_tab {
            EventTab::Leaderboard => EventTab::Matches,
            EventTab::Matches => EventTab::Gamblers,
            EventTab::Gamblers => EventTab::Stats,
            EventTab::Stats => EventTab::Leaderboard,
        };
        self.event_scroll = 0;
    }

    pub fn current_event(&self) -> Option<&EventBundle> {
        match &self.screen {
            Screen::Event { file } => self.events.get(file),
            _ => None,
        }
    }

    pub fn current_event_error(&self) -> Option<&str> {
        match &self.screen {
            Screen::Event { file } => self.event_errors.get(file).map(String::as_str),
            _ => None,
        }
    }

    pub fn scroll_down(&mut self) {
        self.event_scroll = self.event_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.event_scroll = self.event_scroll.saturating_sub(1);
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetSeason(season) => {
            state.season = Some(season);
            state.loading = false;
            state.clamp_selection();
        }
        Delta::UpsertEvent { file, bundle } => {
            state.event_errors.remove(&file);
            state.events.insert(file, bundle);
        }
        Delta::EventFailed { file, error } => {
            state.event_errors.insert(file, error);
        }
        Delta::Log(line) => state.push_log(line),
    }
}

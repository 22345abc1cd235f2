use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use ringside_terminal::export;
use ringside_terminal::loader;
use ringside_terminal::season::{
    countdown, format_event_date, parse_announcement_date, Countdown, EventAnnouncement,
    SeasonOverview,
};
use ringside_terminal::state::{apply_delta, AppState, Delta, EventBundle, EventTab, Screen};
use ringside_terminal::store;

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('1') => self.state.back_to_season(),
            KeyCode::Char('b') | KeyCode::Esc => self.state.back_to_season(),
            KeyCode::Char('j') | KeyCode::Down => match self.state.screen {
                Screen::Season => self.state.select_next(),
                _ => self.state.scroll_down(),
            },
            KeyCode::Char('k') | KeyCode::Up => match self.state.screen {
                Screen::Season => self.state.select_prev(),
                _ => self.state.scroll_up(),
            },
            KeyCode::Char('d') | KeyCode::Enter => {
                if self.state.screen == Screen::Season {
                    self.state.open_selected();
                }
            }
            KeyCode::Char('t') | KeyCode::Tab => {
                if matches!(self.state.screen, Screen::Event { .. }) {
                    self.state.cycle_event_tab();
                }
            }
            KeyCode::Char('e') => self.export_standings(),
            _ => {}
        }
    }

    fn export_standings(&mut self) {
        let Some(season) = self.state.season.clone() else {
            self.state.push_log("[INFO] Nothing to export yet");
            return;
        };
        let path = export_path();
        match export::export_standings(&path, &season, &self.state.events) {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} standings and {} event sheets ({} rows) to {}",
                report.standings,
                report.event_sheets,
                report.leaderboard_rows,
                path.display()
            )),
            Err(err) => self
                .state
                .push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}

fn export_path() -> PathBuf {
    match std::env::var("RINGSIDE_EXPORT_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from("ringside_standings.xlsx"),
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    loader::spawn_loader(tx);

    let mut app = App::new();
    app.state.push_log(format!(
        "[INFO] Data directory: {}",
        store::data_dir().display()
    ));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(
        std::env::var("RINGSIDE_TICK_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(250)
            .clamp(50, 1000),
    );
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.state.screen {
        Screen::Season => render_season(frame, chunks[1], &app.state),
        Screen::Event { .. } => render_event(frame, chunks[1], &app.state),
        Screen::NextEvent => render_next_event(frame, chunks[1], &app.state),
        Screen::Upcoming { index } => render_upcoming(frame, chunks[1], &app.state, *index),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let season_name = state
        .season
        .as_ref()
        .map(|season| season.season_name.clone())
        .unwrap_or_else(|| "Loading...".to_string());
    let title = match &state.screen {
        Screen::Season => format!("RINGSIDE | {season_name} | Season Standings"),
        Screen::Event { file } => format!("RINGSIDE | Event: {file}"),
        Screen::NextEvent => format!("RINGSIDE | {season_name} | Next Event"),
        Screen::Upcoming { .. } => format!("RINGSIDE | {season_name} | Upcoming Event"),
    };
    let line1 = format!("  |=|  {title}");
    let line2 = " /___\\".to_string();
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    match &state.screen {
        Screen::Season => {
            "1 Season | Enter/d Open | j/k/↑/↓ Move | e Export | ? Help | q Quit".to_string()
        }
        Screen::Event { .. } => {
            "1 Season | b/Esc Back | Tab/t Next tab | j/k Scroll | e Export | ? Help | q Quit"
                .to_string()
        }
        Screen::NextEvent | Screen::Upcoming { .. } => {
            "1 Season | b/Esc Back | ? Help | q Quit".to_string()
        }
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_season(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(season) = &state.season else {
        let loading = Paragraph::new("Loading season data...")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(40)])
        .split(area);

    render_events_sidebar(frame, columns[0], state);
    render_standings(frame, columns[1], season);
}

fn render_events_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Events").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(season) = &state.season else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut row_idx = 0usize;

    let section_style = Style::default().add_modifier(Modifier::BOLD);
    if !season.past_events().is_empty() {
        lines.push(Line::styled("Past Events", section_style));
    }
    for entry in season.past_events() {
        lines.push(sidebar_line(&entry.event, None, row_idx == state.selected));
        row_idx += 1;
    }
    if let Some(next) = &season.next_event {
        lines.push(Line::raw(""));
        lines.push(Line::styled("Next Event", section_style));
        lines.push(sidebar_line(
            &next.event,
            Some(&next.date),
            row_idx == state.selected,
        ));
        row_idx += 1;
    }
    if !season.upcoming.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("Upcoming Events", section_style));
        for entry in &season.upcoming {
            lines.push(sidebar_line(
                &entry.event,
                Some(&entry.date),
                row_idx == state.selected,
            ));
            row_idx += 1;
        }
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

fn sidebar_line<'a>(name: &'a str, date: Option<&'a str>, selected: bool) -> Line<'a> {
    let prefix = if selected { "> " } else { "  " };
    let text = match date {
        Some(date) if !date.is_empty() => format!("{prefix}{name}  ({date})"),
        _ => format!("{prefix}{name}"),
    };
    if selected {
        Line::styled(text, Style::default().fg(Color::White).bg(Color::DarkGray))
    } else {
        Line::raw(text)
    }
}

fn render_standings(frame: &mut Frame, area: Rect, season: &SeasonOverview) {
    let block = Block::default()
        .title("Season Standings")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if season.standings.is_empty() {
        let empty = Paragraph::new("No standings yet")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }
    if inner.height < 2 {
        return;
    }

    let mut widths = vec![
        Constraint::Length(6),
        Constraint::Length(18),
        Constraint::Length(8),
    ];
    for _ in season.past_events() {
        widths.push(Constraint::Length(12));
    }
    if season.next_event.is_some() {
        widths.push(Constraint::Length(12));
    }
    for _ in &season.upcoming {
        widths.push(Constraint::Length(12));
    }

    let header_area = Rect { height: 1, ..inner };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths.clone())
        .split(header_area);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, cols[0], "Rank", bold);
    render_cell_text(frame, cols[1], "Nickname", bold);
    render_cell_text(frame, cols[2], "Total", bold);
    let mut col = 3usize;
    for entry in season.past_events() {
        render_cell_text(frame, cols[col], &entry.event, bold);
        col += 1;
    }
    if let Some(next) = &season.next_event {
        render_cell_text(
            frame,
            cols[col],
            &next.event,
            bold.fg(Color::Yellow),
        );
        col += 1;
    }
    for entry in &season.upcoming {
        render_cell_text(
            frame,
            cols[col],
            &entry.event,
            bold.fg(Color::DarkGray),
        );
        col += 1;
    }

    let visible = inner.height as usize - 1;
    let (start, end) = visible_range(0, season.standings.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let standing = &season.standings[idx];
        let row_area = Rect {
            x: inner.x,
            y: inner.y + 1 + i as u16,
            width: inner.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths.clone())
            .split(row_area);

        render_cell_text(
            frame,
            cols[0],
            &format!("#{}", standing.rank),
            rank_style(standing.rank),
        );
        render_cell_text(frame, cols[1], &standing.nickname, Style::default());
        render_cell_text(
            frame,
            cols[2],
            &signed(standing.total_points),
            score_style(standing.total_points),
        );
        let mut col = 3usize;
        for entry in &standing.history {
            if col >= cols.len() {
                break;
            }
            render_cell_text(
                frame,
                cols[col],
                &signed(entry.points),
                score_style(entry.points),
            );
            col += 1;
        }
        // Next/upcoming columns have no points yet.
        let placeholders = 3 + season.past_events().len();
        for col in placeholders..cols.len() {
            render_cell_text(
                frame,
                cols[col],
                "-",
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}

fn render_event(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(error) = state.current_event_error() {
        let text = format!("Failed to load event data\n\n{error}\n\nPress b to return to the season");
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Red))
            .block(Block::default().title("Event").borders(Borders::ALL));
        frame.render_widget(paragraph, area);
        return;
    }
    let Some(bundle) = state.current_event() else {
        let loading = Paragraph::new("Loading event data...")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    let snapshot = &bundle.snapshot;
    let meta = format!(
        "{}\n{} • {}",
        snapshot.event_name,
        format_event_date(&snapshot.event_date),
        snapshot.location
    );
    let title = format!(" {} ", tab_bar(state.event_tab));
    let header = Paragraph::new(meta).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(header, sections[0]);

    match state.event_tab {
        EventTab::Leaderboard => render_leaderboard_tab(frame, sections[1], bundle),
        EventTab::Matches => render_matches_tab(frame, sections[1], state, bundle),
        EventTab::Gamblers => render_gamblers_tab(frame, sections[1], state, bundle),
        EventTab::Stats => render_stats_tab(frame, sections[1], bundle),
    }
}

fn tab_bar(active: EventTab) -> String {
    let tabs = [
        (EventTab::Leaderboard, "Leaderboard"),
        (EventTab::Matches, "Matches"),
        (EventTab::Gamblers, "Gamblers"),
        (EventTab::Stats, "Stats"),
    ];
    tabs.iter()
        .map(|(tab, label)| {
            if *tab == active {
                format!("[{label}]")
            } else {
                (*label).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_leaderboard_tab(frame: &mut Frame, area: Rect, bundle: &EventBundle) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if bundle.leaderboard.is_empty() {
        let empty = Paragraph::new("No gamblers in this event")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }
    if inner.height < 2 {
        return;
    }

    let snapshot = &bundle.snapshot;
    let mut widths = vec![
        Constraint::Length(6),
        Constraint::Length(18),
        Constraint::Length(8),
    ];
    for _ in &snapshot.matches {
        widths.push(Constraint::Length(12));
    }
    let bonus_headers: Vec<String> = bundle
        .leaderboard
        .iter()
        .find(|line| !line.bonus.is_empty())
        .map(|line| {
            line.bonus
                .iter()
                .map(|(name, _)| name.replace('_', " "))
                .collect()
        })
        .unwrap_or_default();
    if snapshot.has_bonuses() {
        widths.push(Constraint::Length(12));
        for _ in &bonus_headers {
            widths.push(Constraint::Length(12));
        }
    }

    let header_area = Rect { height: 1, ..inner };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths.clone())
        .split(header_area);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, cols[0], "Rank", bold);
    render_cell_text(frame, cols[1], "Nickname", bold);
    render_cell_text(frame, cols[2], "Total", bold);
    let mut col = 3usize;
    for record in &snapshot.matches {
        if col >= cols.len() {
            break;
        }
        render_cell_text(frame, cols[col], &record.name, bold);
        col += 1;
    }
    if snapshot.has_bonuses() && col < cols.len() {
        render_cell_text(frame, cols[col], "Individuals", bold);
        col += 1;
        for name in &bonus_headers {
            if col >= cols.len() {
                break;
            }
            render_cell_text(frame, cols[col], name, bold);
            col += 1;
        }
    }

    let visible = inner.height as usize - 1;
    let (start, end) = visible_range(0, bundle.leaderboard.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let line = &bundle.leaderboard[idx];
        let row_area = Rect {
            x: inner.x,
            y: inner.y + 1 + i as u16,
            width: inner.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths.clone())
            .split(row_area);

        render_cell_text(
            frame,
            cols[0],
            &format!("#{}", line.rank),
            rank_style(line.rank),
        );
        render_cell_text(frame, cols[1], &line.nickname, Style::default());
        render_cell_text(frame, cols[2], &signed(line.total), score_style(line.total));
        let mut col = 3usize;
        for cell in &line.match_results {
            if col >= cols.len() {
                break;
            }
            let text = if cell.staked {
                signed(cell.result)
            } else {
                "·".to_string()
            };
            render_cell_text(frame, cols[col], &text, score_style(cell.result));
            col += 1;
        }
        if snapshot.has_bonuses() && col < cols.len() {
            render_cell_text(
                frame,
                cols[col],
                &signed(line.bonus_total),
                score_style(line.bonus_total),
            );
            col += 1;
            for (_, value) in &line.bonus {
                if col >= cols.len() {
                    break;
                }
                render_cell_text(frame, cols[col], &signed(*value), score_style(*value));
                col += 1;
            }
        }
    }
}

fn render_matches_tab(frame: &mut Frame, area: Rect, state: &AppState, bundle: &EventBundle) {
    let mut lines: Vec<String> = Vec::new();
    for record in &bundle.snapshot.matches {
        let mut results: Vec<(&str, i64)> = bundle
            .snapshot
            .gamblers
            .iter()
            .filter_map(|gambler| {
                let stake = bundle.snapshot.stake_of(&gambler.id, &record.name);
                stake
                    .is_explicit()
                    .then(|| (gambler.nickname.as_str(), stake.score()))
            })
            .collect();
        results.sort_by_key(|(_, result)| std::cmp::Reverse(*result));

        lines.push(format!("{}  [{} pts]", record.name, record.score_value));
        for (idx, (nickname, result)) in results.iter().enumerate() {
            let crown = if idx == 0 && *result > 0 { "★ " } else { "  " };
            lines.push(format!("  {crown}{nickname:<20} {}", signed(*result)));
        }
        lines.push(format!("  {} participants", results.len()));
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push("No matches in this event".to_string());
    }

    let paragraph = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Match Results").borders(Borders::ALL))
        .scroll((state.event_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_gamblers_tab(frame: &mut Frame, area: Rect, state: &AppState, bundle: &EventBundle) {
    let mut lines: Vec<String> = Vec::new();
    for line in &bundle.leaderboard {
        lines.push(format!(
            "{}  ({})  {}  {}W-{}L-{}D",
            line.nickname,
            line.id,
            signed(line.total),
            line.wins,
            line.losses,
            line.draws
        ));
        for cell in &line.match_results {
            let text = if cell.staked {
                signed(cell.result)
            } else {
                "no stake".to_string()
            };
            lines.push(format!("    {:<28} {text}", cell.match_name));
        }
        if !line.bonus.is_empty() {
            for (name, value) in &line.bonus {
                lines.push(format!(
                    "    {:<28} {}",
                    name.replace('_', " "),
                    signed(*value)
                ));
            }
        }
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push("No gamblers in this event".to_string());
    }

    let paragraph = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("All Gamblers").borders(Borders::ALL))
        .scroll((state.event_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_stats_tab(frame: &mut Frame, area: Rect, bundle: &EventBundle) {
    let stats = &bundle.stats;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(4),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(rows[0]);

    let performer = stats
        .top_performer
        .as_ref()
        .map(|best| {
            format!(
                "{}\n{} pts\n{}W - {}L",
                best.nickname,
                signed(best.total),
                best.wins,
                best.losses
            )
        })
        .unwrap_or_else(|| "N/A".to_string());
    render_stat_card(frame, top[0], "Top Performer", &performer);

    let overview = format!(
        "Matches: {}\nGamblers: {}\nPredictions: {}",
        stats.number_of_matches, stats.number_of_gamblers, stats.total_predictions
    );
    render_stat_card(frame, top[1], "Overview", &overview);

    let accuracy = match stats.accuracy_rate {
        Some(rate) => format!(
            "{rate}%\n{} correct picks",
            stats.positive_scores
        ),
        None => "N/A".to_string(),
    };
    render_stat_card(frame, top[2], "Accuracy Rate", &accuracy);

    let value = match stats.avg_match_value {
        Some(avg) => format!(
            "{avg:.1} pts avg\n{} total\n{} perfect picks",
            stats.total_points, stats.perfect_predictions
        ),
        None => "N/A".to_string(),
    };
    render_stat_card(frame, top[3], "Match Value", &value);

    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(rows[1]);

    let longest = stats
        .longest_match
        .as_ref()
        .map(|m| format!("{}\n{}", m.label, m.name))
        .unwrap_or_else(|| "N/A".to_string());
    render_stat_card(frame, mid[0], "Longest Match", &longest);

    let shortest = stats
        .shortest_match
        .as_ref()
        .map(|m| format!("{}\n{}", m.label, m.name))
        .unwrap_or_else(|| "N/A".to_string());
    render_stat_card(frame, mid[1], "Shortest Match", &shortest);

    let highest = stats
        .highest_rating_match
        .as_ref()
        .map(|m| format!("{:.1}\n{}", m.rating, m.name))
        .unwrap_or_else(|| "N/A".to_string());
    render_stat_card(frame, mid[2], "Highest Rating", &highest);

    let lowest = stats
        .lowest_rating_match
        .as_ref()
        .map(|m| format!("{:.1}\n{}", m.rating, m.name))
        .unwrap_or_else(|| "N/A".to_string());
    render_stat_card(frame, mid[3], "Lowest Rating", &lowest);

    render_stat_card(
        frame,
        mid[4],
        "Title Changes",
        &stats.title_changes.to_string(),
    );

    render_distribution(frame, rows[2], bundle);
}

fn render_stat_card(frame: &mut Frame, area: Rect, title: &str, body: &str) {
    let card = Paragraph::new(body.to_string())
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(card, area);
}

fn render_distribution(frame: &mut Frame, area: Rect, bundle: &EventBundle) {
    let stats = &bundle.stats;
    let block = Block::default()
        .title("Performance Distribution")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let positive = Bar::default()
        .value(stats.positive_scores as u64)
        .text_value(format!("{} up", stats.positive_scores))
        .style(Style::default().fg(Color::Green));
    let negative = Bar::default()
        .value(stats.negative_scores as u64)
        .text_value(format!("{} down", stats.negative_scores))
        .style(Style::default().fg(Color::Red));
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&[positive, negative]))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(stats.total_predictions.max(1) as u64);
    frame.render_widget(chart, sections[0]);

    let spread = stats
        .score_distribution
        .iter()
        .map(|(score, count)| format!("{}×{count}", signed(*score)))
        .collect::<Vec<_>>()
        .join("  ");
    let spread = if spread.is_empty() {
        "No recorded stakes".to_string()
    } else {
        format!("Score spread: {spread}")
    };
    let paragraph = Paragraph::new(spread).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, sections[1]);
}

fn render_next_event(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(next) = state
        .season
        .as_ref()
        .and_then(|season| season.next_event.as_ref())
    else {
        let empty = Paragraph::new("No next event announced")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let mut lines: Vec<Line> = vec![
        Line::styled(
            "NEXT EVENT",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            next.event.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!("{} • {}", next.date, next.location)),
        Line::raw(""),
    ];

    let now = Local::now().naive_local();
    match parse_announcement_date(&next.date, now.date()) {
        Some(date) => {
            // Midnight of the announced day; recomputed from the clock on
            // every redraw so the display never drifts.
            let target = date.and_hms_opt(0, 0, 0).unwrap_or(now);
            let left = countdown(target, now);
            lines.push(Line::styled(
                "EVENT STARTS IN",
                Style::default().fg(Color::Yellow),
            ));
            lines.push(Line::styled(
                countdown_text(left),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::raw("  days   hours  minutes seconds"));
        }
        None => lines.push(Line::raw("Start time TBD")),
    }
    lines.push(Line::raw(""));

    if !next.notes.is_empty() {
        lines.push(Line::raw(format!("Notes: {}", next.notes)));
        lines.push(Line::raw(""));
    }

    if !next.card.is_empty() {
        lines.push(Line::styled(
            "Card",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        for announced in &next.card {
            let stipulation = announced
                .stipulation
                .as_deref()
                .map(|s| format!(" | {s}"))
                .unwrap_or_default();
            lines.push(Line::raw(format!(
                "  Match {}: {} ({}){}",
                announced.id, announced.match_up, announced.kind, stipulation
            )));
        }
        lines.push(Line::raw(""));
    }

    lines.push(Line::styled(
        "Betting results will be available after the event concludes",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .scroll((state.event_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn countdown_text(left: Countdown) -> String {
    format!(
        "  {:02}  :  {:02}  :  {:02}  :  {:02}",
        left.days, left.hours, left.minutes, left.seconds
    )
}

fn render_upcoming(frame: &mut Frame, area: Rect, state: &AppState, index: usize) {
    let Some(entry) = state
        .season
        .as_ref()
        .and_then(|season| season.upcoming.get(index))
    else {
        let empty = Paragraph::new("No such upcoming event")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let lines = upcoming_lines(entry);
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn upcoming_lines(entry: &EventAnnouncement) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::styled(
            "UPCOMING EVENT",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            entry.event.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!("{} • {}", entry.date, entry.location)),
    ];
    if !entry.notes.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::raw(format!("Notes: {}", entry.notes)));
    }
    lines
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

fn score_style(value: i64) -> Style {
    if value > 0 {
        Style::default().fg(Color::Green)
    } else if value < 0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn rank_style(rank: u32) -> Style {
    match rank {
        1 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        2 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        3 => Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        _ => Style::default(),
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Ringside Terminal - Help",
        "",
        "Global:",
        "  1            Season standings",
        "  Enter / d    Open selected event",
        "  b / Esc      Back to season",
        "  e            Export standings to xlsx",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Season:",
        "  j/k or ↑/↓   Move through events",
        "",
        "Event:",
        "  Tab / t      Cycle Leaderboard/Matches/Gamblers/Stats",
        "  j/k or ↑/↓   Scroll",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

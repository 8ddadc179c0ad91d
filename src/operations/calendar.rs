use chrono::{Datelike, Months, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::{BTreeSet, HashMap};
use std::io;

use crate::models::bill::{Bill, BillStatus};
use crate::operations::status_color;

/// Bills whose due date falls on the given calendar day, in input order.
pub fn bills_on_date(bills: &[Bill], date: NaiveDate) -> Vec<Bill> {
    bills
        .iter()
        .filter(|b| b.due_date == date)
        .cloned()
        .collect()
}

/// Per status, every date that has at least one bill of that status. Used to
/// highlight days in the calendar grid.
pub fn dates_by_status(bills: &[Bill]) -> HashMap<BillStatus, BTreeSet<NaiveDate>> {
    let mut map: HashMap<BillStatus, BTreeSet<NaiveDate>> = HashMap::new();
    for bill in bills {
        map.entry(bill.status).or_default().insert(bill.due_date);
    }
    map
}

/// Collapses the per-status date sets to one status per day, keeping the most
/// urgent when several bills share a due date.
fn date_highlights(bills: &[Bill]) -> HashMap<NaiveDate, BillStatus> {
    let by_status = dates_by_status(bills);
    let mut highlights = HashMap::new();

    // Least urgent first so later inserts overwrite with more urgent ones.
    for status in [
        BillStatus::Paid,
        BillStatus::Upcoming,
        BillStatus::Due,
        BillStatus::Overdue,
    ] {
        if let Some(dates) = by_status.get(&status) {
            for &date in dates {
                highlights.insert(date, status);
            }
        }
    }
    highlights
}

struct CalendarState {
    bills: Vec<Bill>,
    highlights: HashMap<NaiveDate, BillStatus>,
    selected: NaiveDate,
}

impl CalendarState {
    fn new(bills: Vec<Bill>, selected: NaiveDate) -> Self {
        let highlights = date_highlights(&bills);
        Self {
            bills,
            highlights,
            selected,
        }
    }

    fn move_days(&mut self, delta: i64) {
        if let Some(next) = self
            .selected
            .checked_add_signed(chrono::Duration::days(delta))
        {
            self.selected = next;
        }
    }

    fn move_months(&mut self, forward: bool) {
        let shifted = if forward {
            self.selected.checked_add_months(Months::new(1))
        } else {
            self.selected.checked_sub_months(Months::new(1))
        };
        if let Some(next) = shifted {
            self.selected = next;
        }
    }
}

pub fn run_calendar(bills: &[Bill], initial: NaiveDate) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Failed to enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Failed to enter alternate screen: {}", e))?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| format!("Failed to initialize terminal: {}", e))?;

        let mut state = CalendarState::new(bills.to_vec(), initial);

        loop {
            terminal
                .draw(|frame| {
                    let size = frame.area();
                    let layout = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Min(10), Constraint::Length(2)])
                        .split(size);

                    let columns = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Length(32), Constraint::Min(30)])
                        .split(layout[0]);

                    render_month_grid(frame, columns[0], &state);
                    render_day_panel(frame, columns[1], &state);
                    render_footer(frame, layout[1]);
                })
                .map_err(|e| format!("Failed to draw terminal UI: {}", e))?;

            if event::poll(std::time::Duration::from_millis(200))
                .map_err(|e| format!("Failed to poll input: {}", e))?
            {
                match event::read().map_err(|e| format!("Failed to read input: {}", e))? {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Release {
                            continue;
                        }
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => break,
                            KeyCode::Left => state.move_days(-1),
                            KeyCode::Right => state.move_days(1),
                            KeyCode::Up => state.move_days(-7),
                            KeyCode::Down => state.move_days(7),
                            KeyCode::PageUp => state.move_months(false),
                            KeyCode::PageDown => state.move_months(true),
                            KeyCode::Char('t') => {
                                state.selected = chrono::Local::now().date_naive()
                            }
                            _ => {}
                        }
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode().map_err(|e| format!("Failed to disable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)
        .map_err(|e| format!("Failed to leave alternate screen: {}", e))?;

    result
}

fn render_month_grid(frame: &mut ratatui::Frame, area: Rect, state: &CalendarState) {
    let title = state.selected.format("%B %Y").to_string();
    let block = Block::default().title(title).borders(Borders::ALL);

    let first = state
        .selected
        .with_day(1)
        .expect("day 1 exists in every month");
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(state.selected);

    let mut lines = vec![Line::from(Span::styled(
        " Su  Mo  Tu  We  Th  Fr  Sa",
        Style::default().fg(Color::DarkGray),
    ))];

    let mut spans: Vec<Span> = vec![Span::raw("    ".repeat(leading))];
    let mut weekday = leading;
    for day in 1..=days {
        let date = first
            .with_day(day)
            .expect("day within month length");

        let mut style = Style::default();
        if let Some(&status) = state.highlights.get(&date) {
            style = style.fg(status_color(status)).bold();
        }
        if date == state.selected {
            style = style.reversed();
        }

        spans.push(Span::styled(format!(" {:>2} ", day), style));
        weekday += 1;
        if weekday == 7 {
            lines.push(Line::from(std::mem::take(&mut spans)));
            weekday = 0;
        }
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("● overdue ", Style::default().fg(Color::Red)),
        Span::styled("● due ", Style::default().fg(Color::Yellow)),
        Span::styled("● upcoming ", Style::default().fg(Color::Blue)),
        Span::styled("● paid", Style::default().fg(Color::Green)),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_day_panel(frame: &mut ratatui::Frame, area: Rect, state: &CalendarState) {
    let title = state.selected.format("%B %d, %Y").to_string();
    let block = Block::default().title(title).borders(Borders::ALL);

    let day_bills = bills_on_date(&state.bills, state.selected);

    let mut lines = Vec::new();
    if day_bills.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No bills due on this date",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for bill in &day_bills {
            lines.push(Line::from(vec![
                Span::styled(bill.name.clone(), Style::default().bold()),
                Span::raw(format!("  ({})", bill.category)),
            ]));
            lines.push(Line::from(vec![
                Span::raw(format!("  ${}  ", bill.amount)),
                Span::styled(
                    bill.status.badge(),
                    Style::default().fg(status_color(bill.status)).bold(),
                ),
            ]));
            lines.push(Line::from(""));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_footer(frame: &mut ratatui::Frame, area: Rect) {
    let hint = "←/→ day  ↑/↓ week  PgUp/PgDn month  t today  q/Esc exit";
    frame.render_widget(
        Paragraph::new(hint).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).expect("day 1 exists in every month");
    let next = first
        .checked_add_months(Months::new(1))
        .unwrap_or(first);
    (next - first).num_days() as u32
}

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::cmp::{max, min};
use std::io;

use crate::models::bill::{Bill, BillStatus};
use crate::operations::add::parse_bill_draft;
use crate::operations::sort::sort_by_priority;
use crate::operations::stats::compute_stats;
use crate::operations::status_color;
use crate::store::BillStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Details,
    Input(InputKind),
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    AddBill,
    EditBill,
    Note,
}

struct DashboardState {
    mode: Mode,

    // Priority-sorted snapshot of the store, rebuilt after every mutation.
    sorted: Vec<Bill>,
    table_state: TableState,

    input_buffer: String,
    input_error: Option<String>,

    details_bill: Option<Bill>,

    last_page_size: usize,
}

impl DashboardState {
    fn new(store: &BillStore) -> Self {
        let mut state = Self {
            mode: Mode::List,
            sorted: Vec::new(),
            table_state: TableState::default(),
            input_buffer: String::new(),
            input_error: None,
            details_bill: None,
            last_page_size: 10,
        };
        state.recompute(store);
        state
    }

    fn recompute(&mut self, store: &BillStore) {
        self.sorted = sort_by_priority(store.list());

        if self.sorted.is_empty() {
            self.table_state.select(None);
        } else {
            let new_selected = match self.table_state.selected() {
                Some(sel) => min(sel, self.sorted.len().saturating_sub(1)),
                None => 0,
            };
            self.table_state.select(Some(new_selected));
        }
    }

    fn selected_bill(&self) -> Option<&Bill> {
        let selected = self.table_state.selected()?;
        self.sorted.get(selected)
    }

    fn move_selection(&mut self, delta: i32) {
        if self.sorted.is_empty() {
            self.table_state.select(None);
            return;
        }

        let current = self.table_state.selected().unwrap_or(0) as i32;
        let max_index = self.sorted.len().saturating_sub(1) as i32;
        let next = (current + delta).clamp(0, max_index) as usize;
        self.table_state.select(Some(next));
    }

    fn page_up(&mut self) {
        let page = max(1, self.last_page_size) as i32;
        self.move_selection(-page);
    }

    fn page_down(&mut self) {
        let page = max(1, self.last_page_size) as i32;
        self.move_selection(page);
    }

    fn open_details(&mut self) {
        self.details_bill = self.selected_bill().cloned();
        self.mode = Mode::Details;
    }

    fn close_details(&mut self) {
        self.details_bill = None;
        self.mode = Mode::List;
    }

    fn start_input(&mut self, kind: InputKind) {
        self.input_buffer.clear();
        self.input_error = None;

        match kind {
            InputKind::AddBill => {}
            InputKind::EditBill => {
                let prefill = self.selected_bill().map(|bill| {
                    format!(
                        "{}, {}, {}, {}",
                        bill.name,
                        bill.amount,
                        bill.due_date.format("%Y-%m-%d"),
                        bill.category
                    )
                });
                match prefill {
                    Some(text) => self.input_buffer = text,
                    None => return,
                }
            }
            InputKind::Note => {
                let prefill = self.selected_bill().map(|bill| bill.note.clone());
                match prefill {
                    Some(text) => self.input_buffer = text,
                    None => return,
                }
            }
        }

        self.mode = Mode::Input(kind);
    }

    fn cancel_input(&mut self) {
        self.input_error = None;
        self.mode = Mode::List;
    }

    fn commit_input(&mut self, store: &mut BillStore, kind: InputKind) {
        let raw = self.input_buffer.trim().to_string();
        match kind {
            InputKind::AddBill => match parse_bill_draft(&raw) {
                Ok(draft) => {
                    store.add(draft);
                    self.mode = Mode::List;
                    self.recompute(store);
                }
                Err(e) => self.input_error = Some(e),
            },
            InputKind::EditBill => {
                let id = match self.selected_bill() {
                    Some(bill) => bill.id,
                    None => {
                        self.mode = Mode::List;
                        return;
                    }
                };
                match parse_bill_draft(&raw) {
                    Ok(draft) => {
                        store.update(id, draft);
                        self.mode = Mode::List;
                        self.recompute(store);
                    }
                    Err(e) => self.input_error = Some(e),
                }
            }
            InputKind::Note => {
                if let Some(id) = self.selected_bill().map(|b| b.id) {
                    store.set_note(id, &raw);
                    self.recompute(store);
                }
                self.mode = Mode::List;
            }
        }
    }

    fn mark_selected_paid(&mut self, store: &mut BillStore) {
        if let Some(id) = self.selected_bill().map(|b| b.id) {
            store.set_status(id, BillStatus::Paid);
            self.recompute(store);
        }
    }

    fn cycle_selected_status(&mut self, store: &mut BillStore) {
        if let Some((id, status)) = self.selected_bill().map(|b| (b.id, b.status)) {
            let next = match status {
                BillStatus::Overdue => BillStatus::Due,
                BillStatus::Due => BillStatus::Upcoming,
                BillStatus::Upcoming => BillStatus::Paid,
                BillStatus::Paid => BillStatus::Overdue,
            };
            store.set_status(id, next);
            self.recompute(store);
        }
    }

    fn delete_selected(&mut self, store: &mut BillStore) {
        if let Some(id) = self.selected_bill().map(|b| b.id) {
            store.remove(id);
            self.recompute(store);
        }
        self.mode = Mode::List;
    }
}

pub fn run_dashboard(store: &mut BillStore) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Failed to enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Failed to enter alternate screen: {}", e))?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| format!("Failed to initialize terminal: {}", e))?;

        let mut state = DashboardState::new(store);

        loop {
            terminal
                .draw(|frame| {
                    let size = frame.area();
                    let layout = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Length(5),
                            Constraint::Min(5),
                            Constraint::Length(2),
                        ])
                        .split(size);

                    render_stat_cards(frame, layout[0], &state);
                    render_table(frame, layout[1], &mut state);
                    render_footer(frame, layout[2], &state);

                    if let Mode::Input(kind) = state.mode {
                        render_input_modal(frame, size, &state, kind);
                    }

                    if state.mode == Mode::Details {
                        render_details_modal(frame, size, &state);
                    }

                    if state.mode == Mode::ConfirmDelete {
                        render_confirm_modal(frame, size, &state);
                    }
                })
                .map_err(|e| format!("Failed to draw terminal UI: {}", e))?;

            if event::poll(std::time::Duration::from_millis(200))
                .map_err(|e| format!("Failed to poll input: {}", e))?
            {
                let event = event::read().map_err(|e| format!("Failed to read input: {}", e))?;
                match event {
                    Event::Key(key) => {
                        if handle_key(store, &mut state, key) {
                            break;
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

fn handle_key(store: &mut BillStore, state: &mut DashboardState, key: KeyEvent) -> bool {
    // Many terminals emit both a Press and a Release event. Only act on Press/Repeat.
    if key.kind == KeyEventKind::Release {
        return false;
    }

    if state.mode == Mode::List {
        if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
            return true;
        }
    }

    match state.mode {
        Mode::List => match key.code {
            KeyCode::Up => state.move_selection(-1),
            KeyCode::Down => state.move_selection(1),
            KeyCode::PageUp => state.page_up(),
            KeyCode::PageDown => state.page_down(),
            KeyCode::Home => state.table_state.select(Some(0)),
            KeyCode::End => {
                if !state.sorted.is_empty() {
                    state
                        .table_state
                        .select(Some(state.sorted.len().saturating_sub(1)));
                }
            }
            KeyCode::Enter => state.open_details(),
            KeyCode::Char('p') => state.mark_selected_paid(store),
            KeyCode::Char('s') => state.cycle_selected_status(store),
            KeyCode::Char('n') => state.start_input(InputKind::Note),
            KeyCode::Char('a') => state.start_input(InputKind::AddBill),
            KeyCode::Char('e') => state.start_input(InputKind::EditBill),
            KeyCode::Char('x') | KeyCode::Delete => {
                if state.selected_bill().is_some() {
                    state.mode = Mode::ConfirmDelete;
                }
            }
            _ => {}
        },
        Mode::Details => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('b') => state.close_details(),
            _ => {}
        },
        Mode::ConfirmDelete => match key.code {
            KeyCode::Char('y') => state.delete_selected(store),
            KeyCode::Char('n') | KeyCode::Esc => state.mode = Mode::List,
            _ => {}
        },
        Mode::Input(kind) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            {
                state.cancel_input();
                return false;
            }

            match key.code {
                KeyCode::Esc => state.cancel_input(),
                KeyCode::Enter => state.commit_input(store, kind),
                KeyCode::Backspace => {
                    state.input_buffer.pop();
                }
                KeyCode::Char(ch) => {
                    state.input_buffer.push(ch);
                }
                _ => {}
            }
        }
    }

    false
}

fn render_stat_cards(frame: &mut ratatui::Frame, area: Rect, state: &DashboardState) {
    let stats = compute_stats(&state.sorted);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_stat_card(
        frame,
        cards[0],
        &format!("${:.2}", stats.total_monthly),
        "Total Monthly Bills",
        Color::Cyan,
    );
    render_stat_card(
        frame,
        cards[1],
        &stats.due_soon.to_string(),
        "Bills Due Soon",
        Color::Yellow,
    );
    render_stat_card(
        frame,
        cards[2],
        &stats.paid_this_month.to_string(),
        "Paid This Month",
        Color::Green,
    );
}

fn render_stat_card(
    frame: &mut ratatui::Frame,
    area: Rect,
    value: &str,
    caption: &str,
    color: Color,
) {
    let lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(
            caption.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center),
        area,
    );
}

fn render_table(frame: &mut ratatui::Frame, area: Rect, state: &mut DashboardState) {
    let block = Block::default().title("Your Bills").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new([
        Cell::from("Id").style(Style::default().bold()),
        Cell::from("Name").style(Style::default().bold()),
        Cell::from("Category").style(Style::default().bold()),
        Cell::from("Due").style(Style::default().bold()),
        Cell::from("Amount").style(Style::default().bold()),
        Cell::from("Status").style(Style::default().bold()),
    ])
    .style(Style::default().fg(Color::White));

    let rows = state.sorted.iter().map(|bill| {
        Row::new([
            Cell::from(bill.id.to_string()),
            Cell::from(display_name(&bill.name)),
            Cell::from(bill.category.clone()),
            Cell::from(bill.due_date.format("%Y-%m-%d").to_string()),
            Cell::from(format!("${}", bill.amount)),
            Cell::from(bill.status.badge())
                .style(Style::default().fg(status_color(bill.status)).bold()),
        ])
    });

    // Estimate a page size based on the table height.
    // Leave room for the header row.
    state.last_page_size = inner.height.saturating_sub(2) as usize;
    if state.last_page_size == 0 {
        state.last_page_size = 1;
    }

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(35),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
        .highlight_symbol("➤ ")
        .column_spacing(1);

    frame.render_stateful_widget(table, inner, &mut state.table_state);

    if state.sorted.is_empty() {
        let empty = Paragraph::new("No bills yet. Press 'a' to add your first bill")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
    }
}

fn render_footer(frame: &mut ratatui::Frame, area: Rect, state: &DashboardState) {
    let hint = match state.mode {
        Mode::List => {
            "↑/↓ move  Enter details  p paid  s status  n note  a add  e edit  x delete  q/Esc exit"
        }
        Mode::Details => "Esc/q/b back",
        Mode::ConfirmDelete => "y delete  n/Esc cancel",
        Mode::Input(_) => "Type, Enter apply, Esc cancel",
    };

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(hint)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_input_modal(
    frame: &mut ratatui::Frame,
    area: Rect,
    state: &DashboardState,
    kind: InputKind,
) {
    let popup_area = centered_rect(80, 30, area);
    frame.render_widget(Clear, popup_area);

    let title = match kind {
        InputKind::AddBill => "Add Bill",
        InputKind::EditBill => "Edit Bill",
        InputKind::Note => "Edit Note",
    };

    let help = match kind {
        InputKind::AddBill | InputKind::EditBill => {
            "name, amount, due date(YYYY-MM-DD), category[, status][, note]"
        }
        InputKind::Note => "Enter note text (empty clears)",
    };

    let mut lines = vec![
        Line::from(vec![Span::styled(title, Style::default().bold())]),
        Line::from(help),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("> {}", state.input_buffer),
            Style::default().fg(Color::Yellow),
        )]),
    ];

    if let Some(ref err) = state.input_error {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )]));
    }

    let block = Block::default().borders(Borders::ALL).title("Input");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}

fn render_details_modal(frame: &mut ratatui::Frame, area: Rect, state: &DashboardState) {
    let popup_area = centered_rect(90, 60, area);
    frame.render_widget(Clear, popup_area);

    let bill = match state.details_bill.as_ref() {
        Some(bill) => bill,
        None => {
            frame.render_widget(
                Paragraph::new("No selection")
                    .block(Block::default().borders(Borders::ALL).title("Details"))
                    .alignment(Alignment::Center),
                popup_area,
            );
            return;
        }
    };

    let lines = vec![
        Line::from(vec![Span::styled(
            "Bill Details",
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from(""),
        Line::from(format!("Id: {}", bill.id)),
        Line::from(format!("Name: {}", bill.name)),
        Line::from(format!("Category: {}", bill.category)),
        Line::from(format!("Due: {}", bill.due_date.format("%Y-%m-%d"))),
        Line::from(format!("Amount: ${}", bill.amount)),
        Line::from(vec![
            Span::raw("Status: "),
            Span::styled(
                bill.status.badge(),
                Style::default().fg(status_color(bill.status)).bold(),
            ),
        ]),
        Line::from(""),
        Line::from("Note:"),
        Line::from(if bill.note.is_empty() {
            "(none)".to_string()
        } else {
            bill.note.clone()
        }),
        Line::from(""),
        Line::from(Span::styled(
            "Esc/q/b to go back",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL).title("Details");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}

fn render_confirm_modal(frame: &mut ratatui::Frame, area: Rect, state: &DashboardState) {
    let popup_area = centered_rect(60, 20, area);
    frame.render_widget(Clear, popup_area);

    let text = match state.selected_bill() {
        Some(bill) => format!("Delete '{}' (id {})? This cannot be undone.", bill.name, bill.id),
        None => "Nothing selected".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(text, Style::default().bold())),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Red).bold()),
            Span::raw(" delete   "),
            Span::styled("n", Style::default().fg(Color::Green).bold()),
            Span::raw(" cancel"),
        ]),
    ];

    let block = Block::default().borders(Borders::ALL).title("Confirm");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}

// Shorten long names for the table column. Counts chars, not bytes, so
// multibyte names never split mid-character.
fn display_name(name: &str) -> String {
    if name.chars().count() > 32 {
        let mut short: String = name.chars().take(29).collect();
        short.push_str("...");
        short
    } else {
        name.to_string()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::sample_bills;

    #[test]
    fn test_state_sorts_bills_by_priority() {
        let store = BillStore::with_bills(sample_bills());
        let state = DashboardState::new(&store);

        let statuses: Vec<BillStatus> = state.sorted.iter().map(|b| b.status).collect();
        assert_eq!(
            statuses,
            vec![
                BillStatus::Overdue,
                BillStatus::Due,
                BillStatus::Due,
                BillStatus::Upcoming,
                BillStatus::Upcoming,
                BillStatus::Paid,
            ]
        );
        assert_eq!(state.table_state.selected(), Some(0));
    }

    #[test]
    fn test_mark_selected_paid_updates_store_and_order() {
        let mut store = BillStore::with_bills(sample_bills());
        let mut state = DashboardState::new(&store);

        // Selection starts on the overdue car insurance (id 6).
        state.mark_selected_paid(&mut store);

        assert_eq!(store.get(6).unwrap().status, BillStatus::Paid);
        assert_eq!(state.sorted.last().unwrap().id, 6);
    }

    #[test]
    fn test_delete_selected_shrinks_store() {
        let mut store = BillStore::with_bills(sample_bills());
        let mut state = DashboardState::new(&store);

        state.delete_selected(&mut store);

        assert_eq!(store.len(), 5);
        assert!(store.get(6).is_none());
        assert_eq!(state.sorted.len(), 5);
    }

    #[test]
    fn test_commit_note_input_updates_only_note() {
        let mut store = BillStore::with_bills(sample_bills());
        let mut state = DashboardState::new(&store);

        state.start_input(InputKind::Note);
        assert_eq!(state.input_buffer, "Need to pay ASAP!");

        state.input_buffer = "Paid by phone".to_string();
        state.commit_input(&mut store, InputKind::Note);

        let bill = store.get(6).unwrap();
        assert_eq!(bill.note, "Paid by phone");
        assert_eq!(bill.status, BillStatus::Overdue);
    }

    #[test]
    fn test_commit_add_input_with_bad_amount_keeps_modal_open() {
        let mut store = BillStore::new();
        let mut state = DashboardState::new(&store);

        state.start_input(InputKind::AddBill);
        state.input_buffer = "Netflix, abc, 2024-08-27, Streaming".to_string();
        state.commit_input(&mut store, InputKind::AddBill);

        assert!(state.input_error.is_some());
        assert_eq!(state.mode, Mode::Input(InputKind::AddBill));
        assert!(store.is_empty());
    }

    #[test]
    fn test_display_name_truncates_multibyte_names() {
        let accented = "é".repeat(40);
        let shortened = display_name(&accented);
        assert_eq!(shortened.chars().count(), 32);
        assert!(shortened.ends_with("..."));

        let emoji = format!("💡{}", "x".repeat(40));
        assert!(display_name(&emoji).ends_with("..."));

        assert_eq!(display_name("Netflix"), "Netflix");
    }

    #[test]
    fn test_cycle_status_walks_the_lifecycle() {
        let mut store = BillStore::with_bills(sample_bills());
        let mut state = DashboardState::new(&store);

        // Overdue -> Due for the selected car insurance.
        state.cycle_selected_status(&mut store);
        assert_eq!(store.get(6).unwrap().status, BillStatus::Due);
    }
}

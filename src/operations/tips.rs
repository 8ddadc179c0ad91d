use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use std::io;

const SAVING_TIPS: [&str; 8] = [
    "Set up automatic transfers to savings accounts",
    "Use the 50/30/20 budgeting rule",
    "Cancel unused subscriptions regularly",
    "Buy generic brands for everyday items",
    "Meal prep to reduce food expenses",
    "Use cashback credit cards responsibly",
    "Compare insurance rates annually",
    "Negotiate bills and subscriptions",
];

struct InvestmentOption {
    name: &'static str,
    risk: &'static str,
    expected_return: &'static str,
    description: &'static str,
}

const INVESTMENT_OPTIONS: [InvestmentOption; 5] = [
    InvestmentOption {
        name: "High-Yield Savings",
        risk: "Low",
        expected_return: "2-4%",
        description: "Safe option for emergency funds",
    },
    InvestmentOption {
        name: "Index Funds",
        risk: "Medium",
        expected_return: "7-10%",
        description: "Diversified stock market exposure",
    },
    InvestmentOption {
        name: "Real Estate",
        risk: "Medium-High",
        expected_return: "8-12%",
        description: "Property investment opportunities",
    },
    InvestmentOption {
        name: "Bonds",
        risk: "Low-Medium",
        expected_return: "3-6%",
        description: "Fixed income investments",
    },
    InvestmentOption {
        name: "Crypto",
        risk: "High",
        expected_return: "Variable",
        description: "High-risk, high-reward digital assets",
    },
];

fn risk_color(risk: &str) -> Color {
    match risk {
        "Low" => Color::Green,
        "Low-Medium" | "Medium" => Color::Yellow,
        _ => Color::Red,
    }
}

pub fn run_tips() -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Failed to enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Failed to enter alternate screen: {}", e))?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| format!("Failed to initialize terminal: {}", e))?;

        loop {
            terminal
                .draw(|frame| {
                    let size = frame.area();
                    let layout = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                        .split(size);

                    render_saving_tips(frame, layout[0]);
                    render_investment_options(frame, layout[1]);
                })
                .map_err(|e| format!("Failed to draw terminal UI: {}", e))?;

            if event::poll(std::time::Duration::from_millis(250))
                .map_err(|e| format!("Failed to poll input: {}", e))?
            {
                match event::read().map_err(|e| format!("Failed to read input: {}", e))? {
                    Event::Key(key) if key.code == KeyCode::Char('q') => break,
                    Event::Key(key) if key.code == KeyCode::Esc => break,
                    Event::Resize(_, _) => continue,
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

fn render_saving_tips(frame: &mut ratatui::Frame, area: Rect) {
    let block = Block::default()
        .title("Money Saving Tips  (press q to exit)")
        .borders(Borders::ALL);

    let mut lines = vec![Line::from("")];
    for tip in SAVING_TIPS {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(Color::Cyan)),
            Span::raw(tip),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_investment_options(frame: &mut ratatui::Frame, area: Rect) {
    let block = Block::default()
        .title("Investment Options")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new([
        Cell::from("Name").style(Style::default().bold()),
        Cell::from("Risk").style(Style::default().bold()),
        Cell::from("Return").style(Style::default().bold()),
        Cell::from("Description").style(Style::default().bold()),
    ])
    .style(Style::default().fg(Color::White));

    let rows = INVESTMENT_OPTIONS.iter().map(|option| {
        Row::new([
            Cell::from(option.name),
            Cell::from(option.risk).style(Style::default().fg(risk_color(option.risk)).bold()),
            Cell::from(option.expected_return),
            Cell::from(option.description),
        ])
    });

    let widths = [
        Constraint::Length(20),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths).header(header).column_spacing(1);
    frame.render_widget(table, inner);
}

pub mod add_view;
pub mod app;
pub mod form;
pub mod list_view;
pub mod report_view;
pub mod widgets;

use crate::db::store::ExpenseStore;
use crate::error::AppError;
use app::{App, Tab};
use chrono::Local;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Frame,
    prelude::{Color, Constraint, Direction, Layout, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
};
use std::io;
use std::time::Duration;

fn terminal_error(what: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Terminal(format!("{}: {}", what, e))
}

/// Take over the terminal and run the expense tracker until the user quits.
/// The terminal is restored even when the loop fails.
pub fn run<S: ExpenseStore>(store: S) -> Result<(), AppError> {
    enable_raw_mode().map_err(|e| terminal_error("Failed to enable raw mode", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| terminal_error("Failed to enter alternate screen", e))?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| terminal_error("Failed to initialize terminal", e))?;

        let mut app = App::new(store, Local::now().date_naive());
        info!("Expense tracker started");

        while !app.should_quit {
            terminal
                .draw(|frame| draw(frame, &mut app))
                .map_err(|e| terminal_error("Failed to draw terminal UI", e))?;

            if event::poll(Duration::from_millis(200))
                .map_err(|e| terminal_error("Failed to poll input", e))?
            {
                let event = event::read().map_err(|e| terminal_error("Failed to read input", e))?;
                if let Event::Key(key) = event {
                    app.handle_key(key);
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode().map_err(|e| terminal_error("Failed to disable raw mode", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)
        .map_err(|e| terminal_error("Failed to leave alternate screen", e))?;

    result
}

fn draw<S: ExpenseStore>(frame: &mut Frame, app: &mut App<S>) {
    let size = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(size);

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title("Expense Tracker")
                .borders(Borders::ALL),
        )
        .select(app.tab.index())
        .highlight_style(widgets::HEADER_STYLE.fg(Color::Black).bg(Color::Cyan))
        .style(Style::default());
    frame.render_widget(tabs, layout[0]);

    match app.tab {
        Tab::Add => add_view::render(frame, layout[1], &app.add_form),
        Tab::List => list_view::render(frame, layout[1], app),
        Tab::Reports => report_view::render(frame, layout[1], app),
    }

    if let Some(message) = &app.message {
        widgets::render_message(frame, size, message);
    }
}

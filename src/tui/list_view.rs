use super::add_view::render_form;
use super::app::{App, Dialog, MenuItem};
use super::widgets::{BOLD, HEADER_STYLE, HINT_STYLE, centered_rect, period_selector, render_hints};
use crate::db::store::ExpenseStore;
use crate::fmt::money;
use ratatui::{
    Frame,
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub fn render<S: ExpenseStore>(frame: &mut Frame, area: Rect, app: &mut App<S>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    render_filter(frame, layout[0], app);
    render_table(frame, layout[1], app);
    render_total(frame, layout[2], app);
    render_hints(
        frame,
        layout[3],
        "←/→ month  -/+ year  f filter  ↑/↓ move  Enter/m actions  e edit  d delete  Tab next tab  q quit",
    );

    match &app.dialog {
        Some(Dialog::ContextMenu { selected }) => render_context_menu(frame, area, *selected),
        Some(Dialog::Edit { id, state }) => {
            let popup_area = centered_rect(70, 80, area);
            frame.render_widget(Clear, popup_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!("Edit Expense #{}  (Ctrl+S save, Esc cancel)", id));
            let inner = block.inner(popup_area);
            frame.render_widget(block, popup_area);
            render_form(frame, inner, state);
        }
        Some(Dialog::ConfirmDelete { id }) => render_confirm_delete(frame, area, *id),
        None => {}
    }
}

fn render_filter<S: ExpenseStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let mut spans = period_selector(app.session.list_period).spans;
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Showing: {}", app.session.listing.period),
        HEADER_STYLE,
    ));
    if let Some(ref err) = app.session.load_error {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("Failed to load expenses: {}", err),
            Style::default().fg(Color::Red),
        ));
    }

    let block = Block::default().title("Filter Expenses").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_table<S: ExpenseStore>(frame: &mut Frame, area: Rect, app: &mut App<S>) {
    let block = Block::default().title("Expenses").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new([
        Cell::from("ID").style(BOLD),
        Cell::from("Date").style(BOLD),
        Cell::from("Category").style(BOLD),
        Cell::from("Amount").style(BOLD),
        Cell::from("Description").style(BOLD),
    ])
    .style(Style::default().fg(Color::White));

    let rows = app.session.listing.transactions.iter().map(|tx| {
        // Multi-line descriptions are flattened to one row.
        let mut desc = tx
            .description
            .as_deref()
            .unwrap_or("")
            .replace('\n', " ");
        if desc.chars().count() > 60 {
            desc = desc.chars().take(57).collect();
            desc.push_str("...");
        }

        Row::new([
            Cell::from(tx.id.to_string()),
            Cell::from(tx.date.format("%Y-%m-%d").to_string()),
            Cell::from(tx.category.clone()),
            Cell::from(Line::from(money(tx.amount)).alignment(Alignment::Right)),
            Cell::from(desc),
        ])
    });

    // Leave room for the header row.
    app.last_page_size = inner.height.saturating_sub(2).max(1) as usize;

    let widths = [
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("➤ ")
        .column_spacing(1);

    frame.render_stateful_widget(table, inner, &mut app.table_state);

    if app.session.listing.transactions.is_empty() {
        let empty = Paragraph::new("No expenses for this month")
            .alignment(Alignment::Center)
            .style(HINT_STYLE);
        frame.render_widget(empty, inner);
    }
}

fn render_total<S: ExpenseStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let line = Line::from(vec![
        Span::styled("Total Expenses: ", BOLD),
        Span::styled(money(app.session.listing.total), BOLD.fg(Color::Green)),
        Span::raw(format!(
            "   ({} rows)",
            app.session.listing.transactions.len()
        )),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_context_menu(frame: &mut Frame, area: Rect, selected: usize) {
    let popup_area = centered_rect(30, 25, area);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            if idx == selected {
                Line::from(Span::styled(
                    format!("➤ {}", item.label()),
                    BOLD.bg(Color::DarkGray),
                ))
            } else {
                Line::from(format!("  {}", item.label()))
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Actions")),
        popup_area,
    );
}

fn render_confirm_delete(frame: &mut Frame, area: Rect, id: i64) {
    let popup_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(format!("Are you sure you want to delete expense #{}?", id)),
        Line::from(""),
        Line::from(Span::styled("y=confirm  n=cancel", HINT_STYLE)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm Delete")
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}

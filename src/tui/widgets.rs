use super::app::{Message, MessageKind};
use crate::models::period::Period;
use ratatui::{
    Frame,
    prelude::{Alignment, Color, Constraint, Direction, Layout, Modifier, Rect, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
pub const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);
pub const BOLD: Style = Style::new().add_modifier(Modifier::BOLD);

/// `Month: < March >  Year: < 2024 >` selector line.
pub fn period_selector(period: Period) -> Line<'static> {
    Line::from(vec![
        Span::raw("Month: "),
        Span::styled(
            format!("< {:<9} >", period.month_name()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("   Year: "),
        Span::styled(
            format!("- {} +", period.year()),
            Style::default().fg(Color::Yellow),
        ),
    ])
}

pub fn render_hints(frame: &mut Frame, area: Rect, hint: &str) {
    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(hint)
            .style(HINT_STYLE)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_message(frame: &mut Frame, area: Rect, message: &Message) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let color = match message.kind {
        MessageKind::Info => Color::Cyan,
        MessageKind::Error => Color::Red,
    };

    let mut lines: Vec<Line> = message.body.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Enter/Esc to close", HINT_STYLE)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            message.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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

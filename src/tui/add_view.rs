use super::form::{Field, FormState};
use super::widgets::{BOLD, HINT_STYLE, render_hints};
use crate::models::transaction::SUGGESTED_CATEGORIES;
use ratatui::{
    Frame,
    prelude::{Color, Constraint, Direction, Layout, Rect, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect, state: &FormState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(area);

    let block = Block::default().title("Add New Expense").borders(Borders::ALL);
    let inner = block.inner(layout[0]);
    frame.render_widget(block, layout[0]);
    render_form(frame, inner, state);

    render_hints(
        frame,
        layout[1],
        "↑/↓ field  ←/→ category suggestions  Ctrl+S add expense  Ctrl+X clear form  Tab next tab  Ctrl+Q quit",
    );
}

/// Draw the four form fields. Shared with the edit dialog.
pub fn render_form(frame: &mut Frame, area: Rect, state: &FormState) {
    let mut lines = Vec::new();
    for field in Field::ALL {
        let focused = state.focus == field;
        let label_style = if focused {
            BOLD.fg(Color::Yellow)
        } else {
            BOLD
        };
        let marker = if focused { "➤ " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{}:", marker, field.label()),
            label_style,
        )));

        let value = state.value(field);
        let cursor = if focused { "_" } else { "" };
        if field == Field::Description {
            let mut value_lines: Vec<&str> = value.split('\n').collect();
            if value_lines.is_empty() {
                value_lines.push("");
            }
            let last = value_lines.len() - 1;
            for (idx, text) in value_lines.iter().enumerate() {
                let suffix = if idx == last { cursor } else { "" };
                lines.push(Line::from(format!("    {}{}", text, suffix)));
            }
        } else {
            lines.push(Line::from(format!("    {}{}", value, cursor)));
        }

        if field == Field::Category && focused {
            lines.push(Line::from(Span::styled(
                format!("    suggestions: {}", SUGGESTED_CATEGORIES.join(", ")),
                HINT_STYLE,
            )));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default())
            .wrap(Wrap { trim: false }),
        area,
    );
}

use super::app::App;
use super::widgets::{BOLD, HINT_STYLE, period_selector, render_hints};
use crate::db::store::ExpenseStore;
use crate::fmt::money;
use crate::operations::report::ReportData;
use ratatui::{
    Frame,
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Points},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::prelude::ToPrimitive;

const PALETTE: [Color; 11] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightMagenta,
    Color::LightYellow,
    Color::LightGreen,
    Color::LightBlue,
];

/// Slice `idx` gets the same color in both charts and the legend.
fn slice_color(idx: usize) -> Color {
    PALETTE[idx % PALETTE.len()]
}

pub fn render<S: ExpenseStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    let options = Block::default().title("Report Options").borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(period_selector(app.session.report_period)).block(options),
        layout[0],
    );

    match &app.report {
        Some(data) => render_charts(frame, layout[1], data),
        None => {
            let block = Block::default().borders(Borders::ALL);
            frame.render_widget(
                Paragraph::new("Choose a month and press g to generate a report")
                    .style(HINT_STYLE)
                    .alignment(Alignment::Center)
                    .block(block),
                layout[1],
            );
        }
    }

    render_hints(
        frame,
        layout[2],
        "←/→ month  -/+ year  g generate report  Tab next tab  q quit",
    );
}

fn render_charts(frame: &mut Frame, area: Rect, data: &ReportData) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let pie_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(data.slices.len() as u16 + 2)])
        .split(halves[0]);

    render_pie_chart(frame, pie_area[0], data);
    render_legend(frame, pie_area[1], data);
    render_bar_chart(frame, halves[1], data);
}

fn render_pie_chart(frame: &mut Frame, area: Rect, data: &ReportData) {
    let block = Block::default()
        .title(format!("Expense Distribution - {}", data.period))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut slices = Vec::new();
    // Start at twelve o'clock and run counter-clockwise.
    let mut start_angle = std::f64::consts::FRAC_PI_2;
    for slice in &data.slices {
        let sweep = slice.share / 100.0 * std::f64::consts::TAU;
        slices.push((start_angle, start_angle + sweep));
        start_angle += sweep;
    }

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            let step = 0.04;
            for (idx, (start, end)) in slices.iter().enumerate() {
                let mut points = Vec::new();
                let mut r = 0.0; // radius 0 center ... 1 edge
                while r <= 1.0 {
                    let mut angle = *start;
                    while angle <= *end {
                        points.push((r * angle.cos(), r * angle.sin()));
                        angle += 0.02;
                    }
                    r += step;
                }
                if !points.is_empty() {
                    ctx.draw(&Points {
                        coords: &points,
                        color: slice_color(idx),
                    });
                }
            }
        });

    frame.render_widget(canvas, inner);
}

fn render_legend(frame: &mut Frame, area: Rect, data: &ReportData) {
    let block = Block::default()
        .title(format!("Category Share (total {})", money(data.total)))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = data
        .slices
        .iter()
        .enumerate()
        .map(|(idx, slice)| {
            let style = Style::default().fg(slice_color(idx));
            Line::from(vec![
                Span::styled("■ ", style),
                Span::styled(format!("{:15}", slice.category), style),
                Span::raw(format!("{:>6.1}%", slice.share)),
                Span::raw(format!("{:>14}", money(slice.total))),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_bar_chart(frame: &mut Frame, area: Rect, data: &ReportData) {
    let block = Block::default()
        .title(format!("Expenses by Category - {}", data.period))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Amount ($)", BOLD),
            Span::raw(format!("   max {}", money(max_total(data)))),
        ])),
        layout[0],
    );

    let chart_area = layout[1];
    let bar_height = chart_area.height as usize;
    let bucket_width = std::cmp::max(2, chart_area.width as usize / data.slices.len().max(1));
    let bar_width = bucket_width.saturating_sub(1).max(1);
    let heights = bar_heights(data, bar_height);

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..bar_height {
        let level = bar_height - row;
        let spans: Vec<Span> = heights
            .iter()
            .enumerate()
            .map(|(idx, height)| {
                if level <= *height {
                    Span::styled(
                        format!("{} ", "█".repeat(bar_width)),
                        Style::default().fg(slice_color(idx)),
                    )
                } else {
                    Span::raw(" ".repeat(bucket_width))
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), chart_area);

    let labels: Vec<Span> = data
        .slices
        .iter()
        .enumerate()
        .map(|(idx, slice)| {
            let label: String = slice.category.chars().take(bar_width).collect();
            Span::styled(
                format!("{:width$}", label, width = bucket_width),
                Style::default().fg(slice_color(idx)),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(labels)), layout[2]);
}

fn max_total(data: &ReportData) -> rust_decimal::Decimal {
    data.slices
        .iter()
        .map(|s| s.total)
        .max()
        .unwrap_or_default()
}

/// Bar height in rows for each slice, scaled so the largest fills `rows`.
/// Any non-zero total gets at least one row.
fn bar_heights(data: &ReportData, rows: usize) -> Vec<usize> {
    let max = max_total(data).to_f64().unwrap_or(0.0);
    data.slices
        .iter()
        .map(|slice| {
            let value = slice.total.to_f64().unwrap_or(0.0);
            if max <= 0.0 || value <= 0.0 {
                0
            } else {
                ((value / max * rows as f64).round() as usize).clamp(1, rows)
            }
        })
        .collect()
}

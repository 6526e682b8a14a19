//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! The layout is a three-row split: the item cards, an optional advisory
//! line (only while the fallback dataset is shown), and a one-line status
//! bar.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, RunState};
use crate::fallback::ADVISORY_NOTE;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let advisory = app.panel.as_ref().is_some_and(|p| p.advisory);
    let [main_area, note_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::from(advisory)),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_items(app, frame, main_area);
    if advisory {
        draw_advisory(frame, note_area);
    }
    draw_status_bar(app, frame, status_area);
}

/// Render each item as a card: bold title, then one line per content line.
fn draw_items(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .panel
        .iter()
        .flat_map(|panel| panel.items.iter())
        .map(|item| {
            let mut lines = vec![Line::from(Span::styled(
                item.title(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))];
            lines.extend(item.lines().map(|line| {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(line, Style::default().fg(Color::Gray)),
                ])
            }));
            lines.push(Line::default());
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(list_items)
        .block(Block::default().title(" Live Data ").borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_advisory(frame: &mut Frame, area: Rect) {
    let note = Paragraph::new(Line::from(Span::styled(
        ADVISORY_NOTE,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(note, area);
}

fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let (state, colour) = match app.state {
        RunState::Idle => ("idle", Color::DarkGray),
        RunState::Fetching => ("fetching", Color::Yellow),
        RunState::Rendered => ("live", Color::Green),
        RunState::FallbackRendered => ("demo", Color::Magenta),
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("[{state}]"), Style::default().fg(colour)),
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} items", app.item_count()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  q: quit  r: refresh  ↑/↓: scroll"),
    ]));
    frame.render_widget(status, area);
}

//! Layout components (content area, status bar)

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the form is drawn, in columns
const MAX_FORM_WIDTH: u16 = 64;

/// Split the screen into a centered content column and a status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let width = rows[0].width.min(MAX_FORM_WIDTH);
    let content = Rect {
        x: rows[0].x + (rows[0].width - width) / 2,
        width,
        ..rows[0]
    };
    (content, rows[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Submission gate
    let gate = if app.state.can_submit() {
        Span::styled(" ● ready ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ incomplete ", Style::default().fg(Color::Red))
    };
    spans.push(gate);

    if let Some(account) = &app.state.current_account {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(account, Style::default().fg(Color::Blue)));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

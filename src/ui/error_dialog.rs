//! Modal error dialog drawn over the form

use crate::state::AppState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const DIALOG_WIDTH: u16 = 60;

/// Dialog rectangle centered in `area`, sized to fit the wrapped message
fn dialog_area(area: Rect, message: &str, max_width: u16) -> Rect {
    let width = max_width.min(area.width);
    let inner_width = width.saturating_sub(4).max(1) as usize;
    let message_rows: usize = message
        .split('\n')
        .map(|line| line.chars().count().max(1).div_ceil(inner_width))
        .sum();
    // borders + title + blank + message + blank + hint
    let height = u16::try_from(message_rows)
        .unwrap_or(u16::MAX)
        .saturating_add(6)
        .min(area.height);

    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Title naming the position in the queue once more than one error waits
fn dialog_title(queued: usize) -> String {
    if queued > 1 {
        format!("Error (1 of {queued})")
    } else {
        "Error".to_string()
    }
}

/// Draw the oldest queued error, if any
pub fn draw_error_dialog(frame: &mut Frame, state: &AppState) {
    let Some(message) = state.current_error() else {
        return;
    };
    let area = dialog_area(frame.area(), message, DIALOG_WIDTH);
    frame.render_widget(Clear, area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut content = vec![
        Line::from(Span::styled(
            dialog_title(state.error_count()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(message.split('\n').map(Line::from));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("Enter", key_style),
        Span::raw("/"),
        Span::styled("Esc", key_style),
        Span::raw(" to dismiss"),
    ]));

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().bg(Color::Black));
    frame.render_widget(dialog, area);
}

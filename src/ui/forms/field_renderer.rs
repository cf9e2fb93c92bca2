//! Field rendering utilities for forms

use crate::state::{FieldSpec, FieldState};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus a message line
pub const FIELD_HEIGHT: u16 = 4;

/// Border color for a field: focus wins, then validity once something is typed
fn border_color(state: &FieldState, is_active: bool) -> Color {
    if is_active {
        Color::Cyan
    } else if state.value.is_empty() {
        Color::DarkGray
    } else if state.is_valid {
        Color::Green
    } else {
        Color::Red
    }
}

/// Draw a form field with its validation message below it
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    state: &FieldState,
    is_active: bool,
    note: Option<Span<'_>>,
) {
    let input_area = Rect {
        height: area.height.min(3),
        ..area
    };
    let message_area = Rect {
        y: area.y + input_area.height,
        height: area.height.saturating_sub(input_area.height),
        ..area
    };

    let display_value = spec.display_value(&state.value);
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", spec.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(state, is_active)));

    frame.render_widget(content.block(block), input_area);

    let message = note.or_else(|| {
        spec.visible_error(state)
            .map(|msg| Span::styled(format!(" {msg}"), Style::default().fg(Color::Red)))
    });
    if let Some(message) = message {
        frame.render_widget(Paragraph::new(Line::from(message)), message_area);
    }
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, items: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (i, (key, desc)) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {desc}")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

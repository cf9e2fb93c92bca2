//! Sign-up and change-password forms

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::{CHECK_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{AppState, FormKind, EMAIL};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Submit row height (borders + label)
const SUBMIT_HEIGHT: u16 = 3;

/// Draw the form for the current page
pub fn draw_account_form(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let fields = state.fields();

    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(SUBMIT_HEIGHT)); // Submit
    constraints.push(Constraint::Min(0)); // Spacer
    constraints.push(Constraint::Length(1)); // Help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(format!(" {} ", state.form_kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let form_state = state.form.state();
    for (idx, spec) in fields.iter().enumerate() {
        let Some(field_state) = form_state.get(spec.name) else {
            continue;
        };
        let note = if spec.name == EMAIL {
            email_note(app)
        } else {
            None
        };
        draw_field(
            frame,
            chunks[idx],
            spec,
            field_state,
            state.active_field == idx,
            note,
        );
    }

    draw_submit(frame, chunks[fields.len()], state);

    let mut help = vec![("Tab", "next field"), (SUBMIT_SHORTCUT, "submit")];
    if state.form_kind == FormKind::Register {
        help.push((CHECK_SHORTCUT, "check email"));
    }
    help.push(("F2", "switch form"));
    help.push(("Esc", "quit"));
    draw_help_text(frame, chunks[fields.len() + 2], &help);
}

/// Submit row: the label, plus what still blocks submission
fn draw_submit(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.is_submit_focused();
    let blocker = state.submit_blocker();

    let label_style = match (blocker, focused) {
        (Some(_), _) => Style::default().fg(Color::DarkGray),
        (None, true) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (None, false) => Style::default().fg(Color::Green),
    };
    let mut spans = vec![Span::styled(
        format!(" {} ", state.form_kind.submit_label()),
        label_style,
    )];
    if let Some(reason) = blocker {
        spans.push(Span::styled(
            format!("· {reason}"),
            Style::default().fg(Color::Yellow),
        ));
    }

    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Message line under the email field: the duplicate result if one is
/// shown, else a hint when the check is available
fn email_note(app: &App) -> Option<Span<'static>> {
    let state = &app.state;
    if let Some(result) = state.duplicate.result() {
        let color = if result.is_duplicate {
            Color::Red
        } else {
            Color::Green
        };
        return Some(Span::styled(
            format!(" {}", result.message),
            Style::default().fg(color),
        ));
    }
    if state.can_check_duplicate() {
        return Some(Span::styled(
            format!(" {CHECK_SHORTCUT}: check for duplicates"),
            Style::default().fg(Color::Yellow),
        ));
    }
    None
}

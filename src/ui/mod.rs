//! UI module for rendering the TUI

mod error_dialog;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (content_area, status_area) = layout::create_layout(frame.area());

    forms::draw_account_form(frame, content_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Error dialog renders on top of everything
    error_dialog::draw_error_dialog(frame, &app.state);
}

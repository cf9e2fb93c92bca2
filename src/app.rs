//! Application state and core logic

use crate::config::FormgateConfig;
use crate::service::{AccountService, Registration};
use crate::state::{
    AppState, DuplicateCheck, FormKind, TextEdit, EMAIL, PASSWORD, USERNAME,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Account collaborator that performs submissions
    pub service: Box<dyn AccountService>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance and fetch the existing accounts once
    pub async fn new(service: Box<dyn AccountService>, config: &FormgateConfig) -> Result<Self> {
        let state = AppState::new(config.start_form(), config.password_policy())?;
        let mut app = Self {
            state,
            service,
            quit: false,
            status_message: None,
        };
        app.refresh_existing_accounts().await;
        Ok(app)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Reload the identifiers the duplicate check compares against
    async fn refresh_existing_accounts(&mut self) {
        match self.service.list_users().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "loaded existing accounts");
                self.state.duplicate = DuplicateCheck::from_users(&users);
            }
            Err(e) => self.push_error(format!("Failed to load accounts: {e:#}")),
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        let on_submit = self.state.is_submit_focused();
        let action = key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(crate::platform::ACTION_MODIFIER);

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_field(),
            KeyCode::F(2) => {
                let next = self.state.form_kind.toggle();
                self.state.switch_form(next)?;
            }
            KeyCode::Char('s') if action => self.submit().await,
            KeyCode::Char('d') if action => self.check_duplicate(),
            KeyCode::Char('u') if action => self.edit(TextEdit::Clear),
            KeyCode::Enter if on_submit => self.submit().await,
            KeyCode::Enter => self.state.next_field(),
            KeyCode::Char(c) if !action => self.edit(TextEdit::Insert(c)),
            KeyCode::Backspace => self.edit(TextEdit::Backspace),
            _ => {}
        }
        Ok(())
    }

    fn edit(&mut self, edit: TextEdit) {
        if let Err(e) = self.state.edit_active_field(edit) {
            self.push_error(e.to_string());
        }
    }

    fn check_duplicate(&mut self) {
        match self.state.check_duplicate() {
            Some(result) => self.status_message = Some(result.message),
            None => {
                if self.state.form_kind == FormKind::Register {
                    self.status_message = Some("Enter a valid email to check.".to_string());
                }
            }
        }
    }

    /// Submit the form if the gate allows it
    pub async fn submit(&mut self) {
        if let Some(blocker) = self.state.submit_blocker() {
            self.status_message = Some(blocker.to_string());
            return;
        }

        match self.state.form_kind {
            FormKind::Register => self.submit_registration().await,
            FormKind::UpdatePassword => self.submit_password_update().await,
        }
    }

    async fn submit_registration(&mut self) {
        let form = &self.state.form;
        let registration = Registration {
            email: form.value(EMAIL).to_string(),
            username: form.value(USERNAME).to_string(),
            password: form.value(PASSWORD).to_string(),
        };

        match self.service.register(registration).await {
            Ok(user) => {
                self.status_message = Some(format!("Welcome, {}!", user.username));
                self.state.current_account = Some(user.email);
                self.reset_form();
                self.refresh_existing_accounts().await;
            }
            Err(e) => self.push_error(format!("Failed to register: {e:#}")),
        }
    }

    async fn submit_password_update(&mut self) {
        let Some(email) = self.state.current_account.clone() else {
            self.push_error("No account signed in. Sign up first.");
            return;
        };
        let password = self.state.form.value(PASSWORD).to_string();
        match self.service.update_password(&email, &password).await {
            Ok(()) => {
                self.status_message = Some("Password changed.".to_string());
                self.reset_form();
            }
            Err(e) => self.push_error(format!("Failed to change password: {e:#}")),
        }
    }

    fn reset_form(&mut self) {
        if let Err(e) = self.state.reset_form() {
            self.push_error(e.to_string());
        }
    }
}

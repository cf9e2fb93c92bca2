//! Application state definitions

use super::duplicate::{DuplicateCheck, DuplicateResult};
use super::forms::{FieldChange, FieldSpec, Form, FormSnapshot, TextEdit};
use super::rules::{FormKind, PasswordPolicy, EMAIL};
use crate::error::FormError;
use std::collections::VecDeque;

/// Gate message while some field is invalid
pub const INCOMPLETE_MESSAGE: &str = "Complete every field first.";
/// Gate message while the sign-up email has not been cleared
pub const UNCHECKED_EMAIL_MESSAGE: &str = "Check the email for duplicates first.";

/// State of the page currently on screen
#[derive(Debug)]
pub struct AppState {
    pub form_kind: FormKind,
    pub form: Form,
    pub policy: PasswordPolicy,
    /// Focus index: one per field, then the submit button
    pub active_field: usize,
    /// Duplicate check for the sign-up email, owned apart from the form
    pub duplicate: DuplicateCheck,
    /// Account the password form applies to
    pub current_account: Option<String>,
    errors: VecDeque<String>,
}

impl AppState {
    pub fn new(form_kind: FormKind, policy: PasswordPolicy) -> Result<Self, FormError> {
        Ok(Self {
            form_kind,
            form: form_kind.build(policy)?,
            policy,
            active_field: 0,
            duplicate: DuplicateCheck::default(),
            current_account: None,
            errors: VecDeque::new(),
        })
    }

    /// Show another form, starting from empty values
    pub fn switch_form(&mut self, form_kind: FormKind) -> Result<(), FormError> {
        self.form_kind = form_kind;
        self.reset_form()
    }

    /// Rebuild the current form from empty values
    pub fn reset_form(&mut self) -> Result<(), FormError> {
        self.form = self.form_kind.build(self.policy)?;
        self.active_field = 0;
        self.duplicate.reset();
        Ok(())
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.form_kind.fields()
    }

    fn focus_count(&self) -> usize {
        self.fields().len() + 1
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % self.focus_count();
    }

    pub fn prev_field(&mut self) {
        if self.active_field == 0 {
            self.active_field = self.focus_count() - 1;
        } else {
            self.active_field -= 1;
        }
    }

    pub fn active_field_spec(&self) -> Option<&'static FieldSpec> {
        self.fields().get(self.active_field)
    }

    pub fn is_submit_focused(&self) -> bool {
        self.active_field == self.fields().len()
    }

    /// Single entry point for every input source.
    ///
    /// On the sign-up page a changed email also drops the shown duplicate
    /// result, since it was computed for the previous value.
    pub fn on_field_change(&mut self, change: FieldChange) -> Result<FormSnapshot, FormError> {
        let resets_duplicate =
            self.form_kind == FormKind::Register && change.field == EMAIL;
        let previous_email = self.form.value(EMAIL).to_string();

        let snapshot = self.form.on_field_change(change)?;

        if resets_duplicate && snapshot.value(EMAIL) != previous_email {
            self.duplicate.reset();
        }
        Ok(snapshot)
    }

    /// Keyboard adapter: apply an edit to the focused field
    pub fn edit_active_field(&mut self, edit: TextEdit) -> Result<(), FormError> {
        let Some(spec) = self.active_field_spec() else {
            return Ok(());
        };
        if let Some(change) = FieldChange::from_edit(spec.name, self.form.value(spec.name), edit) {
            self.on_field_change(change)?;
        }
        Ok(())
    }

    /// Submission gate: every field valid and, on sign-up, the email
    /// cleared by a duplicate check
    pub fn can_submit(&self) -> bool {
        self.submit_blocker().is_none()
    }

    /// Why the gate is closed, if it is
    pub fn submit_blocker(&self) -> Option<&'static str> {
        if !self.form.is_complete() {
            return Some(INCOMPLETE_MESSAGE);
        }
        if self.form_kind == FormKind::Register && self.duplicate.is_duplicate() {
            return Some(UNCHECKED_EMAIL_MESSAGE);
        }
        None
    }

    pub fn can_check_duplicate(&self) -> bool {
        self.form_kind == FormKind::Register && self.duplicate.can_check(self.form.is_valid(EMAIL))
    }

    /// Run the duplicate check on the current email if it is allowed now
    pub fn check_duplicate(&mut self) -> Option<DuplicateResult> {
        if !self.can_check_duplicate() {
            return None;
        }
        let email = self.form.value(EMAIL).to_string();
        Some(self.duplicate.check(&email))
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

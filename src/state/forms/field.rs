//! Form field value objects

use serde::{Deserialize, Serialize};

/// Identifier of a field, unique within one form
pub type FieldName = String;

/// Value and validity of a single field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldState {
    /// Raw, unnormalised user input
    pub value: String,
    pub is_valid: bool,
}

impl FieldState {
    pub fn new(value: impl Into<String>, is_valid: bool) -> Self {
        Self {
            value: value.into(),
            is_valid,
        }
    }
}

/// Presentation metadata for a field, owned by the page that lays it out
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    /// Render the value as `*` characters
    pub is_secret: bool,
    /// Shown below the field while it is non-empty and invalid
    pub error_message: Option<&'static str>,
}

impl FieldSpec {
    /// Create a plain text field
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            is_secret: false,
            error_message: None,
        }
    }

    /// Create a masked field
    pub const fn secret(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            is_secret: true,
            error_message: None,
        }
    }

    pub const fn with_error(mut self, message: &'static str) -> Self {
        self.error_message = Some(message);
        self
    }

    /// Get the display value for rendering
    pub fn display_value(&self, value: &str) -> String {
        if self.is_secret {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }

    /// Error text to show for the given field state, if any
    pub fn visible_error(&self, state: &FieldState) -> Option<&'static str> {
        if state.value.is_empty() || state.is_valid {
            None
        } else {
            self.error_message
        }
    }
}

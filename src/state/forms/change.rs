//! Change events fed into a form

use super::field::FieldName;

/// "Field X changed to raw string Y"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: FieldName,
    pub value: String,
}

impl FieldChange {
    pub fn new(field: impl Into<FieldName>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Translate a keyboard edit on `field` into the field's next value.
    ///
    /// Returns `None` when the edit would not change the value.
    pub fn from_edit(field: &str, current: &str, edit: TextEdit) -> Option<Self> {
        let next = match edit {
            TextEdit::Insert(c) => {
                let mut next = current.to_string();
                next.push(c);
                next
            }
            TextEdit::Backspace => {
                let mut chars = current.chars();
                chars.next_back()?;
                chars.as_str().to_string()
            }
            TextEdit::Clear if current.is_empty() => return None,
            TextEdit::Clear => String::new(),
        };
        Some(Self::new(field, next))
    }
}

/// Single-line text edits a terminal input source can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Clear,
}

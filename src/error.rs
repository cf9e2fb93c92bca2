//! Error types for the validation engine

use thiserror::Error;

/// Errors raised by form construction and `apply_change`.
///
/// A validator returning `false` is not an error: invalid input is ordinary
/// state, carried in the field's validity flag.
#[derive(Debug, Error)]
pub enum FormError {
    /// A field name outside the form's fixed field set was referenced.
    #[error("configuration error: unknown or misconfigured field `{field}`: {reason}")]
    Configuration { field: String, reason: &'static str },

    /// A validator failed to produce a result. The update was rejected.
    #[error("validator for field `{field}` failed")]
    Validator {
        field: String,
        #[source]
        source: anyhow::Error,
    },
}

impl FormError {
    pub(crate) fn unknown_field(field: &str) -> Self {
        FormError::Configuration {
            field: field.to_string(),
            reason: "not registered in this form",
        }
    }

    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            FormError::Configuration { field, .. } | FormError::Validator { field, .. } => field,
        }
    }
}

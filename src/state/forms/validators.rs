//! Per-field validator registry

use super::field::FieldName;
use super::form_state::FieldValues;
use crate::error::FormError;
use std::collections::HashMap;
use std::fmt;

/// A validator: current value plus every field's value in, validity out.
///
/// Returning `Ok(false)` marks the field invalid. Returning `Err` aborts the
/// whole update.
pub type ValidatorFn = Box<dyn Fn(&str, &FieldValues<'_>) -> anyhow::Result<bool> + Send + Sync>;

/// Mapping from field name to its validator.
///
/// Built once with the `with_*` methods and then moved into a
/// [`Form`](super::Form), which only reads it.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<FieldName, ValidatorFn>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an infallible predicate for a field
    pub fn with_predicate<F>(self, field: &str, predicate: F) -> Self
    where
        F: Fn(&str, &FieldValues<'_>) -> bool + Send + Sync + 'static,
    {
        self.with_fallible(field, move |value, values| Ok(predicate(value, values)))
    }

    /// Register a validator that can fail
    pub fn with_fallible<F>(mut self, field: &str, validator: F) -> Self
    where
        F: Fn(&str, &FieldValues<'_>) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.validators
            .insert(field.to_string(), Box::new(validator));
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.validators.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Run the validator registered for `field`
    pub fn validate(
        &self,
        field: &str,
        value: &str,
        values: &FieldValues<'_>,
    ) -> Result<bool, FormError> {
        let validator = self
            .validators
            .get(field)
            .ok_or_else(|| FormError::unknown_field(field))?;
        validator(value, values).map_err(|source| FormError::Validator {
            field: field.to_string(),
            source,
        })
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&str> = self.fields().collect();
        fields.sort_unstable();
        f.debug_struct("ValidatorRegistry")
            .field("fields", &fields)
            .finish()
    }
}

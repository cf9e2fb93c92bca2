//! Ordered per-field state and the read-only views derived from it

use super::completeness::is_complete;
use super::field::{FieldName, FieldState};
use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Authoritative value and validity of every field at one instant.
///
/// The key set is fixed when the state is built; entries keep the order in
/// which the fields were declared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    entries: Vec<(FieldName, FieldState)>,
}

impl FormState {
    /// Build a state from ordered entries, rejecting repeated names
    pub fn from_entries<I>(entries: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (FieldName, FieldState)>,
    {
        let mut state = Self::default();
        for (name, field) in entries {
            if state.get(&name).is_some() {
                return Err(FormError::Configuration {
                    field: name,
                    reason: "declared more than once",
                });
            }
            state.entries.push((name, field));
        }
        Ok(state)
    }

    pub fn get(&self, field: &str) -> Option<&FieldState> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, state)| state)
    }

    pub(crate) fn get_mut(&mut self, field: &str) -> Option<&mut FieldState> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, state)| state)
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(|f| f.value.as_str())
    }

    /// Validity flag of a field; unknown fields report `false`
    pub fn is_valid(&self, field: &str) -> bool {
        self.get(field).is_some_and(|f| f.is_valid)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldState)> {
        self.entries.iter().map(|(name, state)| (name.as_str(), state))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values-only view handed to validators
    pub fn values(&self) -> FieldValues<'_> {
        FieldValues { state: self }
    }

    /// Derive the snapshot exposed to consumers
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: self
                .iter()
                .map(|(name, f)| (name.to_string(), f.value.clone()))
                .collect(),
            validation_status: self
                .iter()
                .map(|(name, f)| (name.to_string(), f.is_valid))
                .collect(),
            is_form_complete: is_complete(self),
        }
    }
}

/// Read-only view of every field's current value.
///
/// Validators receive this instead of capturing outside state, so a
/// cross-field rule always sees the values of the pass it runs in.
#[derive(Debug, Clone, Copy)]
pub struct FieldValues<'a> {
    state: &'a FormState,
}

impl<'a> FieldValues<'a> {
    pub fn get(&self, field: &str) -> Option<&'a str> {
        self.state.value(field)
    }

    /// Value of a field, empty for unknown names
    pub fn get_or_empty(&self, field: &str) -> &'a str {
        self.get(field).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.state
            .entries
            .iter()
            .map(|(name, f)| (name.as_str(), f.value.as_str()))
    }
}

/// Consumer-facing copy of a form, re-derived after every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub fields: BTreeMap<FieldName, String>,
    pub validation_status: BTreeMap<FieldName, bool>,
    pub is_form_complete: bool,
}

impl FormSnapshot {
    pub fn value(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or_default()
    }

    pub fn is_valid(&self, field: &str) -> bool {
        self.validation_status.get(field).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormState {
        FormState::from_entries([
            ("email".to_string(), FieldState::new("a@x.com", true)),
            ("password".to_string(), FieldState::new("short", false)),
        ])
        .unwrap()
    }

    mod form_state {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_rejects_duplicate_names() {
            let result = FormState::from_entries([
                ("email".to_string(), FieldState::default()),
                ("email".to_string(), FieldState::default()),
            ]);
            assert!(matches!(
                result,
                Err(FormError::Configuration { ref field, .. }) if field == "email"
            ));
        }

        #[test]
        fn test_keeps_declaration_order() {
            let state = sample();
            let names: Vec<&str> = state.names().collect();
            assert_eq!(names, vec!["email", "password"]);
        }

        #[test]
        fn test_lookup_known_and_unknown() {
            let state = sample();
            assert_eq!(state.value("email"), Some("a@x.com"));
            assert!(state.is_valid("email"));
            assert!(!state.is_valid("password"));
            assert_eq!(state.value("nickname"), None);
            assert!(!state.is_valid("nickname"));
            assert!(!state.contains("nickname"));
        }

        #[test]
        fn test_empty_state() {
            let state = FormState::default();
            assert!(state.is_empty());
            assert_eq!(state.len(), 0);
        }
    }

    mod field_values {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_values_view_reads_current_values() {
            let state = sample();
            let values = state.values();
            assert_eq!(values.get("password"), Some("short"));
            assert_eq!(values.get_or_empty("nickname"), "");
            let all: Vec<_> = values.iter().collect();
            assert_eq!(all, vec![("email", "a@x.com"), ("password", "short")]);
        }
    }

    mod snapshot {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_snapshot_splits_values_and_status() {
            let snapshot = sample().snapshot();
            assert_eq!(snapshot.value("email"), "a@x.com");
            assert!(snapshot.is_valid("email"));
            assert!(!snapshot.is_valid("password"));
            assert!(!snapshot.is_form_complete);
        }

        #[test]
        fn test_snapshot_serializes_camel_case() {
            let snapshot = sample().snapshot();
            let json = serde_json::to_value(&snapshot).unwrap();
            assert_eq!(json["validationStatus"]["email"], true);
            assert_eq!(json["isFormComplete"], false);
            assert_eq!(json["fields"]["password"], "short");
        }
    }
}

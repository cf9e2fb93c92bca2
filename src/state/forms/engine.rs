//! Revalidation engine: the only writer of a form's state

use super::change::FieldChange;
use super::completeness::is_complete;
use super::dependencies::DependencyGraph;
use super::field::{FieldName, FieldState};
use super::form_state::{FormSnapshot, FormState};
use super::validators::ValidatorRegistry;
use crate::error::FormError;
use std::collections::HashMap;

/// How validity flags are set when a form is built
#[derive(Debug, Clone, Default)]
pub enum InitialValidity {
    /// Run every validator once over the initial values
    #[default]
    Computed,
    /// Use the given flags as-is; every field must have one
    Supplied(HashMap<FieldName, bool>),
}

/// A form instance: fixed field set, validators, dependencies and the
/// current state.
///
/// State changes only through [`Form::apply_change`]. Each call either
/// publishes a fully revalidated state or leaves the previous one in place.
#[derive(Debug)]
pub struct Form {
    validators: ValidatorRegistry,
    dependencies: DependencyGraph,
    state: FormState,
}

impl Form {
    /// Build a form from ordered initial values.
    ///
    /// Fails with a configuration error when the validator set does not
    /// match the field set, when a dependency or supplied flag names an
    /// unknown field, or when a field is declared twice.
    pub fn new<I, K, V>(
        initial_values: I,
        validators: ValidatorRegistry,
        dependencies: DependencyGraph,
        initial_validity: InitialValidity,
    ) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldName>,
        V: Into<String>,
    {
        let mut state = FormState::from_entries(
            initial_values
                .into_iter()
                .map(|(name, value)| (name.into(), FieldState::new(value, false))),
        )?;

        if let Some(field) = state.names().find(|name| !validators.contains(name)) {
            return Err(FormError::Configuration {
                field: field.to_string(),
                reason: "has no validator",
            });
        }
        if let Some(field) = validators.fields().find(|name| !state.contains(name)) {
            return Err(FormError::unknown_field(field));
        }
        if let Some(field) = dependencies
            .referenced_fields()
            .find(|name| !state.contains(name))
        {
            return Err(FormError::unknown_field(field));
        }

        match initial_validity {
            InitialValidity::Computed => {
                let names: Vec<FieldName> = state.names().map(str::to_string).collect();
                let mut flags = Vec::with_capacity(names.len());
                for name in &names {
                    let value = state.value(name).unwrap_or_default();
                    flags.push(validators.validate(name, value, &state.values())?);
                }
                for (name, flag) in names.iter().zip(flags) {
                    if let Some(field) = state.get_mut(name) {
                        field.is_valid = flag;
                    }
                }
            }
            InitialValidity::Supplied(flags) => {
                if let Some(field) = flags.keys().find(|name| !state.contains(name)) {
                    return Err(FormError::unknown_field(field));
                }
                let names: Vec<FieldName> = state.names().map(str::to_string).collect();
                for name in names {
                    let flag = *flags.get(&name).ok_or_else(|| FormError::Configuration {
                        field: name.clone(),
                        reason: "missing from supplied initial validity",
                    })?;
                    if let Some(field) = state.get_mut(&name) {
                        field.is_valid = flag;
                    }
                }
            }
        }

        tracing::debug!(
            fields = state.len(),
            complete = is_complete(&state),
            "form initialised"
        );

        Ok(Self {
            validators,
            dependencies,
            state,
        })
    }

    /// Set `field` to `value` and revalidate it plus its direct dependents.
    ///
    /// Validators see the new value, including dependents that read the
    /// changed field. On error nothing is published.
    pub fn apply_change(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<&FormState, FormError> {
        let mut candidate = self.state.clone();
        candidate
            .get_mut(field)
            .ok_or_else(|| FormError::unknown_field(field))?
            .value = value.into();

        let targets = self.dependencies.revalidation_set(field);
        let mut results = Vec::with_capacity(targets.len());
        for name in &targets {
            let current = candidate
                .value(name)
                .ok_or_else(|| FormError::unknown_field(name))?;
            match self.validators.validate(name, current, &candidate.values()) {
                Ok(is_valid) => results.push((*name, is_valid)),
                Err(err) => {
                    tracing::warn!(field, failed = name, "update rejected: {err:#}");
                    return Err(err);
                }
            }
        }

        for (name, is_valid) in results {
            if let Some(state) = candidate.get_mut(name) {
                state.is_valid = is_valid;
            }
        }

        tracing::debug!(
            field,
            revalidated = ?targets,
            complete = is_complete(&candidate),
            "change applied"
        );

        self.state = candidate;
        Ok(&self.state)
    }

    /// Event entry point: apply a change and hand back the fresh snapshot
    pub fn on_field_change(&mut self, change: FieldChange) -> Result<FormSnapshot, FormError> {
        self.apply_change(&change.field, change.value)
            .map(FormState::snapshot)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.snapshot()
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.state)
    }

    pub fn value(&self, field: &str) -> &str {
        self.state.value(field).unwrap_or_default()
    }

    pub fn is_valid(&self, field: &str) -> bool {
        self.state.is_valid(field)
    }

    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password_validators() -> ValidatorRegistry {
        ValidatorRegistry::new()
            .with_predicate("password", |v, _| v.len() >= 8)
            .with_predicate("confirmPassword", |v, values| {
                v == values.get_or_empty("password")
            })
    }

    fn password_form() -> Form {
        Form::new(
            [("password", ""), ("confirmPassword", "")],
            password_validators(),
            DependencyGraph::new().with_dependents("password", ["confirmPassword"]),
            InitialValidity::Supplied(HashMap::from([
                ("password".to_string(), false),
                ("confirmPassword".to_string(), false),
            ])),
        )
        .unwrap()
    }

    mod construction {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_computed_initial_validity_runs_validators() {
            let form = Form::new(
                [("password", ""), ("confirmPassword", "")],
                password_validators(),
                DependencyGraph::new(),
                InitialValidity::Computed,
            )
            .unwrap();
            assert!(!form.is_valid("password"));
            // "" == "" holds before anything is typed
            assert!(form.is_valid("confirmPassword"));
        }

        #[test]
        fn test_supplied_initial_validity_is_used_verbatim() {
            let form = password_form();
            assert!(!form.is_valid("password"));
            assert!(!form.is_valid("confirmPassword"));
            assert!(!form.is_complete());
        }

        #[test]
        fn test_missing_validator_is_configuration_error() {
            let err = Form::new(
                [("password", ""), ("nickname", "")],
                password_validators().with_predicate("nickname", |_, _| true),
                DependencyGraph::new(),
                InitialValidity::Computed,
            )
            .unwrap_err();
            assert!(matches!(err, FormError::Configuration { ref field, .. } if field == "confirmPassword"));

            let err = Form::new(
                [("email", "")],
                ValidatorRegistry::new(),
                DependencyGraph::new(),
                InitialValidity::Computed,
            )
            .unwrap_err();
            assert_eq!(err.field(), "email");
        }

        #[test]
        fn test_dependency_on_unknown_field_is_rejected() {
            let err = Form::new(
                [("password", ""), ("confirmPassword", "")],
                password_validators(),
                DependencyGraph::new().with_dependents("password", ["passwordHint"]),
                InitialValidity::Computed,
            )
            .unwrap_err();
            assert_eq!(err.field(), "passwordHint");
        }

        #[test]
        fn test_supplied_flags_must_cover_field_set() {
            let err = Form::new(
                [("password", ""), ("confirmPassword", "")],
                password_validators(),
                DependencyGraph::new(),
                InitialValidity::Supplied(HashMap::from([("password".to_string(), false)])),
            )
            .unwrap_err();
            assert_eq!(err.field(), "confirmPassword");

            let err = Form::new(
                [("password", ""), ("confirmPassword", "")],
                password_validators(),
                DependencyGraph::new(),
                InitialValidity::Supplied(HashMap::from([
                    ("password".to_string(), false),
                    ("confirmPassword".to_string(), false),
                    ("email".to_string(), false),
                ])),
            )
            .unwrap_err();
            assert_eq!(err.field(), "email");
        }

        #[test]
        fn test_failing_validator_during_computed_init() {
            let err = Form::new(
                [("email", "")],
                ValidatorRegistry::new()
                    .with_fallible("email", |_, _| Err(anyhow::anyhow!("unavailable"))),
                DependencyGraph::new(),
                InitialValidity::Computed,
            )
            .unwrap_err();
            assert!(matches!(err, FormError::Validator { .. }));
        }

        #[test]
        fn test_zero_fields_is_vacuously_complete() {
            let form = Form::new(
                Vec::<(String, String)>::new(),
                ValidatorRegistry::new(),
                DependencyGraph::new(),
                InitialValidity::Computed,
            )
            .unwrap();
            assert!(form.is_complete());
            assert!(form.snapshot().is_form_complete);
        }
    }

    mod apply_change {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_password_then_confirmation_scenario() {
            let mut form = password_form();

            form.apply_change("password", "abcdefgh").unwrap();
            assert!(form.is_valid("password"));
            assert!(!form.is_valid("confirmPassword"));
            assert!(!form.is_complete());

            form.apply_change("confirmPassword", "abcdefgh").unwrap();
            assert!(form.is_valid("password"));
            assert!(form.is_valid("confirmPassword"));
            assert!(form.snapshot().is_form_complete);
        }

        #[test]
        fn test_dependent_flips_in_same_update() {
            let mut form = password_form();
            form.apply_change("password", "abcdefgh").unwrap();
            form.apply_change("confirmPassword", "abcdefgh").unwrap();
            assert!(form.is_valid("confirmPassword"));

            let state = form.apply_change("password", "ijklmnop").unwrap();
            assert!(state.is_valid("password"));
            assert!(!state.is_valid("confirmPassword"));
            assert_eq!(state.value("confirmPassword"), Some("abcdefgh"));
        }

        #[test]
        fn test_fields_outside_revalidation_set_are_untouched() {
            let mut form = Form::new(
                [("email", "bad"), ("password", "")],
                ValidatorRegistry::new()
                    .with_predicate("email", |v, _| v.contains('@'))
                    .with_predicate("password", |v, _| !v.is_empty()),
                DependencyGraph::new(),
                InitialValidity::Supplied(HashMap::from([
                    // deliberately inconsistent with the validator
                    ("email".to_string(), true),
                    ("password".to_string(), false),
                ])),
            )
            .unwrap();

            form.apply_change("password", "x").unwrap();
            assert!(form.is_valid("email"));
            assert_eq!(form.value("email"), "bad");
            assert!(form.is_valid("password"));
        }

        #[test]
        fn test_same_change_twice_is_idempotent() {
            let mut form = password_form();
            form.apply_change("password", "abcdefgh").unwrap();
            let once = form.state().clone();
            form.apply_change("password", "abcdefgh").unwrap();
            assert_eq!(form.state(), &once);
        }

        #[test]
        fn test_unknown_field_is_rejected_without_change() {
            let mut form = password_form();
            let before = form.state().clone();
            let err = form.apply_change("nickname", "x").unwrap_err();
            assert!(matches!(err, FormError::Configuration { .. }));
            assert_eq!(form.state(), &before);
        }

        #[test]
        fn test_validator_error_keeps_previous_state() {
            let mut form = Form::new(
                [("password", ""), ("confirmPassword", "")],
                ValidatorRegistry::new()
                    .with_predicate("password", |v, _| v.len() >= 8)
                    .with_fallible("confirmPassword", |v, values| {
                        if values.get_or_empty("password") == "explode!" {
                            anyhow::bail!("confirmation rule failed");
                        }
                        Ok(v == values.get_or_empty("password"))
                    }),
                DependencyGraph::new().with_dependents("password", ["confirmPassword"]),
                InitialValidity::Computed,
            )
            .unwrap();
            form.apply_change("password", "abcdefgh").unwrap();
            let before = form.state().clone();

            let err = form.apply_change("password", "explode!").unwrap_err();
            assert!(matches!(err, FormError::Validator { ref field, .. } if field == "confirmPassword"));
            assert_eq!(form.state(), &before);
            assert_eq!(form.value("password"), "abcdefgh");
        }

        #[test]
        fn test_cyclic_dependencies_do_not_loop() {
            let mut form = Form::new(
                [("min", "1"), ("max", "5")],
                ValidatorRegistry::new()
                    .with_predicate("min", |v, values| v <= values.get_or_empty("max"))
                    .with_predicate("max", |v, values| v >= values.get_or_empty("min")),
                DependencyGraph::new()
                    .with_dependents("min", ["max"])
                    .with_dependents("max", ["min"]),
                InitialValidity::Computed,
            )
            .unwrap();
            assert!(form.is_complete());

            form.apply_change("min", "7").unwrap();
            assert!(!form.is_valid("min"));
            assert!(!form.is_valid("max"));

            form.apply_change("max", "9").unwrap();
            assert!(form.is_complete());
        }

        fn min_max_validators() -> ValidatorRegistry {
            ValidatorRegistry::new()
                .with_predicate("min", |v, values| v <= values.get_or_empty("max"))
                .with_predicate("max", |v, values| v >= values.get_or_empty("min"))
        }

        /// Replay `edits` and compare every published state with a direct
        /// run of `validators`
        fn assert_status_tracks_validators(
            mut form: Form,
            validators: ValidatorRegistry,
            edits: &[(&str, &str)],
        ) {
            for &(field, value) in edits {
                let state = form.apply_change(field, value).unwrap().clone();
                for name in form.dependencies().revalidation_set(field) {
                    let expected = validators
                        .validate(name, state.value(name).unwrap(), &state.values())
                        .unwrap();
                    assert_eq!(state.is_valid(name), expected, "after {field}={value}");
                }
                let all_valid = state.iter().all(|(_, f)| f.is_valid);
                assert_eq!(form.is_complete(), all_valid, "after {field}={value}");
                assert_eq!(form.snapshot().is_form_complete, all_valid);
            }
        }

        #[test]
        fn test_status_matches_validators_after_every_change() {
            assert_status_tracks_validators(
                password_form(),
                password_validators(),
                &[
                    ("password", "abc"),
                    ("confirmPassword", "abc"),
                    ("password", "abcdefgh"),
                    ("confirmPassword", "abcdefgh"),
                    ("password", "abcdefg"),
                    ("password", "abcdefgh"),
                ],
            );
        }

        #[test]
        fn test_status_tracks_confirmation_typed_first() {
            assert_status_tracks_validators(
                password_form(),
                password_validators(),
                &[
                    ("confirmPassword", "abcdefgh"),
                    ("password", "abcdefgh"),
                    ("confirmPassword", ""),
                    ("password", ""),
                    ("confirmPassword", ""),
                    ("password", "12345678"),
                    ("confirmPassword", "12345678"),
                    ("confirmPassword", "12345678"),
                ],
            );
        }

        #[test]
        fn test_status_tracks_computed_initial_form() {
            let form = Form::new(
                [("password", "abcdefgh"), ("confirmPassword", "abcdefgh")],
                password_validators(),
                DependencyGraph::new().with_dependents("password", ["confirmPassword"]),
                InitialValidity::Computed,
            )
            .unwrap();
            assert!(form.is_complete());
            assert_status_tracks_validators(
                form,
                password_validators(),
                &[
                    ("password", "abcdefg"),
                    ("confirmPassword", "abcdefg"),
                    ("password", "abcdefgh"),
                    ("confirmPassword", "abcdefgh"),
                ],
            );
        }

        #[test]
        fn test_status_tracks_cyclic_graph() {
            let form = Form::new(
                [("min", "1"), ("max", "5")],
                min_max_validators(),
                DependencyGraph::new()
                    .with_dependents("min", ["max"])
                    .with_dependents("max", ["min"]),
                InitialValidity::Computed,
            )
            .unwrap();
            assert_status_tracks_validators(
                form,
                min_max_validators(),
                &[
                    ("min", "7"),
                    ("max", "9"),
                    ("max", "3"),
                    ("min", "2"),
                    ("min", "2"),
                    ("max", "2"),
                ],
            );
        }

        #[test]
        fn test_status_tracks_self_dependency() {
            let form = Form::new(
                [("min", "1"), ("max", "5")],
                min_max_validators(),
                DependencyGraph::new()
                    .with_dependents("min", ["min", "max"])
                    .with_dependents("max", ["max"]),
                InitialValidity::Supplied(HashMap::from([
                    ("min".to_string(), false),
                    ("max".to_string(), false),
                ])),
            )
            .unwrap();
            assert_status_tracks_validators(
                form,
                min_max_validators(),
                &[("max", "4"), ("min", "6"), ("min", "3")],
            );
        }
    }

    mod on_field_change {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_returns_fresh_snapshot() {
            let mut form = password_form();
            let snapshot = form
                .on_field_change(FieldChange::new("password", "abcdefgh"))
                .unwrap();
            assert_eq!(snapshot.value("password"), "abcdefgh");
            assert!(snapshot.is_valid("password"));
            assert!(!snapshot.is_valid("confirmPassword"));
            assert!(!snapshot.is_form_complete);
            assert_eq!(snapshot, form.snapshot());
        }
    }
}

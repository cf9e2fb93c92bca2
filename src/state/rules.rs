//! Field rules and the account forms built from them

use super::forms::{
    DependencyGraph, FieldSpec, FieldValues, Form, InitialValidity, ValidatorRegistry,
};
use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const EMAIL: &str = "email";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";

const USERNAME_MIN_CHARS: usize = 2;
const USERNAME_MAX_CHARS: usize = 10;

/// Length bounds for new passwords, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 16,
        }
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !host.ends_with('.') && tld.len() >= 2,
        None => false,
    }
}

/// Within the policy's length bounds, with at least one letter and one digit
pub fn is_valid_password(value: &str, policy: &PasswordPolicy) -> bool {
    let len = value.chars().count();
    (policy.min_length..=policy.max_length).contains(&len)
        && value.chars().any(char::is_alphabetic)
        && value.chars().any(|c| c.is_ascii_digit())
        && !value.chars().any(char::is_whitespace)
}

pub fn is_valid_username(value: &str) -> bool {
    let len = value.chars().count();
    (USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len)
        && !value.chars().any(char::is_whitespace)
}

/// Confirmation rule: equal to the current `password` value
pub fn passwords_match(value: &str, values: &FieldValues<'_>) -> bool {
    value == values.get_or_empty(PASSWORD)
}

/// Which account form is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    #[default]
    Register,
    UpdatePassword,
}

impl FormKind {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Register => Self::UpdatePassword,
            Self::UpdatePassword => Self::Register,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Register => "Sign Up",
            Self::UpdatePassword => "Change Password",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Register => "Sign Up",
            Self::UpdatePassword => "Change",
        }
    }

    /// Fields in display order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Register => REGISTER_FIELDS,
            Self::UpdatePassword => UPDATE_PASSWORD_FIELDS,
        }
    }

    /// Build a fresh form instance for this page
    pub fn build(&self, policy: PasswordPolicy) -> Result<Form, FormError> {
        let mut validators = ValidatorRegistry::new()
            .with_predicate(PASSWORD, move |v, _| is_valid_password(v, &policy))
            .with_predicate(CONFIRM_PASSWORD, passwords_match);
        if *self == Self::Register {
            validators = validators
                .with_predicate(EMAIL, |v, _| is_valid_email(v))
                .with_predicate(USERNAME, |v, _| is_valid_username(v));
        }

        let fields = self.fields();
        Form::new(
            fields.iter().map(|f| (f.name, "")),
            validators,
            DependencyGraph::new().with_dependents(PASSWORD, [CONFIRM_PASSWORD]),
            InitialValidity::Supplied(
                fields
                    .iter()
                    .map(|f| (f.name.to_string(), false))
                    .collect::<HashMap<_, _>>(),
            ),
        )
    }
}

const REGISTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(EMAIL, "Email"),
    FieldSpec::text(USERNAME, "Name").with_error("Use 2-10 characters without spaces."),
    FieldSpec::secret(PASSWORD, "Password")
        .with_error("Mix letters and digits within the allowed length."),
    FieldSpec::secret(CONFIRM_PASSWORD, "Confirm Password")
        .with_error("Passwords do not match."),
];

const UPDATE_PASSWORD_FIELDS: &[FieldSpec] = &[
    FieldSpec::secret(PASSWORD, "New Password")
        .with_error("Mix letters and digits within the allowed length."),
    FieldSpec::secret(CONFIRM_PASSWORD, "Confirm Password")
        .with_error("Passwords do not match."),
];

//! Duplicate-identifier check, kept apart from the form state

use crate::service::User;

/// Shown after checking an identifier that is already taken
pub const DUPLICATE_MESSAGE: &str = "This email is already registered.";
/// Shown after checking an identifier that is free
pub const AVAILABLE_MESSAGE: &str = "This email is available.";

/// Outcome of one duplicate check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateResult {
    pub is_duplicate: bool,
    pub message: String,
}

/// Side channel owning the duplicate-check result for one identifier field.
///
/// The form never writes here and this never writes into the form. The page
/// calls [`DuplicateCheck::reset`] whenever the identifier field changes.
#[derive(Debug, Clone, Default)]
pub struct DuplicateCheck {
    existing: Vec<String>,
    result: Option<DuplicateResult>,
}

impl DuplicateCheck {
    pub fn new<I, S>(existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            existing: existing.into_iter().map(Into::into).collect(),
            result: None,
        }
    }

    /// Seed from a fetched user list, keyed by email
    pub fn from_users(users: &[User]) -> Self {
        Self::new(users.iter().map(|u| u.email.clone()))
    }

    /// Check `candidate` against the known identifiers and keep the result
    pub fn check(&mut self, candidate: &str) -> DuplicateResult {
        let is_duplicate = self.existing.iter().any(|id| id == candidate);
        let message = if is_duplicate {
            DUPLICATE_MESSAGE
        } else {
            AVAILABLE_MESSAGE
        };
        tracing::debug!(is_duplicate, "duplicate check finished");
        let result = DuplicateResult {
            is_duplicate,
            message: message.to_string(),
        };
        self.result = Some(result.clone());
        result
    }

    /// Forget the shown result
    pub fn reset(&mut self) {
        self.result = None;
    }

    pub fn result(&self) -> Option<&DuplicateResult> {
        self.result.as_ref()
    }

    /// An identifier counts as duplicate until a check has cleared it
    pub fn is_duplicate(&self) -> bool {
        self.result.as_ref().is_none_or(|r| r.is_duplicate)
    }

    /// The check can run while the identifier is valid and not yet cleared
    pub fn can_check(&self, identifier_is_valid: bool) -> bool {
        identifier_is_valid && self.is_duplicate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_existing_identifier_is_duplicate() {
        let mut check = DuplicateCheck::new(["a@x.com"]);
        let result = check.check("a@x.com");
        assert_eq!(
            result,
            DuplicateResult {
                is_duplicate: true,
                message: DUPLICATE_MESSAGE.to_string(),
            }
        );
        assert!(check.is_duplicate());
    }

    #[test]
    fn test_new_identifier_is_available() {
        let mut check = DuplicateCheck::new(["a@x.com"]);
        let result = check.check("b@x.com");
        assert!(!result.is_duplicate);
        assert_eq!(result.message, AVAILABLE_MESSAGE);
        assert!(!check.is_duplicate());
    }

    #[test]
    fn test_comparison_is_exact() {
        let mut check = DuplicateCheck::new(["a@x.com"]);
        assert!(!check.check("A@x.com").is_duplicate);
    }

    #[test]
    fn test_unchecked_counts_as_duplicate() {
        let check = DuplicateCheck::new(Vec::<String>::new());
        assert!(check.result().is_none());
        assert!(check.is_duplicate());
    }

    #[test]
    fn test_reset_clears_result() {
        let mut check = DuplicateCheck::new(["a@x.com"]);
        check.check("b@x.com");
        assert!(!check.is_duplicate());
        check.reset();
        assert!(check.result().is_none());
        assert!(check.is_duplicate());
    }

    #[test]
    fn test_can_check_only_valid_uncleared_identifier() {
        let mut check = DuplicateCheck::new(["a@x.com"]);
        assert!(!check.can_check(false));
        assert!(check.can_check(true));
        check.check("b@x.com");
        assert!(!check.can_check(true));
        check.check("a@x.com");
        assert!(check.can_check(true));
    }
}

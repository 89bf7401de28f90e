//! Stateless field validation rules.
//!
//! The rules are pure functions over the current form values; the flow
//! controller re-evaluates them on every field change and again at submit
//! time. Message text for display is a collaborator concern.

use crate::flow::FormState;
use regex::Regex;

/// Form fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Empty or whitespace-only input.
    Required,
    /// Input does not look like an email address.
    Format,
}

/// Per-field validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Reason),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Evaluate the rules attached to a single field.
#[must_use]
pub fn validate_field(field: Field, value: &str) -> ValidationResult {
    match field {
        Field::Email => {
            if value.trim().is_empty() {
                ValidationResult::Invalid(Reason::Required)
            } else if valid_email(value) {
                ValidationResult::Valid
            } else {
                ValidationResult::Invalid(Reason::Format)
            }
        }
    }
}

/// First failing rule across the rule-bearing fields, in field order.
/// The `remember` checkbox carries no rules.
#[must_use]
pub fn first_failure(form: &FormState) -> Option<(Field, Reason)> {
    match validate_field(Field::Email, &form.email) {
        ValidationResult::Invalid(reason) => Some((Field::Email, reason)),
        ValidationResult::Valid => None,
    }
}

/// True only when every rule-bearing field passes.
#[must_use]
pub fn all_valid(form: &FormState) -> bool {
    first_failure(form).is_none()
}

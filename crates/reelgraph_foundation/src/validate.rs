//! Explicit field validation for drafts.
//!
//! These checks run before a draft reaches the uniqueness guard. They
//! collect every violation instead of stopping at the first.

use std::fmt;

use chrono::NaiveDate;

use crate::config::FieldRules;
use crate::person::PersonDraft;
use crate::work::WorkDraft;

/// A single field that failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Name of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks a work draft against the field rules.
#[must_use]
pub fn validate_work(draft: &WorkDraft, rules: &FieldRules) -> Vec<Violation> {
    let mut violations = Vec::new();

    if draft.title.trim().is_empty() {
        violations.push(Violation::new("title", "must not be blank"));
    } else if draft.title.chars().count() > rules.title_max_chars {
        violations.push(Violation::new(
            "title",
            format!("must be at most {} characters", rules.title_max_chars),
        ));
    }

    if let Some(synopsis) = &draft.synopsis {
        if synopsis.chars().count() > rules.synopsis_max_chars {
            violations.push(Violation::new(
                "synopsis",
                format!("must be at most {} characters", rules.synopsis_max_chars),
            ));
        }
    }

    if draft.release_date < rules.earliest_release {
        violations.push(Violation::new(
            "release_date",
            format!("must not be before {}", rules.earliest_release),
        ));
    }

    if draft.duration == Some(0) {
        violations.push(Violation::new("duration", "must be positive"));
    }

    if rules.require_rating && draft.rating.is_none() {
        violations.push(Violation::new("rating", "is required"));
    }

    violations
}

/// Checks a person draft against the field rules.
///
/// `today` bounds the birthday; pass the current date in production.
#[must_use]
pub fn validate_person(draft: &PersonDraft, rules: &FieldRules, today: NaiveDate) -> Vec<Violation> {
    let mut violations = Vec::new();

    if draft.email.trim().is_empty() {
        violations.push(Violation::new("email", "must not be blank"));
    } else if !is_valid_email(&draft.email) {
        violations.push(Violation::new(
            "email",
            format!("'{}' is not a valid email", draft.email),
        ));
    }

    let handle_len = draft.handle.chars().count();
    if draft.handle.trim().is_empty() {
        violations.push(Violation::new("handle", "must not be blank"));
    } else if handle_len < rules.handle_min_chars || handle_len > rules.handle_max_chars {
        violations.push(Violation::new(
            "handle",
            format!(
                "must be between {} and {} characters",
                rules.handle_min_chars, rules.handle_max_chars
            ),
        ));
    } else if !draft.handle.chars().all(is_handle_char) {
        violations.push(Violation::new(
            "handle",
            "may contain only Latin or Cyrillic letters, digits, and underscores",
        ));
    }

    if let Some(birthday) = draft.birthday {
        if birthday >= today {
            violations.push(Violation::new("birthday", "must be in the past"));
        }
    }

    violations
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn is_handle_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || matches!(c, '\u{0400}'..='\u{04FF}')
}

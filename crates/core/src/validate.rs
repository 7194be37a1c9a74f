//! Contact form validation and input sanitization.
//!
//! Validation and sanitization are deliberately separate: [`validate`]
//! decides whether the input may be submitted at all, [`sanitize`] is the
//! always-applied transform run after validation passes and before
//! anything reaches the store. Both are pure.

use crate::submission::SubmissionInput;
use crate::types::Email;

/// Minimum trimmed length of the message field.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Why a single form field failed validation.
///
/// The `Display` text is the inline error shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,
    #[error("Please enter a valid email address.")]
    InvalidFormat,
    #[error("Message must be at least {} characters.", MIN_MESSAGE_LEN)]
    TooShort,
}

/// Per-field validation failures. Empty means the input may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub name: Option<FieldError>,
    pub email: Option<FieldError>,
    pub subject: Option<FieldError>,
    pub message: Option<FieldError>,
}

impl ValidationErrors {
    /// Whether every field passed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.subject.is_none()
            && self.message.is_none()
    }
}

/// Validate all four fields.
///
/// Each rule is evaluated independently so every failing field surfaces
/// its error in one pass, rather than one error per submit attempt.
#[must_use]
pub fn validate(input: &SubmissionInput) -> ValidationErrors {
    let name = input.name.trim();
    let email = input.email.trim();
    let subject = input.subject.trim();
    let message = input.message.trim();

    ValidationErrors {
        name: name.is_empty().then_some(FieldError::Required),
        email: if email.is_empty() {
            Some(FieldError::Required)
        } else if Email::parse(email).is_err() {
            Some(FieldError::InvalidFormat)
        } else {
            None
        },
        subject: subject.is_empty().then_some(FieldError::Required),
        message: if message.is_empty() {
            Some(FieldError::Required)
        } else if message.chars().count() < MIN_MESSAGE_LEN {
            Some(FieldError::TooShort)
        } else {
            None
        },
    }
}

/// Sanitized copy of the input: angle brackets stripped, then trimmed.
///
/// Stripping happens before trimming so the result is a fixed point -
/// sanitizing twice is the same as sanitizing once, even when removing a
/// bracket exposes surrounding whitespace.
#[must_use]
pub fn sanitize(input: &SubmissionInput) -> SubmissionInput {
    SubmissionInput {
        name: sanitize_field(&input.name),
        email: sanitize_field(&input.email),
        subject: sanitize_field(&input.subject),
        message: sanitize_field(&input.message),
    }
}

fn sanitize_field(value: &str) -> String {
    let stripped: String = value.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    stripped.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> SubmissionInput {
        SubmissionInput {
            name: "Jo".to_owned(),
            email: "jo@x.com".to_owned(),
            subject: "Hi there".to_owned(),
            message: "This message is long enough.".to_owned(),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate(&valid_input()).is_empty());
    }

    #[test]
    fn test_all_errors_surface_together() {
        let input = SubmissionInput {
            name: String::new(),
            email: "a@b.com".to_owned(),
            subject: "Hi".to_owned(),
            message: "short".to_owned(),
        };
        let errors = validate(&input);
        assert_eq!(errors.name, Some(FieldError::Required));
        assert_eq!(errors.email, None);
        assert_eq!(errors.subject, None);
        assert_eq!(errors.message, Some(FieldError::TooShort));
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_whitespace_only_fields_are_required() {
        let input = SubmissionInput {
            name: "   ".to_owned(),
            email: " \t ".to_owned(),
            subject: "\n".to_owned(),
            message: "  ".to_owned(),
        };
        let errors = validate(&input);
        assert_eq!(errors.name, Some(FieldError::Required));
        assert_eq!(errors.email, Some(FieldError::Required));
        assert_eq!(errors.subject, Some(FieldError::Required));
        assert_eq!(errors.message, Some(FieldError::Required));
    }

    #[test]
    fn test_email_format_checked_after_presence() {
        let mut input = valid_input();
        input.email = "not-an-email".to_owned();
        assert_eq!(validate(&input).email, Some(FieldError::InvalidFormat));

        // Surrounding whitespace is ignored for the format check.
        input.email = "  jo@x.com  ".to_owned();
        assert_eq!(validate(&input).email, None);
    }

    #[test]
    fn test_message_length_boundary() {
        let mut input = valid_input();
        input.message = "a".repeat(MIN_MESSAGE_LEN);
        assert_eq!(validate(&input).message, None);

        input.message = "a".repeat(MIN_MESSAGE_LEN - 1);
        assert_eq!(validate(&input).message, Some(FieldError::TooShort));

        // Trailing whitespace does not count toward the minimum.
        input.message = format!("{}   ", "a".repeat(MIN_MESSAGE_LEN - 1));
        assert_eq!(validate(&input).message, Some(FieldError::TooShort));
    }

    #[test]
    fn test_sanitize_strips_angle_brackets() {
        let input = SubmissionInput {
            name: "<b>Jo</b>".to_owned(),
            email: "jo@x.com".to_owned(),
            subject: "  spaced  ".to_owned(),
            message: "<script>alert('hi')</script>".to_owned(),
        };
        let clean = sanitize(&input);
        assert_eq!(clean.name, "bJo/b");
        assert_eq!(clean.email, "jo@x.com");
        assert_eq!(clean.subject, "spaced");
        assert_eq!(clean.message, "scriptalert('hi')/script");
    }

    #[test]
    fn test_sanitize_idempotent() {
        let inputs = [
            valid_input(),
            SubmissionInput {
                name: "< a >".to_owned(),
                email: " <jo@x.com> ".to_owned(),
                subject: "<<>>".to_owned(),
                message: "  <p> hello </p>  ".to_owned(),
            },
        ];
        for input in inputs {
            let once = sanitize(&input);
            let twice = sanitize(&once);
            assert_eq!(once.name, twice.name);
            assert_eq!(once.email, twice.email);
            assert_eq!(once.subject, twice.subject);
            assert_eq!(once.message, twice.message);
        }
    }
}

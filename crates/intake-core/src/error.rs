//! Error types module
//!
//! Field-level validation failures are collected into [`FieldErrors`]; every
//! way a submission attempt can end without a record is a [`SubmitError`].
//! Both are expected outcomes and are rendered inline, never treated as
//! fatal.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::models::Field;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a failed round trip
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Describes how an error should be presented to the person filling the form
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "VALIDATION_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether submitting again can succeed without changing the input
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// What kind of rule a field broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Required value absent from the submission
    Missing,
    TooShort,
    /// Value present but not in the expected shape (email, phone)
    Malformed,
    FileRequired,
    FileTooLarge,
    FileType,
}

/// A validation failure attributed to one named input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Non-empty, field-ordered collection of field errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Returns `None` for an empty list so an empty failure cannot exist.
    pub fn from_vec(mut errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        // Stable: keeps rule order within a field
        errors.sort_by_key(|e| e.field);
        Some(Self(errors))
    }

    /// Builds from one known error plus any others, so the result is never empty.
    pub fn from_parts(first: FieldError, mut rest: Vec<FieldError>) -> Self {
        rest.push(first);
        rest.sort_by_key(|e| e.field);
        Self(rest)
    }

    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    /// First message for `field`, the one a form shows under the input
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.for_field(field).next().map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self.0.iter().map(|e| e.field).collect();
        fields.dedup();
        fields
    }

    /// Drops the errors of `field`. Returns `None` when nothing is left.
    pub fn without(self, field: Field) -> Option<Self> {
        Self::from_vec(self.0.into_iter().filter(|e| e.field != field).collect())
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&joined.join("; "))
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Submission timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Submission was abandoned before it finished")]
    Cancelled,

    #[error("A submission is already in progress")]
    AlreadyPending,

    #[error("Registration is already complete")]
    AlreadyComplete,

    #[error("The form cannot be edited outside the editing state")]
    NotEditable,

    #[error("Only a completed registration can be started over")]
    NotComplete,

    #[error("Field {0} is not a text field")]
    NotATextField(Field),
}

impl From<FieldErrors> for SubmitError {
    fn from(errors: FieldErrors) -> Self {
        SubmitError::Validation(errors)
    }
}

impl SubmitError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Transport-level failures: the round trip itself went wrong
    pub fn is_transport(&self) -> bool {
        matches!(self, SubmitError::Transport(_) | SubmitError::Timeout { .. })
    }
}

/// Static metadata per variant: (error_code, recoverable, suggested_action, log_level).
fn submit_error_static_metadata(
    err: &SubmitError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        SubmitError::Validation(_) => (
            "VALIDATION_FAILED",
            false,
            Some("Correct the highlighted fields and submit again"),
            LogLevel::Debug,
        ),
        SubmitError::Transport(_) => (
            "TRANSPORT_ERROR",
            true,
            Some("Check your connection and submit again"),
            LogLevel::Warn,
        ),
        SubmitError::Timeout { .. } => (
            "SUBMISSION_TIMEOUT",
            true,
            Some("Submit again in a moment"),
            LogLevel::Warn,
        ),
        SubmitError::Cancelled => (
            "SUBMISSION_CANCELLED",
            true,
            Some("Submit again"),
            LogLevel::Warn,
        ),
        SubmitError::AlreadyPending => (
            "SUBMISSION_PENDING",
            false,
            Some("Wait for the current submission to finish"),
            LogLevel::Debug,
        ),
        SubmitError::AlreadyComplete => (
            "ALREADY_COMPLETE",
            false,
            Some("Start over to submit another registration"),
            LogLevel::Debug,
        ),
        SubmitError::NotEditable => ("NOT_EDITABLE", false, None, LogLevel::Debug),
        SubmitError::NotComplete => ("NOT_COMPLETE", false, None, LogLevel::Debug),
        SubmitError::NotATextField(_) => ("NOT_A_TEXT_FIELD", false, None, LogLevel::Error),
    }
}

impl ErrorMetadata for SubmitError {
    fn error_code(&self) -> &'static str {
        submit_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        submit_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        submit_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        submit_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            SubmitError::Validation(errors) if errors.len() == 1 => {
                "Please correct the highlighted field.".to_string()
            }
            SubmitError::Validation(_) => "Please correct the highlighted fields.".to_string(),
            SubmitError::Transport(_) | SubmitError::Timeout { .. } | SubmitError::Cancelled => {
                "We could not send your registration. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_error() -> FieldError {
        FieldError::new(
            Field::Email,
            FieldErrorKind::Malformed,
            "Please enter a valid email address",
        )
    }

    #[test]
    fn test_field_errors_reject_empty() {
        assert!(FieldErrors::from_vec(vec![]).is_none());
    }

    #[test]
    fn test_field_errors_sorted_by_field() {
        let errors = FieldErrors::from_vec(vec![
            FieldError::new(Field::Cv, FieldErrorKind::FileType, "type"),
            email_error(),
            FieldError::new(Field::GivenName, FieldErrorKind::TooShort, "short"),
            FieldError::new(Field::Cv, FieldErrorKind::FileRequired, "required"),
        ])
        .unwrap();

        assert_eq!(
            errors.fields(),
            vec![Field::GivenName, Field::Email, Field::Cv]
        );
        assert_eq!(errors.message_for(Field::Cv), Some("type"));
        assert_eq!(errors.for_field(Field::Cv).count(), 2);
    }

    #[test]
    fn test_from_parts_is_sorted_and_non_empty() {
        let required = FieldError::new(Field::Cv, FieldErrorKind::FileRequired, "required");
        let errors = FieldErrors::from_parts(required.clone(), vec![email_error()]);
        assert_eq!(errors.fields(), vec![Field::Email, Field::Cv]);

        let alone = FieldErrors::from_parts(required, Vec::new());
        assert_eq!(alone.len(), 1);
    }

    #[test]
    fn test_without_drops_field() {
        let errors = FieldErrors::from_vec(vec![
            email_error(),
            FieldError::new(Field::Phone, FieldErrorKind::Malformed, "phone"),
        ])
        .unwrap();

        let remaining = errors.without(Field::Email).unwrap();
        assert!(!remaining.contains(Field::Email));
        assert!(remaining.contains(Field::Phone));
        assert!(remaining.without(Field::Phone).is_none());
    }

    #[test]
    fn test_error_metadata_validation() {
        let err = SubmitError::Validation(FieldErrors::single(email_error()));
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(err.client_message(), "Please correct the highlighted field.");
        assert!(err.field_errors().is_some());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_error_metadata_transport() {
        let err = SubmitError::Transport("connection reset".to_string());
        assert_eq!(err.error_code(), "TRANSPORT_ERROR");
        assert!(err.is_recoverable());
        assert!(err.is_transport());
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert!(!err.client_message().contains("connection reset"));

        let timeout = SubmitError::Timeout {
            after: Duration::from_secs(30),
        };
        assert!(timeout.is_transport());
        assert_eq!(timeout.error_code(), "SUBMISSION_TIMEOUT");

        let cancelled = SubmitError::Cancelled;
        assert!(cancelled.is_recoverable());
        assert!(!cancelled.is_transport());
        assert_eq!(cancelled.client_message(), err.client_message());
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        assert_eq!(
            SubmitError::AlreadyPending.suggested_action(),
            Some("Wait for the current submission to finish")
        );
        assert_eq!(SubmitError::NotEditable.suggested_action(), None);
    }
}

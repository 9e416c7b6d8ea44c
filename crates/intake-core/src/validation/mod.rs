//! Registration schema
//!
//! Turns a [`RegistrationInput`] into a [`RegistrationRecord`] or the full
//! list of field errors. Every rule runs; nothing short-circuits, so the form
//! can annotate all offending inputs at once.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::constants::PHONE_PATTERN;
use crate::error::{FieldError, FieldErrorKind, FieldErrors};
use crate::models::{AttachmentRules, CvAttachment, Field, RegistrationInput, RegistrationRecord};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

pub const GIVEN_NAME_MESSAGE: &str = "First name is required";
pub const FAMILY_NAME_MESSAGE: &str = "Last name is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Invalid phone number format";
pub const CV_REQUIRED_MESSAGE: &str = "CV file is required";
pub const CV_TOO_LARGE_MESSAGE: &str = "Max file size is 5MB";
pub const CV_TYPE_MESSAGE: &str = "Only .pdf, .doc, and .odt files are accepted";

/// Text inputs as the validator derive sees them. Absent values are empty.
#[derive(Debug, Validate)]
struct ContactFields {
    #[validate(length(min = 2, message = "First name is required"))]
    given_name: String,
    #[validate(length(min = 2, message = "Last name is required"))]
    family_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    email: String,
    #[validate(custom(function = "validate_phone"))]
    phone: String,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        return Ok(());
    }
    Err(ValidationError::new("phone").with_message(Cow::Borrowed(PHONE_MESSAGE)))
}

/// True when `phone` has the E.164-like shape the form accepts
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

fn default_message(field: Field) -> &'static str {
    match field {
        Field::GivenName => GIVEN_NAME_MESSAGE,
        Field::FamilyName => FAMILY_NAME_MESSAGE,
        Field::Email => EMAIL_MESSAGE,
        Field::Phone => PHONE_MESSAGE,
        Field::Address => "",
        Field::Cv => CV_REQUIRED_MESSAGE,
    }
}

/// Validates registration input against the text rules and the CV constraints
#[derive(Debug, Clone, Default)]
pub struct RegistrationSchema {
    rules: AttachmentRules,
}

impl RegistrationSchema {
    pub fn new(rules: AttachmentRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AttachmentRules {
        &self.rules
    }

    pub fn validate(&self, input: &RegistrationInput) -> Result<RegistrationRecord, FieldErrors> {
        let mut errors = self.validate_text(input);

        let Some(cv) = input.cv() else {
            return Err(rejected(FieldErrors::from_parts(cv_required(), errors)));
        };
        errors.extend(self.validate_cv_file(cv));

        if let Some(errors) = FieldErrors::from_vec(errors) {
            return Err(rejected(errors));
        }

        let text = |field: Field| input.value(field).unwrap_or_default().to_string();
        let address = input
            .value(Field::Address)
            .filter(|a| !a.trim().is_empty())
            .map(str::to_string);

        Ok(RegistrationRecord {
            id: Uuid::new_v4(),
            given_name: text(Field::GivenName),
            family_name: text(Field::FamilyName),
            email: text(Field::Email),
            phone: text(Field::Phone),
            address,
            cv: cv.clone(),
            submitted_at: Utc::now(),
        })
    }

    fn validate_text(&self, input: &RegistrationInput) -> Vec<FieldError> {
        let text = |field: Field| input.value(field).unwrap_or_default().to_string();
        let contact = ContactFields {
            given_name: text(Field::GivenName),
            family_name: text(Field::FamilyName),
            email: text(Field::Email),
            phone: text(Field::Phone),
        };

        match contact.validate() {
            Ok(()) => Vec::new(),
            Err(errs) => field_errors_from(&errs, input),
        }
    }

    /// CV refinements. Each runs on its own, so one file can break several.
    pub fn validate_cv(&self, cv: Option<&CvAttachment>) -> Vec<FieldError> {
        match cv {
            Some(cv) => self.validate_cv_file(cv),
            None => vec![cv_required()],
        }
    }

    fn validate_cv_file(&self, cv: &CvAttachment) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if cv.size == 0 {
            errors.push(cv_required());
        }
        if cv.size > self.rules.max_file_size {
            errors.push(FieldError::new(
                Field::Cv,
                FieldErrorKind::FileTooLarge,
                CV_TOO_LARGE_MESSAGE,
            ));
        }
        if !self.rules.accepts_content_type(&cv.content_type) {
            errors.push(FieldError::new(
                Field::Cv,
                FieldErrorKind::FileType,
                CV_TYPE_MESSAGE,
            ));
        }
        errors
    }
}

fn cv_required() -> FieldError {
    FieldError::new(Field::Cv, FieldErrorKind::FileRequired, CV_REQUIRED_MESSAGE)
}

fn rejected(errors: FieldErrors) -> FieldErrors {
    tracing::debug!(
        error_count = errors.len(),
        fields = ?errors.fields(),
        "Registration input failed validation"
    );
    errors
}

fn field_errors_from(errs: &ValidationErrors, input: &RegistrationInput) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (name, field_errs) in errs.field_errors() {
        let Some(field) = Field::from_key(&name) else {
            continue;
        };
        let kind = if input.value(field).is_none() {
            FieldErrorKind::Missing
        } else if matches!(field, Field::GivenName | Field::FamilyName) {
            FieldErrorKind::TooShort
        } else {
            FieldErrorKind::Malformed
        };
        for err in field_errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| default_message(field).to_string());
            out.push(FieldError::new(field, kind, message));
        }
    }
    out
}

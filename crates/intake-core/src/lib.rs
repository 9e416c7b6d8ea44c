//! Intake Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! registration schema shared by the file gate and the submission controller.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::RegistrationConfig;
pub use error::{ErrorMetadata, FieldError, FieldErrorKind, FieldErrors, LogLevel, SubmitError};
pub use models::{
    AttachmentRules, CvAttachment, DocumentFormat, Field, RegistrationInput, RegistrationRecord,
};
pub use validation::RegistrationSchema;

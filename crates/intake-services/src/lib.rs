//! Intake Services Layer
//!
//! Orchestration of the registration flow: the submission controller, the
//! submitter abstraction with its simulated backend, the confirmation view,
//! and tracing setup. Re-exports the core and processing types a form needs
//! so callers depend on a single facade.

pub mod confirmation;
pub mod controller;
pub mod draft;
pub mod submission;
pub mod telemetry;

pub use confirmation::{ConfirmationView, SummaryRow};
pub use controller::{Phase, SubmissionController, SubmissionState};
pub use draft::RegistrationDraft;
pub use intake_core::{
    CvAttachment, Field, FieldError, FieldErrorKind, FieldErrors, RegistrationConfig,
    RegistrationInput, RegistrationRecord, RegistrationSchema, SubmitError,
};
pub use intake_processing::{
    FileGate, FilePreview, GateError, GateMessage, GateOutcome, ObjectUrlStore, PreviewContent,
};
pub use submission::{SimulatedSubmitter, Submitter};
pub use telemetry::init_tracing;

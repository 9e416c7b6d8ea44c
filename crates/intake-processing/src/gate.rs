//! CV file gate
//!
//! Client-side filter in front of the registration schema. It holds at most
//! one accepted file and tracks the error the upload widget should show.
//! A missing file after a submit attempt and a file of the wrong type are
//! separate conditions with separate messages.

use intake_core::models::CvAttachment;

use crate::format::{format_file_size, format_list, ListStyle};
use crate::validator::{AttachmentError, AttachmentValidator};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("Please upload a {accepted} file.")]
    Required { accepted: String },

    #[error("{name} is not an accepted file type. Allowed files: {allowed}.")]
    WrongType { name: String, allowed: String },

    #[error("{name} is larger than the {limit} limit.")]
    TooLarge { name: String, limit: String },

    #[error("{name} is empty.")]
    Empty { name: String },
}

/// Why a file in a selection was not taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Invalid(AttachmentError),
    /// Only one file is kept per selection
    TooManyFiles,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub reason: RejectReason,
}

/// Result of one selection event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateOutcome {
    /// Name of the file now held, if any was accepted
    pub accepted: Option<String>,
    pub rejected: Vec<Rejection>,
}

impl GateOutcome {
    pub fn is_accepted(&self) -> bool {
        self.accepted.is_some()
    }
}

/// Text under the upload widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateMessage {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FileGate {
    validator: AttachmentValidator,
    file: Option<CvAttachment>,
    error: Option<GateError>,
    submit_attempted: bool,
}

impl FileGate {
    pub fn new(validator: AttachmentValidator) -> Self {
        Self {
            validator,
            file: None,
            error: None,
            submit_attempted: false,
        }
    }

    /// Handle a selection event. Keeps the first acceptable file and replaces
    /// whatever was held before; a selection with nothing acceptable leaves
    /// the gate empty.
    pub fn select(&mut self, files: Vec<CvAttachment>) -> GateOutcome {
        let mut outcome = GateOutcome::default();
        let mut accepted: Option<CvAttachment> = None;

        for file in files {
            if accepted.is_some() {
                outcome.rejected.push(Rejection {
                    name: file.name,
                    reason: RejectReason::TooManyFiles,
                });
                continue;
            }

            match self.validator.validate_all(&file) {
                Ok(format) => {
                    tracing::debug!(file = %file.name, ?format, size = file.size, "CV file accepted");
                    accepted = Some(file);
                }
                Err(err) => {
                    tracing::debug!(file = %file.name, error = %err, "CV file rejected");
                    outcome.rejected.push(Rejection {
                        name: file.name,
                        reason: RejectReason::Invalid(err),
                    });
                }
            }
        }

        outcome.accepted = accepted.as_ref().map(|f| f.name.clone());
        self.file = accepted;

        self.error = if self.file.is_some() {
            None
        } else if let Some(first) = outcome.rejected.first() {
            Some(self.rejection_error(first))
        } else if self.submit_attempted {
            Some(self.required_error())
        } else {
            None
        };

        outcome
    }

    /// Called when the form is submitted. Without a held file the gate
    /// raises its "required" error.
    pub fn mark_submit_attempted(&mut self) -> Result<(), GateError> {
        self.submit_attempted = true;
        if self.file.is_some() {
            return Ok(());
        }
        let err = self.required_error();
        self.error = Some(err.clone());
        Err(err)
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn file(&self) -> Option<&CvAttachment> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&GateError> {
        self.error.as_ref()
    }

    /// Drop the held file, as the item's delete trigger does
    pub fn remove(&mut self) -> Option<CvAttachment> {
        let removed = self.file.take();
        if self.submit_attempted {
            self.error = Some(self.required_error());
        }
        removed
    }

    pub fn reset(&mut self) {
        self.file = None;
        self.error = None;
        self.submit_attempted = false;
    }

    pub fn message(&self) -> GateMessage {
        match &self.error {
            Some(err) => GateMessage {
                text: err.to_string(),
                is_error: true,
            },
            None => GateMessage {
                text: format!(
                    "Allowed files: {}.",
                    format_list(&self.validator.allowed_extensions(), ListStyle::Conjunction)
                ),
                is_error: false,
            },
        }
    }

    fn required_error(&self) -> GateError {
        GateError::Required {
            accepted: format_list(&self.validator.allowed_extensions(), ListStyle::Disjunction),
        }
    }

    fn rejection_error(&self, rejection: &Rejection) -> GateError {
        let name = rejection.name.clone();
        match &rejection.reason {
            RejectReason::Invalid(AttachmentError::EmptyFile) => GateError::Empty { name },
            RejectReason::Invalid(AttachmentError::FileTooLarge { max, .. }) => {
                GateError::TooLarge {
                    name,
                    limit: format_file_size(*max),
                }
            }
            _ => GateError::WrongType {
                name,
                allowed: format_list(&self.validator.allowed_extensions(), ListStyle::Conjunction),
            },
        }
    }
}

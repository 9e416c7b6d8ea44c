//! Registration submission controller
//!
//! Drives the form through editing → pending → complete. The pending state
//! doubles as the submit lock: while a submission is in flight, further
//! submits are refused instead of starting a second attempt. A submit whose
//! future is dropped mid-flight puts the form back into editing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use intake_core::{
    CvAttachment, ErrorMetadata, Field, FieldErrors, LogLevel, RegistrationConfig,
    RegistrationRecord, SubmitError,
};
use intake_processing::{GateMessage, GateOutcome};
use tokio::sync::watch;

use crate::draft::RegistrationDraft;
use crate::submission::{SimulatedSubmitter, Submitter};

/// Where the form is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Editing {
        errors: Option<FieldErrors>,
        /// Set when the last attempt failed in transit rather than on a field
        transport_error: Option<String>,
    },
    Pending,
    Complete(Arc<RegistrationRecord>),
}

impl SubmissionState {
    fn editing() -> Self {
        SubmissionState::Editing {
            errors: None,
            transport_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            SubmissionState::Editing { .. } => Phase::Editing,
            SubmissionState::Pending => Phase::Pending,
            SubmissionState::Complete(_) => Phase::Complete,
        }
    }
}

/// State without payload, for views that only need to pick a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Pending,
    Complete,
}

impl Phase {
    /// False while the loading screen is up
    pub fn is_interactive(&self) -> bool {
        !matches!(self, Phase::Pending)
    }
}

struct Inner {
    state: SubmissionState,
    draft: RegistrationDraft,
}

pub struct SubmissionController {
    submitter: Arc<dyn Submitter>,
    timeout: Duration,
    inner: Mutex<Inner>,
    phase_tx: watch::Sender<Phase>,
}

impl SubmissionController {
    pub fn new(submitter: Arc<dyn Submitter>, config: &RegistrationConfig) -> Self {
        let (phase_tx, _) = watch::channel(Phase::Editing);
        Self {
            submitter,
            timeout: config.submit_timeout,
            inner: Mutex::new(Inner {
                state: SubmissionState::editing(),
                draft: RegistrationDraft::new(config),
            }),
            phase_tx,
        }
    }

    /// Controller backed by the in-process simulated submitter
    pub fn simulated(config: &RegistrationConfig) -> Self {
        Self::new(Arc::new(SimulatedSubmitter::from_config(config)), config)
    }

    // Never held across an await
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase_tx.subscribe()
    }

    pub fn phase(&self) -> Phase {
        *self.phase_tx.borrow()
    }

    pub async fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    pub async fn record(&self) -> Option<Arc<RegistrationRecord>> {
        match &self.lock().state {
            SubmissionState::Complete(record) => Some(record.clone()),
            _ => None,
        }
    }

    pub async fn errors(&self) -> Option<FieldErrors> {
        match &self.lock().state {
            SubmissionState::Editing { errors, .. } => errors.clone(),
            _ => None,
        }
    }

    pub async fn field_value(&self, field: Field) -> Option<String> {
        self.lock().draft.value(field).map(str::to_string)
    }

    pub async fn gate_message(&self) -> GateMessage {
        self.lock().draft.gate().message()
    }

    pub async fn has_cv(&self) -> bool {
        self.lock().draft.gate().has_file()
    }

    /// Update a text field. Clears the error shown under that field.
    pub async fn set_field(&self, field: Field, value: impl Into<String>) -> Result<(), SubmitError> {
        if field == Field::Cv {
            return Err(SubmitError::NotATextField(field));
        }

        let mut inner = self.lock();
        Self::ensure_editing(&inner.state)?;
        inner.draft.set(field, value);
        Self::clear_field_error(&mut inner.state, field);
        Ok(())
    }

    /// Route a file selection through the gate
    pub async fn select_cv(&self, files: Vec<CvAttachment>) -> Result<GateOutcome, SubmitError> {
        let mut inner = self.lock();
        Self::ensure_editing(&inner.state)?;
        let outcome = inner.draft.gate_mut().select(files);
        if outcome.is_accepted() {
            Self::clear_field_error(&mut inner.state, Field::Cv);
        }
        Ok(outcome)
    }

    pub async fn remove_cv(&self) -> Result<Option<CvAttachment>, SubmitError> {
        let mut inner = self.lock();
        Self::ensure_editing(&inner.state)?;
        Ok(inner.draft.gate_mut().remove())
    }

    /// Reset every field, the CV and all errors
    pub async fn clear(&self) -> Result<(), SubmitError> {
        let mut inner = self.lock();
        Self::ensure_editing(&inner.state)?;
        inner.draft.clear();
        inner.state = SubmissionState::editing();
        Ok(())
    }

    /// Submit the current draft.
    ///
    /// Returns the record once the submitter accepts it. On any failure the
    /// controller is back in editing with the draft untouched.
    pub async fn submit(&self) -> Result<Arc<RegistrationRecord>, SubmitError> {
        let input = {
            let mut inner = self.lock();
            match inner.state {
                SubmissionState::Pending => {
                    tracing::debug!("Submit ignored, a submission is already pending");
                    return Err(SubmitError::AlreadyPending);
                }
                SubmissionState::Complete(_) => return Err(SubmitError::AlreadyComplete),
                SubmissionState::Editing { .. } => {}
            }

            if let Err(err) = inner.draft.gate_mut().mark_submit_attempted() {
                tracing::debug!(error = %err, "Submitting without a CV file");
            }

            let input = inner.draft.to_input();
            inner.state = SubmissionState::Pending;
            self.phase_tx.send_replace(Phase::Pending);
            input
        };

        let mut guard = PendingGuard {
            controller: self,
            armed: true,
        };
        tracing::info!("Registration submission started");
        let result = match tokio::time::timeout(self.timeout, self.submitter.submit(input)).await {
            Ok(result) => result,
            Err(_) => Err(SubmitError::Timeout {
                after: self.timeout,
            }),
        };
        guard.armed = false;

        let mut inner = self.lock();
        match result {
            Ok(record) => {
                let record = Arc::new(record);
                tracing::info!(registration_id = %record.id, "Registration complete");
                inner.state = SubmissionState::Complete(record.clone());
                self.phase_tx.send_replace(Phase::Complete);
                Ok(record)
            }
            Err(err) => {
                self.return_to_editing(&mut inner, &err);
                Err(err)
            }
        }
    }

    /// Leave the confirmation and start a fresh, empty form
    pub async fn start_over(&self) -> Result<(), SubmitError> {
        let mut inner = self.lock();
        if !matches!(inner.state, SubmissionState::Complete(_)) {
            return Err(SubmitError::NotComplete);
        }
        inner.draft.clear();
        inner.state = SubmissionState::editing();
        self.phase_tx.send_replace(Phase::Editing);
        tracing::info!("Registration form reset for a new submission");
        Ok(())
    }

    fn return_to_editing(&self, inner: &mut Inner, err: &SubmitError) {
        log_submit_error(err);
        inner.state = match err {
            SubmitError::Validation(errors) => SubmissionState::Editing {
                errors: Some(errors.clone()),
                transport_error: None,
            },
            other => SubmissionState::Editing {
                errors: None,
                transport_error: Some(other.client_message()),
            },
        };
        self.phase_tx.send_replace(Phase::Editing);
    }

    fn ensure_editing(state: &SubmissionState) -> Result<(), SubmitError> {
        match state {
            SubmissionState::Editing { .. } => Ok(()),
            _ => Err(SubmitError::NotEditable),
        }
    }

    fn clear_field_error(state: &mut SubmissionState, field: Field) {
        if let SubmissionState::Editing { errors, .. } = state {
            *errors = errors.take().and_then(|e| e.without(field));
        }
    }
}

/// Armed across the submitter await. Still armed on drop means the submit
/// future was abandoned while pending.
struct PendingGuard<'a> {
    controller: &'a SubmissionController,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.controller.lock();
        if matches!(inner.state, SubmissionState::Pending) {
            self.controller
                .return_to_editing(&mut inner, &SubmitError::Cancelled);
        }
    }
}

fn log_submit_error(err: &SubmitError) {
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, code, "Registration submission failed"),
        LogLevel::Warn => tracing::warn!(error = %err, code, "Registration submission failed"),
        LogLevel::Error => tracing::error!(error = %err, code, "Registration submission failed"),
    }
}

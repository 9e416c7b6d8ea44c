//! Submission transport
//!
//! The controller hands a finished form to a [`Submitter`] and waits for a
//! record or an error. [`SimulatedSubmitter`] stands in for a backend; a
//! real network client implements the same trait.

mod simulated;

use async_trait::async_trait;
use intake_core::{RegistrationInput, RegistrationRecord, SubmitError};

pub use simulated::SimulatedSubmitter;

/// Sends one registration and returns the validated record.
///
/// Validation failures come back as [`SubmitError::Validation`]; problems
/// with the round trip itself as [`SubmitError::Transport`].
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, input: RegistrationInput) -> Result<RegistrationRecord, SubmitError>;
}

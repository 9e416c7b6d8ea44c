#![allow(dead_code)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use intake_services::{
    RegistrationConfig, RegistrationInput, RegistrationRecord, SimulatedSubmitter,
    SubmissionController, SubmitError, Submitter,
};

/// Wraps the simulated submitter and counts how often it was called
pub struct CountingSubmitter {
    inner: SimulatedSubmitter,
    calls: AtomicUsize,
}

impl CountingSubmitter {
    pub fn new(config: &RegistrationConfig) -> Self {
        Self {
            inner: SimulatedSubmitter::from_config(config),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Submitter for CountingSubmitter {
    async fn submit(&self, input: RegistrationInput) -> Result<RegistrationRecord, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.submit(input).await
    }
}

/// Fails every attempt in transit
pub struct UnreachableSubmitter;

#[async_trait]
impl Submitter for UnreachableSubmitter {
    async fn submit(&self, _input: RegistrationInput) -> Result<RegistrationRecord, SubmitError> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Err(SubmitError::Transport("connection refused".to_string()))
    }
}

/// Never answers
pub struct HangingSubmitter;

#[async_trait]
impl Submitter for HangingSubmitter {
    async fn submit(&self, _input: RegistrationInput) -> Result<RegistrationRecord, SubmitError> {
        std::future::pending::<()>().await;
        Err(SubmitError::Transport("unreachable".to_string()))
    }
}

pub fn test_config() -> RegistrationConfig {
    let _ = intake_services::init_tracing();
    RegistrationConfig::default()
}

pub fn counting_controller() -> (SubmissionController, Arc<CountingSubmitter>) {
    let config = test_config();
    let submitter = Arc::new(CountingSubmitter::new(&config));
    let controller = SubmissionController::new(submitter.clone(), &config);
    (controller, submitter)
}

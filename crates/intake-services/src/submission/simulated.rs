use std::time::Duration;

use async_trait::async_trait;
use intake_core::{
    RegistrationConfig, RegistrationInput, RegistrationRecord, RegistrationSchema, SubmitError,
};

use super::Submitter;

/// Waits a fixed delay, then validates in-process. Never fails on its own.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    schema: RegistrationSchema,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration, schema: RegistrationSchema) -> Self {
        Self { delay, schema }
    }

    pub fn from_config(config: &RegistrationConfig) -> Self {
        Self::new(
            config.submit_delay,
            RegistrationSchema::new(config.attachment_rules()),
        )
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, input: RegistrationInput) -> Result<RegistrationRecord, SubmitError> {
        tracing::debug!(
            delay_ms = self.delay.as_millis() as u64,
            "Simulating submission round trip"
        );
        tokio::time::sleep(self.delay).await;

        let record = self.schema.validate(&input)?;
        tracing::info!(registration_id = %record.id, "Registration accepted");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::{CvAttachment, Field};
    use tokio::time::Instant;

    fn input() -> RegistrationInput {
        RegistrationInput::from_pairs(
            [
                ("givenName", "Grace"),
                ("familyName", "Hopper"),
                ("email", "grace@example.com"),
                ("phone", "+12025550123"),
            ],
            Some(CvAttachment::with_size("cv.pdf", "application/pdf", 1024)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_configured_delay() {
        let submitter = SimulatedSubmitter::from_config(&RegistrationConfig::default());
        let started = Instant::now();

        let record = submitter.submit(input()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(3));
        assert_eq!(record.email, "grace@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_failure_after_delay() {
        let submitter =
            SimulatedSubmitter::new(Duration::from_millis(10), RegistrationSchema::default());
        let err = submitter
            .submit(input().with_value(Field::Email, "grace"))
            .await
            .unwrap_err();

        let errors = err.field_errors().unwrap();
        assert_eq!(errors.fields(), vec![Field::Email]);
    }
}

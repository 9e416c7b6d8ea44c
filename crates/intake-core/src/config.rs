//! Configuration module
//!
//! Settings for the registration flow: simulated round-trip latency,
//! submission timeout and the CV size limit.

use std::env;
use std::time::Duration;

use crate::constants::{
    CV_MAX_FILE_SIZE_BYTES, DEFAULT_SUBMIT_DELAY_MS, DEFAULT_SUBMIT_TIMEOUT_SECS,
};
use crate::models::AttachmentRules;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationConfig {
    pub environment: String,
    pub submit_delay: Duration,
    pub submit_timeout: Duration,
    pub cv_max_file_size_bytes: u64,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
            submit_timeout: Duration::from_secs(DEFAULT_SUBMIT_TIMEOUT_SECS),
            cv_max_file_size_bytes: CV_MAX_FILE_SIZE_BYTES,
        }
    }
}

impl RegistrationConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let submit_delay_ms = parse_u64(
            &lookup,
            "REGISTRATION_SUBMIT_DELAY_MS",
            DEFAULT_SUBMIT_DELAY_MS,
        )?;
        let submit_timeout_secs = parse_u64(
            &lookup,
            "REGISTRATION_SUBMIT_TIMEOUT_SECS",
            DEFAULT_SUBMIT_TIMEOUT_SECS,
        )?;
        let cv_max_file_size_bytes =
            parse_u64(&lookup, "CV_MAX_FILE_SIZE_BYTES", CV_MAX_FILE_SIZE_BYTES)?;

        let config = RegistrationConfig {
            environment,
            submit_delay: Duration::from_millis(submit_delay_ms),
            submit_timeout: Duration::from_secs(submit_timeout_secs),
            cv_max_file_size_bytes,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.submit_timeout.is_zero() {
            return Err(anyhow::anyhow!(
                "REGISTRATION_SUBMIT_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if self.submit_timeout <= self.submit_delay {
            return Err(anyhow::anyhow!(
                "REGISTRATION_SUBMIT_TIMEOUT_SECS must exceed the simulated submit delay"
            ));
        }

        if self.cv_max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "CV_MAX_FILE_SIZE_BYTES must be greater than zero"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn attachment_rules(&self) -> AttachmentRules {
        AttachmentRules::default().with_max_file_size(self.cv_max_file_size_bytes)
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", key)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults_when_unset() {
        let config = RegistrationConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RegistrationConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = RegistrationConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("REGISTRATION_SUBMIT_DELAY_MS", "250"),
            ("REGISTRATION_SUBMIT_TIMEOUT_SECS", "5"),
            ("CV_MAX_FILE_SIZE_BYTES", "1048576"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.submit_delay, Duration::from_millis(250));
        assert_eq!(config.submit_timeout, Duration::from_secs(5));
        assert_eq!(config.attachment_rules().max_file_size, 1_048_576);
    }

    #[test]
    fn test_from_lookup_rejects_non_numeric_delay() {
        let err = RegistrationConfig::from_lookup(lookup_from(&[(
            "REGISTRATION_SUBMIT_DELAY_MS",
            "three seconds",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("REGISTRATION_SUBMIT_DELAY_MS"));
    }

    #[test]
    fn test_from_lookup_rejects_timeout_not_above_delay() {
        let err = RegistrationConfig::from_lookup(lookup_from(&[
            ("REGISTRATION_SUBMIT_DELAY_MS", "5000"),
            ("REGISTRATION_SUBMIT_TIMEOUT_SECS", "5"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("must exceed"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = RegistrationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.submit_delay, Duration::from_secs(3));
        assert_eq!(config.attachment_rules().max_file_size, 5_242_880);
        assert!(!config.is_production());
    }

    #[test]
    fn test_timeout_must_exceed_delay() {
        let config = RegistrationConfig {
            submit_timeout: Duration::from_secs(2),
            ..RegistrationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_cv_limit_rejected() {
        let config = RegistrationConfig {
            cv_max_file_size_bytes: 0,
            ..RegistrationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let config = RegistrationConfig {
            environment: "Prod".to_string(),
            ..RegistrationConfig::default()
        };
        assert!(config.is_production());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::attachment::CvAttachment;
use super::field::Field;

/// Raw values of one submission attempt, keyed the way the form submits them.
///
/// Unknown keys are kept but never read. The CV travels separately under the
/// fixed `cv` key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    values: BTreeMap<String, String>,
    cv: Option<CvAttachment>,
}

impl RegistrationInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I, cv: Option<CvAttachment>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            cv,
        }
    }

    pub fn with_value(mut self, field: Field, value: impl Into<String>) -> Self {
        self.values.insert(field.key().to_string(), value.into());
        self
    }

    pub fn with_cv(mut self, cv: CvAttachment) -> Self {
        self.cv = Some(cv);
        self
    }

    /// Value submitted for `field`, looked up by its form key or snake_case name
    pub fn value(&self, field: Field) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| Field::from_key(k) == Some(field))
            .map(|(_, v)| v.as_str())
    }

    pub fn cv(&self) -> Option<&CvAttachment> {
        self.cv.as_ref()
    }

    pub fn into_cv(self) -> Option<CvAttachment> {
        self.cv
    }
}

/// A registration that passed every rule. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub cv: CvAttachment,
    pub submitted_at: DateTime<Utc>,
}

impl RegistrationRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

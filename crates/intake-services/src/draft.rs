use std::collections::BTreeMap;

use intake_core::{Field, RegistrationConfig, RegistrationInput};
use intake_processing::{AttachmentValidator, FileGate};

/// Values typed so far plus the file gate holding the CV selection
#[derive(Debug, Clone, Default)]
pub struct RegistrationDraft {
    values: BTreeMap<Field, String>,
    gate: FileGate,
}

impl RegistrationDraft {
    pub fn new(config: &RegistrationConfig) -> Self {
        Self {
            values: BTreeMap::new(),
            gate: FileGate::new(AttachmentValidator::new(&config.attachment_rules())),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn gate(&self) -> &FileGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut FileGate {
        &mut self.gate
    }

    /// Snapshot for one submission attempt
    pub fn to_input(&self) -> RegistrationInput {
        RegistrationInput::from_pairs(
            self.values.iter().map(|(f, v)| (f.key(), v.clone())),
            self.gate.file().cloned(),
        )
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.gate.reset();
    }
}

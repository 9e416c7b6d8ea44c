//! Confirmation summary shown once a registration is complete.

use intake_core::RegistrationRecord;
use intake_processing::{format_file_size, FilePreview, ObjectUrlStore};
use serde::Serialize;

pub const CONFIRMATION_HEADING: &str = "Registration Complete";
pub const CONFIRMATION_LEAD: &str =
    "Thank you for registering. Here's a summary of your information.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

impl SummaryRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    pub heading: &'static str,
    pub lead: &'static str,
    pub full_name: String,
    pub rows: Vec<SummaryRow>,
    pub notice: String,
}

impl ConfirmationView {
    pub fn from_record(record: &RegistrationRecord) -> Self {
        let full_name = record.full_name();

        let mut rows = vec![
            SummaryRow::new("Full Name", full_name.clone()),
            SummaryRow::new("Email", record.email.clone()),
            SummaryRow::new("Phone", record.phone.clone()),
        ];
        if let Some(address) = &record.address {
            rows.push(SummaryRow::new("Address", address.clone()));
        }
        // The CV row is labelled with the file name
        rows.push(SummaryRow::new(
            record.cv.name.clone(),
            format_file_size(record.cv.size),
        ));

        Self {
            heading: CONFIRMATION_HEADING,
            lead: CONFIRMATION_LEAD,
            full_name,
            rows,
            notice: format!("A confirmation email has been sent to {}", record.email),
        }
    }

    /// Preview of the submitted CV; its object URL lives as long as the
    /// returned value.
    pub fn preview(record: &RegistrationRecord, store: &ObjectUrlStore) -> FilePreview {
        FilePreview::new(store, record.cv.clone())
    }
}

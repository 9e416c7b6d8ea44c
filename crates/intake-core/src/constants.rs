//! Application-wide constants.

/// Largest CV accepted, in bytes (5 MiB).
pub const CV_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// The one MIME type the preview can embed.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Fixed wait standing in for the backend round trip.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 3000;

/// Upper bound on a single submission attempt before it is reported as failed.
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;

/// Phone numbers: optional `+`, a leading digit 1-9, 2 to 15 digits total.
pub const PHONE_PATTERN: &str = r"^\+?[1-9]\d{1,14}$";

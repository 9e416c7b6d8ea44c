//! Intake Processing Library
//!
//! Client-side handling of the CV attachment: the validator that checks a
//! selected file, the gate that holds the one accepted file, previews with
//! scoped object URLs, and the formatting used in hints and summaries.

pub mod format;
pub mod gate;
pub mod preview;
pub mod validator;

pub use format::{format_file_size, format_list, ListStyle};
pub use gate::{FileGate, GateError, GateMessage, GateOutcome, RejectReason, Rejection};
pub use preview::{FilePreview, ObjectUrl, ObjectUrlStore, PreviewContent};
pub use validator::{AttachmentError, AttachmentValidator};

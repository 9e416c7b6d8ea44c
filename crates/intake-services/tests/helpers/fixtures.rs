use bytes::Bytes;
use intake_services::{CvAttachment, Field, SubmissionController};

pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub fn pdf_cv() -> CvAttachment {
    CvAttachment::new("grace-hopper.pdf", "application/pdf", Bytes::from(vec![7u8; 1024]))
}

pub fn docx_cv() -> CvAttachment {
    CvAttachment::new("grace-hopper.docx", DOCX, Bytes::from(vec![7u8; 4096]))
}

pub fn png_file() -> CvAttachment {
    CvAttachment::with_size("portrait.png", "image/png", 2048)
}

pub const VALID_FIELDS: [(Field, &str); 5] = [
    (Field::GivenName, "Grace"),
    (Field::FamilyName, "Hopper"),
    (Field::Email, "grace.hopper@example.com"),
    (Field::Phone, "+12025550123"),
    (Field::Address, "Arlington, VA"),
];

/// Fill every text field with valid values and attach a PDF
pub async fn fill_valid_form(controller: &SubmissionController) {
    for (field, value) in VALID_FIELDS {
        controller.set_field(field, value).await.unwrap();
    }
    let outcome = controller.select_cv(vec![pdf_cv()]).await.unwrap();
    assert!(outcome.is_accepted());
}

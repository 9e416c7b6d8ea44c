use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{CV_MAX_FILE_SIZE_BYTES, PDF_CONTENT_TYPE};

/// A file handed over by the form: name, reported size, MIME type and content.
///
/// `size` is what the browser reported and is the value validation checks;
/// `content` is only carried for previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvAttachment {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    #[serde(skip)]
    pub content: Bytes,
}

impl CvAttachment {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, content: Bytes) -> Self {
        Self {
            name: name.into(),
            size: content.len() as u64,
            content_type: content_type.into(),
            content,
        }
    }

    /// Attachment with a reported size but no content (metadata-only selection)
    pub fn with_size(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: content_type.into(),
            content: Bytes::new(),
        }
    }

    /// Lowercased extension including the leading dot, e.g. `.pdf`
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
    }
}

/// Document formats accepted for a CV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
    Odt,
}

impl DocumentFormat {
    /// Display order used in hints and error messages
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Pdf,
        DocumentFormat::Doc,
        DocumentFormat::Docx,
        DocumentFormat::Odt,
    ];

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => PDF_CONTENT_TYPE,
            DocumentFormat::Doc => "application/msword",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Odt => "application/vnd.oasis.opendocument.text",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => ".pdf",
            DocumentFormat::Doc => ".doc",
            DocumentFormat::Docx => ".docx",
            DocumentFormat::Odt => ".odt",
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<DocumentFormat> {
        let normalized = content_type.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.content_type() == normalized)
    }

    /// Accepts the extension with or without the leading dot
    pub fn from_extension(extension: &str) -> Option<DocumentFormat> {
        let normalized = extension.trim_start_matches('.').to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| &f.extension()[1..] == normalized)
    }
}

/// Constraints a CV must satisfy. Shared by the file gate and the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRules {
    pub max_file_size: u64,
    pub formats: Vec<DocumentFormat>,
}

impl Default for AttachmentRules {
    fn default() -> Self {
        Self {
            max_file_size: CV_MAX_FILE_SIZE_BYTES,
            formats: DocumentFormat::ALL.to_vec(),
        }
    }
}

impl AttachmentRules {
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn accepts_content_type(&self, content_type: &str) -> bool {
        DocumentFormat::from_content_type(content_type)
            .map(|f| self.formats.contains(&f))
            .unwrap_or(false)
    }

    pub fn allowed_extensions(&self) -> Vec<String> {
        self.formats.iter().map(|f| f.extension().to_string()).collect()
    }

    pub fn allowed_content_types(&self) -> Vec<String> {
        self.formats
            .iter()
            .map(|f| f.content_type().to_string())
            .collect()
    }
}

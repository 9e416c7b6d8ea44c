use intake_core::models::{AttachmentRules, CvAttachment, DocumentFormat};
use std::path::Path;

/// Reasons a selected file cannot be used as a CV
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,
}

impl AttachmentError {
    /// Rejected because of what the file is rather than how big it is
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            AttachmentError::InvalidExtension { .. }
                | AttachmentError::InvalidContentType { .. }
                | AttachmentError::InvalidFilename(_)
        )
    }
}

/// CV file validator
///
/// Checks a selection against the attachment rules before it ever reaches
/// the registration schema.
#[derive(Debug, Clone)]
pub struct AttachmentValidator {
    max_file_size: u64,
    formats: Vec<DocumentFormat>,
}

impl Default for AttachmentValidator {
    fn default() -> Self {
        Self::new(&AttachmentRules::default())
    }
}

impl AttachmentValidator {
    pub fn new(rules: &AttachmentRules) -> Self {
        Self {
            max_file_size: rules.max_file_size,
            formats: rules.formats.clone(),
        }
    }

    pub fn allowed_extensions(&self) -> Vec<String> {
        self.formats
            .iter()
            .map(|f| f.extension().to_string())
            .collect()
    }

    pub fn allowed_content_types(&self) -> Vec<String> {
        self.formats
            .iter()
            .map(|f| f.content_type().to_string())
            .collect()
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: u64) -> Result<(), AttachmentError> {
        if size == 0 {
            return Err(AttachmentError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(AttachmentError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension
    pub fn validate_extension(&self, filename: &str) -> Result<DocumentFormat, AttachmentError> {
        let extension = extension_of(filename)?;

        DocumentFormat::from_extension(&extension)
            .filter(|f| self.formats.contains(f))
            .ok_or_else(|| AttachmentError::InvalidExtension {
                extension: format!(".{}", extension),
                allowed: self.allowed_extensions(),
            })
    }

    /// Validate content type
    pub fn validate_content_type(
        &self,
        content_type: &str,
    ) -> Result<DocumentFormat, AttachmentError> {
        DocumentFormat::from_content_type(content_type)
            .filter(|f| self.formats.contains(f))
            .ok_or_else(|| AttachmentError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types(),
            })
    }

    /// Validate that the content type matches the file extension, so a
    /// renamed file cannot pass as a document it is not.
    pub fn validate_extension_content_type_match(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<(), AttachmentError> {
        let extension = extension_of(filename)?;

        let Some(format) = DocumentFormat::from_extension(&extension) else {
            tracing::debug!(
                extension = %extension,
                content_type = %content_type,
                "Unknown extension, skipping content type/extension cross-validation"
            );
            return Ok(());
        };

        if !format.content_type().eq_ignore_ascii_case(content_type.trim()) {
            return Err(AttachmentError::InvalidContentType {
                content_type: format!(
                    "{} (does not match extension '.{}'. Expected: {})",
                    content_type,
                    extension,
                    format.content_type()
                ),
                allowed: self.allowed_content_types(),
            });
        }

        Ok(())
    }

    /// Validate all aspects of a file, including content type/extension matching
    pub fn validate_all(&self, file: &CvAttachment) -> Result<DocumentFormat, AttachmentError> {
        let format = self.validate_extension(&file.name)?;
        self.validate_content_type(&file.content_type)?;
        self.validate_extension_content_type_match(&file.name, &file.content_type)?;
        self.validate_file_size(file.size)?;
        Ok(format)
    }
}

fn extension_of(filename: &str) -> Result<String, AttachmentError> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| AttachmentError::InvalidFilename(filename.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    fn test_validator() -> AttachmentValidator {
        AttachmentValidator::default()
    }

    #[test]
    fn test_validate_file_size_ok() {
        let validator = test_validator();
        assert!(validator.validate_file_size(512 * 1024).is_ok());
        assert!(validator.validate_file_size(5 * 1024 * 1024).is_ok());
    }

    #[test]
    fn test_validate_file_size_too_large() {
        let validator = test_validator();
        assert_eq!(
            validator.validate_file_size(5_242_881),
            Err(AttachmentError::FileTooLarge {
                size: 5_242_881,
                max: 5_242_880
            })
        );
    }

    #[test]
    fn test_validate_file_size_empty() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(0),
            Err(AttachmentError::EmptyFile)
        ));
    }

    #[test]
    fn test_validate_extension_ok() {
        let validator = test_validator();
        assert_eq!(validator.validate_extension("cv.pdf"), Ok(DocumentFormat::Pdf));
        assert_eq!(validator.validate_extension("CV.DOCX"), Ok(DocumentFormat::Docx));
        assert_eq!(validator.validate_extension("cv.odt"), Ok(DocumentFormat::Odt));
    }

    #[test]
    fn test_validate_extension_invalid() {
        let validator = test_validator();
        let err = validator.validate_extension("photo.png").unwrap_err();
        assert!(err.is_type_error());
        assert!(err.to_string().contains(".png"));
    }

    #[test]
    fn test_validate_extension_no_extension() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_extension("resume"),
            Err(AttachmentError::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_validate_content_type() {
        let validator = test_validator();
        assert!(validator.validate_content_type("application/pdf").is_ok());
        assert!(validator.validate_content_type("APPLICATION/MSWORD").is_ok());
        assert!(validator.validate_content_type("image/png").is_err());
    }

    #[test]
    fn test_validate_extension_content_type_match() {
        let validator = test_validator();
        assert!(validator
            .validate_extension_content_type_match("cv.docx", DOCX)
            .is_ok());
        assert!(validator
            .validate_extension_content_type_match("cv.pdf", "application/msword")
            .is_err());
        // Unknown extensions are left to validate_extension
        assert!(validator
            .validate_extension_content_type_match("cv.xyz", "application/xyz")
            .is_ok());
    }

    #[test]
    fn test_validate_all() {
        let validator = test_validator();
        let ok = CvAttachment::with_size("cv.pdf", "application/pdf", 1024);
        assert_eq!(validator.validate_all(&ok), Ok(DocumentFormat::Pdf));

        let renamed = CvAttachment::with_size("cv.pdf", "image/png", 1024);
        assert!(validator.validate_all(&renamed).unwrap_err().is_type_error());

        let large = CvAttachment::with_size("cv.odt", "application/vnd.oasis.opendocument.text", 6 * 1024 * 1024);
        assert!(matches!(
            validator.validate_all(&large),
            Err(AttachmentError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_restricted_formats() {
        let rules = AttachmentRules {
            max_file_size: 1024,
            formats: vec![DocumentFormat::Pdf],
        };
        let validator = AttachmentValidator::new(&rules);
        assert!(validator.validate_extension("cv.doc").is_err());
        assert_eq!(validator.allowed_extensions(), vec![".pdf"]);
    }
}

//! Attachment error types.

use thiserror::Error;

use ledgerdesk_shared::AppError;
use ledgerdesk_shared::types::DocId;

/// Attachment errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    /// The base64 payload does not decode.
    #[error("attachment {doc_id} has invalid content: {reason}")]
    InvalidEncoding {
        /// Document that failed.
        doc_id: DocId,
        /// Decoder message.
        reason: String,
    },

    /// The file has no content.
    #[error("file is empty")]
    Empty,

    /// MIME type not accepted.
    #[error("invalid MIME type: {0}")]
    InvalidMimeType(String),

    /// File too large.
    #[error("file too large: {size} bytes exceeds maximum {max} bytes")]
    FileTooLarge {
        /// Actual file size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },
}

impl AttachmentError {
    /// Returns the error code for logs and UI hooks.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEncoding { .. } => "ATTACHMENT_INVALID_ENCODING",
            Self::Empty => "ATTACHMENT_EMPTY",
            Self::InvalidMimeType(_) => "ATTACHMENT_INVALID_MIME_TYPE",
            Self::FileTooLarge { .. } => "ATTACHMENT_TOO_LARGE",
        }
    }
}

impl From<AttachmentError> for AppError {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::InvalidEncoding { .. } => Self::Decode(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}

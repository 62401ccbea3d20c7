//! Attachment wire types.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use ledgerdesk_shared::types::DocId;

use super::AttachmentError;

/// Largest file accepted for upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for upload: receipts are photos or PDFs.
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
];

/// Returns true if uploads of `content_type` are accepted.
#[must_use]
pub fn is_content_type_allowed(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(content_type.trim()))
}

/// A document as downloaded from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attachment {
    /// Backend key.
    pub doc_id: DocId,
    /// Name the file was uploaded with.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// Base64 file content.
    pub content: String,
}

impl Attachment {
    /// Decodes the base64 content.
    pub fn decode(&self) -> Result<Bytes, AttachmentError> {
        STANDARD
            .decode(self.content.trim())
            .map(Bytes::from)
            .map_err(|err| AttachmentError::InvalidEncoding {
                doc_id: self.doc_id,
                reason: err.to_string(),
            })
    }

    /// File name safe to create on disk.
    #[must_use]
    pub fn safe_file_name(&self) -> String {
        let name = sanitize_file_name(&self.file_name);
        if name.trim_matches(['.', '_']).is_empty() {
            format!("document-{}", self.doc_id)
        } else {
            name
        }
    }
}

/// A document ready to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewAttachment {
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// Base64 file content.
    pub content: String,
}

impl NewAttachment {
    /// Checks and encodes a file for upload.
    pub fn from_bytes(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: &[u8],
    ) -> Result<Self, AttachmentError> {
        let content_type = content_type.into();
        if data.is_empty() {
            return Err(AttachmentError::Empty);
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AttachmentError::FileTooLarge {
                size: data.len(),
                max: MAX_UPLOAD_BYTES,
            });
        }
        if !is_content_type_allowed(&content_type) {
            return Err(AttachmentError::InvalidMimeType(content_type));
        }
        Ok(Self {
            file_name: file_name.into(),
            content_type,
            content: STANDARD.encode(data),
        })
    }
}

/// Replaces anything but ASCII alphanumerics, dots, hyphens and underscores
/// with `_`, and strips leading dots so the name cannot escape a directory.
#[must_use]
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

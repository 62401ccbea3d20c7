//! Ledger document attachments.
//!
//! Documents travel base64-encoded in JSON. This module converts between the
//! wire form and raw bytes and checks uploads before they are sent. Writing a
//! download to disk is left to the client crate.

mod error;
mod types;

pub use error::AttachmentError;
pub use types::{
    ALLOWED_CONTENT_TYPES, Attachment, MAX_UPLOAD_BYTES, NewAttachment, is_content_type_allowed,
    sanitize_file_name,
};

//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Generic message shown inline when a request fails for reasons the user cannot act on.
pub const GENERIC_INLINE_ERROR: &str = "Something went wrong. Please try again.";

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad credentials or a rejected session.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The requested record does not exist on the backend.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Body or reason phrase returned by the backend.
        message: String,
    },

    /// A form field is missing or invalid (checked client-side).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The role is not present in the policy table.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// Durable client storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A response or stored value could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Builds the error for a non-2xx backend response.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Auth(message),
            404 => Self::NotFound(message),
            _ => Self::Server { status, message },
        }
    }

    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::Server { status, .. } => Some(*status),
            Self::Validation(_)
            | Self::UnknownRole(_)
            | Self::Network(_)
            | Self::Storage(_)
            | Self::Decode(_)
            | Self::Config(_) => None,
        }
    }

    /// Returns the stable error code for logs and UI hooks.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(_) => "AUTH_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Server { .. } => "SERVER_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Returns true for errors that block a form submission and keep it open.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the best-effort message a page shows inline.
    ///
    /// Validation and auth messages are actionable and shown as-is; everything
    /// else collapses to [`GENERIC_INLINE_ERROR`].
    #[must_use]
    pub fn inline_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Auth(_) => "Invalid user id or password".to_string(),
            Self::NotFound(_) => "The requested record was not found".to_string(),
            _ => GENERIC_INLINE_ERROR.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(401, "AUTH_ERROR")]
    #[case(403, "AUTH_ERROR")]
    #[case(404, "NOT_FOUND")]
    #[case(500, "SERVER_ERROR")]
    #[case(502, "SERVER_ERROR")]
    #[case(409, "SERVER_ERROR")]
    fn test_from_status(#[case] status: u16, #[case] code: &str) {
        assert_eq!(AppError::from_status(status, "x").error_code(), code);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Auth(String::new()).status_code(), Some(401));
        assert_eq!(AppError::NotFound(String::new()).status_code(), Some(404));
        assert_eq!(
            AppError::Server {
                status: 503,
                message: String::new()
            }
            .status_code(),
            Some(503)
        );
        assert_eq!(AppError::Validation(String::new()).status_code(), None);
        assert_eq!(AppError::Network(String::new()).status_code(), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Auth("msg".into()).to_string(),
            "Authentication failed: msg"
        );
        assert_eq!(
            AppError::Server {
                status: 500,
                message: "boom".into()
            }
            .to_string(),
            "Server error (500): boom"
        );
        assert_eq!(
            AppError::UnknownRole("Janitor".into()).to_string(),
            "Unknown role: Janitor"
        );
    }

    #[test]
    fn test_inline_message() {
        assert_eq!(
            AppError::Validation("Please select a collector".into()).inline_message(),
            "Please select a collector"
        );
        assert_eq!(
            AppError::Network("connection refused".into()).inline_message(),
            GENERIC_INLINE_ERROR
        );
        assert_eq!(
            AppError::Server {
                status: 500,
                message: "stack trace".into()
            }
            .inline_message(),
            GENERIC_INLINE_ERROR
        );
        assert!(AppError::Validation(String::new()).is_validation());
        assert!(!AppError::Decode(String::new()).is_validation());
    }
}

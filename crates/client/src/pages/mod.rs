//! Screen controllers.
//!
//! Each page keeps the rows it shows, a loading flag and the inline error
//! string. A failed request is logged and turned into that string; pages never
//! panic and never retry.

mod account;
mod approvals;
mod ledger;
mod liabilities;
mod users;

use tracing::error;

use ledgerdesk_shared::AppError;

pub use account::AccountPage;
pub use approvals::ApprovalsPage;
pub use ledger::LedgerPage;
pub use liabilities::LiabilitiesPage;
pub use users::UsersPage;

/// Rows, loading flag and inline error of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState<T> {
    /// Rows on screen.
    pub rows: Vec<T>,
    /// A request is in flight.
    pub loading: bool,
    /// Inline error from the last failed action.
    pub error: Option<String>,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> PageState<T> {
    /// Marks a request as started and clears the previous error.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Ends a request. On failure the error is logged and shown inline.
    pub fn finish<R>(&mut self, action: &'static str, result: Result<R, AppError>) -> Option<R> {
        self.loading = false;
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.fail(action, &err);
                None
            }
        }
    }

    /// Replaces the rows with a successful load.
    pub fn load(&mut self, action: &'static str, result: Result<Vec<T>, AppError>) -> bool {
        match self.finish(action, result) {
            Some(rows) => {
                self.rows = rows;
                true
            }
            None => false,
        }
    }

    /// Records a failure without touching the rows.
    pub fn fail(&mut self, action: &'static str, err: &AppError) {
        self.loading = false;
        if err.is_validation() {
            tracing::debug!(action, error = %err, "validation failed");
        } else {
            error!(action, code = err.error_code(), error = %err, "request failed");
        }
        self.error = Some(err.inline_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdesk_shared::error::GENERIC_INLINE_ERROR;

    #[test]
    fn test_load_replaces_rows() {
        let mut state = PageState::default();
        state.begin();
        assert!(state.loading);
        assert!(state.load("list", Ok(vec![1, 2])));
        assert_eq!(state.rows, vec![1, 2]);
        assert!(!state.loading);
    }

    #[test]
    fn test_network_failure_shows_generic_message_and_keeps_rows() {
        let mut state = PageState {
            rows: vec![1],
            ..PageState::default()
        };
        state.begin();
        assert!(!state.load("list", Err(AppError::Network("connection refused".into()))));
        assert_eq!(state.rows, vec![1]);
        assert_eq!(state.error.as_deref(), Some(GENERIC_INLINE_ERROR));
        assert!(!state.loading);
    }

    #[test]
    fn test_validation_failure_shows_message() {
        let mut state: PageState<u8> = PageState::default();
        state.fail("save", &AppError::Validation("Date is required".into()));
        assert_eq!(state.error.as_deref(), Some("Date is required"));
    }
}

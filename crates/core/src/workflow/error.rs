//! Workflow error types for ledger submissions and decisions.

use thiserror::Error;

use ledgerdesk_shared::AppError;

use crate::ledger::LedgerField;
use crate::role::UserRole;
use crate::workflow::types::WorkFlow;

/// Errors raised by the client-side workflow rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The role may not submit ledger entries at all.
    #[error("{role} cannot submit ledger entries")]
    SubmissionNotAllowed {
        /// The role that attempted the submission.
        role: UserRole,
    },

    /// A field required for a submission is missing.
    #[error("{0} is required")]
    MissingField(LedgerField),

    /// The role may not move an entry between these stages.
    #[error("{role} cannot move an entry from {from} to {to}")]
    TransitionNotAllowed {
        /// The acting role.
        role: UserRole,
        /// Current stage.
        from: WorkFlow,
        /// Requested stage.
        to: WorkFlow,
    },

    /// The role may not put an entry into this stage.
    #[error("{role} cannot set an entry to {stage}")]
    WorkFlowNotPermitted {
        /// The submitting role.
        role: UserRole,
        /// Requested stage.
        stage: WorkFlow,
    },

    /// A rejection needs a comment.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,
}

impl WorkflowError {
    /// Returns the error code for logs and UI hooks.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SubmissionNotAllowed { .. } => "SUBMISSION_NOT_ALLOWED",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::TransitionNotAllowed { .. } => "TRANSITION_NOT_ALLOWED",
            Self::WorkFlowNotPermitted { .. } => "WORKFLOW_NOT_PERMITTED",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        Self::Validation(err.to_string())
    }
}

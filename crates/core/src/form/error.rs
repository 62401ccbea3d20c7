//! Ledger form errors.

use thiserror::Error;

use ledgerdesk_shared::AppError;

use super::FormField;
use crate::workflow::WorkflowError;

/// Local validation failure. The form stays open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// No amount entered.
    #[error("Amount is required")]
    AmountRequired,

    /// Amount is zero or negative.
    #[error("Amount must be greater than zero")]
    AmountNotPositive,

    /// Amount text does not parse.
    #[error("{0:?} is not a valid amount")]
    InvalidAmount(String),

    /// No date entered.
    #[error("Date is required")]
    DateRequired,

    /// No transaction type selected.
    #[error("Transaction type is required")]
    TransactionTypeRequired,

    /// A retailer's cash handover names no collector.
    #[error("Select the collector receiving the cash")]
    CollectorRequired,

    /// A collector's handover names no cashier.
    #[error("Select the cashier receiving the cash")]
    CashierRequired,

    /// The field is hidden or read-only in this form.
    #[error("{0} cannot be changed here")]
    FieldLocked(FormField),

    /// A review form was saved without a decision.
    #[error("Nothing to save")]
    NoChanges,

    /// Save or edit after the form closed.
    #[error("The form is closed")]
    Closed,

    /// The workflow rules refused the submission.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl FormError {
    /// Returns the error code for logs and UI hooks.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AmountRequired => "AMOUNT_REQUIRED",
            Self::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::DateRequired => "DATE_REQUIRED",
            Self::TransactionTypeRequired => "TRANSACTION_TYPE_REQUIRED",
            Self::CollectorRequired => "COLLECTOR_REQUIRED",
            Self::CashierRequired => "CASHIER_REQUIRED",
            Self::FieldLocked(_) => "FIELD_LOCKED",
            Self::NoChanges => "NO_CHANGES",
            Self::Closed => "FORM_CLOSED",
            Self::Workflow(err) => err.error_code(),
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        Self::Validation(err.to_string())
    }
}

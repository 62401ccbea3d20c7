//! Role-shaped ledger submissions.
//!
//! A form produces an open-shaped [`LedgerPayload`]. At the submission boundary it
//! is sanitized and turned into a [`LedgerSubmission`] whose variant carries only
//! the fields the submitting role may set.

use chrono::NaiveDate;

use ledgerdesk_shared::types::{Amount, DocId, LedgerEntryId, UserId};

use crate::ledger::{LedgerField, LedgerPayload, TransactionType};
use crate::role::UserRole;
use crate::workflow::error::WorkflowError;
use crate::workflow::rules::{SanitizeFlag, Sanitized, sanitize_ledger_payload};
use crate::workflow::types::WorkFlow;

/// Fields every submitting role sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetails {
    /// Entry being edited, `None` for a new entry.
    pub id: Option<LedgerEntryId>,
    /// Amount handed over.
    pub amount: Amount,
    /// How it was handed over.
    pub transaction_type: TransactionType,
    /// Requested stage; new entries start `Pending`.
    pub work_flow: WorkFlow,
    /// Date recorded.
    pub date: NaiveDate,
    /// Date the cash changed hands.
    pub given_on: Option<NaiveDate>,
    /// Free-text comment.
    pub comment: Option<String>,
    /// Attached document.
    pub doc_id: Option<DocId>,
}

/// A retailer handing cash to a collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetailerSubmission {
    /// The submitting retailer.
    pub retailer_id: UserId,
    /// Collector receiving the cash.
    pub collector_id: Option<UserId>,
    /// Common fields.
    pub details: EntryDetails,
}

/// A collector handing collected cash to a cashier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorSubmission {
    /// The submitting collector.
    pub collector_id: UserId,
    /// Cashier receiving the cash.
    pub cashier_id: Option<UserId>,
    /// Common fields.
    pub details: EntryDetails,
}

/// A cashier or master cashier recording a handover upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashierSubmission {
    /// The submitting cashier.
    pub cashier_id: UserId,
    /// Common fields.
    pub details: EntryDetails,
}

/// An admin recording an entry on behalf of anyone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSubmission {
    /// Collector involved.
    pub collector_id: Option<UserId>,
    /// Cashier involved.
    pub cashier_id: Option<UserId>,
    /// Retailer involved.
    pub retailer_id: Option<UserId>,
    /// Common fields.
    pub details: EntryDetails,
}

/// A ledger submission shaped by the submitting role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerSubmission {
    /// Submitted by a retailer.
    Retailer(RetailerSubmission),
    /// Submitted by a collector.
    Collector(CollectorSubmission),
    /// Submitted by a cashier or master cashier.
    Cashier(CashierSubmission),
    /// Submitted by an admin.
    Admin(AdminSubmission),
}

impl LedgerSubmission {
    /// Sanitizes `payload` for `role` and builds the role's variant.
    ///
    /// The submitting user's own identity field is always set to `author`,
    /// whatever the payload claimed. A stage the role may not set is an error.
    pub fn from_payload(
        role: UserRole,
        author: UserId,
        payload: LedgerPayload,
    ) -> Result<Self, WorkflowError> {
        Self::build(role, author, None, payload)
    }

    /// Like [`from_payload`](Self::from_payload) for an entry currently at
    /// `current`. An unchanged stage is carried over even when the role could
    /// not set it itself.
    pub fn for_edit(
        role: UserRole,
        author: UserId,
        current: WorkFlow,
        payload: LedgerPayload,
    ) -> Result<Self, WorkflowError> {
        Self::build(role, author, Some(current), payload)
    }

    fn build(
        role: UserRole,
        author: UserId,
        current: Option<WorkFlow>,
        payload: LedgerPayload,
    ) -> Result<Self, WorkflowError> {
        if role == UserRole::ZoneManager {
            return Err(WorkflowError::SubmissionNotAllowed { role });
        }
        let requested = payload.work_flow;
        let Sanitized { payload, flags } = sanitize_ledger_payload(role, payload);
        let work_flow = match requested {
            Some(stage) if current == Some(stage) => stage,
            Some(stage) if flags.contains(&SanitizeFlag::WorkFlowNotPermitted(stage)) => {
                return Err(WorkflowError::WorkFlowNotPermitted { role, stage });
            }
            Some(stage) => stage,
            None => current.unwrap_or(WorkFlow::Pending),
        };
        let details = EntryDetails {
            id: payload.id,
            amount: payload
                .amount
                .ok_or(WorkflowError::MissingField(LedgerField::Amount))?,
            transaction_type: payload
                .transaction_type
                .ok_or(WorkflowError::MissingField(LedgerField::TransactionType))?,
            work_flow,
            date: payload
                .date
                .ok_or(WorkflowError::MissingField(LedgerField::Date))?,
            given_on: payload.given_on,
            comment: payload.comment,
            doc_id: payload.doc_id,
        };

        Ok(match role {
            UserRole::Retailer => Self::Retailer(RetailerSubmission {
                retailer_id: author,
                collector_id: payload.collector_id,
                details,
            }),
            UserRole::Collector => Self::Collector(CollectorSubmission {
                collector_id: author,
                cashier_id: payload.cashier_id,
                details,
            }),
            UserRole::Cashier | UserRole::MasterCashier => Self::Cashier(CashierSubmission {
                cashier_id: author,
                details,
            }),
            UserRole::Admin => Self::Admin(AdminSubmission {
                collector_id: payload.collector_id,
                cashier_id: payload.cashier_id,
                retailer_id: payload.retailer_id,
                details,
            }),
            UserRole::ZoneManager => return Err(WorkflowError::SubmissionNotAllowed { role }),
        })
    }

    /// Common fields of any variant.
    #[must_use]
    pub fn details(&self) -> &EntryDetails {
        match self {
            Self::Retailer(s) => &s.details,
            Self::Collector(s) => &s.details,
            Self::Cashier(s) => &s.details,
            Self::Admin(s) => &s.details,
        }
    }

    /// Converts back to the wire payload.
    #[must_use]
    pub fn to_payload(&self) -> LedgerPayload {
        let details = self.details();
        let mut payload = LedgerPayload {
            id: details.id,
            amount: Some(details.amount),
            transaction_type: Some(details.transaction_type),
            work_flow: Some(details.work_flow),
            date: Some(details.date),
            given_on: details.given_on,
            comment: details.comment.clone(),
            doc_id: details.doc_id,
            ..LedgerPayload::default()
        };
        match self {
            Self::Retailer(s) => {
                payload.retailer_id = Some(s.retailer_id);
                payload.collector_id = s.collector_id;
            }
            Self::Collector(s) => {
                payload.collector_id = Some(s.collector_id);
                payload.cashier_id = s.cashier_id;
            }
            Self::Cashier(s) => {
                payload.cashier_id = Some(s.cashier_id);
            }
            Self::Admin(s) => {
                payload.collector_id = s.collector_id;
                payload.cashier_id = s.cashier_id;
                payload.retailer_id = s.retailer_id;
            }
        }
        payload
    }
}

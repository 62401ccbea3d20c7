//! Ledger entry records and form payloads.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ledgerdesk_shared::types::{Amount, DocId, LedgerEntryId, UserId};

use super::transaction::TransactionType;
use crate::workflow::WorkFlow;

/// A cash handover as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LedgerEntry {
    /// Backend key.
    pub id: LedgerEntryId,
    /// Amount handed over.
    pub amount: Amount,
    /// How the amount was handed over.
    pub transaction_type: TransactionType,
    /// Current workflow stage.
    pub work_flow: WorkFlow,
    /// Date the entry was recorded.
    pub date: NaiveDate,
    /// Date the cash actually changed hands.
    #[serde(default)]
    pub given_on: Option<NaiveDate>,
    /// Free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Collector involved, if any.
    #[serde(default)]
    pub collector_id: Option<UserId>,
    /// Cashier involved, if any.
    #[serde(default)]
    pub cashier_id: Option<UserId>,
    /// Retailer involved, if any.
    #[serde(default)]
    pub retailer_id: Option<UserId>,
    /// Attached document, if any.
    #[serde(default)]
    pub doc_id: Option<DocId>,
}

impl LedgerEntry {
    /// Returns true when a retailer recorded this handover.
    #[must_use]
    pub fn is_retailer_entry(&self) -> bool {
        self.retailer_id.is_some()
    }

    /// Converts the entry into an editable payload.
    #[must_use]
    pub fn to_payload(&self) -> LedgerPayload {
        LedgerPayload {
            id: Some(self.id),
            amount: Some(self.amount),
            transaction_type: Some(self.transaction_type),
            work_flow: Some(self.work_flow),
            date: Some(self.date),
            given_on: self.given_on,
            comment: self.comment.clone(),
            collector_id: self.collector_id,
            cashier_id: self.cashier_id,
            retailer_id: self.retailer_id,
            doc_id: self.doc_id,
        }
    }
}

/// Open-shaped ledger data as a form produces it.
///
/// Every field is optional; the rule engine decides which ones a role may set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LedgerPayload {
    /// Set when editing an existing entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LedgerEntryId>,
    /// Amount handed over.
    #[serde(default)]
    pub amount: Option<Amount>,
    /// How the amount was handed over.
    #[serde(default)]
    pub transaction_type: Option<TransactionType>,
    /// Requested workflow stage.
    #[serde(default)]
    pub work_flow: Option<WorkFlow>,
    /// Date the entry is recorded for.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Date the cash changed hands.
    #[serde(default)]
    pub given_on: Option<NaiveDate>,
    /// Free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Collector involved.
    #[serde(default)]
    pub collector_id: Option<UserId>,
    /// Cashier involved.
    #[serde(default)]
    pub cashier_id: Option<UserId>,
    /// Retailer involved.
    #[serde(default)]
    pub retailer_id: Option<UserId>,
    /// Attached document.
    #[serde(default)]
    pub doc_id: Option<DocId>,
}

/// A settable field of a [`LedgerPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LedgerField {
    /// `Amount`
    Amount,
    /// `TransactionType`
    TransactionType,
    /// `WorkFlow`
    WorkFlow,
    /// `Date`
    Date,
    /// `GivenOn`
    GivenOn,
    /// `Comment`
    Comment,
    /// `CollectorId`
    CollectorId,
    /// `CashierId`
    CashierId,
    /// `RetailerId`
    RetailerId,
    /// `DocId`
    DocId,
}

impl LedgerField {
    /// Every settable field.
    pub const ALL: [Self; 10] = [
        Self::Amount,
        Self::TransactionType,
        Self::WorkFlow,
        Self::Date,
        Self::GivenOn,
        Self::Comment,
        Self::CollectorId,
        Self::CashierId,
        Self::RetailerId,
        Self::DocId,
    ];

    /// Fields every submitting role may set.
    pub const COMMON: [Self; 6] = [
        Self::Amount,
        Self::TransactionType,
        Self::Date,
        Self::GivenOn,
        Self::Comment,
        Self::DocId,
    ];

    /// Wire name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::TransactionType => "TransactionType",
            Self::WorkFlow => "WorkFlow",
            Self::Date => "Date",
            Self::GivenOn => "GivenOn",
            Self::Comment => "Comment",
            Self::CollectorId => "CollectorId",
            Self::CashierId => "CashierId",
            Self::RetailerId => "RetailerId",
            Self::DocId => "DocId",
        }
    }
}

impl fmt::Display for LedgerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LedgerPayload {
    /// Returns true if `field` holds a value.
    #[must_use]
    pub fn is_set(&self, field: LedgerField) -> bool {
        match field {
            LedgerField::Amount => self.amount.is_some(),
            LedgerField::TransactionType => self.transaction_type.is_some(),
            LedgerField::WorkFlow => self.work_flow.is_some(),
            LedgerField::Date => self.date.is_some(),
            LedgerField::GivenOn => self.given_on.is_some(),
            LedgerField::Comment => self.comment.is_some(),
            LedgerField::CollectorId => self.collector_id.is_some(),
            LedgerField::CashierId => self.cashier_id.is_some(),
            LedgerField::RetailerId => self.retailer_id.is_some(),
            LedgerField::DocId => self.doc_id.is_some(),
        }
    }

    /// Clears `field`, returning true if it held a value.
    pub fn clear(&mut self, field: LedgerField) -> bool {
        let was_set = self.is_set(field);
        match field {
            LedgerField::Amount => self.amount = None,
            LedgerField::TransactionType => self.transaction_type = None,
            LedgerField::WorkFlow => self.work_flow = None,
            LedgerField::Date => self.date = None,
            LedgerField::GivenOn => self.given_on = None,
            LedgerField::Comment => self.comment = None,
            LedgerField::CollectorId => self.collector_id = None,
            LedgerField::CashierId => self.cashier_id = None,
            LedgerField::RetailerId => self.retailer_id = None,
            LedgerField::DocId => self.doc_id = None,
        }
        was_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_json() -> &'static str {
        r#"{
            "Id": 31,
            "Amount": 1500.5,
            "TransactionType": 2,
            "WorkFlow": 1,
            "Date": "2024-03-01",
            "GivenOn": "2024-02-29",
            "Comment": "UPI ref 8812",
            "CollectorId": 4,
            "CashierId": null,
            "RetailerId": 17,
            "DocId": 900
        }"#
    }

    #[test]
    fn test_entry_wire_format() {
        let entry: LedgerEntry = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(entry.id, LedgerEntryId::new(31));
        assert_eq!(entry.amount, Amount::new(dec!(1500.5)));
        assert_eq!(entry.transaction_type, TransactionType::BankUpi);
        assert_eq!(entry.work_flow, WorkFlow::Pending);
        assert_eq!(entry.cashier_id, None);
        assert_eq!(entry.doc_id, Some(DocId::new(900)));
        assert!(entry.is_retailer_entry());
    }

    #[test]
    fn test_entry_optional_fields_may_be_absent() {
        let json = r#"{"Id":1,"Amount":"10","TransactionType":1,"WorkFlow":5,"Date":"2024-01-05"}"#;
        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.given_on, None);
        assert_eq!(entry.comment, None);
        assert!(!entry.is_retailer_entry());
    }

    #[test]
    fn test_to_payload_copies_every_field() {
        let entry: LedgerEntry = serde_json::from_str(sample_json()).unwrap();
        let payload = entry.to_payload();
        for field in LedgerField::ALL {
            let expected = !matches!(field, LedgerField::CashierId);
            assert_eq!(payload.is_set(field), expected, "{field}");
        }
        assert_eq!(payload.id, Some(entry.id));
    }

    #[test]
    fn test_clear_reports_previous_state() {
        let mut payload = LedgerPayload {
            comment: Some("x".into()),
            ..LedgerPayload::default()
        };
        assert!(payload.clear(LedgerField::Comment));
        assert!(!payload.clear(LedgerField::Comment));
        assert!(!payload.is_set(LedgerField::Comment));
    }
}

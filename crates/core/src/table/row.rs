//! Row access for the table widget.

use serde_json::Value;

use ledgerdesk_shared::types::format_amount_str;

use super::Column;
use crate::ledger::LedgerEntry;
use crate::liability::LiabilitySummary;
use crate::user::User;

/// A row the table can filter, sort and render.
pub trait TableRow {
    /// Raw text of the cell under `key`, `None` when the row has no value.
    fn cell(&self, key: &str) -> Option<String>;
}

impl TableRow for Value {
    fn cell(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl TableRow for LedgerEntry {
    fn cell(&self, key: &str) -> Option<String> {
        match key {
            "Id" => Some(self.id.to_string()),
            "Amount" => Some(self.amount.value().to_string()),
            "TransactionType" => Some(self.transaction_type.default_label().to_string()),
            "WorkFlow" => Some(self.work_flow.default_label().to_string()),
            "Date" => Some(self.date.to_string()),
            "GivenOn" => self.given_on.map(|d| d.to_string()),
            "Comment" => self.comment.clone(),
            "CollectorId" => self.collector_id.map(|id| id.to_string()),
            "CashierId" => self.cashier_id.map(|id| id.to_string()),
            "RetailerId" => self.retailer_id.map(|id| id.to_string()),
            "DocId" => self.doc_id.map(|id| id.to_string()),
            _ => None,
        }
    }
}

impl TableRow for LiabilitySummary {
    fn cell(&self, key: &str) -> Option<String> {
        match key {
            "UserId" => Some(self.user_id.to_string()),
            "UserName" => Some(self.user_name.clone()),
            "ParentName" => self.parent_name.clone(),
            "TotalGiven" => Some(self.total_given.value().to_string()),
            "TotalApproved" => Some(self.total_approved.value().to_string()),
            "TotalPending" => Some(self.total_pending.value().to_string()),
            "Outstanding" => Some(self.outstanding.value().to_string()),
            "LastGivenOn" => self.last_given_on.map(|d| d.to_string()),
            _ => None,
        }
    }
}

impl TableRow for User {
    fn cell(&self, key: &str) -> Option<String> {
        match key {
            "Id" => Some(self.id.to_string()),
            "UserName" => Some(self.user_name.clone()),
            "UserType" => Some(self.user_type.clone()),
            "ParentId" => self.parent_id.map(|id| id.to_string()),
            _ => None,
        }
    }
}

/// Columns of a ledger listing.
#[must_use]
pub fn ledger_columns() -> Vec<Column> {
    vec![
        Column::new("Id", "#"),
        Column::new("Date", "Date"),
        Column::new("Amount", "Amount").with_formatter(format_amount_str),
        Column::new("TransactionType", "Type"),
        Column::new("WorkFlow", "Status"),
        Column::new("GivenOn", "Given On"),
        Column::new("Comment", "Comment"),
    ]
}

/// Columns of a liability report.
#[must_use]
pub fn liability_columns() -> Vec<Column> {
    vec![
        Column::new("UserName", "Name"),
        Column::new("ParentName", "Owed To"),
        Column::new("TotalGiven", "Given").with_formatter(format_amount_str),
        Column::new("TotalApproved", "Approved").with_formatter(format_amount_str),
        Column::new("TotalPending", "Pending").with_formatter(format_amount_str),
        Column::new("Outstanding", "Outstanding").with_formatter(format_amount_str),
        Column::new("LastGivenOn", "Last Handover"),
    ]
}

/// Columns of the user list.
#[must_use]
pub fn user_columns() -> Vec<Column> {
    vec![
        Column::new("Id", "#"),
        Column::new("UserName", "Name"),
        Column::new("UserType", "Role"),
        Column::new("ParentId", "Reports To"),
    ]
}

//! Cash-handover ledger records.
//!
//! This module holds the data the client exchanges with the backend:
//! - Ledger entries as listed by the backend
//! - The open-shaped payload a form produces before it is sanitized
//! - Transaction types (cash, bank/UPI, other)

pub mod entry;
pub mod transaction;

pub use entry::{LedgerEntry, LedgerField, LedgerPayload};
pub use transaction::TransactionType;

//! Ledger workflow rules for the client.
//!
//! This module decides which workflow stages and fields each role may set,
//! and shapes submissions per role before they reach the backend.
//!
//! # Modules
//!
//! - `types` - Workflow stages (`WorkFlow`)
//! - `error` - Workflow-specific error types
//! - `rules` - Allowed stages, payload sanitizer, decision targets
//! - `submission` - Role-shaped submissions

pub mod error;
pub mod rules;
pub mod submission;
pub mod types;

#[cfg(test)]
mod rules_props;

pub use error::WorkflowError;
pub use rules::{
    SanitizeFlag, Sanitized, allowed_workflows, check_transition, identity_fields,
    permitted_fields, sanitize_ledger_payload, transition_targets, workflow_permitted,
};
pub use submission::{
    AdminSubmission, CashierSubmission, CollectorSubmission, EntryDetails, LedgerSubmission,
    RetailerSubmission,
};
pub use types::WorkFlow;

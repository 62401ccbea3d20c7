//! Core client logic for LedgerDesk.
//!
//! This crate contains pure logic with ZERO network or storage dependencies.
//! Roles, navigation policy, workflow rules and the form and table state the
//! screens are built from all live here.
//!
//! # Modules
//!
//! - `role` / `user` - Who is signed in
//! - `policy` - Static role → navigation table
//! - `guard` - Route guard state machine
//! - `ledger` - Ledger entries and payloads
//! - `workflow` - Workflow stages, payload sanitizer, role-shaped submissions
//! - `master_data` - Validated lookup tables
//! - `liability` - Liability report rows
//! - `attachment` - Base64 document payloads
//! - `table` - Generic filter + sort table
//! - `form` - Ledger entry modal

pub mod attachment;
pub mod form;
pub mod guard;
pub mod ledger;
pub mod liability;
pub mod master_data;
pub mod policy;
pub mod role;
pub mod table;
pub mod user;
pub mod workflow;

pub use role::UserRole;
pub use user::User;

//! Shared types, errors, and configuration for LedgerDesk.
//!
//! This crate provides common types used across all other crates:
//! - Amount formatting with decimal precision (Indian digit grouping)
//! - Typed IDs for type-safe references to backend records
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

//! Common types used across the application.

pub mod amount;
pub mod id;

pub use amount::{Amount, format_amount, format_amount_f64, format_amount_str};
pub use id::*;

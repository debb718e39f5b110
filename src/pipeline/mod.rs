//! Pipeline entry points.
//!
//! - `run_check`: Fetch provider pages and find shutdowns for a set of addresses
//! - `run_validate`: Check configuration and compile source selectors

pub mod check;
pub mod validate;

pub use check::{CheckOutcome, run_check};
pub use validate::{ValidationSummary, run_validate};

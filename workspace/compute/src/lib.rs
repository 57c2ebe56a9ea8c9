//! Resource managers for the college administration store.
//!
//! Each module owns one collection: validation runs before anything is
//! written, referential and conflict checks run inside the same transaction
//! as the write. [`dashboard`] is the read-only rollup over all of them.

pub mod dashboard;
pub mod error;
pub mod expenses;
pub mod fee_records;
pub mod fee_structures;
pub mod payments;
pub mod students;

#[cfg(test)]
mod testing;

pub use dashboard::DashboardComputer;
pub use error::{LedgerError, Result};

/// Turns an optional free-text field from a form into `None` when it is blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

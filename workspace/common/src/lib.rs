//! Common transport-layer types for the college administration API.
//! Request bodies, list filters and the dashboard aggregate live here so the
//! core (`compute`) and the HTTP layer agree on one shape for each.

mod dashboard;
mod filters;
mod requests;

pub use dashboard::DashboardSummary;
pub use filters::{ExpenseFilter, FeeRecordFilter, PaymentFilter, StudentFilter};
pub use requests::{
    CreateExpenseRequest, CreateFeeRecordRequest, CreateFeeStructureRequest, CreatePaymentRequest,
    CreateStudentRequest,
};

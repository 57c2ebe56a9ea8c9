pub mod dashboard;
pub mod expenses;
pub mod fee_records;
pub mod fee_structures;
pub mod health;
pub mod payments;
pub mod students;

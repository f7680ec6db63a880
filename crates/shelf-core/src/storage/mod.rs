//! Storage layer: record types, the store trait, and the CSV backend.

mod csv_store;
mod traits;
mod types;

pub use csv_store::CsvStore;
pub use traits::{Record, RecordStore};
pub use types::{Book, EntityKind, Loan, Member, FIRST_LOAN_ID, LOAN_PERIOD_DAYS};

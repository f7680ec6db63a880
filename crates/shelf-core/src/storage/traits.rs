//! Record store trait definitions.
//!
//! A `RecordStore` persists whole ordered collections of one entity kind at a
//! time. There are no partial updates: callers load a collection, change it in
//! memory, and save the full collection back.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::{Book, EntityKind, Loan, Member};
use crate::error::Result;

/// A record schema that can be stored as one row per record.
pub trait Record: Serialize + DeserializeOwned {
    /// Which collection this record belongs to.
    const KIND: EntityKind;

    /// Column headers in declared attribute order.
    const COLUMNS: &'static [&'static str];
}

impl Record for Book {
    const KIND: EntityKind = EntityKind::Book;
    const COLUMNS: &'static [&'static str] =
        &["ISBN", "Title", "Author", "CopiesTotal", "CopiesAvailable"];
}

impl Record for Member {
    const KIND: EntityKind = EntityKind::Member;
    const COLUMNS: &'static [&'static str] =
        &["MemberID", "Name", "PasswordHash", "Email", "JoinDate"];
}

impl Record for Loan {
    const KIND: EntityKind = EntityKind::Loan;
    const COLUMNS: &'static [&'static str] = &[
        "LoanID",
        "ISBN",
        "MemberID",
        "IssueDate",
        "DueDate",
        "ReturnDate",
    ];
}

/// Durable owner of record collections between operations.
///
/// Implementations must ensure:
/// - `load` of a kind that was never saved returns an empty collection
/// - `save` replaces the whole collection, preserving the given order
/// - a failed `save` leaves the previous contents readable
pub trait RecordStore {
    /// Load every record of kind `R::KIND`, in stored order.
    fn load<R: Record>(&self) -> Result<Vec<R>>;

    /// Overwrite the collection of kind `R::KIND` with `records`.
    fn save<R: Record>(&self, records: &[R]) -> Result<()>;
}

//! Record types persisted by the storage layer.
//!
//! Field order in each struct is the column order on disk; serde renames map
//! fields to the column headers.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfError};

/// Number of days a loan runs before it is due.
pub const LOAN_PERIOD_DAYS: u64 = 14;

/// Loan identifier allocated when no loans exist yet.
pub const FIRST_LOAN_ID: u64 = 1001;

/// The three persisted record schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Book,
    Member,
    Loan,
}

impl EntityKind {
    /// Base file name (without extension) for this kind.
    pub fn file_stem(&self) -> &'static str {
        match self {
            EntityKind::Book => "books",
            EntityKind::Member => "members",
            EntityKind::Loan => "loans",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Book => "Book",
            EntityKind::Member => "Member",
            EntityKind::Loan => "Loan",
        };
        f.write_str(name)
    }
}

/// A catalogued title and its copy counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "ISBN")]
    pub isbn: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Author")]
    pub author: String,

    #[serde(rename = "CopiesTotal")]
    pub copies_total: u32,

    /// Copies not currently on loan
    #[serde(rename = "CopiesAvailable")]
    pub copies_available: u32,
}

impl Book {
    /// A new book with every copy on the shelf.
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        copies: u32,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            copies_total: copies,
            copies_available: copies,
        }
    }
}

/// A registered library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "MemberID")]
    pub member_id: String,

    #[serde(rename = "Name")]
    pub name: String,

    /// Opaque digest produced by the credential hasher
    #[serde(rename = "PasswordHash")]
    pub password_hash: String,

    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "JoinDate")]
    pub join_date: NaiveDate,
}

/// One copy of a book lent to one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(rename = "LoanID")]
    pub loan_id: u64,

    #[serde(rename = "ISBN")]
    pub isbn: String,

    #[serde(rename = "MemberID")]
    pub member_id: String,

    #[serde(rename = "IssueDate")]
    pub issue_date: NaiveDate,

    #[serde(rename = "DueDate")]
    pub due_date: NaiveDate,

    /// `None` while the loan is active; written as an empty field
    #[serde(rename = "ReturnDate")]
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    /// Start a loan on `issue_date`, due after the standard loan period.
    ///
    /// Fails with `Validation` if the due date falls outside the calendar
    /// range `NaiveDate` can represent.
    pub fn issue(
        loan_id: u64,
        isbn: impl Into<String>,
        member_id: impl Into<String>,
        issue_date: NaiveDate,
    ) -> Result<Self> {
        let due_date = issue_date
            .checked_add_days(Days::new(LOAN_PERIOD_DAYS))
            .ok_or_else(|| {
                ShelfError::Validation(format!("Issue date out of range: {}", issue_date))
            })?;
        Ok(Self {
            loan_id,
            isbn: isbn.into(),
            member_id: member_id.into(),
            issue_date,
            due_date,
            return_date: None,
        })
    }

    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    /// Active and due strictly before `as_of`.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.is_active() && self.due_date < as_of
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_loan_due_after_fourteen_days() {
        let loan = Loan::issue(1001, "111", "M1", date("2024-01-01")).unwrap();
        assert_eq!(loan.due_date, date("2024-01-15"));
        assert!(loan.is_active());
    }

    #[test]
    fn test_overdue_is_strict() {
        let mut loan = Loan::issue(1001, "111", "M1", date("2023-12-18")).unwrap();
        assert_eq!(loan.due_date, date("2024-01-01"));
        assert!(!loan.is_overdue(date("2024-01-01")));
        assert!(loan.is_overdue(date("2024-01-02")));

        loan.return_date = Some(date("2024-03-01"));
        assert!(!loan.is_overdue(date("2024-06-01")));
    }

    #[test]
    fn test_issue_rejects_unrepresentable_due_date() {
        let err = Loan::issue(1001, "111", "M1", NaiveDate::MAX).unwrap_err();
        assert!(matches!(err, ShelfError::Validation(_)));
    }

    #[test]
    fn test_new_book_fully_available() {
        let book = Book::new("9780132350884", "Clean Code", "Robert C. Martin", 3);
        assert_eq!(book.copies_total, 3);
        assert_eq!(book.copies_available, 3);
    }
}

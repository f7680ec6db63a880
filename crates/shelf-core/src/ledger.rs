//! Loan collection.
//!
//! Loans are appended by issue and mutated once by return. Every query here
//! preserves store order, which is also issue order.

use chrono::NaiveDate;

use crate::error::Result;
use crate::storage::{Loan, RecordStore, FIRST_LOAN_ID};

/// Allocate the next loan ID: one more than the largest existing ID, or
/// [`FIRST_LOAN_ID`] for an empty ledger.
///
/// Unique as long as every loan ID comes from this function.
pub fn next_loan_id(existing: &[Loan]) -> u64 {
    existing
        .iter()
        .map(|loan| loan.loan_id)
        .max()
        .map_or(FIRST_LOAN_ID, |max| max.saturating_add(1))
}

/// In-memory loan collection in store order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    loans: Vec<Loan>,
}

impl Ledger {
    pub fn new(loans: Vec<Loan>) -> Self {
        Self { loans }
    }

    pub fn load(store: &impl RecordStore) -> Result<Self> {
        Ok(Self::new(store.load()?))
    }

    pub fn save(&self, store: &impl RecordStore) -> Result<()> {
        store.save(&self.loans)
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn next_loan_id(&self) -> u64 {
        next_loan_id(&self.loans)
    }

    pub fn push(&mut self, loan: Loan) {
        self.loans.push(loan);
    }

    /// First unreturned loan of `isbn` held by `member_id`.
    pub fn find_active_loan(&self, isbn: &str, member_id: &str) -> Option<&Loan> {
        self.loans
            .iter()
            .find(|loan| loan.is_active() && loan.isbn == isbn && loan.member_id == member_id)
    }

    pub fn find_active_loan_mut(&mut self, isbn: &str, member_id: &str) -> Option<&mut Loan> {
        self.loans
            .iter_mut()
            .find(|loan| loan.is_active() && loan.isbn == isbn && loan.member_id == member_id)
    }

    pub fn loans_for_member(&self, member_id: &str) -> Vec<&Loan> {
        self.loans
            .iter()
            .filter(|loan| loan.member_id == member_id)
            .collect()
    }

    /// Active loans due strictly before `as_of`.
    pub fn overdue_loans(&self, as_of: NaiveDate) -> Vec<&Loan> {
        self.loans
            .iter()
            .filter(|loan| loan.is_overdue(as_of))
            .collect()
    }

    /// Number of unreturned loans of `isbn`.
    pub fn active_count(&self, isbn: &str) -> usize {
        self.loans
            .iter()
            .filter(|loan| loan.is_active() && loan.isbn == isbn)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn returned(mut loan: Loan, on: &str) -> Loan {
        loan.return_date = Some(date(on));
        loan
    }

    #[test]
    fn test_next_loan_id_baseline() {
        assert_eq!(next_loan_id(&[]), FIRST_LOAN_ID);
    }

    #[test]
    fn test_next_loan_id_uses_max_not_last() {
        let loans = vec![
            Loan::issue(1005, "111", "M1", date("2024-01-01")).unwrap(),
            Loan::issue(1002, "111", "M2", date("2024-01-02")).unwrap(),
        ];
        assert_eq!(next_loan_id(&loans), 1006);
    }

    #[test]
    fn test_find_active_loan_skips_returned() {
        let ledger = Ledger::new(vec![
            returned(
                Loan::issue(1001, "111", "M1", date("2024-01-01")).unwrap(),
                "2024-01-03",
            ),
            Loan::issue(1002, "111", "M1", date("2024-01-05")).unwrap(),
        ]);
        let loan = ledger.find_active_loan("111", "M1").unwrap();
        assert_eq!(loan.loan_id, 1002);
        assert!(ledger.find_active_loan("111", "M2").is_none());
    }

    #[test]
    fn test_find_active_loan_first_of_duplicates() {
        let ledger = Ledger::new(vec![
            Loan::issue(1001, "111", "M1", date("2024-01-01")).unwrap(),
            Loan::issue(1002, "111", "M1", date("2024-01-02")).unwrap(),
        ]);
        assert_eq!(ledger.find_active_loan("111", "M1").unwrap().loan_id, 1001);
    }

    #[test]
    fn test_overdue_loans_boundary_and_order() {
        // Issued 2023-12-18, due 2024-01-01.
        let ledger = Ledger::new(vec![
            Loan::issue(1001, "111", "M1", date("2023-12-18")).unwrap(),
            returned(
                Loan::issue(1002, "222", "M1", date("2023-12-01")).unwrap(),
                "2023-12-10",
            ),
            Loan::issue(1003, "333", "M2", date("2023-12-10")).unwrap(),
        ]);

        let ids: Vec<u64> = ledger
            .overdue_loans(date("2024-01-02"))
            .iter()
            .map(|l| l.loan_id)
            .collect();
        assert_eq!(ids, vec![1001, 1003]);

        let ids: Vec<u64> = ledger
            .overdue_loans(date("2024-01-01"))
            .iter()
            .map(|l| l.loan_id)
            .collect();
        assert_eq!(ids, vec![1003]);
    }

    #[test]
    fn test_loans_for_member_and_active_count() {
        let ledger = Ledger::new(vec![
            Loan::issue(1001, "111", "M1", date("2024-01-01")).unwrap(),
            Loan::issue(1002, "111", "M2", date("2024-01-01")).unwrap(),
            returned(
                Loan::issue(1003, "222", "M1", date("2024-01-01")).unwrap(),
                "2024-01-02",
            ),
        ]);
        let ids: Vec<u64> = ledger
            .loans_for_member("M1")
            .iter()
            .map(|l| l.loan_id)
            .collect();
        assert_eq!(ids, vec![1001, 1003]);
        assert_eq!(ledger.active_count("111"), 2);
        assert_eq!(ledger.active_count("222"), 0);
    }
}

//! Circulation engine.
//!
//! Each operation is one load–validate–mutate–save unit: collections are
//! loaded fresh from the store, checked, changed in memory, and written back
//! before the call returns. Nothing is cached between calls.
//!
//! Issue and return touch two files. They are saved one after the other with
//! no rollback, so a crash between the two saves leaves them out of step.

use chrono::NaiveDate;
use tracing::info;

use crate::auth::{CredentialHasher, Principal, Role};
use crate::catalog::{validate_isbn, Catalog};
use crate::error::{Result, ShelfError};
use crate::ledger::Ledger;
use crate::registry::Registry;
use crate::storage::{Book, EntityKind, Loan, Member, RecordStore};

/// Input for [`Circulation::add_book`].
#[derive(Debug, Clone)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub copies: i64,
}

/// Input for [`Circulation::register_member`].
#[derive(Debug, Clone)]
pub struct NewMember {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

/// Orchestrates the catalog, registry, and ledger over one record store.
#[derive(Debug, Clone)]
pub struct Circulation<S> {
    store: S,
}

impl<S: RecordStore> Circulation<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Catalogue a new title with every copy available.
    pub fn add_book(&self, principal: &Principal, new_book: NewBook) -> Result<Book> {
        principal.require(Role::Librarian)?;
        validate_isbn(&new_book.isbn)?;
        if new_book.copies < 1 {
            return Err(ShelfError::Validation(format!(
                "Copy count must be at least 1 (got {})",
                new_book.copies
            )));
        }
        let copies = u32::try_from(new_book.copies).map_err(|_| {
            ShelfError::Validation(format!("Copy count too large: {}", new_book.copies))
        })?;

        let mut catalog = Catalog::load(&self.store)?;
        let book = Book::new(new_book.isbn, new_book.title, new_book.author, copies);
        catalog.add(book.clone())?;
        catalog.save(&self.store)?;

        info!(isbn = %book.isbn, copies, "book added");
        Ok(book)
    }

    /// Register a member, storing only the password digest.
    pub fn register_member(
        &self,
        principal: &Principal,
        new_member: NewMember,
        hasher: &impl CredentialHasher,
        as_of: NaiveDate,
    ) -> Result<Member> {
        principal.require(Role::Librarian)?;
        if new_member.member_id.trim().is_empty() {
            return Err(ShelfError::Validation(
                "Member ID cannot be empty".to_string(),
            ));
        }
        if new_member.password != new_member.confirmation {
            return Err(ShelfError::Validation("Passwords do not match".to_string()));
        }

        let mut registry = Registry::load(&self.store)?;
        if registry.exists(&new_member.member_id) {
            return Err(ShelfError::DuplicateKey {
                entity: EntityKind::Member,
                key: new_member.member_id,
            });
        }

        let member = Member {
            member_id: new_member.member_id,
            name: new_member.name,
            password_hash: hasher.hash(&new_member.password)?,
            email: new_member.email,
            join_date: as_of,
        };
        registry.add(member.clone())?;
        registry.save(&self.store)?;

        info!(member_id = %member.member_id, "member registered");
        Ok(member)
    }

    /// Lend one copy of `isbn` to `member_id` on behalf of a librarian.
    pub fn issue_book(
        &self,
        principal: &Principal,
        isbn: &str,
        member_id: &str,
        as_of: NaiveDate,
    ) -> Result<Loan> {
        principal.require(Role::Librarian)?;
        self.issue(isbn, member_id, as_of)
    }

    /// Member self-service issue for the signed-in member.
    pub fn borrow_book(&self, principal: &Principal, isbn: &str, as_of: NaiveDate) -> Result<Loan> {
        principal.require(Role::Member)?;
        self.issue(isbn, &principal.id, as_of)
    }

    fn issue(&self, isbn: &str, member_id: &str, as_of: NaiveDate) -> Result<Loan> {
        let mut catalog = Catalog::load(&self.store)?;
        let book = catalog
            .find_by_isbn(isbn)
            .ok_or_else(|| ShelfError::BookNotFound(isbn.to_string()))?;
        if book.copies_available < 1 {
            return Err(ShelfError::NoCopiesAvailable(isbn.to_string()));
        }

        let registry = Registry::load(&self.store)?;
        if !registry.exists(member_id) {
            return Err(ShelfError::MemberNotFound(member_id.to_string()));
        }

        let mut ledger = Ledger::load(&self.store)?;
        let loan = Loan::issue(ledger.next_loan_id(), isbn, member_id, as_of)?;
        catalog.adjust_availability(isbn, -1)?;
        ledger.push(loan.clone());

        ledger.save(&self.store)?;
        catalog.save(&self.store)?;

        info!(
            loan_id = loan.loan_id,
            isbn,
            member_id,
            due = %loan.due_date,
            "book issued"
        );
        Ok(loan)
    }

    /// Close the first active loan of `isbn` held by `member_id`.
    pub fn return_book(
        &self,
        principal: &Principal,
        isbn: &str,
        member_id: &str,
        as_of: NaiveDate,
    ) -> Result<Loan> {
        principal.require(Role::Librarian)?;

        let mut ledger = Ledger::load(&self.store)?;
        let loan = ledger
            .find_active_loan_mut(isbn, member_id)
            .ok_or_else(|| ShelfError::ActiveLoanNotFound {
                isbn: isbn.to_string(),
                member_id: member_id.to_string(),
            })?;
        loan.return_date = Some(as_of);
        let loan = loan.clone();

        let mut catalog = Catalog::load(&self.store)?;
        catalog.adjust_availability(isbn, 1)?;

        catalog.save(&self.store)?;
        ledger.save(&self.store)?;

        info!(loan_id = loan.loan_id, isbn, member_id, "book returned");
        Ok(loan)
    }

    /// Active loans due before `as_of`, in issue order.
    pub fn overdue_report(&self, principal: &Principal, as_of: NaiveDate) -> Result<Vec<Loan>> {
        principal.require(Role::Librarian)?;
        let ledger = Ledger::load(&self.store)?;
        Ok(ledger.overdue_loans(as_of).into_iter().cloned().collect())
    }

    /// Books matching `keyword` by title or author. Open to both roles.
    pub fn search_catalogue(&self, _principal: &Principal, keyword: &str) -> Result<Vec<Book>> {
        let catalog = Catalog::load(&self.store)?;
        Ok(catalog.search(keyword).into_iter().cloned().collect())
    }

    /// Loan history of the signed-in member.
    pub fn member_loans(&self, principal: &Principal, member_id: &str) -> Result<Vec<Loan>> {
        principal.require_member(member_id)?;
        let ledger = Ledger::load(&self.store)?;
        Ok(ledger
            .loans_for_member(member_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Verify copy counts against active loans and loan references.
    ///
    /// Reports the first offending record as `InvariantViolation`.
    pub fn check_consistency(&self) -> Result<()> {
        let catalog = Catalog::load(&self.store)?;
        let registry = Registry::load(&self.store)?;
        let ledger = Ledger::load(&self.store)?;

        for book in catalog.books() {
            if book.copies_total < 1 || book.copies_available > book.copies_total {
                return Err(ShelfError::InvariantViolation(format!(
                    "Book {} has {} of {} copies available",
                    book.isbn, book.copies_available, book.copies_total
                )));
            }
            let on_loan = ledger.active_count(&book.isbn);
            let expected = (book.copies_total as usize).checked_sub(on_loan);
            if expected != Some(book.copies_available as usize) {
                return Err(ShelfError::InvariantViolation(format!(
                    "Book {} shows {} available but {} of {} copies are on loan",
                    book.isbn, book.copies_available, on_loan, book.copies_total
                )));
            }
        }

        for loan in ledger.loans() {
            if !catalog.exists(&loan.isbn) {
                return Err(ShelfError::InvariantViolation(format!(
                    "Loan {} references unknown book {}",
                    loan.loan_id, loan.isbn
                )));
            }
            if !registry.exists(&loan.member_id) {
                return Err(ShelfError::InvariantViolation(format!(
                    "Loan {} references unknown member {}",
                    loan.loan_id, loan.member_id
                )));
            }
        }

        Ok(())
    }
}

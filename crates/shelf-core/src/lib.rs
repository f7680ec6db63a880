//! # Shelf Core
//!
//! Core library for Shelf - a file-backed library circulation system.
//!
//! This crate keeps book availability consistent with the loans that are out,
//! allocates loan IDs, and detects overdue loans. It has no terminal I/O; the
//! CLI crate owns every prompt and message.
//!
//! ## Architecture
//!
//! - **storage**: record types, the `RecordStore` trait, and the CSV backend
//! - **catalog**: the book collection
//! - **registry**: the member collection
//! - **ledger**: the loan collection and loan-ID allocation
//! - **circulation**: issue, borrow, return, and reporting operations
//! - **auth**: credential hashing and role-tagged principals

pub mod auth;
pub mod catalog;
pub mod circulation;
pub mod error;
pub mod fs;
pub mod ledger;
pub mod registry;
pub mod storage;

pub use auth::{Argon2Hasher, Authenticator, CredentialHasher, Principal, Role};
pub use circulation::{Circulation, NewBook, NewMember};
pub use error::{Result, ShelfError};
pub use storage::{CsvStore, RecordStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Application context for the Shelf CLI.
//!
//! Bundles the circulation engine with the authenticator so menu handlers
//! take one parameter plus the signed-in principal.

use std::path::Path;

use shelf_core::auth::LibrarianCredential;
use shelf_core::{Argon2Hasher, Authenticator, Circulation, CsvStore};

use crate::config::ShelfConfig;

pub struct AppContext {
    circulation: Circulation<CsvStore>,
    auth: Authenticator<Argon2Hasher>,
}

impl AppContext {
    /// Open the data directory (creating it if absent) and set up the
    /// librarian credential from config, or the built-in account.
    pub fn new(data_dir: &Path, config: &ShelfConfig) -> anyhow::Result<Self> {
        let store = CsvStore::open(data_dir)?;
        let hasher = Argon2Hasher::default();
        let librarian = match config.librarian.as_ref() {
            Some(section) => LibrarianCredential {
                id: section.id.clone(),
                password_hash: section.password_hash.clone(),
            },
            None => {
                tracing::debug!("no [librarian] section, using the built-in account");
                LibrarianCredential::default_account(&hasher)?
            }
        };

        Ok(Self {
            circulation: Circulation::new(store),
            auth: Authenticator::new(hasher, librarian),
        })
    }

    pub fn circulation(&self) -> &Circulation<CsvStore> {
        &self.circulation
    }

    pub fn auth(&self) -> &Authenticator<Argon2Hasher> {
        &self.auth
    }
}

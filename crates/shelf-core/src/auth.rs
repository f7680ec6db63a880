//! Credentials and principals.
//!
//! Passwords are stored as Argon2id PHC strings. Authentication produces a
//! role-tagged [`Principal`] that callers pass explicitly to every
//! circulation operation; there is no ambient session.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::{info, warn};

use crate::error::{Result, ShelfError};
use crate::registry::Registry;
use crate::storage::RecordStore;

/// Librarian ID used when no librarian credential is configured.
pub const DEFAULT_LIBRARIAN_ID: &str = "admin";

/// Librarian password used when no librarian credential is configured.
pub const DEFAULT_LIBRARIAN_PASSWORD: &str = "123456";

/// The two actor roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Librarian,
    Member,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Librarian => f.write_str("librarian"),
            Role::Member => f.write_str("member"),
        }
    }
}

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub role: Role,
}

impl Principal {
    pub fn librarian(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Librarian,
        }
    }

    pub fn member(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Member,
        }
    }

    /// Fail with `Unauthorized` unless this principal has `role`.
    pub fn require(&self, role: Role) -> Result<()> {
        if self.role != role {
            return Err(ShelfError::Unauthorized(format!(
                "{} role required (signed in as {})",
                role, self.role
            )));
        }
        Ok(())
    }

    /// Fail with `Unauthorized` unless this is the member `member_id`.
    pub fn require_member(&self, member_id: &str) -> Result<()> {
        self.require(Role::Member)?;
        if self.id != member_id {
            return Err(ShelfError::Unauthorized(format!(
                "member {} cannot act for member {}",
                self.id, member_id
            )));
        }
        Ok(())
    }
}

/// Password hashing primitive.
pub trait CredentialHasher {
    /// Produce an opaque digest for `plaintext`.
    fn hash(&self, plaintext: &str) -> Result<String>;

    /// Check `plaintext` against a digest produced by `hash`.
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Argon2id hasher with the crate's default parameters.
#[derive(Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(plaintext.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match PasswordHash::new(digest) {
            Ok(parsed) => self
                .argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// The librarian account's ID and password digest.
#[derive(Debug, Clone)]
pub struct LibrarianCredential {
    pub id: String,
    pub password_hash: String,
}

impl LibrarianCredential {
    /// The built-in `admin` account.
    pub fn default_account(hasher: &impl CredentialHasher) -> Result<Self> {
        Ok(Self {
            id: DEFAULT_LIBRARIAN_ID.to_string(),
            password_hash: hasher.hash(DEFAULT_LIBRARIAN_PASSWORD)?,
        })
    }
}

/// Turns (role, id, password) into a [`Principal`].
pub struct Authenticator<H> {
    hasher: H,
    librarian: LibrarianCredential,
}

impl<H: CredentialHasher> Authenticator<H> {
    pub fn new(hasher: H, librarian: LibrarianCredential) -> Self {
        Self { hasher, librarian }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Members are checked against the stored member records; the librarian
    /// against the configured credential.
    pub fn authenticate(
        &self,
        store: &impl RecordStore,
        role: Role,
        id: &str,
        plaintext: &str,
    ) -> Result<Principal> {
        let verified = match role {
            Role::Librarian => {
                id == self.librarian.id
                    && self.hasher.verify(plaintext, &self.librarian.password_hash)
            }
            Role::Member => {
                let registry = Registry::load(store)?;
                registry
                    .find_by_id(id)
                    .is_some_and(|m| self.hasher.verify(plaintext, &m.password_hash))
            }
        };

        if !verified {
            warn!(%role, id, "authentication failed");
            return Err(ShelfError::AuthFailed);
        }
        info!(%role, id, "authenticated");
        Ok(Principal {
            id: id.to_string(),
            role,
        })
    }
}

//! Member collection.

use crate::error::{Result, ShelfError};
use crate::storage::{EntityKind, Member, RecordStore};

/// In-memory member collection in store order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    members: Vec<Member>,
}

impl Registry {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn load(store: &impl RecordStore) -> Result<Self> {
        Ok(Self::new(store.load()?))
    }

    pub fn save(&self, store: &impl RecordStore) -> Result<()> {
        store.save(&self.members)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn find_by_id(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.member_id == member_id)
    }

    pub fn exists(&self, member_id: &str) -> bool {
        self.find_by_id(member_id).is_some()
    }

    /// Append `member`, rejecting a MemberID that is already registered.
    pub fn add(&mut self, member: Member) -> Result<()> {
        if self.exists(&member.member_id) {
            return Err(ShelfError::DuplicateKey {
                entity: EntityKind::Member,
                key: member.member_id,
            });
        }
        self.members.push(member);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn member(id: &str) -> Member {
        Member {
            member_id: id.to_string(),
            name: "Ada".to_string(),
            password_hash: "digest".to_string(),
            email: "ada@example.com".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_add_and_find() {
        let mut registry = Registry::default();
        registry.add(member("M1")).unwrap();
        assert!(registry.exists("M1"));
        assert!(!registry.exists("M2"));
        assert_eq!(registry.find_by_id("M1").unwrap().name, "Ada");
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let mut registry = Registry::new(vec![member("M1")]);
        let err = registry.add(member("M1")).unwrap_err();
        assert!(matches!(
            err,
            ShelfError::DuplicateKey {
                entity: EntityKind::Member,
                ..
            }
        ));
        assert_eq!(registry.members().len(), 1);
    }
}

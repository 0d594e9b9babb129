//! In-process store implementing both [`AdminStore`] and [`BranchDirectory`].
//!
//! Mirrors the `PostgreSQL` schema's guarantees (unique email and number,
//! branch foreign key, ascending-id ordering) so service behavior is the
//! same against either backend. Cloning shares the underlying data.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use branchdesk_core::{AdminId, BranchId, ContactNumber, Email};

use super::{AdminStore, BranchDirectory, RepositoryError, UniqueField};
use crate::models::{Admin, AdminChanges, Branch, NewAdmin};

#[derive(Debug, Default)]
struct MemoryState {
    admins: Vec<Admin>,
    branches: Vec<Branch>,
    next_admin_id: i32,
    next_branch_id: i32,
}

impl MemoryState {
    fn branch_exists(&self, id: BranchId) -> bool {
        self.branches.iter().any(|b| b.id == id)
    }

    fn conflict(
        &self,
        email: &Email,
        number: &ContactNumber,
        except: Option<AdminId>,
    ) -> Option<UniqueField> {
        // Email wins over number regardless of which admin holds each.
        if self.admins.iter().any(|a| Some(a.id) != except && &a.email == email) {
            Some(UniqueField::Email)
        } else if self.admins.iter().any(|a| Some(a.id) != except && &a.number == number) {
            Some(UniqueField::Number)
        } else {
            None
        }
    }

    fn admin_mut(&mut self, id: AdminId) -> Option<&mut Admin> {
        self.admins.iter_mut().find(|a| a.id == id)
    }
}

/// Shared in-memory admin and branch store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::DataCorruption("memory store lock poisoned".to_owned()))
    }

    /// Add a branch to the directory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the store lock is poisoned.
    pub fn add_branch(&self, name: &str) -> Result<Branch, RepositoryError> {
        let mut state = self.lock()?;
        state.next_branch_id += 1;
        let branch = Branch {
            id: BranchId::new(state.next_branch_id),
            name: name.to_owned(),
            created_at: Utc::now(),
        };
        state.branches.push(branch.clone());
        Ok(branch)
    }

    /// Insert an admin without uniqueness or branch checks.
    ///
    /// Stands in for records written before constraints existed, e.g. two
    /// admins sharing an email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the store lock is poisoned.
    pub fn insert_unchecked(&self, admin: NewAdmin) -> Result<Admin, RepositoryError> {
        let mut state = self.lock()?;
        Ok(push_admin(&mut state, admin))
    }
}

fn push_admin(state: &mut MemoryState, admin: NewAdmin) -> Admin {
    state.next_admin_id += 1;
    let now = Utc::now();
    let admin = Admin {
        id: AdminId::new(state.next_admin_id),
        name: admin.name,
        email: admin.email,
        number: admin.number,
        password_hash: admin.password_hash,
        branch_id: Some(admin.branch_id),
        active: admin.active,
        created_at: now,
        updated_at: now,
    };
    state.admins.push(admin.clone());
    admin
}

impl AdminStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Admin>, RepositoryError> {
        Ok(self.lock()?.admins.clone())
    }

    async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        Ok(self.lock()?.admins.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Vec<Admin>, RepositoryError> {
        Ok(self
            .lock()?
            .admins
            .iter()
            .filter(|a| &a.email == email)
            .cloned()
            .collect())
    }

    async fn email_taken(
        &self,
        email: &Email,
        except: Option<AdminId>,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .lock()?
            .admins
            .iter()
            .any(|a| &a.email == email && Some(a.id) != except))
    }

    async fn number_taken(
        &self,
        number: &ContactNumber,
        except: Option<AdminId>,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .lock()?
            .admins
            .iter()
            .any(|a| &a.number == number && Some(a.id) != except))
    }

    async fn create(&self, admin: &NewAdmin) -> Result<Admin, RepositoryError> {
        let mut state = self.lock()?;
        if let Some(field) = state.conflict(&admin.email, &admin.number, None) {
            return Err(RepositoryError::Conflict(field));
        }
        if !state.branch_exists(admin.branch_id) {
            return Err(RepositoryError::ForeignKey("admin_branch_id_fkey".to_owned()));
        }
        Ok(push_admin(&mut state, admin.clone()))
    }

    async fn update(
        &self,
        id: AdminId,
        changes: &AdminChanges,
    ) -> Result<Option<Admin>, RepositoryError> {
        let mut state = self.lock()?;
        if !state.admins.iter().any(|a| a.id == id) {
            return Ok(None);
        }
        if let Some(field) = state.conflict(&changes.email, &changes.number, Some(id)) {
            return Err(RepositoryError::Conflict(field));
        }
        if !state.branch_exists(changes.branch_id) {
            return Err(RepositoryError::ForeignKey("admin_branch_id_fkey".to_owned()));
        }

        let Some(admin) = state.admin_mut(id) else {
            return Ok(None);
        };
        admin.name.clone_from(&changes.name);
        admin.email = changes.email.clone();
        admin.number = changes.number.clone();
        admin.password_hash = changes.password_hash.clone();
        admin.branch_id = Some(changes.branch_id);
        if let Some(active) = changes.active {
            admin.active = active;
        }
        admin.updated_at = Utc::now();
        Ok(Some(admin.clone()))
    }

    async fn set_branch(&self, id: AdminId, branch_id: BranchId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        if !state.branch_exists(branch_id) {
            return Err(RepositoryError::ForeignKey("admin_branch_id_fkey".to_owned()));
        }
        let Some(admin) = state.admin_mut(id) else {
            return Ok(false);
        };
        admin.branch_id = Some(branch_id);
        admin.updated_at = Utc::now();
        Ok(true)
    }

    async fn toggle_active(&self, id: AdminId) -> Result<Option<bool>, RepositoryError> {
        let mut state = self.lock()?;
        Ok(state.admin_mut(id).map(|admin| {
            admin.active = !admin.active;
            admin.updated_at = Utc::now();
            admin.active
        }))
    }
}

impl BranchDirectory for MemoryStore {
    async fn exists(&self, id: BranchId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.branch_exists(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use branchdesk_core::PasswordHash;

    use super::*;

    fn new_admin(email: &str, number: &str, branch_id: BranchId) -> NewAdmin {
        NewAdmin {
            name: "Branch Admin".to_owned(),
            email: Email::parse(email).unwrap(),
            number: ContactNumber::parse(number).unwrap(),
            password_hash: PasswordHash::new("$argon2id$stub".to_owned()),
            branch_id,
            active: true,
        }
    }

    fn changes(email: &str, number: &str, branch_id: BranchId) -> AdminChanges {
        let admin = new_admin(email, number, branch_id);
        AdminChanges {
            name: admin.name,
            email: admin.email,
            number: admin.number,
            password_hash: admin.password_hash,
            branch_id,
            active: None,
        }
    }

    /// Store holding `first@x.com/111` then `second@x.com/222`.
    async fn seeded() -> (MemoryStore, BranchId) {
        let store = MemoryStore::new();
        let branch = store.add_branch("North").unwrap();
        store
            .create(&new_admin("first@x.com", "111", branch.id))
            .await
            .unwrap();
        store
            .create(&new_admin("second@x.com", "222", branch.id))
            .await
            .unwrap();
        (store, branch.id)
    }

    #[tokio::test]
    async fn test_create_reports_email_when_fields_clash_with_different_admins() {
        let (store, branch) = seeded().await;

        // Number matches the earlier admin, email the later one.
        let err = store
            .create(&new_admin("second@x.com", "111", branch))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(UniqueField::Email)));
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_reports_email_when_fields_clash_with_different_admins() {
        let (store, branch) = seeded().await;
        let third = store
            .create(&new_admin("third@x.com", "333", branch))
            .await
            .unwrap();

        let err = store
            .update(third.id, &changes("second@x.com", "111", branch))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(UniqueField::Email)));

        let unchanged = store.get_by_id(third.id).await.unwrap().unwrap();
        assert_eq!(unchanged.email.as_str(), "third@x.com");
    }

    #[tokio::test]
    async fn test_number_clash_alone_reports_number() {
        let (store, branch) = seeded().await;

        let err = store
            .create(&new_admin("fresh@x.com", "222", branch))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(UniqueField::Number)));
    }

    #[tokio::test]
    async fn test_update_ignores_own_email_and_number() {
        let (store, branch) = seeded().await;
        let first = store.list_all().await.unwrap().remove(0);

        let updated = store
            .update(first.id, &changes("first@x.com", "111", branch))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, first.id);
    }

    #[tokio::test]
    async fn test_unknown_branch_is_foreign_key_violation() {
        let (store, branch) = seeded().await;
        let missing = BranchId::new(branch.as_i32() + 1);

        let err = store
            .create(&new_admin("fresh@x.com", "999", missing))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKey(_)));
    }
}

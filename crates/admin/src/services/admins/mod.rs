//! Branch administrator service.
//!
//! Enforces the account invariants:
//! - email and number are unique across admins (backed by store constraints)
//! - an admin always points at an existing branch, one branch at a time
//! - only active admins may log in or be reassigned
//!
//! The service is stateless. Each instance borrows its stores and token issuer,
//! so request handlers build one per request.

mod error;

pub use error::{AdminServiceError, ErrorKind};

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use branchdesk_core::{AdminId, BranchId, ContactNumber, Email, Role};

use crate::db::{AdminStore, BranchDirectory};
use crate::models::{Admin, AdminChanges, NewAdmin};
use crate::services::password;
use crate::services::token::{TokenIssuer, TokenSubject};

/// Behavior switches for admin management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminPolicy {
    /// Set `active = true` on every full update, re-enabling dormant admins.
    pub reactivate_on_update: bool,
}

impl Default for AdminPolicy {
    fn default() -> Self {
        Self {
            reactivate_on_update: true,
        }
    }
}

/// Validated fields for creating or replacing an admin.
#[derive(Debug, Clone)]
pub struct AdminInput {
    pub name: String,
    pub email: Email,
    pub number: ContactNumber,
    pub password: SecretString,
    pub branch_id: BranchId,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub admin: Admin,
    pub token: String,
}

/// Admin account service.
pub struct AdminService<'a, S, B, T> {
    admins: S,
    branches: B,
    tokens: &'a T,
    policy: AdminPolicy,
}

impl<'a, S, B, T> AdminService<'a, S, B, T>
where
    S: AdminStore,
    B: BranchDirectory,
    T: TokenIssuer,
{
    /// Create a new admin service.
    #[must_use]
    pub const fn new(admins: S, branches: B, tokens: &'a T, policy: AdminPolicy) -> Self {
        Self {
            admins,
            branches,
            tokens,
            policy,
        }
    }

    /// Create a new, active admin assigned to one branch.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail`, `DuplicateNumber` or `BranchNotFound` (checked
    /// in that order), or a persistence error if the store fails.
    #[instrument(skip(self, input), fields(branch_id = %input.branch_id))]
    pub async fn create_admin(&self, input: AdminInput) -> Result<Admin, AdminServiceError> {
        self.ensure_unique(&input.email, &input.number, None).await?;
        self.ensure_branch(input.branch_id).await?;

        let password_hash = password::hash_password(input.password.expose_secret())?;
        let admin = self
            .admins
            .create(&NewAdmin {
                name: input.name,
                email: input.email,
                number: input.number,
                password_hash,
                branch_id: input.branch_id,
                active: true,
            })
            .await?;

        tracing::info!(admin_id = %admin.id, "admin created");
        Ok(admin)
    }

    /// Replace an admin's fields and branch.
    ///
    /// Uniqueness checks ignore the admin being updated. Under the default
    /// policy the admin is also reactivated.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_admin`], plus `NotFound` if `id` does not exist.
    #[instrument(skip(self, id, input), fields(admin_id = %id, branch_id = %input.branch_id))]
    pub async fn update_admin(
        &self,
        id: AdminId,
        input: AdminInput,
    ) -> Result<Admin, AdminServiceError> {
        self.ensure_unique(&input.email, &input.number, Some(id))
            .await?;
        self.ensure_branch(input.branch_id).await?;

        let password_hash = password::hash_password(input.password.expose_secret())?;
        let changes = AdminChanges {
            name: input.name,
            email: input.email,
            number: input.number,
            password_hash,
            branch_id: input.branch_id,
            active: self.policy.reactivate_on_update.then_some(true),
        };

        let admin = self
            .admins
            .update(id, &changes)
            .await?
            .ok_or(AdminServiceError::NotFound)?;

        tracing::info!(admin_id = %admin.id, active = admin.active, "admin updated");
        Ok(admin)
    }

    /// Move an active admin to another branch.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Inactive` or `BranchNotFound`, checked in that order.
    #[instrument(skip(self))]
    pub async fn update_admin_branch(
        &self,
        admin_id: AdminId,
        branch_id: BranchId,
    ) -> Result<(), AdminServiceError> {
        let admin = self
            .admins
            .get_by_id(admin_id)
            .await?
            .ok_or(AdminServiceError::NotFound)?;
        if !admin.active {
            return Err(AdminServiceError::Inactive);
        }
        self.ensure_branch(branch_id).await?;

        if !self.admins.set_branch(admin_id, branch_id).await? {
            return Err(AdminServiceError::NotFound);
        }

        tracing::info!("admin branch updated");
        Ok(())
    }

    /// Flip an admin's activation flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` does not exist.
    #[instrument(skip(self))]
    pub async fn toggle_active_admin(&self, id: AdminId) -> Result<bool, AdminServiceError> {
        let active = self
            .admins
            .toggle_active(id)
            .await?
            .ok_or(AdminServiceError::NotFound)?;

        tracing::info!(active, "admin activation toggled");
        Ok(active)
    }

    /// All admins assigned to `branch_id`, in store order.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the store fails.
    #[instrument(skip(self))]
    pub async fn get_all_admin(
        &self,
        branch_id: BranchId,
    ) -> Result<Vec<Admin>, AdminServiceError> {
        let admins = self.admins.list_all().await?;
        Ok(admins
            .into_iter()
            .filter(|admin| admin.belongs_to(branch_id))
            .collect())
    }

    /// Fetch a single admin.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` does not exist.
    #[instrument(skip(self))]
    pub async fn get_single_admin(&self, id: AdminId) -> Result<Admin, AdminServiceError> {
        self.admins
            .get_by_id(id)
            .await?
            .ok_or(AdminServiceError::NotFound)
    }

    /// Authenticate with email and password and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown email, `Inactive` for a deactivated
    /// admin and `InvalidCredential` for a wrong password.
    #[instrument(skip(self, email, password), fields(admin_id = tracing::field::Empty))]
    pub async fn login_admin(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<LoginOutcome, AdminServiceError> {
        let mut matches = self.admins.find_by_email(email).await?;
        if matches.len() > 1 {
            tracing::warn!(count = matches.len(), "multiple admins share this email");
        }
        if matches.is_empty() {
            return Err(AdminServiceError::NotFound);
        }
        let admin = matches.swap_remove(0);
        tracing::Span::current().record("admin_id", admin.id.as_i32());

        if !admin.active {
            return Err(AdminServiceError::Inactive);
        }
        password::verify_password(password.expose_secret(), &admin.password_hash)?;

        let token = self.tokens.issue(TokenSubject {
            id: admin.id,
            role: Role::Admin,
        })?;

        tracing::info!(admin_id = %admin.id, "admin logged in");
        Ok(LoginOutcome { admin, token })
    }

    async fn ensure_unique(
        &self,
        email: &Email,
        number: &ContactNumber,
        except: Option<AdminId>,
    ) -> Result<(), AdminServiceError> {
        if self.admins.email_taken(email, except).await? {
            return Err(AdminServiceError::DuplicateEmail);
        }
        if self.admins.number_taken(number, except).await? {
            return Err(AdminServiceError::DuplicateNumber);
        }
        Ok(())
    }

    async fn ensure_branch(&self, branch_id: BranchId) -> Result<(), AdminServiceError> {
        if self.branches.exists(branch_id).await? {
            Ok(())
        } else {
            Err(AdminServiceError::BranchNotFound)
        }
    }
}

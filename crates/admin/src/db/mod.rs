//! Persistence for admin accounts and the branch directory.
//!
//! # Database: `PostgreSQL`, schema `branchdesk`
//!
//! ## Tables
//!
//! - `branch` - Branch directory (owned by operators, read by admin management)
//! - `admin` - Branch administrators, unique on `email` and `number`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p branchdesk-cli -- migrate
//! ```
//!
//! # Stores
//!
//! [`AdminStore`] and [`BranchDirectory`] are the seams the admin service is
//! written against. [`AdminRepository`] and [`BranchRepository`] implement
//! them over `PostgreSQL`; [`MemoryStore`] implements both in process.

pub mod admins;
pub mod branches;
pub mod memory;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use branchdesk_core::{AdminId, BranchId, ContactNumber, Email};

use crate::models::{Admin, AdminChanges, NewAdmin};

pub use admins::AdminRepository;
pub use branches::BranchRepository;
pub use memory::MemoryStore;

/// Admin field guarded by a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Number,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Number => f.write_str("number"),
        }
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique constraint violation on an admin field.
    #[error("constraint violation: {0} already exists")]
    Conflict(UniqueField),

    /// A referenced row does not exist.
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
}

/// Durable collection of admin records.
///
/// Implementations must enforce email and number uniqueness themselves and
/// report violations as [`RepositoryError::Conflict`]; the service-level
/// checks only produce friendlier errors in the common case.
pub trait AdminStore: Send + Sync {
    /// All admins in the store's natural order (ascending id).
    fn list_all(&self) -> impl Future<Output = Result<Vec<Admin>, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: AdminId,
    ) -> impl Future<Output = Result<Option<Admin>, RepositoryError>> + Send;

    /// Every admin with exactly this email, ascending id.
    fn find_by_email(
        &self,
        email: &Email,
    ) -> impl Future<Output = Result<Vec<Admin>, RepositoryError>> + Send;

    /// Whether an admin other than `except` uses `email`.
    fn email_taken(
        &self,
        email: &Email,
        except: Option<AdminId>,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Whether an admin other than `except` uses `number`.
    fn number_taken(
        &self,
        number: &ContactNumber,
        except: Option<AdminId>,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    fn create(
        &self,
        admin: &NewAdmin,
    ) -> impl Future<Output = Result<Admin, RepositoryError>> + Send;

    /// Replace an admin's fields. `Ok(None)` if no admin has `id`.
    fn update(
        &self,
        id: AdminId,
        changes: &AdminChanges,
    ) -> impl Future<Output = Result<Option<Admin>, RepositoryError>> + Send;

    /// Point an admin at a single branch. `Ok(false)` if no admin has `id`.
    fn set_branch(
        &self,
        id: AdminId,
        branch_id: BranchId,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Atomically negate the activation flag, returning the new value.
    fn toggle_active(
        &self,
        id: AdminId,
    ) -> impl Future<Output = Result<Option<bool>, RepositoryError>> + Send;
}

/// Read access to the branch directory.
pub trait BranchDirectory: Send + Sync {
    fn exists(&self, id: BranchId) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

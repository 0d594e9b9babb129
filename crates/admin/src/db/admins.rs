//! Admin repository for `PostgreSQL`.
//!
//! Queries are built at runtime with `sqlx::query_as` so the crate compiles
//! without a live database or an offline query cache.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use branchdesk_core::{AdminId, BranchId, ContactNumber, Email, PasswordHash};

use super::{AdminStore, RepositoryError, UniqueField};
use crate::models::{Admin, AdminChanges, NewAdmin};

/// Constraint names from the schema migration.
const EMAIL_CONSTRAINT: &str = "admin_email_key";
const NUMBER_CONSTRAINT: &str = "admin_number_key";

const ADMIN_COLUMNS: &str = "id, name, email, number, password_hash, branch_id, active, created_at, updated_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` admin queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i32,
    name: String,
    email: String,
    number: String,
    password_hash: String,
    branch_id: Option<i32>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let number = ContactNumber::parse(&row.number).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid number in database: {e}"))
        })?;

        Ok(Self {
            id: AdminId::new(row.id),
            name: row.name,
            email,
            number,
            password_hash: PasswordHash::new(row.password_hash),
            branch_id: row.branch_id.map(BranchId::new),
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Translate constraint violations on writes into typed repository errors.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(EMAIL_CONSTRAINT) => return RepositoryError::Conflict(UniqueField::Email),
                Some(NUMBER_CONSTRAINT) => return RepositoryError::Conflict(UniqueField::Number),
                _ => {}
            }
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::ForeignKey(
                db_err.constraint().unwrap_or("unknown").to_owned(),
            );
        }
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin database operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl AdminStore for AdminRepository<'_> {
    async fn list_all(&self) -> Result<Vec<Admin>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM branchdesk.admin ORDER BY id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM branchdesk.admin WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Vec<Admin>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM branchdesk.admin WHERE email = $1 ORDER BY id ASC"
        ))
        .bind(email)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn email_taken(
        &self,
        email: &Email,
        except: Option<AdminId>,
    ) -> Result<bool, RepositoryError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM branchdesk.admin
                WHERE email = $1 AND ($2::INTEGER IS NULL OR id <> $2)
            )
            ",
        )
        .bind(email)
        .bind(except)
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    async fn number_taken(
        &self,
        number: &ContactNumber,
        except: Option<AdminId>,
    ) -> Result<bool, RepositoryError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM branchdesk.admin
                WHERE number = $1 AND ($2::INTEGER IS NULL OR id <> $2)
            )
            ",
        )
        .bind(number)
        .bind(except)
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    async fn create(&self, admin: &NewAdmin) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            r"
            INSERT INTO branchdesk.admin (name, email, number, password_hash, branch_id, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ADMIN_COLUMNS}
            "
        ))
        .bind(&admin.name)
        .bind(&admin.email)
        .bind(&admin.number)
        .bind(&admin.password_hash)
        .bind(admin.branch_id)
        .bind(admin.active)
        .fetch_one(self.pool)
        .await
        .map_err(map_write_error)?;

        row.try_into()
    }

    async fn update(
        &self,
        id: AdminId,
        changes: &AdminChanges,
    ) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            r"
            UPDATE branchdesk.admin
            SET name = $1, email = $2, number = $3, password_hash = $4,
                branch_id = $5, active = COALESCE($6, active)
            WHERE id = $7
            RETURNING {ADMIN_COLUMNS}
            "
        ))
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.number)
        .bind(&changes.password_hash)
        .bind(changes.branch_id)
        .bind(changes.active)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_write_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn set_branch(&self, id: AdminId, branch_id: BranchId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE branchdesk.admin SET branch_id = $1 WHERE id = $2")
            .bind(branch_id)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_active(&self, id: AdminId) -> Result<Option<bool>, RepositoryError> {
        let active = sqlx::query_scalar::<_, bool>(
            "UPDATE branchdesk.admin SET active = NOT active WHERE id = $1 RETURNING active",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(active)
    }
}

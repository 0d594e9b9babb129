//! Branch directory repository for `PostgreSQL`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use branchdesk_core::BranchId;

use super::{BranchDirectory, RepositoryError};
use crate::models::Branch;

#[derive(Debug, sqlx::FromRow)]
struct BranchRow {
    id: i32,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<BranchRow> for Branch {
    fn from(row: BranchRow) -> Self {
        Self {
            id: BranchId::new(row.id),
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// Repository for branch database operations.
pub struct BranchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BranchRepository<'a> {
    /// Create a new branch repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all branches, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Branch>, RepositoryError> {
        let rows = sqlx::query_as::<_, BranchRow>(
            "SELECT id, name, created_at FROM branchdesk.branch ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Branch::from).collect())
    }

    /// Create a new branch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str) -> Result<Branch, RepositoryError> {
        let row = sqlx::query_as::<_, BranchRow>(
            r"
            INSERT INTO branchdesk.branch (name)
            VALUES ($1)
            RETURNING id, name, created_at
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}

impl BranchDirectory for BranchRepository<'_> {
    async fn exists(&self, id: BranchId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM branchdesk.branch WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }
}

//! Branch directory commands.
//!
//! # Usage
//!
//! ```bash
//! bd-cli branch create -n "North Office"
//! bd-cli branch list
//! ```

use thiserror::Error;

use branchdesk_admin::db::{BranchRepository, RepositoryError};

/// Errors that can occur during branch operations.
#[derive(Debug, Error)]
pub enum BranchError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("Branch name must not be empty")]
    EmptyName,
}

/// Create a branch and return its ID.
pub async fn create(name: &str) -> Result<i32, BranchError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BranchError::EmptyName);
    }

    let pool = super::connect()
        .await
        .ok_or(BranchError::MissingEnvVar("ADMIN_DATABASE_URL"))??;

    let branch = BranchRepository::new(&pool).create(name).await?;
    tracing::info!("Branch created. ID: {}, Name: {}", branch.id, branch.name);

    Ok(branch.id.as_i32())
}

/// Log every branch, oldest first.
pub async fn list() -> Result<(), BranchError> {
    let pool = super::connect()
        .await
        .ok_or(BranchError::MissingEnvVar("ADMIN_DATABASE_URL"))??;

    let branches = BranchRepository::new(&pool).list_all().await?;
    if branches.is_empty() {
        tracing::info!("No branches yet. Create one with 'branch create'.");
    }
    for branch in branches {
        tracing::info!("{:>6}  {}  (created {})", branch.id.as_i32(), branch.name, branch.created_at);
    }

    Ok(())
}

//! CLI command implementations.

pub mod admin;
pub mod branch;
pub mod migrate;

use sqlx::PgPool;

/// Connect using `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// Returns `None` when neither variable is set.
async fn connect() -> Option<Result<PgPool, sqlx::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;

    tracing::info!("Connecting to database...");
    Some(PgPool::connect(&database_url).await)
}

//! Branch administrator commands.
//!
//! These go through [`AdminService`], so uniqueness, branch and activation
//! rules match the HTTP API exactly.
//!
//! # Usage
//!
//! ```bash
//! BRANCHDESK_ADMIN_PASSWORD='...' bd-cli admin create -n "Ada" -e ada@example.com -p 5550100 -b 1
//! bd-cli admin toggle 7
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string
//! - `ADMIN_JWT_SECRET` - Required by the shared configuration loader
//! - `BRANCHDESK_ADMIN_PASSWORD` - Initial password for `admin create`

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use branchdesk_admin::config::{AdminConfig, ConfigError};
use branchdesk_admin::db::{self, AdminRepository, BranchRepository};
use branchdesk_admin::services::{AdminInput, AdminService, AdminServiceError, JwtTokenIssuer};
use branchdesk_admin::state::PgAdminService;
use branchdesk_core::{AdminId, BranchId, ContactNumber, ContactNumberError, Email, EmailError};

const PASSWORD_ENV: &str = "BRANCHDESK_ADMIN_PASSWORD";

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] ContactNumberError),

    #[error("Admin name must not be empty")]
    EmptyName,

    #[error("{0}")]
    Service(#[from] AdminServiceError),
}

struct Context {
    config: AdminConfig,
    pool: PgPool,
    tokens: JwtTokenIssuer,
}

impl Context {
    async fn load() -> Result<Self, AdminError> {
        let config = AdminConfig::from_env()?;

        tracing::info!("Connecting to database...");
        let pool = db::create_pool(&config.database_url).await?;
        let tokens = JwtTokenIssuer::new(&config.jwt_secret, config.token_ttl);

        Ok(Self {
            config,
            pool,
            tokens,
        })
    }

    fn service(&self) -> PgAdminService<'_> {
        AdminService::new(
            AdminRepository::new(&self.pool),
            BranchRepository::new(&self.pool),
            &self.tokens,
            self.config.policy(),
        )
    }
}

/// Create an active admin and return its ID.
pub async fn create(name: &str, email: &str, number: &str, branch: i32) -> Result<i32, AdminError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AdminError::EmptyName);
    }
    let email = Email::parse(email)?;
    let number = ContactNumber::parse(number)?;
    let password = std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(SecretString::from)
        .ok_or(AdminError::MissingEnvVar(PASSWORD_ENV))?;

    let ctx = Context::load().await?;
    let admin = ctx
        .service()
        .create_admin(AdminInput {
            name: name.to_owned(),
            email,
            number,
            password,
            branch_id: BranchId::new(branch),
        })
        .await?;

    tracing::info!(
        "Admin created successfully! ID: {}, Email: {}, Branch: {}",
        admin.id,
        admin.email,
        branch
    );
    Ok(admin.id.as_i32())
}

/// Flip an admin's activation flag and return the new value.
pub async fn toggle(id: i32) -> Result<bool, AdminError> {
    let ctx = Context::load().await?;
    let active = ctx.service().toggle_active_admin(AdminId::new(id)).await?;

    tracing::info!(
        "Admin {} is now {}",
        id,
        if active { "active" } else { "inactive" }
    );
    Ok(active)
}

//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::db::{AdminRepository, BranchRepository};
use crate::services::{AdminService, JwtTokenIssuer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    tokens: JwtTokenIssuer,
}

/// Admin service bound to the `PostgreSQL` repositories.
pub type PgAdminService<'a> =
    AdminService<'a, AdminRepository<'a>, BranchRepository<'a>, JwtTokenIssuer>;

impl AppState {
    /// Build state from configuration and an open pool.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let tokens = JwtTokenIssuer::new(&config.jwt_secret, config.token_ttl);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn tokens(&self) -> &JwtTokenIssuer {
        &self.inner.tokens
    }

    /// Admin service over this state's pool, for the lifetime of one request.
    #[must_use]
    pub fn admin_service(&self) -> PgAdminService<'_> {
        AdminService::new(
            AdminRepository::new(self.pool()),
            BranchRepository::new(self.pool()),
            self.tokens(),
            self.config().policy(),
        )
    }
}

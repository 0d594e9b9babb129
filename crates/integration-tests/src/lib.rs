//! Integration tests for Branchdesk.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no database needed)
//! cargo test -p branchdesk-integration-tests
//!
//! # Live server tests (database migrated, admin server running)
//! cargo test -p branchdesk-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `admin_service` - Account rules over the in-memory store
//! - `http_api` - Router, validation and response envelope, in process
//! - `live_server` - End to end against a running admin server

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use secrecy::SecretString;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use branchdesk_admin::config::AdminConfig;
use branchdesk_admin::db::MemoryStore;
use branchdesk_admin::routes;
use branchdesk_admin::services::{AdminInput, AdminPolicy, AdminService, JwtTokenIssuer};
use branchdesk_admin::state::AppState;
use branchdesk_core::{BranchId, ContactNumber, Email};

/// High-entropy signing key for tests.
pub const TEST_JWT_SECRET: &str = "q8#Lm2!vR7@xT4$kW9^pN1&zC6*hB3%f";

/// Password used by [`admin_input`].
pub const TEST_PASSWORD: &str = "correct horse battery";

/// Token issuer with a ten minute lifetime.
#[must_use]
pub fn token_issuer() -> JwtTokenIssuer {
    JwtTokenIssuer::new(&SecretString::from(TEST_JWT_SECRET), Duration::from_secs(600))
}

/// Admin service over a shared in-memory store.
#[must_use]
pub fn memory_service<'a>(
    store: &MemoryStore,
    tokens: &'a JwtTokenIssuer,
) -> AdminService<'a, MemoryStore, MemoryStore, JwtTokenIssuer> {
    AdminService::new(store.clone(), store.clone(), tokens, AdminPolicy::default())
}

/// Valid admin input.
///
/// # Panics
///
/// Panics if `email` or `number` is malformed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn admin_input(email: &str, number: &str, branch_id: BranchId) -> AdminInput {
    AdminInput {
        name: "Branch Admin".to_owned(),
        email: Email::parse(email).expect("valid test email"),
        number: ContactNumber::parse(number).expect("valid test number"),
        password: SecretString::from(TEST_PASSWORD),
        branch_id,
    }
}

/// Router over a pool that never connects.
///
/// Requests rejected before reaching the database behave normally; anything
/// that queries fails once the acquire timeout elapses.
///
/// # Panics
///
/// Panics if the placeholder database URL cannot be parsed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn offline_router() -> Router {
    let config = AdminConfig {
        database_url: SecretString::from("postgres://branchdesk@127.0.0.1:1/branchdesk"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 3001,
        jwt_secret: SecretString::from(TEST_JWT_SECRET),
        token_ttl: Duration::from_secs(600),
        reactivate_on_update: true,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    };
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://branchdesk@127.0.0.1:1/branchdesk")
        .expect("lazy pool");

    routes::routes().with_state(AppState::new(config, pool))
}

/// Send one request through `app`.
///
/// # Panics
///
/// Panics if the request cannot be built or the router fails.
#[allow(clippy::expect_used)]
pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    app.oneshot(request).await.expect("router is infallible")
}

/// Read a response as `(status, json body)`.
///
/// # Panics
///
/// Panics if the body is not JSON.
#[allow(clippy::expect_used)]
pub async fn json_body(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

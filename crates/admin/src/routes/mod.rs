//! HTTP route handlers for branch administration.
//!
//! # Route Structure
//!
//! ```text
//! POST  /admins                               - Create admin
//! POST  /admins/login                         - Log in, returns a bearer token
//! GET   /admins/{id}                          - Get admin
//! PUT   /admins/{id}                          - Replace admin fields and branch
//! PATCH /admins/{admin_id}/branch/{branch_id} - Move admin to a branch
//! PATCH /admins/{id}/toggle-active            - Flip activation flag
//! GET   /branches/{branch_id}/admins          - Admins of a branch
//! ```
//!
//! Every response uses the [`ApiResponse`] envelope.

pub mod admins;
mod response;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

pub use response::ApiResponse;

/// Build the admin API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admins", post(admins::create_admin))
        .route("/admins/login", post(admins::login_admin))
        .route(
            "/admins/{id}",
            get(admins::get_single_admin).put(admins::update_admin),
        )
        .route(
            "/admins/{admin_id}/branch/{branch_id}",
            patch(admins::update_admin_branch),
        )
        .route(
            "/admins/{id}/toggle-active",
            patch(admins::toggle_active_admin),
        )
        .route("/branches/{branch_id}/admins", get(admins::get_all_admin))
}

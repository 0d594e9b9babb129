//! Admin HTTP API, in process.
//!
//! The router runs over a pool that cannot connect, so these tests cover
//! everything decided before the store is reached, plus the failure path
//! when it is unreachable.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use branchdesk_integration_tests::{json_body, offline_router, send};

fn assert_failure(body: &serde_json::Value, statuscode: u16, kind: &str) {
    assert_eq!(body["status"], false);
    assert_eq!(body["statuscode"], statuscode);
    assert_eq!(body["kind"], kind);
    assert!(body.get("data").is_none());
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_create_with_missing_name_is_422() {
    let response = send(
        offline_router(),
        "POST",
        "/admins",
        Some(json!({
            "email": "a@x.com",
            "number": "111",
            "password": "pw",
            "branch": 1,
        })),
    )
    .await;

    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_failure(&body, 422, "ValidationFailed");
    assert_eq!(body["message"], "name is required");
}

#[tokio::test]
async fn test_update_with_bad_number_is_422() {
    let response = send(
        offline_router(),
        "PUT",
        "/admins/3",
        Some(json!({
            "name": "Ada",
            "Email": "a@x.com",
            "Number": "call me",
            "Password": "pw",
            "branch": 1,
        })),
    )
    .await;

    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_failure(&body, 422, "ValidationFailed");
    assert!(body["message"].as_str().unwrap().starts_with("invalid number"));
}

#[tokio::test]
async fn test_missing_json_body_is_422_envelope() {
    let response = send(offline_router(), "POST", "/admins/login", None).await;

    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_failure(&body, 422, "ValidationFailed");
}

#[tokio::test]
async fn test_login_with_bad_email_is_422() {
    let response = send(
        offline_router(),
        "POST",
        "/admins/login",
        Some(json!({ "Email": "nobody", "Password": "pw" })),
    )
    .await;

    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().starts_with("invalid email"));
}

#[tokio::test]
async fn test_non_numeric_path_id_is_422() {
    for (method, uri) in [
        ("GET", "/admins/abc"),
        ("PATCH", "/admins/abc/toggle-active"),
        ("PATCH", "/admins/1/branch/north"),
        ("GET", "/branches/north/admins"),
    ] {
        let (status, body) = json_body(send(offline_router(), method, uri, None).await).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{method} {uri}");
        assert_failure(&body, 422, "ValidationFailed");
    }
}

#[tokio::test]
async fn test_unreachable_store_is_generic_500() {
    let (status, body) = json_body(send(offline_router(), "GET", "/admins/1", None).await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_failure(&body, 500, "PersistenceError");
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn test_unrouted_requests() {
    let response = send(offline_router(), "DELETE", "/admins/1", None).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = send(offline_router(), "GET", "/superadmins", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

//! JSON response envelope shared by every admin endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::services::ErrorKind;

/// `{ status, statuscode, message, kind?, data?, token? }`
///
/// Successful responses carry `status: true` and HTTP 200. Failures carry
/// `status: false`, the mapped HTTP status, and the error `kind`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    pub statuscode: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Success carrying a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            statuscode: StatusCode::OK.as_u16(),
            message: message.into(),
            kind: None,
            data: Some(data),
            token: None,
        }
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }
}

impl ApiResponse<()> {
    /// Success with no payload.
    pub fn ack(message: impl Into<String>) -> Self {
        Self {
            status: true,
            statuscode: StatusCode::OK.as_u16(),
            message: message.into(),
            kind: None,
            data: None,
            token: None,
        }
    }

    /// Failure envelope.
    pub fn failure(status: StatusCode, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: false,
            statuscode: status.as_u16(),
            message: message.into(),
            kind: Some(kind),
            data: None,
            token: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.statuscode).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_omits_absent_fields() {
        let json = serde_json::to_value(ApiResponse::ok("Admins fetched successfully", vec![1, 2]))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": true,
                "statuscode": 200,
                "message": "Admins fetched successfully",
                "data": [1, 2],
            })
        );
    }

    #[test]
    fn test_token_is_top_level() {
        let json =
            serde_json::to_value(ApiResponse::ok("Login successful", 7).with_token("t0k".into()))
                .unwrap();
        assert_eq!(json["token"], "t0k");
        assert_eq!(json["data"], 7);
    }

    #[test]
    fn test_failure_sets_status_code_and_kind() {
        let envelope =
            ApiResponse::failure(StatusCode::CONFLICT, ErrorKind::DuplicateEmail, "email already exists");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], false);
        assert_eq!(json["statuscode"], 409);
        assert_eq!(json["kind"], "DuplicateEmail");
        assert!(json.get("data").is_none());

        assert_eq!(envelope.into_response().status(), StatusCode::CONFLICT);
    }
}

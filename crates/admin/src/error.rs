//! Unified error handling for the admin HTTP surface.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::routes::ApiResponse;
use crate::services::{AdminServiceError, ErrorKind};

/// Application-level error type for admin endpoints.
#[derive(Debug, Error)]
pub enum AppError {
    /// An admin operation failed.
    #[error(transparent)]
    Service(#[from] AdminServiceError),

    /// Request body or path failed validation.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Service(err) => err.kind(),
            Self::Validation(_) => ErrorKind::ValidationFailed,
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::DuplicateEmail | ErrorKind::DuplicateNumber => StatusCode::CONFLICT,
            ErrorKind::BranchNotFound | ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Inactive => StatusCode::FORBIDDEN,
            ErrorKind::InvalidCredential => StatusCode::UNAUTHORIZED,
            ErrorKind::PersistenceError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = self.status();

        // Don't expose internal error details to clients
        let message = if kind == ErrorKind::PersistenceError {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        ApiResponse::failure(status, kind, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RepositoryError;

    #[test]
    fn test_service_messages_pass_through() {
        let err = AppError::from(AdminServiceError::Inactive);
        assert_eq!(err.to_string(), "admin not activated; contact a super admin");

        let err = AppError::Validation("email is required".to_string());
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: impl Into<AppError>) -> StatusCode {
            err.into().into_response().status()
        }

        assert_eq!(
            get_status(AppError::Validation("bad".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(get_status(AdminServiceError::DuplicateEmail), StatusCode::CONFLICT);
        assert_eq!(get_status(AdminServiceError::DuplicateNumber), StatusCode::CONFLICT);
        assert_eq!(get_status(AdminServiceError::BranchNotFound), StatusCode::NOT_FOUND);
        assert_eq!(get_status(AdminServiceError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(get_status(AdminServiceError::Inactive), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(AdminServiceError::InvalidCredential),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AdminServiceError::from(RepositoryError::DataCorruption(
                "bad".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_persistence_detail_is_hidden() {
        let err = AppError::from(AdminServiceError::from(RepositoryError::DataCorruption(
            "invalid email in database".to_string(),
        )));
        assert_eq!(err.kind(), ErrorKind::PersistenceError);
        assert!(err.to_string().contains("invalid email in database"));
    }
}
